// Reenact: Telemetry Task
//
// Reads newline-delimited input (stdin in the harness) and turns each line
// into a session event for the gesture task. Besides raw telemetry the
// stream carries control lines:
//
//   stage:<stage-id>   the installation changed stage
//   arm:<gesture>      start a capture directly
//   stop               finish the running capture early

use std::io::BufRead;
use std::sync::mpsc::Sender;

use crate::events::{GestureKind, SessionEvent};
use crate::telemetry::RawMessage;

pub fn telemetry_task<R: BufRead>(reader: R, session_tx: Sender<SessionEvent>) {
    log::info!("Telemetry task started");

    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::warn!("Telemetry read error: {}", e);
                break;
            }
        };

        let Some(event) = parse_line(&line) else {
            continue;
        };

        if session_tx.send(event).is_err() {
            // Receiver dropped: gesture task has exited. Shut down cleanly.
            log::warn!("Session channel closed, exiting telemetry task");
            return;
        }
    }

    log::info!("Telemetry stream ended");
}

/// Classify one input line. Blank lines and unknown gestures yield `None`.
pub fn parse_line(line: &str) -> Option<SessionEvent> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if line == "stop" {
        return Some(SessionEvent::Stop);
    }

    if let Some(stage) = line.strip_prefix("stage:") {
        return Some(SessionEvent::StageChanged(stage.trim().to_owned()));
    }

    if let Some(label) = line.strip_prefix("arm:") {
        let label = label.trim();
        return match GestureKind::parse(label) {
            Some(gesture) => Some(SessionEvent::Arm(gesture)),
            None => {
                log::warn!("Cannot arm unknown gesture {:?}", label);
                None
            }
        };
    }

    Some(SessionEvent::Telemetry(RawMessage::from_line(line)))
}
