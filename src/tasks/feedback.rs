// Reenact: Feedback Task
//
// Stand-in for the UI and the device link. For every match outcome it
// prints a JSON result line (what the UI would render) and then plays the
// feedback plan, printing each device command as it would be sent.

use std::io::Write;
use std::sync::mpsc::Receiver;

use serde_json::json;

use crate::feedback::{deliver, FeedbackCommand, FeedbackSink};
use crate::session::MatchOutcome;

/// Writes each command as a JSON line.
pub struct WriterSink<W: Write> {
    out: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_outcome(&mut self, outcome: &MatchOutcome) -> anyhow::Result<()> {
        let line = json!({
            "event": "match",
            "gesture": outcome.gesture.label(),
            "samples": outcome.sample_count,
            "stopped_early": outcome.stopped_early,
            "result": outcome.result,
            "band": outcome.result.progress_band(),
            "high_tier": outcome.result.is_high_tier(),
            "verdict": outcome.result.verdict(),
        });
        writeln!(self.out, "{}", line)?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> FeedbackSink for WriterSink<W> {
    fn send(&mut self, command: FeedbackCommand) -> anyhow::Result<()> {
        writeln!(self.out, "{}", json!({"event": "command", "command": command.to_string()}))?;
        self.out.flush()?;
        Ok(())
    }
}

pub fn feedback_task<W: Write>(outcome_rx: Receiver<MatchOutcome>, sink: &mut WriterSink<W>) {
    log::info!("Feedback task started");

    for outcome in outcome_rx.iter() {
        if let Err(e) = sink.write_outcome(&outcome) {
            log::error!("Failed to publish match result: {}", e);
        }

        let sent = deliver(&outcome.feedback, sink);
        log::debug!("Sent {}/{} feedback commands", sent, outcome.feedback.len());
    }

    log::info!("Outcome channel closed, exiting feedback task");
}
