// Reenact: Gesture Task
//
// Owns the gesture session. Consumes session events in arrival order and
// forwards every finished match to the feedback task.

use std::sync::mpsc::{Receiver, Sender};

use crate::events::SessionEvent;
use crate::session::{GestureSession, MatchOutcome};

pub fn gesture_task(session_rx: Receiver<SessionEvent>, outcome_tx: Sender<MatchOutcome>) {
    log::info!("Gesture task started");

    let mut session = GestureSession::new();

    // Block until the next event arrives; a closed channel ends the task.
    for event in session_rx.iter() {
        let Some(outcome) = session.handle(&event) else {
            continue;
        };

        if outcome_tx.send(outcome).is_err() {
            log::warn!("Outcome channel closed, exiting gesture task");
            return;
        }
    }

    if session.collector().is_collecting() {
        log::info!(
            "Input ended mid-capture ({} samples buffered, not scored)",
            session.collector().buffered().len()
        );
    }
    log::info!("Gesture task finished");
}
