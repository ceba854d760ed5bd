// Reenact: Host Harness
//
// Drives the gesture engine from a line-oriented stream so it can be
// exercised without the browser or the ESP32:
//
//   $ printf 'stage:stage4-1-1\nax:-9.75,ay:-1.02,az:0.57,gx:0.12,gy:0.35,gz:-0.25\nstop\n' | reenact
//
// Input lines are telemetry frames (text or JSON) or control lines
// (`stage:<id>`, `arm:<gesture>`, `stop`). Results and device commands are
// written to stdout as JSON lines; logs go to stderr (`RUST_LOG` filters).

use std::io;
use std::sync::mpsc;
use std::thread;

use anyhow::{anyhow, Context};

use reenact::config::*;
use reenact::tasks;
use reenact::tasks::feedback::WriterSink;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Reenact gesture harness starting");

    // ---- Channels ---------------------------------------------------------
    let (session_tx, session_rx) = mpsc::channel();
    let (outcome_tx, outcome_rx) = mpsc::channel();

    // ---- Spawn tasks ------------------------------------------------------

    // Telemetry task: stdin -> session events.
    let telemetry = thread::Builder::new()
        .name("telemetry".into())
        .stack_size(STACK_TELEMETRY)
        .spawn(move || {
            let stdin = io::stdin();
            tasks::telemetry::telemetry_task(stdin.lock(), session_tx);
        })
        .context("spawning telemetry task")?;

    // Gesture task: collector + matcher.
    let gesture = thread::Builder::new()
        .name("gesture".into())
        .stack_size(STACK_GESTURE)
        .spawn(move || {
            tasks::gesture::gesture_task(session_rx, outcome_tx);
        })
        .context("spawning gesture task")?;

    // Feedback task: results and device commands -> stdout.
    let feedback = thread::Builder::new()
        .name("feedback".into())
        .stack_size(STACK_FEEDBACK)
        .spawn(move || {
            let mut sink = WriterSink::new(io::stdout());
            tasks::feedback::feedback_task(outcome_rx, &mut sink);
        })
        .context("spawning feedback task")?;

    // Each task exits once its input channel closes, so joining in pipeline
    // order drains everything after stdin reaches EOF.
    for (name, handle) in [("telemetry", telemetry), ("gesture", gesture), ("feedback", feedback)] {
        handle
            .join()
            .map_err(|_| anyhow!("{} task panicked", name))?;
    }

    log::info!("Input exhausted, shutting down");
    Ok(())
}
