// Reenact: Harness Tasks
//
// Each task runs on its own named thread and talks to the next one over an
// `mpsc` channel:
//
//   telemetry --SessionEvent--> gesture --MatchOutcome--> feedback

pub mod feedback;
pub mod gesture;
pub mod telemetry;
