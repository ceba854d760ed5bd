// Reenact: Device Feedback
//
// After a match the installation lights the controller's LED and pulses its
// vibration motor. The core only decides *what* to send and *when*; the
// transport sits behind `FeedbackSink` and is supplied by the application.
// Commands are fire-and-forget: a failed send is logged and skipped.

use std::fmt;
use std::thread;
use std::time::Duration;

use crate::config::*;
use crate::matcher::{MatchResult, MatchTier};

/// A single text command understood by the ESP32 firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackCommand {
    /// `L<n>`: switch the indicator LED to mode `n`.
    Led(u8),
    /// `M<n>`: run vibration pattern `n`.
    Motor(u8),
}

impl fmt::Display for FeedbackCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Led(mode)     => write!(f, "L{}", mode),
            Self::Motor(pattern) => write!(f, "M{}", pattern),
        }
    }
}

/// One command plus the pause to observe before sending it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackStep {
    pub delay: Duration,
    pub command: FeedbackCommand,
}

/// Outbound half of the device connection.
pub trait FeedbackSink {
    fn send(&mut self, command: FeedbackCommand) -> anyhow::Result<()>;
}

/// Records commands instead of sending them.
impl FeedbackSink for Vec<FeedbackCommand> {
    fn send(&mut self, command: FeedbackCommand) -> anyhow::Result<()> {
        self.push(command);
        Ok(())
    }
}

/// Commands to send for `result`: success LED straight away, then a double
/// vibration. A capture that produced no data gets no feedback.
pub fn feedback_plan(result: &MatchResult) -> Vec<FeedbackStep> {
    if result.tier == MatchTier::InsufficientData {
        return Vec::new();
    }

    vec![
        FeedbackStep {
            delay: Duration::ZERO,
            command: FeedbackCommand::Led(LED_MODE_SUCCESS),
        },
        FeedbackStep {
            delay: Duration::from_millis(FEEDBACK_MOTOR_DELAY_MS),
            command: FeedbackCommand::Motor(MOTOR_PATTERN_DOUBLE),
        },
    ]
}

/// Play `plan` into `sink`, sleeping between steps (blocks the calling
/// thread). Returns how many commands were accepted by the sink.
pub fn deliver<S: FeedbackSink + ?Sized>(plan: &[FeedbackStep], sink: &mut S) -> usize {
    let mut sent = 0;
    for step in plan {
        if !step.delay.is_zero() {
            thread::sleep(step.delay);
        }
        match sink.send(step.command) {
            Ok(()) => sent += 1,
            Err(e) => log::warn!("Feedback command {} not sent: {}", step.command, e),
        }
    }
    sent
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Disconnected;

    impl FeedbackSink for Disconnected {
        fn send(&mut self, _command: FeedbackCommand) -> anyhow::Result<()> {
            anyhow::bail!("device not connected")
        }
    }

    #[test]
    fn test_wire_format() {
        assert_eq!(FeedbackCommand::Led(3).to_string(), "L3");
        assert_eq!(FeedbackCommand::Motor(2).to_string(), "M2");
    }

    #[test]
    fn test_plan_after_scored_match() {
        let result = MatchResult { percentage: 42.0, tier: MatchTier::SomeDifference };
        let plan = feedback_plan(&result);
        assert_eq!(
            plan.iter().map(|s| s.command).collect::<Vec<_>>(),
            vec![FeedbackCommand::Led(3), FeedbackCommand::Motor(2)]
        );
        assert_eq!(plan[0].delay, Duration::ZERO);
        assert_eq!(plan[1].delay, Duration::from_millis(200));

        assert_eq!(feedback_plan(&MatchResult::computation_error()).len(), 2);
    }

    #[test]
    fn test_no_feedback_without_data() {
        assert!(feedback_plan(&MatchResult::insufficient_data()).is_empty());
    }

    #[test]
    fn test_deliver_records_commands() {
        let plan = [FeedbackStep {
            delay: Duration::ZERO,
            command: FeedbackCommand::Led(1),
        }];
        let mut sent = Vec::new();
        assert_eq!(deliver(&plan, &mut sent), 1);
        assert_eq!(sent, vec![FeedbackCommand::Led(1)]);
    }

    #[test]
    fn test_deliver_swallows_send_errors() {
        let plan = [
            FeedbackStep { delay: Duration::ZERO, command: FeedbackCommand::Led(3) },
            FeedbackStep { delay: Duration::from_millis(1), command: FeedbackCommand::Motor(2) },
        ];
        assert_eq!(deliver(&plan, &mut Disconnected), 0);
    }
}
