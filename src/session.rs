// Reenact: Gesture Session
//
// Single owner of the capture state for one installation. Stage changes
// arm the collector, telemetry fills it, and each completed capture is
// scored and paired with its feedback plan. Everything here is synchronous;
// the caller feeds events in delivery order.

use crate::collector::{CollectorState, CompletedCapture, SampleCollector};
use crate::events::{GestureKind, SessionEvent};
use crate::feedback::{feedback_plan, FeedbackStep};
use crate::matcher::{match_kind, MatchResult};
use crate::telemetry::RawMessage;

/// Result of one capture session, ready for the UI and the device.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    pub gesture: GestureKind,
    pub sample_count: usize,
    pub stopped_early: bool,
    pub result: MatchResult,
    pub feedback: Vec<FeedbackStep>,
}

#[derive(Debug, Default)]
pub struct GestureSession {
    collector: SampleCollector,
    last_outcome: Option<MatchOutcome>,
}

impl GestureSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collector(collector: SampleCollector) -> Self {
        Self {
            collector,
            last_outcome: None,
        }
    }

    pub fn state(&self) -> CollectorState {
        self.collector.state()
    }

    pub fn collector(&self) -> &SampleCollector {
        &self.collector
    }

    /// Most recent outcome, kept until the next one replaces it.
    pub fn last_outcome(&self) -> Option<&MatchOutcome> {
        self.last_outcome.as_ref()
    }

    /// React to the installation entering `stage`. Only the four
    /// action-reproduction stages arm a capture; returns whether one was
    /// armed. Other stages leave a running capture alone.
    pub fn on_stage_change(&mut self, stage: &str) -> bool {
        match GestureKind::from_stage(stage) {
            Some(gesture) => {
                log::info!("Stage {} asks for the {} gesture", stage, gesture);
                self.collector.arm(gesture);
                true
            }
            None => {
                log::debug!("Stage {} has no gesture", stage);
                false
            }
        }
    }

    pub fn arm(&mut self, gesture: GestureKind) {
        self.collector.arm(gesture);
    }

    pub fn ingest(&mut self, message: &RawMessage) -> Option<MatchOutcome> {
        let capture = self.collector.ingest(message)?;
        Some(self.finish(capture))
    }

    pub fn stop(&mut self) -> Option<MatchOutcome> {
        let capture = self.collector.stop()?;
        Some(self.finish(capture))
    }

    /// Dispatch one event. Returns an outcome when the event completed a
    /// capture.
    pub fn handle(&mut self, event: &SessionEvent) -> Option<MatchOutcome> {
        match event {
            SessionEvent::StageChanged(stage) => {
                self.on_stage_change(stage);
                None
            }
            SessionEvent::Arm(gesture) => {
                self.arm(*gesture);
                None
            }
            SessionEvent::Telemetry(message) => self.ingest(message),
            SessionEvent::Stop => self.stop(),
        }
    }

    fn finish(&mut self, capture: CompletedCapture) -> MatchOutcome {
        let result = match_kind(capture.gesture, &capture.samples);
        log::info!(
            "{}: {:.1}% ({}) from {} samples",
            capture.gesture,
            result.percentage,
            result.tier,
            capture.samples.len()
        );

        let outcome = MatchOutcome {
            gesture: capture.gesture,
            sample_count: capture.samples.len(),
            stopped_early: capture.stopped_early,
            result,
            feedback: feedback_plan(&result),
        };
        self.last_outcome = Some(outcome.clone());
        outcome
    }
}
