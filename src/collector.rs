// Reenact: Sample Collector
//
// Buffers exactly `CAPTURE_WINDOW_SAMPLES` motion samples per capture
// session. The session state lives here rather than in free-floating flags:
//
//   Idle --arm--> Collecting --(window full | stop)--> Complete --arm--> Collecting
//
// Completion is handed back to the caller as the return value of the call
// that caused it (`ingest`, `push` or `stop`), so there is exactly one
// consumer and it sees each session at most once. Re-arming while
// collecting cancels the running session: its samples are discarded and it
// never completes.

use std::time::Instant;

use crate::config::CAPTURE_WINDOW_SAMPLES;
use crate::events::{GestureKind, MotionSample};
use crate::telemetry::{parse_sample, ParsedSample, RawMessage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectorState {
    Idle,
    Collecting { gesture: GestureKind },
    Complete { gesture: GestureKind },
}

/// A finished capture, owned by whoever consumes it.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedCapture {
    pub gesture: GestureKind,
    pub samples: Vec<MotionSample>,
    /// `true` when `stop` ended the session before the window filled.
    pub stopped_early: bool,
}

#[derive(Debug)]
pub struct SampleCollector {
    state: CollectorState,
    buffer: Vec<MotionSample>,
    capacity: usize,
    armed_at: Instant,
}

impl Default for SampleCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleCollector {
    pub fn new() -> Self {
        Self::with_capacity(CAPTURE_WINDOW_SAMPLES)
    }

    /// Collector with a non-standard window length. A zero capacity is
    /// bumped to one so a session can always complete.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            state: CollectorState::Idle,
            buffer: Vec::with_capacity(capacity),
            capacity,
            armed_at: Instant::now(),
        }
    }

    pub fn state(&self) -> CollectorState {
        self.state
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_collecting(&self) -> bool {
        matches!(self.state, CollectorState::Collecting { .. })
    }

    /// Samples gathered so far in the running session.
    pub fn buffered(&self) -> &[MotionSample] {
        &self.buffer
    }

    /// Start a capture session for `gesture`, cancelling any running one.
    pub fn arm(&mut self, gesture: GestureKind) {
        if let CollectorState::Collecting { gesture: previous } = self.state {
            log::info!(
                "Re-armed while collecting {} ({} samples discarded)",
                previous,
                self.buffer.len()
            );
        }

        self.buffer.clear();
        self.armed_at = Instant::now();
        self.state = CollectorState::Collecting { gesture };
        log::info!("Capturing {} ({} samples)", gesture, self.capacity);
    }

    /// Back to `Idle` without completing anything.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.state = CollectorState::Idle;
    }

    /// Parse and append one telemetry message. Returns the finished
    /// capture when this sample fills the window.
    pub fn ingest(&mut self, message: &RawMessage) -> Option<CompletedCapture> {
        if !self.is_collecting() {
            return None;
        }

        match parse_sample(message) {
            ParsedSample::Sample(sample) => self.push(sample),
            ParsedSample::Unparseable => {
                log::debug!("Ignoring unrecognised telemetry: {:?}", message);
                None
            }
        }
    }

    /// Append an already-parsed sample.
    pub fn push(&mut self, mut sample: MotionSample) -> Option<CompletedCapture> {
        let CollectorState::Collecting { gesture } = self.state else {
            return None;
        };

        sample.captured_at_ms = self.armed_at.elapsed().as_millis() as u64;
        self.buffer.push(sample);
        log::debug!("{} sample {}/{}", gesture, self.buffer.len(), self.capacity);

        if self.buffer.len() >= self.capacity {
            log::info!("Captured {} samples for {}", self.buffer.len(), gesture);
            Some(self.complete(gesture, false))
        } else {
            None
        }
    }

    /// Finish the running session now, with whatever has been buffered
    /// (possibly nothing). No-op outside `Collecting`.
    pub fn stop(&mut self) -> Option<CompletedCapture> {
        let CollectorState::Collecting { gesture } = self.state else {
            log::debug!("Stop requested while not collecting");
            return None;
        };

        log::info!(
            "Capture of {} stopped at {}/{} samples",
            gesture,
            self.buffer.len(),
            self.capacity
        );
        Some(self.complete(gesture, true))
    }

    fn complete(&mut self, gesture: GestureKind, stopped_early: bool) -> CompletedCapture {
        self.state = CollectorState::Complete { gesture };
        let samples = std::mem::replace(&mut self.buffer, Vec::with_capacity(self.capacity));
        CompletedCapture {
            gesture,
            samples,
            stopped_early,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Vec3;
    use proptest::prelude::*;
    use serde_json::json;

    fn frame(i: usize) -> RawMessage {
        RawMessage::Text(format!("ax:{},ay:0,az:0,gx:0,gy:0,gz:0", i))
    }

    #[test]
    fn test_idle_collector_ignores_samples() {
        let mut collector = SampleCollector::new();
        assert_eq!(collector.ingest(&frame(1)), None);
        assert!(collector.buffered().is_empty());
        assert_eq!(collector.state(), CollectorState::Idle);
    }

    #[test]
    fn test_completes_once_window_is_full() {
        let mut collector = SampleCollector::new();
        collector.arm(GestureKind::Knife);

        for i in 0..CAPTURE_WINDOW_SAMPLES - 1 {
            assert_eq!(collector.ingest(&frame(i)), None);
        }
        let done = collector
            .ingest(&frame(CAPTURE_WINDOW_SAMPLES - 1))
            .expect("window should complete");

        assert_eq!(done.gesture, GestureKind::Knife);
        assert_eq!(done.samples.len(), CAPTURE_WINDOW_SAMPLES);
        assert!(!done.stopped_early);
        for (i, s) in done.samples.iter().enumerate() {
            assert_eq!(s.acceleration, Vec3::new(i as f64, 0.0, 0.0));
        }

        assert_eq!(collector.state(), CollectorState::Complete { gesture: GestureKind::Knife });
        assert!(collector.buffered().is_empty());
        assert_eq!(collector.ingest(&frame(99)), None);
        assert_eq!(collector.stop(), None);
    }

    #[test]
    fn test_rearm_discards_previous_session() {
        let mut collector = SampleCollector::new();
        let mut completions = Vec::new();

        collector.arm(GestureKind::Cup);
        completions.extend(collector.ingest(&frame(1000)));
        collector.arm(GestureKind::Phone);
        for i in 0..CAPTURE_WINDOW_SAMPLES {
            completions.extend(collector.ingest(&frame(i)));
        }

        assert_eq!(completions.len(), 1);
        let done = &completions[0];
        assert_eq!(done.gesture, GestureKind::Phone);
        assert_eq!(done.samples.len(), CAPTURE_WINDOW_SAMPLES);
        assert_eq!(done.samples[0].acceleration.x, 0.0);
    }

    #[test]
    fn test_stop_completes_early() {
        let mut collector = SampleCollector::new();
        collector.arm(GestureKind::Monitor);
        collector.ingest(&frame(1));
        collector.ingest(&frame(2));

        let done = collector.stop().expect("stop should complete");
        assert_eq!(done.samples.len(), 2);
        assert!(done.stopped_early);
        assert_eq!(collector.stop(), None);
    }

    #[test]
    fn test_stop_with_empty_buffer_still_completes() {
        let mut collector = SampleCollector::new();
        collector.arm(GestureKind::Cup);
        let done = collector.stop().expect("stop should complete");
        assert!(done.samples.is_empty());
        assert_eq!(done.gesture, GestureKind::Cup);
    }

    #[test]
    fn test_unparseable_messages_are_not_buffered() {
        let mut collector = SampleCollector::new();
        collector.arm(GestureKind::Cup);
        collector.ingest(&RawMessage::Structured(json!(null)));
        collector.ingest(&RawMessage::Structured(json!([1, 2])));
        collector.ingest(&"hello".into());
        assert!(collector.buffered().is_empty());

        collector.ingest(&RawMessage::Structured(json!({})));
        assert_eq!(collector.buffered().len(), 1);
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut collector = SampleCollector::new();
        collector.arm(GestureKind::Cup);
        collector.ingest(&frame(1));
        collector.reset();
        assert_eq!(collector.state(), CollectorState::Idle);
        assert!(collector.buffered().is_empty());
        assert_eq!(collector.stop(), None);
    }

    #[test]
    fn test_custom_capacity() {
        let mut collector = SampleCollector::with_capacity(0);
        assert_eq!(collector.capacity(), 1);
        collector.arm(GestureKind::Cup);
        assert!(collector.ingest(&frame(1)).is_some());
    }

    fn arb_message() -> impl Strategy<Value = RawMessage> {
        prop_oneof![
            ".*".prop_map(RawMessage::Text),
            Just(RawMessage::Structured(json!(null))),
            Just(RawMessage::Structured(json!({}))),
            any::<f64>().prop_map(|v| RawMessage::Structured(json!(v))),
            (any::<i32>(), ".{0,6}").prop_map(|(n, s)| RawMessage::Structured(json!({"ax": n, "gy": s}))),
            "[a-z]{0,3}:[-0-9.NaN]{0,6}".prop_map(RawMessage::Text),
        ]
    }

    proptest! {
        #[test]
        fn test_buffer_never_exceeds_window(messages in proptest::collection::vec(arb_message(), 0..60)) {
            let mut collector = SampleCollector::new();
            collector.arm(GestureKind::Cup);
            let mut completions = 0;
            for message in &messages {
                if let Some(done) = collector.ingest(message) {
                    prop_assert_eq!(done.samples.len(), CAPTURE_WINDOW_SAMPLES);
                    completions += 1;
                }
                prop_assert!(collector.buffered().len() <= CAPTURE_WINDOW_SAMPLES);
            }
            prop_assert!(completions <= 1);
        }
    }
}
