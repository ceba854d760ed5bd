//! Gesture capture and matching for the memory-room installation.
//!
//! A player re-enacts an everyday action (drinking from a cup, cutting with
//! a knife, answering a phone, turning a monitor) while holding an ESP32
//! controller with an MPU6050. The controller streams 6-axis readings; this
//! crate buffers a fixed window of them, scores the window against a
//! hand-recorded reference trace and returns a percentage plus a quality
//! tier, along with the LED/vibration commands to send back.
//!
//! ```
//! use reenact::{GestureKind, GestureSession, MatchTier, RawMessage};
//!
//! let mut session = GestureSession::new();
//! session.on_stage_change("stage4-1-1"); // arms the cup gesture
//! session.ingest(&RawMessage::from("ax:-9.75,ay:-1.02,az:0.57,gx:0.12,gy:0.35,gz:-0.25"));
//!
//! let outcome = session.stop().unwrap();
//! assert_eq!(outcome.gesture, GestureKind::Cup);
//! assert_eq!(outcome.result.tier, MatchTier::PerfectMatch);
//! ```
//!
//! Transport (BLE, WebSocket) and rendering are the application's business.
//! Telemetry comes in as [`RawMessage`]s; feedback goes out through a
//! [`FeedbackSink`].

pub mod collector;
pub mod config;
pub mod error;
pub mod events;
pub mod feedback;
pub mod matcher;
pub mod session;
pub mod tasks;
pub mod telemetry;
pub mod templates;

pub use collector::{CollectorState, CompletedCapture, SampleCollector};
pub use error::MatchError;
pub use events::{GestureKind, MotionSample, SessionEvent, Vec3};
pub use feedback::{feedback_plan, FeedbackCommand, FeedbackSink, FeedbackStep};
pub use matcher::{match_gesture, match_kind, MatchResult, MatchTier, ProgressBand, ReferenceFeatures};
pub use session::{GestureSession, MatchOutcome};
pub use telemetry::{parse_sample, ParsedSample, RawMessage};
pub use templates::GestureTemplate;
