// Reenact: Capture, Scoring & Feedback Configuration
//
// Every constant here is part of the scoring contract. The weights and the
// boost were tuned by hand against the reference tables in `templates.rs`;
// changing any of them shifts every score and needs new calibration data.

// ---------------------------------------------------------------------------
// Capture window
// ---------------------------------------------------------------------------
pub const CAPTURE_WINDOW_SAMPLES: usize = 20;  // Same length as each reference template

// ---------------------------------------------------------------------------
// Distance metric
// ---------------------------------------------------------------------------
pub const REFERENCE_EPSILON: f64 = 0.001;      // Floor for peak / mean reference magnitude
pub const ACCEL_WEIGHT: f64 = 0.8;
pub const GYRO_WEIGHT: f64 = 0.2;
pub const STEP_SCALE: f64 = 10.0;
pub const DECAY_RATE: f64 = 0.5;               // raw = 100 * exp(-DECAY_RATE * diff)

// ---------------------------------------------------------------------------
// Score shaping
// ---------------------------------------------------------------------------
pub const BOOST_KNEE: f64 = 40.0;              // Scores below the knee are left alone
pub const BOOST_GAIN: f64 = 1.5;
pub const MAX_PERCENTAGE: f64 = 100.0;
pub const NEUTRAL_PERCENTAGE: f64 = 50.0;      // Fallback for empty / failed matches

// ---------------------------------------------------------------------------
// Tier cutoffs (inclusive lower bounds, evaluated high to low)
// ---------------------------------------------------------------------------
pub const TIER_PERFECT_MATCH: f64 = 85.0;
pub const TIER_VERY_CLOSE: f64 = 70.0;
pub const TIER_BASICALLY_CLOSE: f64 = 55.0;
pub const TIER_SOME_DIFFERENCE: f64 = 35.0;

// ---------------------------------------------------------------------------
// Presentation (progress bar colour bands and verdict text)
// ---------------------------------------------------------------------------
pub const HIGH_MATCH_PERCENT: f64 = 70.0;
pub const MEDIUM_MATCH_PERCENT: f64 = 40.0;

// ---------------------------------------------------------------------------
// Device feedback (ESP32 command codes)
// ---------------------------------------------------------------------------
pub const LED_MODE_SUCCESS: u8 = 3;            // "L3": solid green
pub const MOTOR_PATTERN_DOUBLE: u8 = 2;        // "M2": double vibration
pub const FEEDBACK_MOTOR_DELAY_MS: u64 = 200;  // Gap between LED and motor commands

// ---------------------------------------------------------------------------
// Harness thread stack sizes (bytes)
// ---------------------------------------------------------------------------
pub const STACK_TELEMETRY: usize = 64 * 1024;
pub const STACK_GESTURE: usize = 128 * 1024;
pub const STACK_FEEDBACK: usize = 64 * 1024;
