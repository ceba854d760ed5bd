// Reenact: Motion Data & Session Events

use serde::Serialize;

use crate::telemetry::RawMessage;

// ---------------------------------------------------------------------------
// Motion data (one 6-axis IMU reading relayed by the ESP32)
// ---------------------------------------------------------------------------

/// Three-component vector in the sensor's own unscaled units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Vec3) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MotionSample {
    pub acceleration: Vec3,
    pub angular_rate: Vec3,
    /// Milliseconds since the capture session was armed. Advisory only,
    /// never used for scoring.
    pub captured_at_ms: u64,
}

impl MotionSample {
    pub const fn new(acceleration: Vec3, angular_rate: Vec3) -> Self {
        Self {
            acceleration,
            angular_rate,
            captured_at_ms: 0,
        }
    }

    /// Build a sample from an `[ax, ay, az, gx, gy, gz]` row.
    pub const fn from_row(row: [f64; 6]) -> Self {
        Self::new(
            Vec3::new(row[0], row[1], row[2]),
            Vec3::new(row[3], row[4], row[5]),
        )
    }

    /// Both sub-vectors carry usable numbers. Non-finite components mark
    /// the sample as missing data for scoring purposes.
    pub fn is_complete(&self) -> bool {
        self.acceleration.is_finite() && self.angular_rate.is_finite()
    }
}

// ---------------------------------------------------------------------------
// Gesture classes
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GestureKind {
    /// Lifting a cup to drink.
    #[default]
    Cup,
    /// A cutting stroke with a knife.
    Knife,
    /// Raising a phone to the ear.
    Phone,
    /// Turning a monitor / camera towards oneself.
    Monitor,
}

impl GestureKind {
    pub const ALL: [GestureKind; 4] = [Self::Cup, Self::Knife, Self::Phone, Self::Monitor];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Cup     => "cup",
            Self::Knife   => "knife",
            Self::Phone   => "phone",
            Self::Monitor => "monitor",
        }
    }

    /// Strict lookup: `None` for anything outside the fixed set.
    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == label)
    }

    /// Lenient lookup used on the matching path: unknown labels resolve to
    /// the default gesture so a match always has a template.
    pub fn from_label(label: &str) -> Self {
        Self::parse(label).unwrap_or_default()
    }

    /// The action-reproduction stage that arms this gesture.
    pub fn stage_id(&self) -> &'static str {
        match self {
            Self::Cup     => "stage4-1-1",
            Self::Knife   => "stage4-2-1",
            Self::Phone   => "stage4-3-1",
            Self::Monitor => "stage4-4-1",
        }
    }

    /// Map a stage identifier to the gesture it asks the player to perform.
    /// Stages without a gesture return `None`.
    pub fn from_stage(stage: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.stage_id() == stage)
    }
}

impl std::fmt::Display for GestureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Session events: sent to the gesture task via channel
// ---------------------------------------------------------------------------
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The installation moved to another stage.
    StageChanged(String),
    /// Arm a capture directly, bypassing stage mapping.
    Arm(GestureKind),
    /// One telemetry message from the device connection.
    Telemetry(RawMessage),
    /// Force the current capture to finish early.
    Stop,
}
