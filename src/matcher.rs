// Reenact: Gesture Matcher
//
// Scores a captured window against a gesture's reference trace.
//
// Samples are paired strictly by index (no resampling, no time warping);
// the longer sequence is truncated to the shorter one. Each pair
// contributes a blended accel/gyro distance, the sum is normalised by the
// reference's mean acceleration magnitude, mapped through an exponential
// decay onto 0..100 and boosted above 40 %.
//
// A match always produces a renderable `MatchResult`. Empty input yields
// the neutral "insufficient data" result and internal failures yield the
// neutral "computation error" result.

use serde::Serialize;

use crate::config::*;
use crate::error::MatchError;
use crate::events::{GestureKind, MotionSample};
use crate::templates::GestureTemplate;

// ---------------------------------------------------------------------------
// Public interface
// ---------------------------------------------------------------------------

/// Discrete quality label for a match percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MatchTier {
    #[serde(rename = "perfect match")]
    PerfectMatch,
    #[serde(rename = "very close")]
    VeryClose,
    #[serde(rename = "basically close")]
    BasicallyClose,
    #[serde(rename = "some difference")]
    SomeDifference,
    #[serde(rename = "large difference")]
    LargeDifference,
    /// Nothing to compare: empty capture or empty template.
    #[serde(rename = "insufficient data")]
    InsufficientData,
    /// Scoring failed internally.
    #[serde(rename = "computation error")]
    ComputationError,
}

impl MatchTier {
    pub fn label(&self) -> &'static str {
        match self {
            Self::PerfectMatch     => "perfect match",
            Self::VeryClose        => "very close",
            Self::BasicallyClose   => "basically close",
            Self::SomeDifference   => "some difference",
            Self::LargeDifference  => "large difference",
            Self::InsufficientData => "insufficient data",
            Self::ComputationError => "computation error",
        }
    }

    /// Map a final percentage onto one of the five scored tiers. Cutoffs
    /// are inclusive lower bounds.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= TIER_PERFECT_MATCH {
            Self::PerfectMatch
        } else if percentage >= TIER_VERY_CLOSE {
            Self::VeryClose
        } else if percentage >= TIER_BASICALLY_CLOSE {
            Self::BasicallyClose
        } else if percentage >= TIER_SOME_DIFFERENCE {
            Self::SomeDifference
        } else {
            Self::LargeDifference
        }
    }

    /// The two fallback tiers carry a placeholder score rather than a
    /// measured one.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::InsufficientData | Self::ComputationError)
    }
}

impl std::fmt::Display for MatchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Colour band of the on-screen progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressBand {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchResult {
    /// Always within `[0, 100]`.
    pub percentage: f64,
    pub tier: MatchTier,
}

impl MatchResult {
    fn neutral(tier: MatchTier) -> Self {
        Self {
            percentage: NEUTRAL_PERCENTAGE,
            tier,
        }
    }

    pub fn insufficient_data() -> Self {
        Self::neutral(MatchTier::InsufficientData)
    }

    pub fn computation_error() -> Self {
        Self::neutral(MatchTier::ComputationError)
    }

    pub fn progress_band(&self) -> ProgressBand {
        if self.percentage >= HIGH_MATCH_PERCENT {
            ProgressBand::High
        } else if self.percentage >= MEDIUM_MATCH_PERCENT {
            ProgressBand::Medium
        } else {
            ProgressBand::Low
        }
    }

    /// Perfect match or very close. Selects the "high" feedback video.
    pub fn is_high_tier(&self) -> bool {
        matches!(self.tier, MatchTier::PerfectMatch | MatchTier::VeryClose)
    }

    /// Message shown to the player once the memory fragment unlocks.
    pub fn verdict(&self) -> &'static str {
        if self.percentage >= HIGH_MATCH_PERCENT {
            "Perfect reproduction, memory fragment unlocked"
        } else {
            "Basic reproduction, memory fragment unlocked"
        }
    }
}

/// Score `captured` against the template named `gesture`.
pub fn match_gesture(gesture: &str, captured: &[MotionSample]) -> MatchResult {
    match_template(&GestureTemplate::for_name(gesture), captured)
}

/// Score `captured` against the template for `kind`.
pub fn match_kind(kind: GestureKind, captured: &[MotionSample]) -> MatchResult {
    match_template(&GestureTemplate::for_kind(kind), captured)
}

/// Score `captured` against `template`. Never fails.
pub fn match_template(template: &GestureTemplate, captured: &[MotionSample]) -> MatchResult {
    let reference = template.to_vec();
    match_sequences(&reference, captured)
}

/// Score two arbitrary sequences, treating `reference` as the template.
pub fn match_sequences(reference: &[MotionSample], captured: &[MotionSample]) -> MatchResult {
    if reference.is_empty() || captured.is_empty() {
        log::warn!(
            "Not enough data to match (reference {}, captured {})",
            reference.len(),
            captured.len()
        );
        return MatchResult::insufficient_data();
    }

    match score(reference, captured) {
        Ok(breakdown) => {
            let tier = MatchTier::from_percentage(breakdown.percentage);
            log::info!(
                "Match: raw {:.1}% -> adjusted {:.1}% ({}), {} of {} pairs skipped",
                breakdown.raw,
                breakdown.percentage,
                tier,
                breakdown.skipped,
                breakdown.aligned
            );
            MatchResult {
                percentage: breakdown.percentage,
                tier,
            }
        }
        Err(e) => {
            log::warn!("Match computation failed: {}", e);
            MatchResult::computation_error()
        }
    }
}

// ---------------------------------------------------------------------------
// Reference features
// ---------------------------------------------------------------------------

/// Acceleration statistics of a reference trace, used to normalise diffs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceFeatures {
    pub peak_accel_magnitude: f64,
    pub mean_accel_magnitude: f64,
}

impl ReferenceFeatures {
    /// Single pass over the reference. Both statistics are floored at
    /// [`REFERENCE_EPSILON`]; samples with unusable acceleration add
    /// nothing to the sum but still count towards the mean's divisor.
    pub fn from_reference(reference: &[MotionSample]) -> Result<Self, MatchError> {
        if reference.is_empty() {
            return Err(MatchError::DegenerateReference);
        }

        let mut peak = REFERENCE_EPSILON;
        let mut sum = 0.0;
        for sample in reference.iter().filter(|s| s.acceleration.is_finite()) {
            let magnitude = sample.acceleration.norm();
            peak = peak.max(magnitude);
            sum += magnitude;
        }

        let mean = (sum / reference.len() as f64).max(REFERENCE_EPSILON);
        Ok(Self {
            peak_accel_magnitude: peak,
            mean_accel_magnitude: mean,
        })
    }
}

// ---------------------------------------------------------------------------
// Distance metric
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct ScoreBreakdown {
    raw: f64,
    percentage: f64,
    aligned: usize,
    skipped: usize,
}

/// Blended per-pair difference.
fn step_diff(features: &ReferenceFeatures, reference: &MotionSample, captured: &MotionSample) -> f64 {
    let accel_diff = reference.acceleration.distance(&captured.acceleration);
    let normalized_accel_diff = accel_diff / features.peak_accel_magnitude;
    let gyro_diff = reference.angular_rate.distance(&captured.angular_rate);
    (normalized_accel_diff * ACCEL_WEIGHT + gyro_diff * GYRO_WEIGHT) * STEP_SCALE
}

/// Piecewise-linear boost applied to the raw percentage, capped at 100.
pub fn boost(raw: f64) -> f64 {
    let adjusted = if raw < BOOST_KNEE {
        raw
    } else {
        BOOST_KNEE + (raw - BOOST_KNEE) * BOOST_GAIN
    };
    adjusted.min(MAX_PERCENTAGE)
}

fn score(reference: &[MotionSample], captured: &[MotionSample]) -> Result<ScoreBreakdown, MatchError> {
    let aligned = reference.len().min(captured.len());
    let features = ReferenceFeatures::from_reference(reference)?;

    let mut total_diff = 0.0;
    let mut skipped = 0;
    for (r, c) in reference.iter().zip(captured).take(aligned) {
        if !r.is_complete() || !c.is_complete() {
            skipped += 1;
            continue;
        }
        total_diff += step_diff(&features, r, c);
    }

    let normalized_total_diff = total_diff / (aligned as f64 * features.mean_accel_magnitude);
    let raw = MAX_PERCENTAGE * (-DECAY_RATE * normalized_total_diff).exp();

    // `f64::min` inside `boost` would turn NaN into 100.
    if !raw.is_finite() {
        return Err(MatchError::NonFiniteScore { total_diff, aligned });
    }
    let percentage = boost(raw);

    Ok(ScoreBreakdown {
        raw,
        percentage: percentage.max(0.0),
        aligned,
        skipped,
    })
}
