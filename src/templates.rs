// Reenact: Reference Gesture Templates
//
// Hand-recorded MPU6050 traces, one per gesture class, 20 samples each in
// `[ax, ay, az, gx, gy, gz]` order. The values are in the sensor's raw
// output units; captured samples must arrive in the same units.

use crate::events::{GestureKind, MotionSample};

pub const TEMPLATE_SAMPLES: usize = 20;

/// An immutable reference trace for one gesture class.
#[derive(Debug, Clone, Copy)]
pub struct GestureTemplate {
    pub kind: GestureKind,
    rows: &'static [[f64; 6]],
}

impl GestureTemplate {
    /// The template for `kind`.
    pub fn for_kind(kind: GestureKind) -> Self {
        let rows: &'static [[f64; 6]] = match kind {
            GestureKind::Cup     => &CUP,
            GestureKind::Knife   => &KNIFE,
            GestureKind::Phone   => &PHONE,
            GestureKind::Monitor => &MONITOR,
        };
        Self { kind, rows }
    }

    /// Resolve a template by gesture name. Unknown names get the default
    /// gesture's template.
    pub fn for_name(name: &str) -> Self {
        let kind = GestureKind::from_label(name);
        if GestureKind::parse(name).is_none() {
            log::warn!("Unknown gesture {:?}, falling back to {:?}", name, kind.label());
        }
        Self::for_kind(kind)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn samples(&self) -> impl ExactSizeIterator<Item = MotionSample> + '_ {
        self.rows.iter().map(|row| MotionSample::from_row(*row))
    }

    /// Owned copy of the trace, e.g. to replay it as a perfect capture.
    pub fn to_vec(&self) -> Vec<MotionSample> {
        self.samples().collect()
    }
}

// ---------------------------------------------------------------------------
// Reference table
// ---------------------------------------------------------------------------

// Drinking from a cup.
static CUP: [[f64; 6]; TEMPLATE_SAMPLES] = [
    [ -9.75,  -1.02,   0.57,   0.12,   0.35,  -0.25],
    [ -9.29,  -1.71,   0.68,  -0.02,   0.03,  -0.09],
    [ -9.27,  -1.60,   1.02,   0.03,  -0.21,   0.14],
    [ -9.57,  -1.23,   0.62,   0.07,   0.23,   0.24],
    [ -9.47,  -1.63,   0.58,  -0.06,   0.05,   0.01],
    [ -9.83,  -1.13,   0.41,  -0.17,  -0.12,  -0.06],
    [-10.55,  -1.31,   0.63,   0.04,   0.06,   0.49],
    [-10.70,  -0.50,   0.82,   0.17,   0.13,   1.06],
    [ -9.27,   0.48,   0.28,   0.24,   0.09,   1.50],
    [ -9.73,   1.85,   0.46,   0.31,  -0.11,   1.19],
    [ -9.11,   3.16,   0.50,   0.17,  -0.17,   1.19],
    [ -9.18,   4.19,   0.42,   0.09,  -0.20,   1.36],
    [ -7.73,   5.32,   0.24,   0.14,  -0.08,   1.55],
    [ -6.35,   6.20,   0.40,   0.05,  -0.22,   1.11],
    [ -5.74,   7.08,   0.48,   0.11,  -0.29,   1.09],
    [ -4.81,   7.78,   0.45,   0.08,  -0.20,   1.05],
    [ -3.68,   8.25,   0.36,   0.04,  -0.21,   0.94],
    [ -2.96,   8.13,   0.74,   0.21,   0.03,   1.18],
    [ -1.25,   9.01,   0.76,   0.36,  -0.11,   1.07],
    [ -1.22,   9.28,  -0.22,   0.14,  -0.16,   0.45],
];

// Cutting with a knife.
static KNIFE: [[f64; 6]; TEMPLATE_SAMPLES] = [
    [ -3.81,   9.58,  -2.15,   0.20,   0.04,   0.50],
    [ -1.89,   7.04,  -2.79,   0.72,   0.00,   0.64],
    [ -2.77,   0.87,  -3.69,   0.95,  -0.17,  -0.78],
    [ -4.55,  -7.48,  -5.07,   0.92,  -0.50,  -2.88],
    [ -8.65, -12.97,  -5.48,   0.19,  -0.42,  -3.75],
    [ -9.76, -12.56,  -5.48,  -0.04,  -0.50,  -1.80],
    [ -9.46,  -9.74,  -5.24,  -0.12,  -0.37,   1.31],
    [ -8.19,  -5.58,  -5.36,   0.17,  -0.71,   3.44],
    [ -5.44,  -1.49,  -5.54,   0.19,  -0.78,   3.68],
    [ -2.67,   3.05,  -4.87,   0.06,  -0.70,   2.65],
    [ -0.44,   6.62,  -3.79,  -0.16,  -0.44,   1.09],
    [ -0.30,   8.44,  -2.54,  -0.23,  -0.14,   0.20],
    [ -0.81,   9.08,  -2.00,  -0.12,   0.01,  -0.14],
    [ -1.50,   9.21,  -1.83,  -0.06,   0.04,  -0.20],
    [ -1.89,   9.16,  -1.86,  -0.00,   0.06,  -0.14],
    [ -2.06,   9.02,  -1.90,  -0.01,   0.04,  -0.13],
    [ -2.24,   8.93,  -1.90,  -0.03,   0.03,  -0.11],
    [ -2.40,   8.79,  -1.93,  -0.03,   0.03,  -0.12],
    [ -2.57,   8.66,  -1.96,  -0.04,   0.01,  -0.10],
    [ -2.64,   8.59,  -1.97,  -0.03,   0.00,  -0.10],
];

// Answering a phone.
static PHONE: [[f64; 6]; TEMPLATE_SAMPLES] = [
    [-11.04,   2.26,   2.30,   0.97,  -0.94,   0.70],
    [ -9.39,   2.30,   1.64,   1.56,  -1.13,   1.12],
    [ -6.30,   2.29,   1.62,   1.07,  -0.85,   1.73],
    [ -0.84,   3.00,   0.62,   0.82,  -0.45,   0.53],
    [ -0.98,   3.67,   0.58,  -0.27,   0.29,   0.10],
    [  2.36,   5.57,   0.23,   0.41,  -0.21,  -0.85],
    [ -1.42,   5.17,   0.60,   0.21,  -0.26,  -0.15],
    [  3.68,   5.79,   1.25,   0.41,  -0.66,   0.24],
    [ -0.59,   5.21,   1.65,  -0.20,  -0.34,  -0.23],
    [  2.45,   5.58,   1.58,  -0.48,  -0.05,   0.78],
    [ -0.08,   5.48,   0.73,  -0.43,   0.07,  -0.53],
    [ -0.08,   5.25,   0.38,  -0.27,   0.15,   0.52],
    [  0.76,   5.35,   0.66,   0.01,  -0.11,  -0.29],
    [ -0.52,   4.98,   1.04,  -0.18,   0.09,  -0.12],
    [  0.96,   5.42,   1.11,  -0.11,  -0.13,  -0.06],
    [  0.01,   5.34,   0.67,  -0.07,  -0.08,  -0.57],
    [  0.31,   5.41,   0.97,   0.03,  -0.35,   0.32],
    [  0.94,   5.67,   1.31,   0.05,  -0.39,  -0.03],
    [ -0.48,   5.52,   1.53,  -0.30,  -0.26,   0.22],
    [  0.14,   5.75,   1.45,  -0.42,  -0.21,  -0.19],
];

// Turning a monitor.
static MONITOR: [[f64; 6]; TEMPLATE_SAMPLES] = [
    [-10.07,   0.60,  -0.63,   1.20,   0.06,   1.55],
    [ -7.70,  -1.05,  -0.24,   0.49,   0.25,   1.94],
    [ -4.64,  -2.99,  -0.77,   0.17,   0.21,   1.95],
    [ -1.28,  -6.86,   2.56,  -1.48,   0.36,   0.98],
    [ -2.07,  -9.48,   9.05,  -1.08,   0.35,  -0.08],
    [ -3.33,  -9.39,  10.63,  -0.23,   0.47,  -0.08],
    [ -2.95,  -7.18,  10.36,   0.85,   0.34,   0.24],
    [ -2.20,  -5.13,   7.80,   1.11,   0.37,   0.28],
    [ -1.82,  -5.87,   8.76,   0.28,   0.27,   0.16],
    [ -1.88,  -5.46,   8.75,   0.02,   0.38,   0.08],
    [ -1.56,  -4.40,   7.94,   0.33,   0.48,   0.20],
    [ -1.76,  -3.17,   8.55,   0.49,   0.53,   0.10],
    [ -2.16,  -3.35,   8.93,   0.01,   0.41,   0.14],
    [ -2.29,  -2.83,   7.75,  -0.31,   0.42,   0.10],
    [ -3.13,  -1.91,   7.15,  -0.24,   0.62,  -0.06],
    [ -4.08,  -0.56,   5.79,   0.52,   0.76,  -0.29],
    [ -5.33,  -0.20,   4.97,   0.17,   0.58,  -0.30],
    [ -6.08,  -0.20,   4.32,   0.09,   0.41,  -0.22],
    [ -6.55,  -0.18,   3.45,  -0.06,   0.34,  -0.11],
    [ -6.71,  -0.16,   3.23,  -0.09,   0.28,  -0.08],
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CAPTURE_WINDOW_SAMPLES;

    #[test]
    fn test_every_template_fills_a_capture_window() {
        for kind in GestureKind::ALL {
            let template = GestureTemplate::for_kind(kind);
            assert_eq!(template.kind, kind);
            assert_eq!(template.len(), CAPTURE_WINDOW_SAMPLES);
            assert!(template.samples().all(|s| s.is_complete()));
        }
    }

    #[test]
    fn test_unknown_name_uses_default_template() {
        let fallback = GestureTemplate::for_name("teapot");
        assert_eq!(fallback.kind, GestureKind::Cup);
        assert_eq!(fallback.to_vec(), GestureTemplate::for_kind(GestureKind::Cup).to_vec());
    }

    #[test]
    fn test_first_cup_row() {
        let first = GestureTemplate::for_kind(GestureKind::Cup).to_vec()[0];
        assert_eq!(first.acceleration.x, -9.75);
        assert_eq!(first.angular_rate.z, -0.25);
    }
}
