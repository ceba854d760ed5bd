// Reenact: Inbound Telemetry Parser
//
// The device connection relays MPU6050 readings in several shapes:
//
//   "ax:10.01,ay:-0.69,az:3.05,gx:-0.44,gy:0.33,gz:-0.94"   keyed text, any order
//   "10.01,-0.69,3.05,-0.44,0.33,-0.94"                     bare positional text
//   {"acceleration": {...}, "angularRate": {...}}            nested record
//   {"accel": {...}, "gyro": {...}}                          nested record, short names
//   {"ax": 10.01, "ay": -0.69, ...}                          flat record
//   {"type": "mpu_string", "payload": <any of the above>}    transport envelope
//
// Parsing never fails loudly. Bad numbers become zero; shapes we do not
// recognise come back as `ParsedSample::Unparseable` and are dropped by the
// collector.

use serde_json::{Map, Value};

use crate::events::{MotionSample, Vec3};

/// Envelope `type` values that carry motion data.
const MOTION_ENVELOPE_TYPES: [&str; 3] = ["mpu", "mpu_string", "mpuData"];

const ACCEL_KEYS: [&str; 3] = ["ax", "ay", "az"];
const GYRO_KEYS: [&str; 3] = ["gx", "gy", "gz"];

/// One message as delivered by the transport, before interpretation.
#[derive(Debug, Clone, PartialEq)]
pub enum RawMessage {
    Text(String),
    Structured(Value),
}

impl RawMessage {
    /// Decode one line of a newline-delimited stream. Lines that look like
    /// JSON and decode as JSON become `Structured`; everything else is text.
    pub fn from_line(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.starts_with('{') {
            if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
                return Self::Structured(value);
            }
        }
        Self::Text(trimmed.to_owned())
    }
}

impl From<&str> for RawMessage {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for RawMessage {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Value> for RawMessage {
    fn from(value: Value) -> Self {
        Self::Structured(value)
    }
}

/// Outcome of interpreting a [`RawMessage`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParsedSample {
    Sample(MotionSample),
    Unparseable,
}

impl ParsedSample {
    pub fn sample(self) -> Option<MotionSample> {
        match self {
            Self::Sample(sample) => Some(sample),
            Self::Unparseable => None,
        }
    }
}

/// Interpret a raw message as a motion sample.
pub fn parse_sample(message: &RawMessage) -> ParsedSample {
    match message {
        RawMessage::Text(text) => parse_text(text),
        RawMessage::Structured(value) => parse_value(value, true),
    }
}

// ---------------------------------------------------------------------------
// Text frames
// ---------------------------------------------------------------------------

fn parse_text(text: &str) -> ParsedSample {
    if text.contains(':') {
        parse_keyed_text(text)
    } else {
        parse_positional_text(text)
    }
}

/// `key:value` pairs. Missing keys and unreadable values default to zero,
/// but a frame with no recognised key at all is not telemetry.
fn parse_keyed_text(text: &str) -> ParsedSample {
    let mut row = [0.0f64; 6];
    let mut recognised = false;

    for part in text.split(',') {
        let Some((key, value)) = part.split_once(':') else {
            continue;
        };
        let Some(slot) = axis_slot(key.trim()) else {
            continue;
        };
        row[slot] = lenient_number(value);
        recognised = true;
    }

    if recognised {
        ParsedSample::Sample(MotionSample::from_row(row))
    } else {
        log::debug!("Dropping text frame without axis keys: {:?}", text);
        ParsedSample::Unparseable
    }
}

/// Six bare comma-separated numbers in `ax,ay,az,gx,gy,gz` order. Without
/// keys there is nothing to anchor a partial frame to, so all six must be
/// present and numeric.
fn parse_positional_text(text: &str) -> ParsedSample {
    let values: Vec<f64> = text
        .split(',')
        .map_while(|part| part.trim().parse::<f64>().ok().filter(|v| v.is_finite()))
        .collect();

    match <[f64; 6]>::try_from(values.as_slice()) {
        Ok(row) if text.split(',').count() == 6 => ParsedSample::Sample(MotionSample::from_row(row)),
        _ => {
            log::debug!("Dropping unrecognised text frame: {:?}", text);
            ParsedSample::Unparseable
        }
    }
}

fn axis_slot(key: &str) -> Option<usize> {
    ACCEL_KEYS
        .iter()
        .chain(GYRO_KEYS.iter())
        .position(|candidate| *candidate == key)
}

fn lenient_number(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

// ---------------------------------------------------------------------------
// Structured records
// ---------------------------------------------------------------------------

fn parse_value(value: &Value, allow_envelope: bool) -> ParsedSample {
    match value {
        Value::String(text) => parse_text(text),
        Value::Object(map) => match map.get("type") {
            Some(kind) if allow_envelope => unwrap_envelope(kind, map),
            Some(_) => ParsedSample::Unparseable,
            None => ParsedSample::Sample(parse_record(map)),
        },
        other => {
            log::debug!("Dropping telemetry of unsupported shape: {}", other);
            ParsedSample::Unparseable
        }
    }
}

fn unwrap_envelope(kind: &Value, map: &Map<String, Value>) -> ParsedSample {
    let is_motion = kind
        .as_str()
        .is_some_and(|kind| MOTION_ENVELOPE_TYPES.contains(&kind));

    match map.get("payload") {
        Some(payload) if is_motion => parse_value(payload, false),
        _ => {
            log::debug!("Ignoring non-motion envelope of type {}", kind);
            ParsedSample::Unparseable
        }
    }
}

/// Nested sub-vectors win per component; flat `ax..gz` fields fill the
/// gaps; anything still missing is zero.
fn parse_record(map: &Map<String, Value>) -> MotionSample {
    let accel = nested(map, &["acceleration", "accel"]);
    let gyro = nested(map, &["angularRate", "angular_rate", "gyro"]);

    MotionSample::new(
        read_vector(accel, map, &ACCEL_KEYS),
        read_vector(gyro, map, &GYRO_KEYS),
    )
}

fn nested<'a>(map: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Map<String, Value>> {
    names.iter().find_map(|name| map.get(*name).and_then(Value::as_object))
}

fn read_vector(
    nested: Option<&Map<String, Value>>,
    flat: &Map<String, Value>,
    flat_keys: &[&str; 3],
) -> Vec3 {
    let component = |axis: &str, flat_key: &str| {
        nested
            .and_then(|sub| sub.get(axis))
            .and_then(number_of)
            .or_else(|| flat.get(flat_key).and_then(number_of))
            .unwrap_or(0.0)
    };

    Vec3::new(
        component("x", flat_keys[0]),
        component("y", flat_keys[1]),
        component("z", flat_keys[2]),
    )
}

fn number_of(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|v| v.is_finite())
}
