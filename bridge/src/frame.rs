//! Decoding of the IMU peripheral's notification payload.
//!
//! A frame is UTF-8 text holding seven comma separated fields:
//! `timestamp,ax,ay,az,gx,gy,gz` (seconds, m/s², rad/s). A frame with any
//! other field count is rejected. A field that does not parse, or parses to
//! a non-finite value such as `nan` or `inf`, reads as `0.0`, keeping the
//! sample rather than dropping it.

use core::fmt;
use core::str;

use micromath::vector::F32x3;
use stride::Sample;

pub const FIELD_COUNT: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    NotUtf8,
    FieldCount(usize),
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::NotUtf8 => write!(f, "frame is not UTF-8 text"),
            FrameError::FieldCount(n) => {
                write!(f, "expected {} fields, got {}", FIELD_COUNT, n)
            }
        }
    }
}

pub fn decode(payload: &[u8]) -> Result<Sample, FrameError> {
    let text = str::from_utf8(payload).map_err(|_| FrameError::NotUtf8)?;
    decode_str(text)
}

pub fn decode_str(text: &str) -> Result<Sample, FrameError> {
    let count = text.split(',').count();
    if count != FIELD_COUNT {
        return Err(FrameError::FieldCount(count));
    }

    let mut fields = text.split(',');
    let timestamp = fields
        .next()
        .and_then(|field| field.trim().parse::<f64>().ok())
        .filter(|t| t.is_finite())
        .unwrap_or(0.0);
    let mut axes = [0.0f32; 6];
    for (axis, field) in axes.iter_mut().zip(fields) {
        *axis = parse_axis(field);
    }

    Ok(Sample::new(
        timestamp,
        F32x3 {
            x: axes[0],
            y: axes[1],
            z: axes[2],
        },
        F32x3 {
            x: axes[3],
            y: axes[4],
            z: axes[5],
        },
    ))
}

fn parse_axis(field: &str) -> f32 {
    field
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
