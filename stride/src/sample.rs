use micromath::vector::F32x3;

use crate::utils::magnitude;

/// One decoded IMU reading: acceleration in m/s², angular velocity in rad/s.
///
/// Timestamps are seconds and must be non-decreasing within a session. The
/// engine does not enforce it, but the debouncer and cadence assume it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub timestamp: f64,
    pub accel: F32x3,
    pub gyro: F32x3,
}

impl Sample {
    pub fn new(timestamp: f64, accel: F32x3, gyro: F32x3) -> Self {
        Self {
            timestamp,
            accel,
            gyro,
        }
    }

    /// Build a sample from raw `[x, y, z]` triples.
    pub fn from_axes(timestamp: f64, accel: [f32; 3], gyro: [f32; 3]) -> Self {
        Self::new(
            timestamp,
            F32x3 {
                x: accel[0],
                y: accel[1],
                z: accel[2],
            },
            F32x3 {
                x: gyro[0],
                y: gyro[1],
                z: gyro[2],
            },
        )
    }

    pub fn gyro_magnitude(&self) -> f32 {
        magnitude(self.gyro)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Female,
    Male,
    Unspecified,
}

/// Wearer parameters, fixed for the lifetime of a tracking session.
///
/// Only `height_cm` feeds the distance model. The rest is accepted so that
/// callers do not need to change once the calorie model uses it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserProfile {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub age_years: u32,
    pub gender: Gender,
}

impl UserProfile {
    pub fn new(height_cm: f64, weight_kg: f64, age_years: u32, gender: Gender) -> Self {
        Self {
            height_cm,
            weight_kg,
            age_years,
            gender,
        }
    }
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            height_cm: 170.0,
            weight_kg: 70.0,
            age_years: 30,
            gender: Gender::Male,
        }
    }
}
