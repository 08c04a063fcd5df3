use crate::sample::Sample;

/// Largest angular velocity magnitude in the window, `0.0` when empty.
pub fn peak_gyro_magnitude(samples: &[Sample]) -> f32 {
    samples
        .iter()
        .map(Sample::gyro_magnitude)
        .fold(0.0, f32::max)
}

/// Classifies a window as at rest from its angular velocity alone.
#[derive(Debug, Clone)]
pub struct StationaryGate {
    threshold: f32,
}

impl StationaryGate {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn is_stationary(&self, samples: &[Sample]) -> bool {
        peak_gyro_magnitude(samples) < self.threshold
    }
}

/// Bounds the detector's candidates by the amount of rotation in the window.
/// A step swings the body, so a candidate with no gyro activity behind it is
/// most likely a knock or a vibration.
#[derive(Debug, Clone)]
pub struct GyroValidator {
    threshold: f32,
}

impl GyroValidator {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn active_samples(&self, samples: &[Sample]) -> u32 {
        samples
            .iter()
            .filter(|s| s.gyro_magnitude() > self.threshold)
            .count() as u32
    }

    pub fn validate(&self, candidates: u32, samples: &[Sample]) -> u32 {
        candidates.min(self.active_samples(samples))
    }
}
