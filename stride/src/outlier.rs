//! Per-axis quantile clipping of the acceleration channels.
//!
//! Bounds are recomputed from every window, so a transport glitch is cut
//! while the spread of normal gait survives. The window itself is left
//! untouched; only the current pass sees the clipped subsequence.

use crate::sample::Sample;
use crate::statistics::OrderStatistics;
use crate::window::WINDOW_CAPACITY;

/// Accepted range of one acceleration axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBand {
    pub low: f32,
    pub high: f32,
}

impl AxisBand {
    /// Open band `(low, high)`. When both quantiles land on the same value
    /// the axis carries no spread and the band closes to `[low, high]`,
    /// otherwise a flat axis would reject every sample.
    pub fn admits(&self, value: f32) -> bool {
        if self.low < self.high {
            value > self.low && value < self.high
        } else {
            value >= self.low && value <= self.high
        }
    }
}

#[derive(Debug, Clone)]
pub struct OutlierFilter {
    lower_quantile: f64,
    upper_quantile: f64,
}

impl OutlierFilter {
    pub fn new(lower_quantile: f64, upper_quantile: f64) -> Self {
        Self {
            lower_quantile,
            upper_quantile,
        }
    }

    /// Bands for the x, y and z acceleration axes, `None` on an empty window.
    pub fn bands(&self, samples: &[Sample]) -> Option<[AxisBand; 3]> {
        let mut bands = [AxisBand {
            low: 0.0,
            high: 0.0,
        }; 3];

        for (axis, band) in bands.iter_mut().enumerate() {
            let values: heapless::Vec<f32, WINDOW_CAPACITY> =
                samples.iter().map(|s| accel_axis(s, axis)).take(WINDOW_CAPACITY).collect();
            *band = AxisBand {
                low: values.quantile::<WINDOW_CAPACITY>(self.lower_quantile)?,
                high: values.quantile::<WINDOW_CAPACITY>(self.upper_quantile)?,
            };
        }

        Some(bands)
    }

    /// Samples whose acceleration lies inside the band on all three axes.
    pub fn apply(&self, samples: &[Sample]) -> heapless::Vec<Sample, WINDOW_CAPACITY> {
        let Some(bands) = self.bands(samples) else {
            return heapless::Vec::new();
        };

        samples
            .iter()
            .take(WINDOW_CAPACITY)
            .filter(|s| (0..3).all(|axis| bands[axis].admits(accel_axis(s, axis))))
            .copied()
            .collect()
    }
}

fn accel_axis(sample: &Sample, axis: usize) -> f32 {
    match axis {
        0 => sample.accel.x,
        1 => sample.accel.y,
        _ => sample.accel.z,
    }
}
