use crate::sample::Sample;
use crate::statistics::OrderStatistics;
use crate::utils::gravity_compensated_magnitude;
use crate::window::WINDOW_CAPACITY;

/// Turns three axis acceleration into a denoised scalar signal.
#[derive(Debug, Clone)]
pub struct MagnitudeSmoother {
    gravity: f32,
    half_window: usize,
}

impl MagnitudeSmoother {
    /// `median_window` is the full width of the sliding median; the filter
    /// is centred, so an even width behaves like the next odd one.
    pub fn new(gravity: f32, median_window: usize) -> Self {
        Self {
            gravity,
            half_window: median_window / 2,
        }
    }

    /// Gravity compensated magnitude of every sample.
    pub fn magnitudes(&self, samples: &[Sample]) -> heapless::Vec<f32, WINDOW_CAPACITY> {
        samples
            .iter()
            .take(WINDOW_CAPACITY)
            .map(|s| gravity_compensated_magnitude(s.accel, self.gravity))
            .collect()
    }

    pub fn smooth(&self, samples: &[Sample]) -> heapless::Vec<f32, WINDOW_CAPACITY> {
        median_filter(&self.magnitudes(samples), self.half_window)
    }
}

/// Sliding median centred on each index. Near the edges the window shrinks
/// instead of wrapping or padding, so the output has the input's length.
pub fn median_filter(signal: &[f32], half_window: usize) -> heapless::Vec<f32, WINDOW_CAPACITY> {
    let mut smoothed = heapless::Vec::new();
    if signal.is_empty() {
        return smoothed;
    }

    let last = signal.len() - 1;
    for i in 0..signal.len().min(WINDOW_CAPACITY) {
        let start = i.saturating_sub(half_window);
        let end = (i + half_window).min(last);
        let median = signal[start..=end]
            .median::<WINDOW_CAPACITY>()
            .unwrap_or(signal[i]);
        smoothed.push(median).ok();
    }

    smoothed
}
