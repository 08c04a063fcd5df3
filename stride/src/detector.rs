//! Smoothed Z-score peak detection over the magnitude signal.
//!
//! A rolling mean and standard deviation over the last `lag` values form
//! the baseline. A value further than `threshold` deviations from it is a
//! signal; only upward signals are step candidates. Signals enter the
//! baseline damped by `influence`, so one heel strike does not mask the
//! next one.

use log::trace;
#[allow(unused_imports)]
use micromath::F32Ext;

use crate::statistics::{mean, std_dev};
use crate::window::WINDOW_CAPACITY;

#[derive(Debug, Clone)]
pub struct StepDetector {
    amplitude_floor: f32,
    threshold: f32,
    influence: f32,
    max_lag: usize,
}

impl StepDetector {
    pub fn new(amplitude_floor: f32, threshold: f32, influence: f32, max_lag: usize) -> Self {
        Self {
            amplitude_floor,
            threshold,
            influence,
            max_lag: max_lag.max(1),
        }
    }

    /// Number of step candidates in the smoothed signal. Windows whose peak
    /// stays under the amplitude floor hold no step and are not scanned.
    pub fn detect(&self, signal: &[f32]) -> u32 {
        let peak = signal.iter().copied().fold(f32::MIN, f32::max);
        if signal.is_empty() || peak < self.amplitude_floor {
            trace!("peak magnitude {} under amplitude floor", peak);
            return 0;
        }

        self.count_upward_deviations(signal)
    }

    /// Upward deviations from the rolling baseline. Every deviation is
    /// counted, there is no one-per-window cap. At most `WINDOW_CAPACITY`
    /// values are considered.
    pub fn count_upward_deviations(&self, signal: &[f32]) -> u32 {
        let signal = &signal[..signal.len().min(WINDOW_CAPACITY)];
        let lag = (signal.len() / 2).clamp(1, self.max_lag);
        if signal.len() < lag {
            return 0;
        }

        // Working copy: deviating values are replaced by their damped blend.
        let mut filtered: heapless::Vec<f32, WINDOW_CAPACITY> = signal.iter().copied().collect();

        let mut avg = mean(&filtered[..lag]);
        let mut std = std_dev(&filtered[..lag], avg);
        let mut candidates = 0;

        for i in lag..signal.len() {
            let value = signal[i];
            if (value - avg).abs() > self.threshold * std {
                if value > avg {
                    candidates += 1;
                }
                filtered[i] = self.influence * value + (1.0 - self.influence) * filtered[i - 1];
            } else {
                filtered[i] = value;
            }

            let trailing = &filtered[i + 1 - lag..=i];
            avg = mean(trailing);
            std = std_dev(trailing, avg);
        }

        candidates
    }
}
