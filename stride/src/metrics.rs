use log::info;

use crate::config::EngineConfig;
use crate::sample::UserProfile;

/// Snapshot of the published activity metrics.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Metrics {
    pub step_count: u64,
    pub distance_km: f64,
    /// Steps per minute. Cumulative steps over the current window's span, so
    /// an instantaneous approximation rather than a true rate.
    pub cadence: f64,
    /// Amount added by the most recent calorie update.
    pub calories_since_last_window: f64,
    pub total_calories: f64,
    /// Metabolic equivalent estimated from the window's peak rotation.
    pub intensity_met: f32,
}

/// MET estimate from the window's peak gyro magnitude (rad/s).
pub fn intensity_met(peak_gyro: f32) -> f32 {
    if peak_gyro < 0.1 {
        1.0
    } else if peak_gyro < 0.5 {
        2.0
    } else if peak_gyro < 1.0 {
        3.0
    } else if peak_gyro < 2.0 {
        4.0
    } else {
        5.0
    }
}

/// Steps per minute over a window spanning `first..=last` seconds.
pub fn cadence(step_count: u64, first: f64, last: f64) -> f64 {
    let minutes = (last - first) / 60.0;
    if minutes > 0.0 {
        step_count as f64 / minutes
    } else {
        0.0
    }
}

/// Derives distance, cadence and calories from the committed step count.
#[derive(Debug, Clone)]
pub struct MetricDeriver {
    step_length_m: f64,
    calorie_interval: f64,
    calories_per_step: f64,
    last_calorie_update: Option<f64>,
}

impl MetricDeriver {
    pub fn new(profile: &UserProfile, config: &EngineConfig) -> Self {
        Self {
            step_length_m: profile.height_cm * config.step_length_factor / 100.0,
            calorie_interval: config.calorie_interval,
            calories_per_step: config.calories_per_step,
            last_calorie_update: None,
        }
    }

    pub fn step_length_m(&self) -> f64 {
        self.step_length_m
    }

    pub fn distance_km(&self, step_count: u64) -> f64 {
        step_count as f64 * self.step_length_m / 1000.0
    }

    /// Rate limited calorie update. The first call only starts the clock.
    /// Each update is worth the whole step count, not the steps since the
    /// previous update. Returns whether `metrics` changed.
    pub fn update_calories(&mut self, now: f64, metrics: &mut Metrics) -> bool {
        if !now.is_finite() {
            return false;
        }

        let Some(last) = self.last_calorie_update else {
            self.last_calorie_update = Some(now);
            return false;
        };

        let due = now - last >= self.calorie_interval;
        if !due {
            return false;
        }

        let burned = metrics.step_count as f64 * self.calories_per_step;
        metrics.total_calories += burned;
        metrics.calories_since_last_window = burned;
        self.last_calorie_update = Some(now);

        info!(
            "calories +{:.2} at {:.2}s, total {:.2}",
            burned, now, metrics.total_calories
        );
        true
    }

    /// Refresh every derived metric for a window spanning `first..=last`.
    pub fn derive(&mut self, first: f64, last: f64, peak_gyro: f32, metrics: &mut Metrics) {
        metrics.distance_km = self.distance_km(metrics.step_count);
        self.update_calories(last, metrics);
        metrics.cadence = cadence(metrics.step_count, first, last);
        metrics.intensity_met = intensity_met(peak_gyro);
    }

    pub fn last_calorie_update(&self) -> Option<f64> {
        self.last_calorie_update
    }

    pub fn reset(&mut self) {
        self.last_calorie_update = None;
    }
}
