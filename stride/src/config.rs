/// Tuning of the step inference pipeline.
///
/// The defaults are the values the detector was tuned with for a chest or
/// hip mounted MPU6050 streaming at roughly 50 Hz.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Gravity removed from the z axis before taking the magnitude (m/s²).
    pub gravity: f32,
    /// Quantiles bounding the accepted acceleration band on each axis.
    pub lower_quantile: f64,
    pub upper_quantile: f64,
    /// Length of the sliding median used to denoise the magnitude signal.
    pub median_window: usize,
    /// Peak gyro magnitude under which the window counts as at rest (rad/s).
    pub stationary_gyro_threshold: f32,
    /// Smoothed magnitude the window must reach before detection runs (m/s²).
    pub amplitude_floor: f32,
    /// Z-score above which a sample deviates from the rolling baseline.
    pub z_threshold: f32,
    /// Weight of a deviating sample in the rolling baseline.
    pub influence: f32,
    /// Upper bound of the rolling baseline length.
    pub max_lag: usize,
    /// Gyro magnitude a sample needs to corroborate a candidate (rad/s).
    pub gyro_step_threshold: f32,
    /// Minimum spacing between two committed steps (s).
    pub min_step_interval: f64,
    /// Consecutive qualifying passes needed to commit a step.
    pub confirmations: u32,
    /// Step length as a fraction of body height.
    pub step_length_factor: f64,
    /// Minimum spacing between two calorie updates (s).
    pub calorie_interval: f64,
    pub calories_per_step: f64,
    /// Start a fresh session when the sensor link drops.
    pub reset_on_disconnect: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gravity: 9.81,
            lower_quantile: 0.01,
            upper_quantile: 0.99,
            median_window: 7,
            stationary_gyro_threshold: 0.1,
            amplitude_floor: 2.2,
            z_threshold: 2.2,
            influence: 0.5,
            max_lag: 30,
            gyro_step_threshold: 0.15,
            min_step_interval: 0.4,
            confirmations: 2,
            step_length_factor: 0.415,
            calorie_interval: 30.0,
            calories_per_step: 0.05,
            reset_on_disconnect: false,
        }
    }
}
