use core::fmt;

use log::{debug, info, trace, warn};

use crate::config::EngineConfig;
use crate::debounce::{Debounce, StepDebouncer};
use crate::detector::StepDetector;
use crate::gyro::{peak_gyro_magnitude, GyroValidator, StationaryGate};
use crate::metrics::{MetricDeriver, Metrics};
use crate::outlier::OutlierFilter;
use crate::sample::{Sample, UserProfile};
use crate::smoothing::MagnitudeSmoother;
use crate::window::SampleWindow;

/// Maximum number of metric observers.
const MAX_OBSERVERS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    SubscriberLimit,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::SubscriberLimit => {
                write!(f, "at most {} metric observers", MAX_OBSERVERS)
            }
        }
    }
}

/// What one pass over the window found.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassReport {
    /// Upward deviations flagged by the detector.
    pub candidates: u32,
    /// Candidates left after gyro corroboration.
    pub validated: u32,
    /// Whether this pass committed a step.
    pub committed: bool,
    /// Timestamp of the newest sample in the window.
    pub timestamp: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PassOutcome {
    /// The window is still priming, nothing was computed.
    Filling,
    /// The device is at rest: no detection, metrics untouched.
    Stationary,
    Processed(PassReport),
}

/// Streaming step inference for one tracking session.
///
/// Samples are pushed one at a time. Once the window is primed every push
/// runs one full pass (stationary gate, outlier clipping, smoothing,
/// detection, gyro validation, debounce) and refreshes the metrics. The
/// engine holds no locks: drive it from a single task, or wrap the whole
/// `push` in one critical section.
pub struct StepEngine {
    profile: UserProfile,
    config: EngineConfig,
    window: SampleWindow,
    outliers: OutlierFilter,
    smoother: MagnitudeSmoother,
    gate: StationaryGate,
    detector: StepDetector,
    validator: GyroValidator,
    debouncer: StepDebouncer,
    deriver: MetricDeriver,
    metrics: Metrics,
    observers: heapless::Vec<fn(&Metrics), MAX_OBSERVERS>,
}

impl StepEngine {
    pub fn new(profile: UserProfile, config: EngineConfig) -> Self {
        Self {
            outliers: OutlierFilter::new(config.lower_quantile, config.upper_quantile),
            smoother: MagnitudeSmoother::new(config.gravity, config.median_window),
            gate: StationaryGate::new(config.stationary_gyro_threshold),
            detector: StepDetector::new(
                config.amplitude_floor,
                config.z_threshold,
                config.influence,
                config.max_lag,
            ),
            validator: GyroValidator::new(config.gyro_step_threshold),
            debouncer: StepDebouncer::new(config.min_step_interval, config.confirmations),
            deriver: MetricDeriver::new(&profile, &config),
            window: SampleWindow::new(),
            metrics: Metrics::default(),
            observers: heapless::Vec::new(),
            profile,
            config,
        }
    }

    pub fn with_profile(profile: UserProfile) -> Self {
        Self::new(profile, EngineConfig::default())
    }

    /// Register an observer called with the fresh metrics after every pass
    /// that derives them.
    pub fn subscribe(&mut self, observer: fn(&Metrics)) -> Result<(), EngineError> {
        match self.observers.push(observer) {
            Ok(_) => {
                debug!("Added metrics observer");
                Ok(())
            }
            Err(_) => {
                warn!("Failed to add observer: maximum observers reached");
                Err(EngineError::SubscriberLimit)
            }
        }
    }

    /// Admit a sample and, once the window is primed, run one pass.
    pub fn push(&mut self, sample: Sample) -> PassOutcome {
        if !self.window.push(sample) {
            return PassOutcome::Filling;
        }
        self.run_pass()
    }

    fn run_pass(&mut self) -> PassOutcome {
        let window = self.window.snapshot();
        let (Some(first), Some(last)) = (window.first(), window.last()) else {
            return PassOutcome::Filling;
        };
        let (first, last) = (first.timestamp, last.timestamp);

        if self.gate.is_stationary(&window) {
            trace!("window ending at {:.2}s is stationary", last);
            return PassOutcome::Stationary;
        }

        let filtered = self.outliers.apply(&window);
        let smoothed = self.smoother.smooth(&filtered);
        trace!("smoothed magnitudes: {:?}", smoothed.as_slice());

        let candidates = self.detector.detect(&smoothed);
        let validated = self.validator.validate(candidates, &window);
        trace!("candidates {} validated {}", candidates, validated);

        let committed = self.debouncer.observe(validated, last) == Debounce::Confirmed;
        if committed {
            self.metrics.step_count += 1;
            info!("step {} at {:.2}s", self.metrics.step_count, last);
        }

        self.deriver
            .derive(first, last, peak_gyro_magnitude(&window), &mut self.metrics);
        for observer in self.observers.iter() {
            observer(&self.metrics);
        }

        PassOutcome::Processed(PassReport {
            candidates,
            validated,
            committed,
            timestamp: last,
        })
    }

    /// Apply the disconnect policy. Returns whether the session was reset.
    pub fn handle_disconnect(&mut self) -> bool {
        if !self.config.reset_on_disconnect {
            debug!("link lost, keeping session at {} steps", self.metrics.step_count);
            return false;
        }
        self.reset();
        true
    }

    /// Start a fresh session: window, debounce state and metrics are
    /// cleared, profile, configuration and observers are kept.
    pub fn reset(&mut self) {
        info!("session reset at {} steps", self.metrics.step_count);
        self.window.clear();
        self.debouncer.reset();
        self.deriver.reset();
        self.metrics = Metrics::default();
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    pub fn step_count(&self) -> u64 {
        self.metrics.step_count
    }

    pub fn distance_km(&self) -> f64 {
        self.metrics.distance_km
    }

    pub fn cadence(&self) -> f64 {
        self.metrics.cadence
    }

    pub fn calories_since_last_window(&self) -> f64 {
        self.metrics.calories_since_last_window
    }

    pub fn total_calories(&self) -> f64 {
        self.metrics.total_calories
    }

    pub fn consecutive_candidates(&self) -> u32 {
        self.debouncer.consecutive_candidates()
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn window(&self) -> &SampleWindow {
        &self.window
    }
}
