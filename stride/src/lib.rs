#![cfg_attr(not(test), no_std)]
//! Streaming step inference for body-worn IMUs.
//!
//! Decoded accelerometer and gyroscope samples go in one at a time; step
//! count, distance, cadence and calories come out. Everything runs in fixed
//! memory, one 50 sample window and a handful of scratch buffers, so the
//! engine fits the same microcontroller that samples the sensor.
//!
//! ```
//! use stride::{Sample, StepEngine, UserProfile};
//!
//! let mut engine = StepEngine::with_profile(UserProfile::default());
//! engine.push(Sample::from_axes(0.00, [0.1, 0.0, 9.8], [0.0, 0.2, 0.0]));
//! println!("{} steps, {:.3} km", engine.step_count(), engine.distance_km());
//! ```

pub mod config;
pub mod debounce;
pub mod detector;
pub mod engine;
pub mod gyro;
pub mod metrics;
pub mod outlier;
pub mod sample;
pub mod smoothing;
pub mod statistics;
pub mod utils;
pub mod window;

pub use config::EngineConfig;
pub use engine::{EngineError, PassOutcome, PassReport, StepEngine};
pub use metrics::Metrics;
pub use sample::{Gender, Sample, UserProfile};
pub use window::{SampleWindow, WINDOW_CAPACITY};
