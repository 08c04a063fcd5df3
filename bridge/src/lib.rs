#![cfg_attr(not(test), no_std)]
//! Sensor-side plumbing in front of the step engine: decoding the text
//! frames the IMU peripheral notifies, and tracking the link so that a
//! disconnect applies the session policy.

pub mod frame;
pub mod link;

pub use frame::{decode, decode_str, FrameError};
pub use link::{LinkConfig, LinkError, LinkState, SensorLink};
