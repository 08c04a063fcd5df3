use core::fmt;
use core::time::Duration;

use heapless::Vec;
use log::{debug, info, warn};
use stride::{Metrics, PassOutcome, Sample, StepEngine};

use crate::frame::{self, FrameError};

/// Maximum number of state change subscribers
const MAX_SUBSCRIBERS: usize = 8;

/// Represents the current state of the sensor link
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinkState {
    Disconnected,
    Scanning,
    Connected,
    Error(LinkError),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinkError {
    SubscriberLimit,
    NotConnected,
    ScanTimeout,
    Frame(FrameError),
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::SubscriberLimit => {
                write!(f, "at most {} state subscribers", MAX_SUBSCRIBERS)
            }
            LinkError::NotConnected => write!(f, "sensor is not connected"),
            LinkError::ScanTimeout => write!(f, "no sensor found before the scan timed out"),
            LinkError::Frame(e) => write!(f, "bad frame: {}", e),
        }
    }
}

impl From<FrameError> for LinkError {
    fn from(e: FrameError) -> Self {
        LinkError::Frame(e)
    }
}

/// Identity of the IMU peripheral to connect to
#[derive(Debug, Clone)]
pub struct LinkConfig {
    pub device_name: &'static str,
    pub service_uuid: &'static str,
    pub characteristic_uuid: &'static str,
    pub scan_timeout: Duration,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            device_name: "ESP32_MPU6050",
            service_uuid: "4fafc201-1fb5-459e-8fcc-c5c9c331914b",
            characteristic_uuid: "beb5483e-36e1-4688-b7f5-ea07361b26a8",
            scan_timeout: Duration::from_secs(30),
        }
    }
}

/// Connection session between the IMU peripheral and a [`StepEngine`].
///
/// The radio stack drives it through the `on_*` events; every notification
/// payload received while connected becomes one engine sample.
pub struct SensorLink {
    config: LinkConfig,
    state: LinkState,
    engine: StepEngine,
    latest: Option<Sample>,
    rejected_frames: u32,
    subscribers: Vec<fn(LinkState), MAX_SUBSCRIBERS>,
}

impl SensorLink {
    pub fn new(config: LinkConfig, engine: StepEngine) -> Self {
        Self {
            config,
            state: LinkState::Disconnected,
            engine,
            latest: None,
            rejected_frames: 0,
            subscribers: Vec::new(),
        }
    }

    pub fn subscribe_to_state_changes(
        &mut self,
        callback: fn(LinkState),
    ) -> Result<(), LinkError> {
        match self.subscribers.push(callback) {
            Ok(_) => {
                debug!("Added new state change subscriber");
                Ok(())
            }
            Err(_) => {
                warn!("Failed to add subscriber: maximum subscribers reached");
                Err(LinkError::SubscriberLimit)
            }
        }
    }

    fn update_state(&mut self, new_state: LinkState) {
        self.state = new_state;
        for subscriber in self.subscribers.iter() {
            subscriber(new_state);
        }
        info!("Link state changed to: {:?}", new_state);
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    pub fn start_scan(&mut self) {
        info!(
            "Scanning for {} (service {})",
            self.config.device_name, self.config.service_uuid
        );
        self.update_state(LinkState::Scanning);
    }

    /// A peripheral advertised `name` during a scan. Returns whether it is
    /// the configured sensor and a connection should be requested.
    pub fn on_discovered(&mut self, name: &str) -> bool {
        if self.state != LinkState::Scanning {
            return false;
        }
        let matches = name == self.config.device_name;
        debug!("Discovered {:?}, target: {}", name, matches);
        matches
    }

    pub fn on_connected(&mut self) {
        info!(
            "Connected, subscribing to characteristic {}",
            self.config.characteristic_uuid
        );
        self.update_state(LinkState::Connected);
    }

    /// Returns whether the engine session was reset.
    pub fn on_disconnected(&mut self) -> bool {
        self.update_state(LinkState::Disconnected);
        self.engine.handle_disconnect()
    }

    pub fn on_scan_timeout(&mut self) {
        if self.state == LinkState::Scanning {
            warn!(
                "No {} found within {:?}",
                self.config.device_name, self.config.scan_timeout
            );
            self.update_state(LinkState::Error(LinkError::ScanTimeout));
        }
    }

    /// Decode one notification payload and feed it to the engine.
    pub fn on_frame(&mut self, payload: &[u8]) -> Result<PassOutcome, LinkError> {
        if self.state != LinkState::Connected {
            return Err(LinkError::NotConnected);
        }

        let sample = match frame::decode(payload) {
            Ok(sample) => sample,
            Err(e) => {
                self.rejected_frames = self.rejected_frames.saturating_add(1);
                warn!("Dropping frame: {}", e);
                return Err(e.into());
            }
        };

        self.latest = Some(sample);
        Ok(self.engine.push(sample))
    }

    /// Most recent decoded sample.
    pub fn latest_sample(&self) -> Option<Sample> {
        self.latest
    }

    pub fn rejected_frames(&self) -> u32 {
        self.rejected_frames
    }

    pub fn engine(&self) -> &StepEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut StepEngine {
        &mut self.engine
    }

    pub fn metrics(&self) -> Metrics {
        self.engine.metrics()
    }
}

#[cfg(test)]
mod tests {
    use core::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use stride::{EngineConfig, UserProfile, WINDOW_CAPACITY};

    fn link() -> SensorLink {
        SensorLink::new(
            LinkConfig::default(),
            StepEngine::with_profile(UserProfile::default()),
        )
    }

    fn connected() -> SensorLink {
        let mut link = link();
        link.start_scan();
        assert!(link.on_discovered("ESP32_MPU6050"));
        link.on_connected();
        link
    }

    fn walking_frame(k: usize) -> std::string::String {
        let t = k as f64 * 0.02;
        let az = if k % 25 < 5 { 13.0 } else { 9.4 };
        format!("{:.2},0.0,0.0,{:.1},0.0,0.0,0.6", t, az)
    }

    #[test]
    fn test_connect_sequence() {
        let mut link = link();
        assert_eq!(link.state(), LinkState::Disconnected);

        link.start_scan();
        assert_eq!(link.state(), LinkState::Scanning);
        assert!(!link.on_discovered("Heart Rate"));
        assert!(link.on_discovered("ESP32_MPU6050"));

        link.on_connected();
        assert_eq!(link.state(), LinkState::Connected);
    }

    #[test]
    fn test_discovery_ignored_when_not_scanning() {
        let mut link = link();
        assert!(!link.on_discovered("ESP32_MPU6050"));
    }

    #[test]
    fn test_scan_timeout() {
        let mut link = link();
        link.on_scan_timeout();
        assert_eq!(link.state(), LinkState::Disconnected);

        link.start_scan();
        link.on_scan_timeout();
        assert_eq!(link.state(), LinkState::Error(LinkError::ScanTimeout));
    }

    #[test]
    fn test_frames_rejected_while_disconnected() {
        let mut link = link();
        let frame = walking_frame(0);
        assert_eq!(link.on_frame(frame.as_bytes()), Err(LinkError::NotConnected));
        assert!(link.latest_sample().is_none());
        assert!(link.engine().window().is_empty());
    }

    #[test]
    fn test_frames_feed_the_engine() {
        let mut link = connected();
        for k in 0..WINDOW_CAPACITY - 1 {
            let frame = walking_frame(k);
            assert_eq!(link.on_frame(frame.as_bytes()), Ok(PassOutcome::Filling));
        }

        let frame = walking_frame(WINDOW_CAPACITY - 1);
        let outcome = link.on_frame(frame.as_bytes()).unwrap();
        assert!(matches!(outcome, PassOutcome::Processed(_)));
        assert!(link.engine().window().is_full());

        let latest = link.latest_sample().unwrap();
        assert_eq!(latest.timestamp, 0.98);
        assert_eq!(latest.gyro.z, 0.6);
    }

    #[test]
    fn test_bad_frame_is_dropped() {
        let mut link = connected();
        assert_eq!(
            link.on_frame(b"1.0,2.0"),
            Err(LinkError::Frame(FrameError::FieldCount(2)))
        );
        assert_eq!(
            link.on_frame(&[0xc3, 0x28]),
            Err(LinkError::Frame(FrameError::NotUtf8))
        );
        assert_eq!(link.rejected_frames(), 2);
        assert!(link.latest_sample().is_none());
        assert!(link.engine().window().is_empty());
    }

    #[test]
    fn test_nan_fields_keep_the_session_running() {
        let mut link = connected();
        for k in 0..200 {
            let frame = if k % 7 == 0 {
                format!("{:.2},nan,0.0,9.4,0.0,0.0,0.6", k as f64 * 0.02)
            } else {
                walking_frame(k)
            };
            assert!(link.on_frame(frame.as_bytes()).is_ok());
        }

        assert_eq!(link.rejected_frames(), 0);
        assert!(link.metrics().distance_km.is_finite());
        assert_eq!(link.latest_sample().map(|s| s.accel.x), Some(0.0));
    }

    #[test]
    fn test_rejected_frame_count_saturates() {
        let mut link = connected();
        link.rejected_frames = u32::MAX;
        assert!(link.on_frame(b"garbage").is_err());
        assert_eq!(link.rejected_frames(), u32::MAX);
    }

    #[test]
    fn test_disconnect_keeps_session_by_default() {
        let mut link = connected();
        for k in 0..10 {
            let frame = walking_frame(k);
            link.on_frame(frame.as_bytes()).unwrap();
        }

        assert!(!link.on_disconnected());
        assert_eq!(link.state(), LinkState::Disconnected);
        assert_eq!(link.engine().window().len(), 10);
    }

    #[test]
    fn test_disconnect_resets_when_configured() {
        let config = EngineConfig {
            reset_on_disconnect: true,
            ..EngineConfig::default()
        };
        let engine = StepEngine::new(UserProfile::default(), config);
        let mut link = SensorLink::new(LinkConfig::default(), engine);
        link.start_scan();
        link.on_connected();
        for k in 0..10 {
            let frame = walking_frame(k);
            link.on_frame(frame.as_bytes()).unwrap();
        }

        assert!(link.on_disconnected());
        assert!(link.engine().window().is_empty());
        assert_eq!(link.metrics(), Metrics::default());
    }

    static TRANSITIONS: AtomicUsize = AtomicUsize::new(0);

    fn count_transition(_: LinkState) {
        TRANSITIONS.fetch_add(1, Ordering::Relaxed);
    }

    #[test]
    fn test_subscribers_see_every_transition() {
        let mut link = link();
        link.subscribe_to_state_changes(count_transition).unwrap();

        link.start_scan();
        link.on_connected();
        link.on_disconnected();
        assert_eq!(TRANSITIONS.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn test_subscriber_limit() {
        fn ignore(_: LinkState) {}

        let mut link = link();
        for _ in 0..MAX_SUBSCRIBERS {
            link.subscribe_to_state_changes(ignore).unwrap();
        }
        assert_eq!(
            link.subscribe_to_state_changes(ignore),
            Err(LinkError::SubscriberLimit)
        );
    }

    #[test]
    fn test_link_config_defaults() {
        let config = LinkConfig::default();
        assert_eq!(config.device_name, "ESP32_MPU6050");
        assert_eq!(config.service_uuid, "4fafc201-1fb5-459e-8fcc-c5c9c331914b");
        assert_eq!(
            config.characteristic_uuid,
            "beb5483e-36e1-4688-b7f5-ea07361b26a8"
        );
        assert_eq!(config.scan_timeout, Duration::from_secs(30));
    }
}
