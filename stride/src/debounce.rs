use log::debug;

/// Outcome of feeding one pass into the debouncer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Debounce {
    /// No validated candidate, or too soon after the last step.
    Reset,
    /// Qualifying pass, waiting for more confirmations.
    Pending(u32),
    /// Enough consecutive qualifying passes: exactly one step.
    Confirmed,
}

/// Commits a step only after `confirmations` consecutive qualifying passes,
/// each at least `min_interval` seconds after the last committed step.
#[derive(Debug, Clone)]
pub struct StepDebouncer {
    min_interval: f64,
    confirmations: u32,
    consecutive: u32,
    last_confirmed: f64,
}

impl StepDebouncer {
    pub fn new(min_interval: f64, confirmations: u32) -> Self {
        Self {
            min_interval,
            confirmations: confirmations.max(1),
            consecutive: 0,
            last_confirmed: 0.0,
        }
    }

    /// Feed the validated candidate count of a pass ending at `timestamp`.
    pub fn observe(&mut self, validated: u32, timestamp: f64) -> Debounce {
        let spaced = timestamp - self.last_confirmed >= self.min_interval;
        if validated == 0 || !spaced {
            if self.consecutive > 0 {
                debug!("debounce reset after {} qualifying passes", self.consecutive);
            }
            self.consecutive = 0;
            return Debounce::Reset;
        }

        self.consecutive += 1;
        if self.consecutive < self.confirmations {
            return Debounce::Pending(self.consecutive);
        }

        self.last_confirmed = timestamp;
        self.consecutive = 0;
        Debounce::Confirmed
    }

    pub fn consecutive_candidates(&self) -> u32 {
        self.consecutive
    }

    pub fn last_confirmed(&self) -> f64 {
        self.last_confirmed
    }

    pub fn reset(&mut self) {
        self.consecutive = 0;
        self.last_confirmed = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_two_consecutive_passes() {
        let mut debouncer = StepDebouncer::new(0.4, 2);
        assert_eq!(debouncer.observe(3, 1.00), Debounce::Pending(1));
        assert_eq!(debouncer.consecutive_candidates(), 1);
        assert_eq!(debouncer.observe(1, 1.02), Debounce::Confirmed);
        assert_eq!(debouncer.last_confirmed(), 1.02);
        assert_eq!(debouncer.consecutive_candidates(), 0);
    }

    #[test]
    fn test_gap_breaks_the_streak() {
        let mut debouncer = StepDebouncer::new(0.4, 2);
        assert_eq!(debouncer.observe(1, 1.00), Debounce::Pending(1));
        assert_eq!(debouncer.observe(0, 1.02), Debounce::Reset);
        assert_eq!(debouncer.observe(1, 1.04), Debounce::Pending(1));
    }

    #[test]
    fn test_minimum_spacing_between_steps() {
        let mut debouncer = StepDebouncer::new(0.4, 2);
        debouncer.observe(1, 1.00);
        assert_eq!(debouncer.observe(1, 1.02), Debounce::Confirmed);

        // Qualifying passes inside the spacing only reset.
        let mut t = 1.04;
        while t < 1.40 {
            assert_eq!(debouncer.observe(2, t), Debounce::Reset);
            t += 0.02;
        }

        assert_eq!(debouncer.observe(1, 1.44), Debounce::Pending(1));
        assert_eq!(debouncer.observe(1, 1.46), Debounce::Confirmed);
    }

    #[test]
    fn test_commits_one_step_regardless_of_candidates() {
        let mut debouncer = StepDebouncer::new(0.4, 2);
        let confirmed = (0..4)
            .map(|i| debouncer.observe(50, 1.0 + i as f64 * 0.02))
            .filter(|d| *d == Debounce::Confirmed)
            .count();
        assert_eq!(confirmed, 1);
    }

    #[test]
    fn test_nan_timestamp_never_qualifies() {
        let mut debouncer = StepDebouncer::new(0.4, 2);
        assert_eq!(debouncer.observe(3, 1.00), Debounce::Pending(1));
        assert_eq!(debouncer.observe(3, f64::NAN), Debounce::Reset);
        assert_eq!(debouncer.consecutive_candidates(), 0);
        assert_eq!(debouncer.last_confirmed(), 0.0);
    }

    #[test]
    fn test_reset() {
        let mut debouncer = StepDebouncer::new(0.4, 2);
        debouncer.observe(1, 1.0);
        debouncer.observe(1, 1.1);
        debouncer.reset();
        assert_eq!(debouncer.consecutive_candidates(), 0);
        assert_eq!(debouncer.last_confirmed(), 0.0);
    }
}
