//! Debounce gate - one dispatch per window
//!
//! Every hand and every gesture type shares a single gate, so two hands
//! gesturing in the same frame still only trigger one action.

/// Default minimum time between dispatched gestures (ms)
pub const DEFAULT_THRESHOLD_MS: f64 = 500.0;

/// Minimum-interval gate over a millisecond clock
#[derive(Clone, Debug)]
pub struct Debouncer {
    /// Timestamp of the last dispatch that got through
    last_dispatch_ms: Option<f64>,
    /// Minimum interval between dispatches
    threshold_ms: f64,
}

impl Debouncer {
    pub fn new(threshold_ms: f64) -> Self {
        Self {
            last_dispatch_ms: None,
            threshold_ms,
        }
    }

    /// Set minimum interval
    pub fn set_threshold(&mut self, threshold_ms: f64) {
        self.threshold_ms = threshold_ms;
    }

    pub fn threshold(&self) -> f64 {
        self.threshold_ms
    }

    /// Check the gate at `now_ms` and claim it if open.
    ///
    /// Open when nothing has been dispatched yet or at least `threshold_ms`
    /// has elapsed since the last dispatch (boundary inclusive). Claiming
    /// records `now_ms` as the new last dispatch.
    pub fn should_dispatch(&mut self, now_ms: f64) -> bool {
        if let Some(last) = self.last_dispatch_ms {
            if now_ms - last < self.threshold_ms {
                return false;
            }
        }
        self.last_dispatch_ms = Some(now_ms);
        true
    }

    /// Timestamp of the last dispatch, if any
    pub fn last_dispatch(&self) -> Option<f64> {
        self.last_dispatch_ms
    }

    pub fn reset(&mut self) {
        self.last_dispatch_ms = None;
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_dispatch_always_passes() {
        let mut gate = Debouncer::default();
        assert!(gate.should_dispatch(0.0));
        assert_eq!(gate.last_dispatch(), Some(0.0));
    }

    #[test]
    fn test_within_threshold_is_suppressed() {
        let mut gate = Debouncer::default();
        assert!(gate.should_dispatch(10_000.0));
        assert!(!gate.should_dispatch(10_499.0));
        // Suppressed calls do not move the window
        assert_eq!(gate.last_dispatch(), Some(10_000.0));
    }

    #[test]
    fn test_after_threshold_passes() {
        let mut gate = Debouncer::default();
        assert!(gate.should_dispatch(10_000.0));
        assert!(gate.should_dispatch(10_501.0));
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let mut gate = Debouncer::default();
        assert!(gate.should_dispatch(10_000.0));
        assert!(gate.should_dispatch(10_500.0));
        assert!(!gate.should_dispatch(10_999.0));
    }

    #[test]
    fn test_reset_reopens_gate() {
        let mut gate = Debouncer::new(1000.0);
        assert!(gate.should_dispatch(5.0));
        gate.reset();
        assert!(gate.should_dispatch(6.0));
    }
}
