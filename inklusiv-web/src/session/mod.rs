//! Gesture session - per-page dispatch state
//!
//! Holds the debounce gate explicitly so the dispatcher is the only writer.

mod debounce;

pub use debounce::{Debouncer, DEFAULT_THRESHOLD_MS};

/// State shared by every frame of a page's gesture input
#[derive(Clone, Debug, Default)]
pub struct GestureSession {
    debounce: Debouncer,
    dispatched: u64,
}

impl GestureSession {
    pub fn new(debounce_ms: f64) -> Self {
        Self {
            debounce: Debouncer::new(debounce_ms),
            dispatched: 0,
        }
    }

    /// Claim the dispatch slot at `now_ms`.
    pub fn try_claim(&mut self, now_ms: f64) -> bool {
        let claimed = self.debounce.should_dispatch(now_ms);
        if claimed {
            self.dispatched += 1;
        }
        claimed
    }

    /// Number of gestures dispatched so far
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    pub fn debouncer(&self) -> &Debouncer {
        &self.debounce
    }
}
