//! A clock that advances only when told to.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use template_analysis::Clock;

/// Deterministic [`Clock`] for cache TTL tests.
///
/// Cloned handles share the same instant, so a test can hold one handle
/// and hand another to the cache.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    /// Create a clock fixed at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Advance the clock by `duration`.
    pub fn advance(&self, duration: Duration) {
        *self.now.lock().expect("clock mutex poisoned") += duration;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().expect("clock mutex poisoned")
    }
}
