use jiff::{SignedDuration, Timestamp};
use linkhop_core::Clock;
use parking_lot::Mutex;
use std::sync::Arc;

/// A clock that only moves when told to.
///
/// Clones share the same instant, so a test can keep one handle and
/// advance the time seen by a service holding another.
#[derive(Debug, Clone)]
pub struct TestClock {
    inner: Arc<Mutex<Timestamp>>,
}

impl TestClock {
    pub fn new(now: Timestamp) -> Self {
        Self {
            inner: Arc::new(Mutex::new(now)),
        }
    }

    /// Starts the clock at `second` seconds after the Unix epoch.
    ///
    /// # Panics
    ///
    /// Panics if `second` is outside jiff's supported range.
    pub fn at_second(second: i64) -> Self {
        Self::new(Timestamp::from_second(second).expect("timestamp in range"))
    }

    pub fn set(&self, now: Timestamp) {
        *self.inner.lock() = now;
    }

    /// Moves the clock forward by `by`.
    ///
    /// # Panics
    ///
    /// Panics if the result overflows jiff's supported range.
    pub fn advance(&self, by: SignedDuration) {
        let mut now = self.inner.lock();
        *now = now.checked_add(by).expect("advanced timestamp in range");
    }
}

impl Clock for TestClock {
    fn now(&self) -> Timestamp {
        *self.inner.lock()
    }
}
