//! Time sources for rolling windows.
//!
//! Windows never run timers. They ask their [`Clock`] for the current time whenever they
//! are updated or read, and roll over by however many intervals have passed. Swapping the
//! clock lets tests jump time forward exactly.
//!
//! Timestamps are durations since the Unix epoch, so interval rounding lines up with
//! wall-clock boundaries (a one-minute window rolls on the minute).

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Source of the current time.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Current time as a duration since the Unix epoch.
    fn now(&self) -> Duration;
}

/// Shared, type-erased clock handle.
pub type SharedClock = Arc<dyn Clock>;

/// Wall-clock time from [`SystemTime`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        // A clock set before 1970 reads as the epoch itself.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
    }
}

/// The default clock used by metrics that are not given one.
#[must_use]
pub fn system_clock() -> SharedClock {
    Arc::new(SystemClock)
}

/// A clock that only moves when told to.
///
/// Cloning shares the underlying time, so a test can keep one handle and give another to
/// the metric under test.
///
/// # Examples
///
/// ```
/// use metricraft::core::{Clock, ManualClock};
/// use std::time::Duration;
///
/// let clock = ManualClock::new(Duration::from_secs(100));
/// let handle = clock.clone();
///
/// clock.advance(Duration::from_secs(5));
/// assert_eq!(handle.now(), Duration::from_secs(105));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    /// Create a clock reading `start`.
    #[must_use]
    pub fn new(start: Duration) -> Self {
        Self {
            nanos: Arc::new(AtomicU64::new(to_nanos(start))),
        }
    }

    /// Set the current time.
    pub fn set(&self, now: Duration) {
        self.nanos.store(to_nanos(now), Ordering::Release);
    }

    /// Move the current time forward.
    pub fn advance(&self, by: Duration) {
        self.nanos.fetch_add(to_nanos(by), Ordering::AcqRel);
    }

    /// A shared handle to this clock for handing to metrics.
    #[must_use]
    pub fn shared(&self) -> SharedClock {
        Arc::new(self.clone())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::Acquire))
    }
}

fn to_nanos(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}
