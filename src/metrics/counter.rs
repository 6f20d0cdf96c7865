//! Lock-free running sum.

use std::fmt;

use crate::core::{Mergeable, Metric, Snapshot, ValueSnapshot};
use crate::sync::{AtomicF64, CacheLinePadded};

/// A running sum of every value added since the last reset.
///
/// Updates never block: each `add` is a compare-and-swap loop on the bit pattern of the
/// sum. Negative deltas are accepted, so a counter can also track a level that goes up and
/// down.
///
/// # Examples
///
/// ```
/// use metricraft::core::Metric;
/// use metricraft::metrics::Counter;
///
/// let counter = Counter::new();
/// counter.add(1.0);
/// counter.add(10.0);
/// assert_eq!(counter.to_string(), r#"{"type":"c","count":11.0}"#);
/// ```
#[derive(Default)]
pub struct Counter {
    sum: CacheLinePadded<AtomicF64>,
}

impl Counter {
    /// Create a counter at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current sum.
    #[inline]
    #[must_use]
    pub fn value(&self) -> f64 {
        self.sum.load()
    }
}

impl Metric for Counter {
    #[inline]
    fn add(&self, n: f64) {
        self.sum.fetch_add(n);
    }

    fn reset(&self) {
        self.sum.store(0.0);
    }

    fn snapshot(&self) -> Snapshot {
        ValueSnapshot::Counter {
            count: self.value(),
        }
        .into()
    }
}

impl Mergeable for Counter {
    fn merge(&self, other: &Self) {
        self.add(other.value());
    }
}

impl Clone for Counter {
    fn clone(&self) -> Self {
        Self {
            sum: CacheLinePadded::new(AtomicF64::new(self.value())),
        }
    }
}

impl fmt::Debug for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Counter").field("value", &self.value()).finish()
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.snapshot(), f)
    }
}
