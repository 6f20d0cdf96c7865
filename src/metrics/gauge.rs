//! Mean, minimum and maximum of observed values.

use std::fmt;

use parking_lot::Mutex;

use crate::core::{Mergeable, Metric, Snapshot, ValueSnapshot};

/// Running statistics. `min` and `max` are only meaningful while `count > 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct GaugeState {
    sum: f64,
    min: f64,
    max: f64,
    count: u64,
}

impl GaugeState {
    fn observe(&mut self, n: f64) {
        if self.count == 0 || n < self.min {
            self.min = n;
        }
        if self.count == 0 || n > self.max {
            self.max = n;
        }
        self.sum += n;
        self.count += 1;
    }

    fn absorb(&mut self, other: GaugeState) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = other;
            return;
        }
        self.sum += other.sum;
        self.count += other.count;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

/// Summary statistics of a stream of values.
///
/// All four fields sit behind one lock because a snapshot needs a consistent view of
/// them together. An empty gauge reports zero for mean, min and max.
///
/// # Examples
///
/// ```
/// use metricraft::core::Metric;
/// use metricraft::metrics::Gauge;
///
/// let gauge = Gauge::new();
/// gauge.add(1.0);
/// gauge.add(5.0);
/// assert_eq!(gauge.mean(), 3.0);
/// assert_eq!(gauge.min(), 1.0);
/// assert_eq!(gauge.max(), 5.0);
/// ```
#[derive(Default)]
pub struct Gauge {
    state: Mutex<GaugeState>,
}

impl Gauge {
    /// Create an empty gauge.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> GaugeState {
        *self.state.lock()
    }

    /// Number of observations.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.read().count
    }

    /// Sum of observations.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.read().sum
    }

    /// Arithmetic mean, or zero when empty.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.read().mean()
    }

    /// Smallest observation, or zero when empty.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.read().min
    }

    /// Largest observation, or zero when empty.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.read().max
    }
}

impl Metric for Gauge {
    fn add(&self, n: f64) {
        self.state.lock().observe(n);
    }

    fn reset(&self) {
        *self.state.lock() = GaugeState::default();
    }

    fn snapshot(&self) -> Snapshot {
        let state = self.read();
        ValueSnapshot::Gauge {
            mean: state.mean(),
            min: state.min,
            max: state.max,
        }
        .into()
    }
}

impl Mergeable for Gauge {
    fn merge(&self, other: &Self) {
        // Copy first: never hold both locks, so self-merge cannot deadlock.
        let theirs = other.read();
        self.state.lock().absorb(theirs);
    }
}

impl Clone for Gauge {
    fn clone(&self) -> Self {
        Self {
            state: Mutex::new(self.read()),
        }
    }
}

impl fmt::Debug for Gauge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.read();
        f.debug_struct("Gauge")
            .field("count", &state.count)
            .field("sum", &state.sum)
            .field("min", &state.min)
            .field("max", &state.max)
            .finish()
    }
}

impl fmt::Display for Gauge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.snapshot(), f)
    }
}
