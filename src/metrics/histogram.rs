//! Streaming histogram with bounded memory and approximate quantiles.
//!
//! # Design
//!
//! The histogram keeps a sorted list of bins, each a `(value, weight)` pair. A new
//! observation either bumps the weight of a bin with exactly that value or becomes a new
//! bin of weight 1. Once there are more than [`MAX_BINS`] bins, the two adjacent bins with
//! the smallest gap between their values are merged into one at their weighted mean. The
//! list therefore never grows past the cap, and the total weight always equals the number
//! of observations.
//!
//! Quantiles are read by walking the bins in order until the cumulative weight reaches
//! `q * total`. While fewer than [`MAX_BINS`] distinct values have been seen this is the
//! exact nearest-rank value; after compaction it is an approximation whose error depends
//! on the spread of the data.
//!
//! # Examples
//!
//! ```
//! use metricraft::core::Metric;
//! use metricraft::metrics::Histogram;
//!
//! let histogram = Histogram::new();
//! for i in 0..100_i32 {
//!     histogram.add(i as f64);
//! }
//!
//! assert_eq!(histogram.quantile(0.50), 49.0);
//! assert_eq!(histogram.quantile(0.90), 89.0);
//! assert_eq!(histogram.quantile(0.99), 98.0);
//! ```

use std::fmt;

use parking_lot::Mutex;

use crate::core::{Mergeable, Metric, Snapshot, ValueSnapshot};

/// Maximum number of bins kept before compaction.
pub const MAX_BINS: usize = 100;

/// One point of the summarized distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    /// Representative value.
    pub value: f64,
    /// Number of observations folded into this bin.
    pub weight: f64,
}

#[derive(Debug, Clone, Default)]
struct HistogramState {
    /// Strictly increasing by value.
    bins: Vec<Bin>,
    total: u64,
}

impl HistogramState {
    fn insert(&mut self, value: f64, weight: f64) {
        let idx = self.bins.partition_point(|b| b.value < value);
        match self.bins.get_mut(idx) {
            Some(bin) if bin.value == value => bin.weight += weight,
            _ => self.bins.insert(idx, Bin { value, weight }),
        }
    }

    /// Merge closest neighbours until the bin count is back at `cap`.
    fn compact(&mut self, cap: usize) {
        #[cfg(feature = "trace")]
        let before = self.bins.len();

        while self.bins.len() > cap {
            let mut closest = 0;
            let mut gap = f64::INFINITY;
            for (i, pair) in self.bins.windows(2).enumerate() {
                let d = pair[1].value - pair[0].value;
                if d < gap {
                    gap = d;
                    closest = i;
                }
            }

            let (left, right) = (self.bins[closest], self.bins[closest + 1]);
            let weight = left.weight + right.weight;
            self.bins[closest] = Bin {
                value: (left.value * left.weight + right.value * right.weight) / weight,
                weight,
            };
            self.bins.remove(closest + 1);
        }

        #[cfg(feature = "trace")]
        if before > cap {
            tracing::trace!(before, after = self.bins.len(), "histogram compacted");
        }
    }

    fn quantile(&self, q: f64) -> f64 {
        let mut remaining = q * self.total as f64;
        for bin in &self.bins {
            remaining -= bin.weight;
            if remaining <= 0.0 {
                return bin.value;
            }
        }
        0.0
    }
}

/// Approximate distribution of observed values, reported as p50/p90/p99.
///
/// Insertion, compaction and quantile reads share one lock; compaction always finishes
/// inside the `add` that triggered it.
#[derive(Default)]
pub struct Histogram {
    state: Mutex<HistogramState>,
}

impl Histogram {
    /// Create an empty histogram.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Estimate the value at quantile `q`.
    ///
    /// Returns 0 for an empty histogram. Non-decreasing in `q`. A `q` outside `0.0..=1.0`
    /// is clamped, so it returns the lowest or highest bin rather than 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use metricraft::core::Metric;
    /// use metricraft::metrics::Histogram;
    ///
    /// let histogram = Histogram::new();
    /// for x in [3.0, 1.0, 2.0] {
    ///     histogram.add(x);
    /// }
    /// assert_eq!(histogram.quantile(0.5), 2.0);
    /// assert_eq!(histogram.quantile(-1.0), 1.0);
    /// assert_eq!(histogram.quantile(7.0), 3.0);
    /// ```
    #[must_use]
    pub fn quantile(&self, q: f64) -> f64 {
        self.state.lock().quantile(q.clamp(0.0, 1.0))
    }

    /// Number of observations since the last reset.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.state.lock().total
    }

    /// Number of bins currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().bins.len()
    }

    /// Whether nothing has been observed since the last reset.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.lock().bins.is_empty()
    }

    /// Copy of the current bins, ascending by value.
    #[must_use]
    pub fn bins(&self) -> Vec<Bin> {
        self.state.lock().bins.clone()
    }
}

impl Metric for Histogram {
    fn add(&self, n: f64) {
        let mut state = self.state.lock();
        state.total += 1;
        state.insert(n, 1.0);
        state.compact(MAX_BINS);
    }

    fn reset(&self) {
        let mut state = self.state.lock();
        state.bins.clear();
        state.total = 0;
    }

    fn snapshot(&self) -> Snapshot {
        let state = self.state.lock();
        ValueSnapshot::Histogram {
            p50: state.quantile(0.5),
            p90: state.quantile(0.9),
            p99: state.quantile(0.99),
        }
        .into()
    }
}

impl Mergeable for Histogram {
    fn merge(&self, other: &Self) {
        let theirs = other.state.lock().clone();
        if theirs.total == 0 {
            return;
        }

        let mut state = self.state.lock();
        for bin in theirs.bins {
            state.insert(bin.value, bin.weight);
        }
        state.total += theirs.total;
        state.compact(MAX_BINS);
    }
}

impl Clone for Histogram {
    fn clone(&self) -> Self {
        Self {
            state: Mutex::new(self.state.lock().clone()),
        }
    }
}

impl fmt::Debug for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Histogram")
            .field("bins", &state.bins.len())
            .field("total", &state.total)
            .finish()
    }
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.snapshot(), f)
    }
}
