//! The three bucket kinds: counter, gauge and histogram.
//!
//! Each one is usable on its own or as the bucket type of a
//! [`Window`](crate::window::Window).
//!
//! | Metric | Tracks | Snapshot | Update cost | Thread Safety |
//! |--------|--------|----------|-------------|---------------|
//! | [`Counter`] | running sum | `{"type":"c","count"}` | one CAS loop | Lock-free |
//! | [`Gauge`] | count, sum, min, max | `{"type":"g","mean","min","max"}` | O(1) | Mutex |
//! | [`Histogram`] | up to 100 weighted bins | `{"type":"h","p50","p90","p99"}` | O(bins) | Mutex |
//!
//! # Examples
//!
//! ```
//! use metricraft::core::{Mergeable, Metric};
//! use metricraft::metrics::{Counter, Gauge, Histogram};
//!
//! let requests = Counter::new();
//! let queue_depth = Gauge::new();
//! let latency = Histogram::new();
//!
//! requests.add(1.0);
//! queue_depth.add(12.0);
//! latency.add(0.250);
//!
//! // Merge folds another instance's state in
//! let other = Counter::new();
//! other.add(4.0);
//! requests.merge(&other);
//! assert_eq!(requests.value(), 5.0);
//! ```

pub mod counter;
pub mod gauge;
pub mod histogram;

pub use counter::Counter;
pub use gauge::Gauge;
pub use histogram::{Bin, Histogram, MAX_BINS};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{Counter, Gauge, Histogram};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Metric, Snapshot};

    #[test]
    fn test_module_exports() {
        let _counter = Counter::new();
        let _gauge = Gauge::new();
        let _histogram = Histogram::new();
        assert_eq!(MAX_BINS, 100);
    }

    #[test]
    fn test_kinds_tag_their_snapshots() {
        let tags: Vec<&str> = [
            Counter::new().snapshot(),
            Gauge::new().snapshot(),
            Histogram::new().snapshot(),
        ]
        .iter()
        .filter_map(Snapshot::as_value)
        .map(|v| v.type_tag())
        .collect();
        assert_eq!(tags, vec!["c", "g", "h"]);
    }
}
