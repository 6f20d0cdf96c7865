//! Core traits and value types shared by every metric.
//!
//! - [`Metric`] / [`Mergeable`]: the capability every meter implements
//! - [`Snapshot`]: the serializable view a meter produces
//! - [`WindowSpec`]: parsed `"<total><interval>"` window configuration
//! - [`Clock`]: pluggable time source for rolling windows
//!
//! # Examples
//!
//! ```
//! use metricraft::core::{Metric, WindowSpec};
//! use metricraft::metrics::Counter;
//!
//! let counter = Counter::new();
//! counter.add(3.0);
//! assert_eq!(counter.snapshot().count(), Some(3.0));
//!
//! assert_eq!(WindowSpec::parse("1h1m").bucket_count(), 60);
//! ```

#![allow(clippy::module_name_repetitions)]

pub mod clock;
pub mod metric;
pub mod snapshot;
pub mod spec;

pub use clock::{system_clock, Clock, ManualClock, SharedClock, SystemClock};
pub use metric::{Mergeable, Metric, MetricKind};
pub use snapshot::{CompositeSnapshot, Snapshot, ValueSnapshot, WindowSnapshot};
pub use spec::{SpecParseError, WindowSpec, DEFAULT_BUCKETS, DEFAULT_INTERVAL, MAX_BUCKETS};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use super::clock::{Clock, ManualClock, SystemClock};
    pub use super::metric::{Mergeable, Metric, MetricKind};
    pub use super::snapshot::Snapshot;
    pub use super::spec::WindowSpec;
}
