//! Construction of metrics from window specifications.
//!
//! # Module Organization
//!
//! - [`Meter`] - a metric of one kind, bare or with one or more windows
//! - [`MetricBuilder`] - fluent builder choosing the [`Meter`] shape
//! - [`MetricConfig`] - serde-friendly description of a metric
//! - [`counter`], [`gauge`], [`histogram`] - one-call constructors
//!
//! # Examples
//!
//! ## One-call constructors
//!
//! ```
//! use metricraft::core::Metric;
//!
//! // Last minute by the second
//! let requests = metricraft::counter(&["60s1s"]);
//! requests.add(1.0);
//!
//! // Two resolutions at once
//! let latency = metricraft::histogram(&["2m1s", "1h1m"]);
//! latency.add(0.042);
//! ```
//!
//! ## Builder
//!
//! ```
//! use metricraft::builder::MetricBuilder;
//! use metricraft::core::{ManualClock, Metric};
//! use metricraft::metrics::Counter;
//!
//! let clock = ManualClock::default();
//! let hits = MetricBuilder::new()
//!     .window("3s1s")
//!     .clock(clock.shared())
//!     .build::<Counter>();
//! hits.add(1.0);
//! ```
//!
//! # Builder Comparison
//!
//! | Entry point | Kind chosen | Window parsing | Result |
//! |-------------|-------------|----------------|--------|
//! | `counter` / `gauge` / `histogram` | compile time | lenient | `Meter<M>` |
//! | `MetricBuilder::build` | compile time | lenient or strict | `Meter<M>` |
//! | `MetricBuilder::build_kind` | runtime | lenient or strict | `Box<dyn Metric>` |
//! | `MetricConfig::build` | runtime | lenient, `validate` for strict | `Box<dyn Metric>` |

#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod meter;
pub mod metric;

pub use config::MetricConfig;
pub use meter::Meter;
pub use metric::MetricBuilder;

use crate::metrics::{Counter, Gauge, Histogram};

/// Create a counter with one window per specification (none for a bare counter).
#[must_use]
pub fn counter(windows: &[&str]) -> Meter<Counter> {
    MetricBuilder::new().windows(windows).build()
}

/// Create a gauge with one window per specification (none for a bare gauge).
#[must_use]
pub fn gauge(windows: &[&str]) -> Meter<Gauge> {
    MetricBuilder::new().windows(windows).build()
}

/// Create a histogram with one window per specification (none for a bare histogram).
#[must_use]
pub fn histogram(windows: &[&str]) -> Meter<Histogram> {
    MetricBuilder::new().windows(windows).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Metric;

    #[test]
    fn test_free_constructors() {
        let c = counter(&[]);
        let g = gauge(&["10s1s"]);
        let h = histogram(&["10s1s", "1m10s"]);

        assert_eq!(c.window_count(), 0);
        assert_eq!(g.window_count(), 1);
        assert_eq!(h.window_count(), 2);

        c.add(1.0);
        assert_eq!(c.to_string(), r#"{"type":"c","count":1.0}"#);
    }

    #[test]
    fn test_bare_snapshots_are_zero() {
        assert_eq!(counter(&[]).to_string(), r#"{"type":"c","count":0.0}"#);
        assert_eq!(
            histogram(&[]).to_string(),
            r#"{"type":"h","p50":0.0,"p90":0.0,"p99":0.0}"#
        );
    }
}
