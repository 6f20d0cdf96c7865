//! Metricraft: in-process metric aggregation with rolling time windows.
//!
//! Metricraft records numeric observations into three kinds of metric and keeps optional
//! history of them in fixed-resolution rolling windows. Every metric renders a JSON
//! snapshot, suitable for exposing on a debug endpoint or shipping to a collector.
//!
//! # Quick Start
//!
//! ```
//! use metricraft::prelude::*;
//!
//! // Number of requests over the last minute, by the second
//! let requests = metricraft::counter(&["60s1s"]);
//! requests.add(1.0);
//!
//! // Response times over the last two minutes and the last hour
//! let latency = metricraft::histogram(&["2m1s", "1h1m"]);
//! latency.add(0.120);
//!
//! println!("{}", requests.snapshot());
//! ```
//!
//! # Metric Kinds
//!
//! | Kind | Tracks | Snapshot |
//! |------|--------|----------|
//! | [`Counter`] | running sum | `{"type":"c","count":…}` |
//! | [`Gauge`] | mean, min and max | `{"type":"g","mean":…,"min":…,"max":…}` |
//! | [`Histogram`] | approximate quantiles over at most 100 bins | `{"type":"h","p50":…,"p90":…,"p99":…}` |
//!
//! # Windows
//!
//! A window specification such as `"15m30s"` reads as *total retention* followed by
//! *bucket interval*: thirty 30-second buckets covering 15 minutes. Units are `s`, `m`,
//! `h`, `d`, `w`, `M` (30 days) and `y` (365 days). A [`Window`] rolls over lazily: every
//! call first checks the clock and discards buckets that aged out.
//!
//! ```
//! use metricraft::prelude::*;
//! use std::time::Duration;
//!
//! let clock = ManualClock::new(Duration::from_secs(1_000));
//! let window: Window<Counter> = Window::with_clock(WindowSpec::parse("3s1s"), clock.shared());
//!
//! window.add(1.0);
//! clock.advance(Duration::from_secs(1));
//! window.add(5.0);
//!
//! assert_eq!(
//!     window.to_string(),
//!     r#"{"interval":1.0,"total":{"type":"c","count":6.0},"samples":[{"type":"c","count":5.0},{"type":"c","count":1.0},{"type":"c","count":0.0}]}"#
//! );
//! ```
//!
//! # Concurrency
//!
//! All metrics take `&self` and are `Send + Sync`, so they can be shared through an
//! [`Arc`](std::sync::Arc) without external locking. Counters are lock-free; gauges,
//! histograms and windows use a short-held mutex.
//!
//! # Features
//!
//! - `trace` (default) - emit `tracing` events for window creation, fallback window
//!   specifications and skipped merges

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::float_cmp)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc(html_root_url = "https://docs.rs/metricraft/0.1.0")]

/// Core traits, snapshots, window specifications and clocks
pub mod core;

/// Error types and result aliases
pub mod error;

/// Counter, gauge and histogram
pub mod metrics;

/// Rolling windows and composites
pub mod window;

/// Builders and declarative configuration
pub mod builder;

/// Concurrency primitives
pub mod sync;

// Re-export commonly used types at crate root
pub use error::{MetricraftError, Result};

pub use crate::core::{Mergeable, Metric, MetricKind, Snapshot, WindowSpec};

pub use metrics::{Counter, Gauge, Histogram};

pub use window::{Composite, Window};

pub use builder::{counter, gauge, histogram, Meter, MetricBuilder, MetricConfig};

/// Prelude module for convenient imports.
///
/// # Examples
///
/// ```
/// use metricraft::prelude::*;
///
/// let gauge = Gauge::new();
/// gauge.add(3.0);
/// assert_eq!(gauge.mean(), 3.0);
/// ```
pub mod prelude {
    pub use crate::core::prelude::*;
    pub use crate::error::{MetricraftError, Result};
    pub use crate::metrics::prelude::*;
    pub use crate::window::{Composite, Window};

    pub use crate::builder::{Meter, MetricBuilder, MetricConfig};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_prelude_imports() {
        let counter = Counter::new();
        counter.add(2.0);
        assert_eq!(counter.value(), 2.0);
    }

    #[test]
    fn test_trait_objects() {
        let metrics: Vec<Box<dyn Metric>> = vec![
            Box::new(Counter::new()),
            Box::new(Gauge::new()),
            Box::new(Histogram::new()),
        ];
        for metric in &metrics {
            metric.add(1.0);
        }
        let tags: Vec<_> = metrics
            .iter()
            .map(|m| m.snapshot().as_value().map(|v| v.type_tag()))
            .collect();
        assert_eq!(tags, vec![Some("c"), Some("g"), Some("h")]);
    }

    #[test]
    fn test_shared_across_threads() {
        let clock = ManualClock::new(Duration::from_secs(10));
        let meter = Arc::new(
            MetricBuilder::new()
                .window("3s1s")
                .clock(clock.shared())
                .build::<Counter>(),
        );

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let meter = Arc::clone(&meter);
                std::thread::spawn(move || meter.add(1.0))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snap = meter.snapshot();
        assert_eq!(snap.as_window().unwrap().total.count(), Some(4.0));
    }

    #[test]
    fn test_root_constructors() {
        let c = crate::counter(&["3s1s"]);
        let g = crate::gauge(&[]);
        let h = crate::histogram(&["3s1s", "1m1s"]);
        assert_eq!((c.window_count(), g.window_count(), h.window_count()), (1, 0, 2));
    }
}
