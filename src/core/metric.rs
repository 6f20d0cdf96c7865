//! Core metric trait definitions.
//!
//! # Trait Hierarchy
//!
//! ```text
//! Metric  (add / reset / snapshot, object safe, &self everywhere)
//!     └── Mergeable  (fold another same-kind instance into self)
//! ```
//!
//! All methods take `&self`: every metric synchronizes internally (atomics for
//! [`Counter`], a per-instance mutex for the rest), so metrics are shared through `Arc`
//! without an outer lock.
//!
//! # Merge Contract
//!
//! `merge` must be associative and commutative, and merging an untouched or freshly reset
//! instance must leave `self` unchanged. Rolling windows rely on this to compute their
//! `total` by folding every bucket, stale or not, into one accumulator.
//!
//! [`Counter`]: crate::metrics::Counter

use std::fmt;
use std::sync::Arc;

use crate::core::snapshot::Snapshot;
use crate::error::Result;

/// A single meter: counter, gauge, histogram, or a window or composite of them.
pub trait Metric: Send + Sync {
    /// Record one value.
    fn add(&self, n: f64);

    /// Return to the freshly constructed state.
    fn reset(&self);

    /// Point-in-time view of the current state.
    ///
    /// For windowed metrics this may advance the window, so it takes the same lock as
    /// [`Metric::add`].
    fn snapshot(&self) -> Snapshot;

    /// Compact JSON text of a fresh snapshot.
    fn to_json(&self) -> Result<String> {
        self.snapshot().to_json()
    }
}

/// A metric that can absorb the state of another instance of the same type.
pub trait Mergeable: Metric {
    /// Fold `other`'s accumulated state into `self`.
    ///
    /// `other` is read but not modified. Passing `self` as `other` is allowed and merges a
    /// copy of the current state.
    fn merge(&self, other: &Self);
}

impl<M: Metric + ?Sized> Metric for Box<M> {
    fn add(&self, n: f64) {
        (**self).add(n);
    }

    fn reset(&self) {
        (**self).reset();
    }

    fn snapshot(&self) -> Snapshot {
        (**self).snapshot()
    }
}

impl<M: Metric + ?Sized> Metric for Arc<M> {
    fn add(&self, n: f64) {
        (**self).add(n);
    }

    fn reset(&self) {
        (**self).reset();
    }

    fn snapshot(&self) -> Snapshot {
        (**self).snapshot()
    }
}

impl<M: Mergeable> Mergeable for Arc<M> {
    fn merge(&self, other: &Self) {
        (**self).merge(other);
    }
}

impl fmt::Debug for dyn Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Metric").field(&self.snapshot()).finish()
    }
}

impl fmt::Display for dyn Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.snapshot(), f)
    }
}

/// The three bucket kinds a metric can be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    /// Running sum.
    #[serde(alias = "c")]
    Counter,
    /// Mean, min and max.
    #[serde(alias = "g")]
    Gauge,
    /// p50, p90 and p99.
    #[serde(alias = "h")]
    Histogram,
}

impl MetricKind {
    /// Single-letter tag used in snapshot JSON.
    #[must_use]
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::Counter => "c",
            Self::Gauge => "g",
            Self::Histogram => "h",
        }
    }

    /// Lowercase name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Counter => "counter",
            Self::Gauge => "gauge",
            Self::Histogram => "histogram",
        }
    }
}

impl std::str::FromStr for MetricKind {
    type Err = crate::error::MetricraftError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "counter" => Ok(Self::Counter),
            "g" | "gauge" => Ok(Self::Gauge),
            "h" | "histogram" => Ok(Self::Histogram),
            _ => Err(crate::error::MetricraftError::unknown_metric_kind(s)),
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_str() {
        assert_eq!("c".parse::<MetricKind>().unwrap(), MetricKind::Counter);
        assert_eq!("Gauge".parse::<MetricKind>().unwrap(), MetricKind::Gauge);
        assert_eq!(" histogram ".parse::<MetricKind>().unwrap(), MetricKind::Histogram);
        assert!("meter".parse::<MetricKind>().is_err());
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(MetricKind::Counter.type_tag(), "c");
        assert_eq!(MetricKind::Gauge.type_tag(), "g");
        assert_eq!(MetricKind::Histogram.type_tag(), "h");
        assert_eq!(MetricKind::Histogram.to_string(), "histogram");
    }

    #[test]
    fn test_kind_serde() {
        let kind: MetricKind = serde_json::from_str(r#""gauge""#).unwrap();
        assert_eq!(kind, MetricKind::Gauge);
        assert_eq!(serde_json::to_string(&MetricKind::Counter).unwrap(), r#""counter""#);
    }
}
