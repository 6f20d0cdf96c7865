//! Serializable point-in-time views of metrics.
//!
//! Every metric folds its state into a [`Snapshot`]. The JSON shapes are stable:
//!
//! ```text
//! counter    {"type":"c","count":N}
//! gauge      {"type":"g","mean":N,"min":N,"max":N}
//! histogram  {"type":"h","p50":N,"p90":N,"p99":N}
//! window     {"interval":SECS,"total":<kind>,"samples":[<kind>, ...]}   newest first
//! composite  {"metrics":[<snapshot>, ...]}
//! ```
//!
//! # Examples
//!
//! ```
//! use metricraft::core::{Snapshot, ValueSnapshot};
//!
//! let snap = Snapshot::from(ValueSnapshot::Counter { count: 2.0 });
//! assert_eq!(snap.to_json().unwrap(), r#"{"type":"c","count":2.0}"#);
//!
//! let back = Snapshot::from_json(r#"{"type":"c","count":2}"#).unwrap();
//! assert_eq!(back, snap);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Snapshot of a single counter, gauge or histogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ValueSnapshot {
    /// Running sum.
    #[serde(rename = "c")]
    Counter {
        /// Sum of all added values.
        count: f64,
    },

    /// Summary statistics. All zero when nothing was observed.
    #[serde(rename = "g")]
    Gauge {
        /// Arithmetic mean.
        mean: f64,
        /// Smallest observation.
        min: f64,
        /// Largest observation.
        max: f64,
    },

    /// Approximate quantiles. All zero when nothing was observed.
    #[serde(rename = "h")]
    Histogram {
        /// Median.
        p50: f64,
        /// 90th percentile.
        p90: f64,
        /// 99th percentile.
        p99: f64,
    },
}

/// Snapshot of a rolling window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSnapshot {
    /// Bucket length in seconds.
    pub interval: f64,
    /// All buckets merged into one.
    pub total: Box<Snapshot>,
    /// One entry per bucket, newest first.
    pub samples: Vec<Snapshot>,
}

/// Snapshot of a composite: its members side by side, not merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeSnapshot {
    /// Member snapshots in construction order.
    pub metrics: Vec<Snapshot>,
}

/// Snapshot of any metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Snapshot {
    /// A bare counter, gauge or histogram.
    Value(ValueSnapshot),
    /// A rolling window.
    Window(WindowSnapshot),
    /// A composite of independently configured metrics.
    Composite(CompositeSnapshot),
}

impl Snapshot {
    /// Compact JSON text.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON text.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Structured JSON value.
    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Parse snapshot JSON produced by [`Snapshot::to_json`].
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The bare value, if this is a counter, gauge or histogram snapshot.
    #[must_use]
    pub fn as_value(&self) -> Option<&ValueSnapshot> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// The window view, if this is a window snapshot.
    #[must_use]
    pub fn as_window(&self) -> Option<&WindowSnapshot> {
        match self {
            Self::Window(w) => Some(w),
            _ => None,
        }
    }

    /// The composite view, if this is a composite snapshot.
    #[must_use]
    pub fn as_composite(&self) -> Option<&CompositeSnapshot> {
        match self {
            Self::Composite(c) => Some(c),
            _ => None,
        }
    }

    /// Counter sum, if this is a counter snapshot.
    #[must_use]
    pub fn count(&self) -> Option<f64> {
        match self {
            Self::Value(ValueSnapshot::Counter { count }) => Some(*count),
            _ => None,
        }
    }
}

impl ValueSnapshot {
    /// Single-letter kind tag used in JSON.
    #[must_use]
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::Counter { .. } => "c",
            Self::Gauge { .. } => "g",
            Self::Histogram { .. } => "h",
        }
    }
}

impl WindowSnapshot {
    /// Counter sums per bucket, newest first. Empty if the buckets are not counters.
    #[must_use]
    pub fn counts(&self) -> Vec<f64> {
        self.samples.iter().filter_map(Snapshot::count).collect()
    }
}

impl From<ValueSnapshot> for Snapshot {
    fn from(v: ValueSnapshot) -> Self {
        Self::Value(v)
    }
}

impl From<WindowSnapshot> for Snapshot {
    fn from(w: WindowSnapshot) -> Self {
        Self::Window(w)
    }
}

impl From<CompositeSnapshot> for Snapshot {
    fn from(c: CompositeSnapshot) -> Self {
        Self::Composite(c)
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = self.to_json().map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
