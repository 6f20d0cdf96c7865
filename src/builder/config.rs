//! Declarative metric definitions.
//!
//! A [`MetricConfig`] names a kind and a list of window specifications, and can be read
//! from any serde format:
//!
//! ```json
//! { "kind": "histogram", "windows": ["2m1s", "1h1m"] }
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{Metric, MetricKind, SharedClock, WindowSpec};
use crate::error::Result;

use super::MetricBuilder;

/// Serializable description of a metric.
///
/// # Examples
///
/// ```
/// use metricraft::builder::MetricConfig;
/// use metricraft::core::Metric;
///
/// let config: MetricConfig = serde_json::from_str(r#"{"kind": "c", "windows": ["3s1s"]}"#)?;
/// config.validate()?;
///
/// let requests = config.build();
/// requests.add(1.0);
/// assert!(requests.snapshot().as_window().is_some());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricConfig {
    /// Bucket kind.
    pub kind: MetricKind,
    /// Window specifications, in reporting order. Empty for a bare metric.
    #[serde(default)]
    pub windows: Vec<String>,
}

impl MetricConfig {
    /// Create a config with no windows.
    #[must_use]
    pub fn new(kind: MetricKind) -> Self {
        Self {
            kind,
            windows: Vec::new(),
        }
    }

    /// Append a window specification.
    #[must_use]
    pub fn with_window(mut self, spec: impl Into<String>) -> Self {
        self.windows.push(spec.into());
        self
    }

    /// Check every window specification strictly.
    ///
    /// # Errors
    ///
    /// Returns [`MetricraftError::InvalidWindowSpec`](crate::MetricraftError::InvalidWindowSpec)
    /// for the first specification that does not parse.
    pub fn validate(&self) -> Result<()> {
        self.window_specs().map(|_| ())
    }

    /// Parse every window specification strictly.
    ///
    /// # Errors
    ///
    /// Same as [`validate`](Self::validate).
    pub fn window_specs(&self) -> Result<Vec<WindowSpec>> {
        self.windows.iter().map(|s| s.parse()).collect()
    }

    /// Build the metric, reading wall-clock time.
    ///
    /// Specifications are parsed leniently; call [`validate`](Self::validate) first to
    /// reject malformed ones.
    #[must_use]
    pub fn build(&self) -> Box<dyn Metric> {
        self.builder().build_kind(self.kind)
    }

    /// Build the metric, reading time from `clock`.
    #[must_use]
    pub fn build_with_clock(&self, clock: SharedClock) -> Box<dyn Metric> {
        self.builder().clock(clock).build_kind(self.kind)
    }

    fn builder(&self) -> MetricBuilder {
        MetricBuilder::new().windows(&self.windows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ManualClock;
    use crate::error::MetricraftError;
    use std::time::Duration;

    #[test]
    fn test_deserialize_defaults() {
        let config: MetricConfig = serde_json::from_str(r#"{"kind":"gauge"}"#).unwrap();
        assert_eq!(config, MetricConfig::new(MetricKind::Gauge));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_kind_aliases() {
        for (name, kind) in [
            ("c", MetricKind::Counter),
            ("counter", MetricKind::Counter),
            ("h", MetricKind::Histogram),
        ] {
            let json = format!(r#"{{"kind":"{name}"}}"#);
            let config: MetricConfig = serde_json::from_str(&json).unwrap();
            assert_eq!(config.kind, kind);
        }
        assert!(serde_json::from_str::<MetricConfig>(r#"{"kind":"timer"}"#).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_window() {
        let config = MetricConfig::new(MetricKind::Counter)
            .with_window("2m1s")
            .with_window("2q1s");
        let err = config.validate().unwrap_err();
        assert!(matches!(err, MetricraftError::InvalidWindowSpec { ref spec, .. } if spec == "2q1s"));
    }

    #[test]
    fn test_build_with_clock() {
        let clock = ManualClock::new(Duration::from_secs(60));
        let config = MetricConfig::new(MetricKind::Counter)
            .with_window("3s1s")
            .with_window("1m1s");
        let metric = config.build_with_clock(clock.shared());
        metric.add(4.0);

        let snap = metric.snapshot();
        let metrics = &snap.as_composite().unwrap().metrics;
        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics[1].as_window().unwrap().samples.len(), 60);
    }

    #[test]
    fn test_serialize() {
        let config = MetricConfig::new(MetricKind::Histogram).with_window("1h1m");
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"kind":"histogram","windows":["1h1m"]}"#);
    }
}
