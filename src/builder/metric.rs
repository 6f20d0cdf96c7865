//! Fluent builder for metrics with optional window history.
//!
//! # Shape Selection
//!
//! ```text
//! MetricBuilder::new()  ──.window("2m1s")──▶ ... ──.build::<M>()──▶ Meter<M>
//!
//!   0 windows  →  Meter::Bare(M)
//!   1 window   →  Meter::Windowed(Window<M>)
//!   2+ windows →  Meter::Multi(Composite<Window<M>>)
//! ```
//!
//! # Examples
//!
//! ```
//! use metricraft::builder::MetricBuilder;
//! use metricraft::core::{ManualClock, Metric};
//! use metricraft::metrics::Gauge;
//!
//! let clock = ManualClock::default();
//! let temperature = MetricBuilder::new()
//!     .window("10m1m")
//!     .window("24h1h")
//!     .clock(clock.shared())
//!     .build::<Gauge>();
//!
//! temperature.add(21.5);
//! assert_eq!(temperature.window_count(), 2);
//! ```

use crate::core::{system_clock, Mergeable, Metric, MetricKind, SharedClock, WindowSpec};
use crate::metrics::{Counter, Gauge, Histogram};
use crate::window::{Composite, Window};

use super::Meter;

/// Builder for [`Meter`]s.
///
/// Window specifications added through [`window`](Self::window) are parsed leniently, the
/// same way the free constructors do. Use [`window_spec`](Self::window_spec) with a
/// strictly parsed [`WindowSpec`] to reject malformed input instead.
///
/// # Thread Safety
///
/// The builder itself is a plain value. The metrics it builds are `Send + Sync`.
#[derive(Debug, Clone, Default)]
pub struct MetricBuilder {
    specs: Vec<WindowSpec>,
    clock: Option<SharedClock>,
}

impl MetricBuilder {
    /// Create a builder with no windows that reads wall-clock time.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a window from a specification string such as `"2m1s"`.
    #[must_use]
    pub fn window(mut self, spec: &str) -> Self {
        self.specs.push(WindowSpec::parse(spec));
        self
    }

    /// Add an already parsed window specification.
    #[must_use]
    pub fn window_spec(mut self, spec: WindowSpec) -> Self {
        self.specs.push(spec);
        self
    }

    /// Add several windows from specification strings.
    ///
    /// # Examples
    ///
    /// ```
    /// use metricraft::builder::MetricBuilder;
    /// use metricraft::metrics::Counter;
    ///
    /// let meter = MetricBuilder::new()
    ///     .windows(["15m30s", "1h1m"])
    ///     .build::<Counter>();
    /// assert_eq!(meter.window_count(), 2);
    /// ```
    #[must_use]
    pub fn windows<I, S>(mut self, specs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.specs
            .extend(specs.into_iter().map(|s| WindowSpec::parse(s.as_ref())));
        self
    }

    /// Read time from `clock` instead of the system clock.
    #[must_use]
    pub fn clock(mut self, clock: SharedClock) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Window specifications added so far.
    #[must_use]
    pub fn specs(&self) -> &[WindowSpec] {
        &self.specs
    }

    /// Build a metric with bucket kind `M`.
    #[must_use]
    pub fn build<M: Mergeable + Default>(&self) -> Meter<M> {
        let clock = self.clock.clone().unwrap_or_else(system_clock);

        match self.specs.as_slice() {
            [] => Meter::Bare(M::default()),
            [spec] => Meter::Windowed(Window::with_clock(*spec, clock)),
            specs => Meter::Multi(
                specs
                    .iter()
                    .map(|spec| Window::with_clock(*spec, clock.clone()))
                    .collect::<Composite<Window<M>>>(),
            ),
        }
    }

    /// Build a metric whose kind is only known at runtime.
    #[must_use]
    pub fn build_kind(&self, kind: MetricKind) -> Box<dyn Metric> {
        #[cfg(feature = "trace")]
        tracing::debug!(kind = kind.as_str(), windows = self.specs.len(), "building metric");

        match kind {
            MetricKind::Counter => Box::new(self.build::<Counter>()),
            MetricKind::Gauge => Box::new(self.build::<Gauge>()),
            MetricKind::Histogram => Box::new(self.build::<Histogram>()),
        }
    }
}
