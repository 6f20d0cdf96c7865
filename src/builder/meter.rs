//! The shapes a built metric can take.

use std::fmt;

use crate::core::{Mergeable, Metric, Snapshot};
use crate::window::{Composite, Window};

/// A metric of bucket kind `M`, with zero, one or several windows of history.
///
/// [`MetricBuilder`](super::MetricBuilder) picks the variant from the number of window
/// specifications it was given.
///
/// # Examples
///
/// ```
/// use metricraft::builder::Meter;
/// use metricraft::core::Metric;
/// use metricraft::metrics::Counter;
///
/// let bare: Meter<Counter> = metricraft::counter(&[]);
/// assert!(matches!(bare, Meter::Bare(_)));
///
/// let windowed = metricraft::counter(&["3s1s"]);
/// assert!(matches!(windowed, Meter::Windowed(_)));
///
/// let multi = metricraft::counter(&["2m1s", "1h1m"]);
/// assert!(matches!(multi, Meter::Multi(_)));
/// ```
pub enum Meter<M> {
    /// No history: the bucket metric itself.
    Bare(M),
    /// One rolling window.
    Windowed(Window<M>),
    /// Several rolling windows fed together.
    Multi(Composite<Window<M>>),
}

impl<M> Meter<M> {
    /// Short name of the variant, for diagnostics.
    #[must_use]
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Bare(_) => "bare",
            Self::Windowed(_) => "windowed",
            Self::Multi(_) => "multi",
        }
    }

    /// Number of windows: 0 for a bare metric.
    #[must_use]
    pub fn window_count(&self) -> usize {
        match self {
            Self::Bare(_) => 0,
            Self::Windowed(_) => 1,
            Self::Multi(windows) => windows.len(),
        }
    }
}

impl<M: Mergeable + Default> Metric for Meter<M> {
    fn add(&self, n: f64) {
        match self {
            Self::Bare(m) => m.add(n),
            Self::Windowed(w) => w.add(n),
            Self::Multi(c) => c.add(n),
        }
    }

    fn reset(&self) {
        match self {
            Self::Bare(m) => m.reset(),
            Self::Windowed(w) => w.reset(),
            Self::Multi(c) => c.reset(),
        }
    }

    fn snapshot(&self) -> Snapshot {
        match self {
            Self::Bare(m) => m.snapshot(),
            Self::Windowed(w) => w.snapshot(),
            Self::Multi(c) => c.snapshot(),
        }
    }
}

impl<M: Mergeable + Default> Mergeable for Meter<M> {
    /// Merge when both sides have the same shape; otherwise leave `self` unchanged.
    fn merge(&self, other: &Self) {
        match (self, other) {
            (Self::Bare(a), Self::Bare(b)) => a.merge(b),
            (Self::Windowed(a), Self::Windowed(b)) => a.merge(b),
            (Self::Multi(a), Self::Multi(b)) => a.merge(b),
            (_mine, _theirs) => {
                #[cfg(feature = "trace")]
                tracing::warn!(
                    mine = _mine.shape(),
                    theirs = _theirs.shape(),
                    "merge skipped: meters have different shapes"
                );
            }
        }
    }
}

impl<M> fmt::Debug for Meter<M>
where
    M: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bare(m) => f.debug_tuple("Bare").field(m).finish(),
            Self::Windowed(w) => f.debug_tuple("Windowed").field(w).finish(),
            Self::Multi(c) => f
                .debug_struct("Multi")
                .field("windows", &c.len())
                .finish(),
        }
    }
}

impl<M: Mergeable + Default> fmt::Display for Meter<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.snapshot(), f)
    }
}
