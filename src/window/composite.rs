//! Fan-out group of independently configured metrics.

use std::fmt;

use crate::core::{CompositeSnapshot, Mergeable, Metric, Snapshot};

/// Several metrics that receive every update together.
///
/// The usual members are windows of different resolutions over the same data (say two
/// minutes by the second and an hour by the minute). Unlike a window's `total`, a
/// composite never merges its members: each is an independent view, and the snapshot
/// lists them side by side in construction order.
///
/// Members default to `Box<dyn Metric>`, so kinds can be mixed.
///
/// # Examples
///
/// ```
/// use metricraft::core::Metric;
/// use metricraft::metrics::{Counter, Gauge};
/// use metricraft::window::Composite;
///
/// let members: Vec<Box<dyn Metric>> = vec![Box::new(Counter::new()), Box::new(Gauge::new())];
/// let composite = Composite::new(members);
/// composite.add(2.0);
///
/// assert_eq!(
///     composite.to_string(),
///     r#"{"metrics":[{"type":"c","count":2.0},{"type":"g","mean":2.0,"min":2.0,"max":2.0}]}"#
/// );
/// ```
pub struct Composite<M = Box<dyn Metric>> {
    members: Vec<M>,
}

impl<M> Composite<M> {
    /// Create a composite from its members.
    #[must_use]
    pub fn new(members: Vec<M>) -> Self {
        Self { members }
    }

    /// Append a member.
    pub fn push(&mut self, member: M) {
        self.members.push(member);
    }

    /// Members in construction order.
    #[must_use]
    pub fn members(&self) -> &[M] {
        &self.members
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether there are no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<M> Default for Composite<M> {
    fn default() -> Self {
        Self {
            members: Vec::new(),
        }
    }
}

impl<M> FromIterator<M> for Composite<M> {
    fn from_iter<I: IntoIterator<Item = M>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<M: Metric> Metric for Composite<M> {
    fn add(&self, n: f64) {
        for member in &self.members {
            member.add(n);
        }
    }

    fn reset(&self) {
        for member in &self.members {
            member.reset();
        }
    }

    fn snapshot(&self) -> Snapshot {
        CompositeSnapshot {
            metrics: self.members.iter().map(Metric::snapshot).collect(),
        }
        .into()
    }
}

impl<M: Mergeable> Mergeable for Composite<M> {
    /// Merge member by member, by position. Extra members on either side are left alone.
    fn merge(&self, other: &Self) {
        for (mine, theirs) in self.members.iter().zip(&other.members) {
            mine.merge(theirs);
        }
    }
}

impl<M: Metric> fmt::Debug for Composite<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composite")
            .field("members", &self.members.len())
            .finish()
    }
}

impl<M: Metric> fmt::Display for Composite<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.snapshot(), f)
    }
}
