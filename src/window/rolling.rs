//! Rolling time window over same-kind buckets.
//!
//! # Rollover
//!
//! There is no background timer. Every `add` and every `snapshot` first asks the clock
//! for the time and works out how many whole intervals have passed since the window was
//! last touched. Both timestamps are rounded to the nearest interval boundary before
//! subtracting, so the window rolls on wall-clock boundaries rather than relative to its
//! first use.
//!
//! ```text
//! ticks == 0        nothing to do
//! 0 < ticks < N     repeat ticks times: oldest bucket -> front, reset it
//! ticks >= N        every bucket is stale: reset them all
//! ```
//!
//! The rollover mutates the ring, so reading a window takes the same lock as writing
//! to it. Two snapshots at the same instant with no `add` in between are identical.

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use parking_lot::Mutex;

use crate::core::{
    system_clock, Mergeable, Metric, SharedClock, Snapshot, WindowSnapshot, WindowSpec,
};

struct Ring<M> {
    /// Newest first. Length never changes after construction.
    samples: VecDeque<M>,
    /// Time of the last roll; `None` until the window is first touched.
    last_rolled: Option<Duration>,
}

/// A fixed number of buckets, each covering one interval, newest first.
///
/// The bucket type is any [`Mergeable`] metric. Besides the per-bucket samples, a
/// snapshot carries a `total` that merges every bucket into one fresh accumulator, so a
/// counter window reports the sum over the whole retention and a histogram window reports
/// quantiles over it.
///
/// # Examples
///
/// ```
/// use metricraft::core::{ManualClock, Metric, WindowSpec};
/// use metricraft::metrics::Counter;
/// use metricraft::window::Window;
/// use std::time::Duration;
///
/// let clock = ManualClock::default();
/// let window: Window<Counter> = Window::with_clock(WindowSpec::parse("3s1s"), clock.shared());
///
/// window.add(1.0);
/// clock.advance(Duration::from_secs(1));
/// window.add(5.0);
///
/// let snap = window.snapshot();
/// let view = snap.as_window().unwrap();
/// assert_eq!(view.counts(), vec![5.0, 1.0, 0.0]);
/// assert_eq!(view.total.count(), Some(6.0));
/// ```
pub struct Window<M> {
    spec: WindowSpec,
    clock: SharedClock,
    ring: Mutex<Ring<M>>,
}

impl<M: Default> Window<M> {
    /// Create a window that reads wall-clock time.
    #[must_use]
    pub fn new(spec: WindowSpec) -> Self {
        Self::with_clock(spec, system_clock())
    }

    /// Create a window that reads time from `clock`.
    #[must_use]
    pub fn with_clock(spec: WindowSpec, clock: SharedClock) -> Self {
        let n = spec.bucket_count();

        #[cfg(feature = "trace")]
        tracing::debug!(
            interval_secs = spec.interval().as_secs_f64(),
            buckets = n,
            "window created"
        );

        Self {
            spec,
            clock,
            ring: Mutex::new(Ring {
                samples: (0..n).map(|_| M::default()).collect(),
                last_rolled: None,
            }),
        }
    }
}

impl<M> Window<M> {
    /// The specification this window was built from.
    #[must_use]
    pub fn spec(&self) -> WindowSpec {
        self.spec
    }

    /// Length of one bucket.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.spec.interval()
    }

    /// Number of buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ring.lock().samples.len()
    }

    /// Always `false`: a window has at least one bucket.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ring.lock().samples.is_empty()
    }
}

/// Nearest interval boundary index for `t`, halves rounding up.
///
/// Boundaries are multiples of `interval` counted from the Unix epoch, so week, month
/// and year intervals start on whatever weekday or date those multiples land on.
fn slot(t: Duration, interval: Duration) -> i128 {
    let d = interval.as_nanos();
    // Fits: u128 nanos of any real timestamp / interval >= 1 is far below i128::MAX.
    ((t.as_nanos() + d / 2) / d) as i128
}

impl<M: Metric> Window<M> {
    /// Advance the ring to the current time. Caller holds the ring lock.
    fn roll(&self, ring: &mut Ring<M>) {
        let now = self.clock.now();
        let Some(last) = ring.last_rolled.replace(now) else {
            return;
        };

        let interval = self.spec.interval();
        let ticks = slot(now, interval) - slot(last, interval);
        if ticks <= 0 {
            return;
        }

        let n = ring.samples.len();
        if ticks >= n as i128 {
            #[cfg(feature = "trace")]
            tracing::debug!(ticks = ticks as u64, buckets = n, "window stale, resetting all buckets");

            for sample in &ring.samples {
                sample.reset();
            }
            return;
        }

        #[cfg(feature = "trace")]
        tracing::trace!(ticks = ticks as u64, "window rolled");

        for _ in 0..ticks {
            ring.samples.rotate_right(1);
            if let Some(front) = ring.samples.front() {
                front.reset();
            }
        }
    }
}

impl<M: Mergeable + Default> Window<M> {
    /// Roll, then copy every bucket into a fresh instance, oldest last.
    fn bucket_copies(&self) -> Vec<M> {
        let mut ring = self.ring.lock();
        self.roll(&mut ring);
        ring.samples
            .iter()
            .map(|sample| {
                let copy = M::default();
                copy.merge(sample);
                copy
            })
            .collect()
    }
}

impl<M: Mergeable + Default> Metric for Window<M> {
    fn add(&self, n: f64) {
        let mut ring = self.ring.lock();
        self.roll(&mut ring);
        if let Some(current) = ring.samples.front() {
            current.add(n);
        }
    }

    fn reset(&self) {
        #[cfg(feature = "trace")]
        tracing::debug!("window reset");

        let ring = self.ring.lock();
        for sample in &ring.samples {
            sample.reset();
        }
    }

    fn snapshot(&self) -> Snapshot {
        let mut ring = self.ring.lock();
        self.roll(&mut ring);

        let total = M::default();
        for sample in &ring.samples {
            total.merge(sample);
        }

        WindowSnapshot {
            interval: self.spec.interval().as_secs_f64(),
            total: Box::new(total.snapshot()),
            samples: ring.samples.iter().map(Metric::snapshot).collect(),
        }
        .into()
    }
}

impl<M: Mergeable + Default> Mergeable for Window<M> {
    /// Merge bucket by bucket, aligned by age after rolling both windows to now.
    ///
    /// Windows of different lengths merge over their common prefix of recent buckets.
    /// Intervals are not compared; merging windows of different resolution combines
    /// buckets of different durations.
    fn merge(&self, other: &Self) {
        let theirs = other.bucket_copies();

        let mut ring = self.ring.lock();
        self.roll(&mut ring);
        for (mine, copy) in ring.samples.iter().zip(&theirs) {
            mine.merge(copy);
        }
    }
}

impl<M> fmt::Debug for Window<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ring = self.ring.lock();
        f.debug_struct("Window")
            .field("interval", &self.spec.interval())
            .field("buckets", &ring.samples.len())
            .field("last_rolled", &ring.last_rolled)
            .finish()
    }
}

impl<M: Mergeable + Default> fmt::Display for Window<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.snapshot(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ManualClock;
    use crate::metrics::{Counter, Gauge, Histogram};

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    fn counter_window(spec: &str, clock: &ManualClock) -> Window<Counter> {
        Window::with_clock(WindowSpec::parse(spec), clock.shared())
    }

    fn counts(w: &Window<Counter>) -> (Vec<f64>, f64) {
        let snap = w.snapshot();
        let view = snap.as_window().unwrap();
        (view.counts(), view.total.count().unwrap())
    }

    #[test]
    fn test_timeline() {
        let start = secs(1_502_442_000);
        let clock = ManualClock::new(start);
        let w = counter_window("3s1s", &clock);

        assert_eq!(counts(&w), (vec![0.0, 0.0, 0.0], 0.0));
        w.add(1.0);
        assert_eq!(counts(&w), (vec![1.0, 0.0, 0.0], 1.0));

        clock.set(start + secs(1));
        assert_eq!(counts(&w), (vec![0.0, 1.0, 0.0], 1.0));
        w.add(5.0);
        assert_eq!(counts(&w), (vec![5.0, 1.0, 0.0], 6.0));

        clock.set(start + secs(3));
        assert_eq!(counts(&w), (vec![0.0, 0.0, 5.0], 5.0));

        clock.set(start + secs(10));
        assert_eq!(counts(&w), (vec![0.0, 0.0, 0.0], 0.0));
    }

    #[test]
    fn test_snapshot_idempotent() {
        let clock = ManualClock::new(secs(100));
        let w = counter_window("3s1s", &clock);
        w.add(2.0);
        clock.advance(secs(1));

        let first = w.to_string();
        let second = w.to_string();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rounding_to_interval_boundaries() {
        // 10:00.4 and 10:00.6 straddle the half-second: they round to different seconds
        let clock = ManualClock::new(Duration::from_millis(600_400));
        let w = counter_window("3s1s", &clock);
        w.add(1.0);

        clock.set(Duration::from_millis(600_600));
        assert_eq!(counts(&w).0, vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_sub_interval_moves_do_not_roll() {
        let clock = ManualClock::new(Duration::from_millis(600_000));
        let w = counter_window("3s1s", &clock);
        w.add(1.0);

        clock.set(Duration::from_millis(600_499));
        assert_eq!(counts(&w).0, vec![1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_clock_going_backwards_is_ignored() {
        let clock = ManualClock::new(secs(50));
        let w = counter_window("3s1s", &clock);
        w.add(1.0);

        clock.set(secs(40));
        w.add(1.0);
        assert_eq!(counts(&w).0, vec![2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_exactly_n_ticks_clears() {
        let clock = ManualClock::new(secs(0));
        let w = counter_window("3s1s", &clock);
        w.add(1.0);
        clock.advance(secs(3));
        assert_eq!(counts(&w), (vec![0.0, 0.0, 0.0], 0.0));
    }

    #[test]
    fn test_reset() {
        let clock = ManualClock::new(secs(0));
        let w = counter_window("3s1s", &clock);
        w.add(1.0);
        clock.advance(secs(1));
        w.add(2.0);
        w.reset();
        assert_eq!(counts(&w), (vec![0.0, 0.0, 0.0], 0.0));
    }

    #[test]
    fn test_oversized_spec_builds_default_bucket_count() {
        let clock = ManualClock::new(secs(0));
        let w = counter_window("9999999999y1s", &clock);
        assert_eq!(w.len(), 15);
        w.add(1.0);
        assert_eq!(counts(&w).1, 1.0);
    }

    #[test]
    fn test_interval_in_seconds() {
        let clock = ManualClock::default();
        let w = counter_window("15m10s", &clock);
        assert_eq!(w.len(), 90);
        assert_eq!(w.snapshot().as_window().unwrap().interval, 10.0);
    }

    #[test]
    fn test_gauge_window_total() {
        let clock = ManualClock::new(secs(0));
        let w: Window<Gauge> = Window::with_clock(WindowSpec::parse("3s1s"), clock.shared());
        w.add(4.0);
        clock.advance(secs(1));
        w.add(2.0);
        w.add(6.0);

        let snap = w.snapshot();
        let view = snap.as_window().unwrap();
        assert_eq!(
            view.total.to_value().unwrap(),
            serde_json::json!({"type": "g", "mean": 4.0, "min": 2.0, "max": 6.0})
        );
        // Stale, never-written bucket stays empty and does not drag min to zero
        assert_eq!(
            view.samples[2].to_value().unwrap(),
            serde_json::json!({"type": "g", "mean": 0.0, "min": 0.0, "max": 0.0})
        );
    }

    #[test]
    fn test_histogram_window_total() {
        let clock = ManualClock::new(secs(0));
        let w: Window<Histogram> =
            Window::with_clock(WindowSpec::parse("2m1m"), clock.shared());
        for i in 0..50_i32 {
            w.add(f64::from(i));
        }
        clock.advance(secs(60));
        for i in 50..100_i32 {
            w.add(f64::from(i));
        }

        let snap = w.snapshot();
        assert_eq!(
            snap.as_window().unwrap().total.to_value().unwrap(),
            serde_json::json!({"type": "h", "p50": 49.0, "p90": 89.0, "p99": 98.0})
        );
    }

    #[test]
    fn test_merge_aligns_by_age() {
        let clock = ManualClock::new(secs(0));
        let a = counter_window("3s1s", &clock);
        let b = counter_window("3s1s", &clock);

        a.add(1.0);
        b.add(10.0);
        clock.advance(secs(1));
        b.add(20.0);

        a.merge(&b);
        assert_eq!(counts(&a), (vec![20.0, 11.0, 0.0], 31.0));
        assert_eq!(counts(&b), (vec![20.0, 10.0, 0.0], 30.0));
    }

    #[test]
    fn test_merge_different_lengths() {
        let clock = ManualClock::new(secs(0));
        let short = counter_window("2s1s", &clock);
        let long = counter_window("4s1s", &clock);
        for _ in 0..4 {
            long.add(1.0);
            short.add(1.0);
            clock.advance(secs(1));
        }

        short.merge(&long);
        assert_eq!(counts(&short).0, vec![0.0, 2.0]);
    }

    #[test]
    fn test_self_merge() {
        let clock = ManualClock::new(secs(0));
        let w = counter_window("3s1s", &clock);
        w.add(3.0);
        w.merge(&w);
        assert_eq!(counts(&w), (vec![6.0, 0.0, 0.0], 6.0));
    }
}
