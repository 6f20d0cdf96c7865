//! Time-windowed history and fan-out composition.
//!
//! # Module Organization
//!
//! - [`Window`] - ring of same-kind buckets that rolls over lazily with the clock
//! - [`Composite`] - several metrics updated together and reported side by side
//!
//! # Window vs. Composite
//!
//! | | `Window` | `Composite` |
//! |---|----------|-------------|
//! | Children | N buckets of one kind | any metrics |
//! | `add` goes to | the current bucket only | every member |
//! | Snapshot | `interval`, merged `total`, `samples` | `metrics` list, never merged |
//!
//! # Examples
//!
//! ```
//! use metricraft::core::{ManualClock, Metric, WindowSpec};
//! use metricraft::metrics::Histogram;
//! use metricraft::window::{Composite, Window};
//! use std::time::Duration;
//!
//! let clock = ManualClock::default();
//!
//! // Last two minutes by the second, last hour by the minute
//! let latency = Composite::new(vec![
//!     Window::<Histogram>::with_clock(WindowSpec::parse("2m1s"), clock.shared()),
//!     Window::<Histogram>::with_clock(WindowSpec::parse("1h1m"), clock.shared()),
//! ]);
//!
//! latency.add(0.120);
//! clock.advance(Duration::from_secs(1));
//! latency.add(0.080);
//!
//! let snap = latency.snapshot();
//! assert_eq!(snap.as_composite().unwrap().metrics.len(), 2);
//! ```

mod composite;
mod rolling;

pub use composite::Composite;
pub use rolling::Window;
