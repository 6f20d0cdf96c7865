//! Synchronization primitives used by the metric implementations.
//!
//! # Module Organization
//!
//! - [`AtomicF64`] - lock-free float accumulator (compare-and-swap on the bit pattern)
//! - [`CacheLinePadded`] - aligns a hot value to its own cache line
//!
//! # Locking Discipline
//!
//! | Metric | Strategy |
//! |--------|----------|
//! | `Counter` | `AtomicF64`, lock-free |
//! | `Gauge` | one `parking_lot::Mutex` over count/sum/min/max |
//! | `Histogram` | one `parking_lot::Mutex` over bins and total |
//! | `Window` | one `parking_lot::Mutex` over the bucket ring and anchor |
//! | `Composite` | none of its own; each member locks itself |
//!
//! No lock is ever held while acquiring a lock on a different metric instance of the same
//! level. A window does lock its buckets while holding its own lock, but buckets are
//! private to the window, so the order is always window then bucket.

mod atomic_float;

pub use atomic_float::{AtomicF64, CacheLinePadded, CACHE_LINE_SIZE};
