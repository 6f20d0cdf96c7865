//! Lock-free `f64` accumulation with cache-line padding.
//!
//! There is no `AtomicF64` in the standard library. [`AtomicF64`] stores the IEEE-754 bit
//! pattern in an [`AtomicU64`] and updates it with a compare-and-swap loop: load the bits,
//! compute the new value, try to swap, and start over if another thread won the race.
//! Nothing bounds the number of retries; under realistic contention a few attempts are
//! enough, and no thread ever blocks.
//!
//! # Cache-Line Padding
//!
//! A hot counter that shares a cache line with unrelated data makes every neighbouring
//! write invalidate it. [`CacheLinePadded`] aligns its contents to 64 bytes so each
//! counter owns its line.
//!
//! ```text
//! [AtomicU64: 8 bytes][Padding: 56 bytes] = 64 bytes (1 cache line)
//! ```

use std::fmt;
use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};

/// Size of a CPU cache line in bytes (x86-64, ARM64, most modern CPUs).
pub const CACHE_LINE_SIZE: usize = 64;

/// A value aligned to its own cache line.
///
/// # Examples
///
/// ```
/// use metricraft::sync::{AtomicF64, CacheLinePadded};
///
/// let padded = CacheLinePadded::new(AtomicF64::new(1.5));
/// assert_eq!(padded.load(), 1.5);
/// assert_eq!(std::mem::align_of_val(&padded), 64);
/// ```
#[repr(align(64))]
#[derive(Default)]
pub struct CacheLinePadded<T> {
    value: T,
}

impl<T> CacheLinePadded<T> {
    /// Wrap a value.
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self { value }
    }

    /// Get a reference to the inner value.
    #[must_use]
    pub const fn get(&self) -> &T {
        &self.value
    }

    /// Consume the padding and return the inner value.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> Deref for CacheLinePadded<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: fmt::Debug> fmt::Debug for CacheLinePadded<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheLinePadded")
            .field("value", &self.value)
            .finish()
    }
}

/// An `f64` that can be updated from many threads without locks.
///
/// # Examples
///
/// ```
/// use metricraft::sync::AtomicF64;
/// use std::sync::Arc;
/// use std::thread;
///
/// let sum = Arc::new(AtomicF64::new(0.0));
///
/// let handles: Vec<_> = (0..8).map(|_| {
///     let sum = Arc::clone(&sum);
///     thread::spawn(move || {
///         for _ in 0..1000 {
///             sum.fetch_add(0.5);
///         }
///     })
/// }).collect();
///
/// for h in handles { h.join().unwrap(); }
/// assert_eq!(sum.load(), 4000.0);
/// ```
pub struct AtomicF64 {
    bits: AtomicU64,
}

impl AtomicF64 {
    /// Create a new atomic float.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self {
            bits: AtomicU64::new(value.to_bits()),
        }
    }

    /// Load the current value with Acquire ordering.
    #[inline]
    #[must_use]
    pub fn load(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }

    /// Store a value with Release ordering.
    #[inline]
    pub fn store(&self, value: f64) {
        self.bits.store(value.to_bits(), Ordering::Release);
    }

    /// Replace the value, returning the previous one.
    #[inline]
    pub fn swap(&self, value: f64) -> f64 {
        f64::from_bits(self.bits.swap(value.to_bits(), Ordering::AcqRel))
    }

    /// Atomically add `delta` and return the previous value.
    ///
    /// Retries until its compare-and-swap succeeds. The comparison is on bit patterns, so
    /// a NaN sum still makes progress.
    #[inline]
    pub fn fetch_add(&self, delta: f64) -> f64 {
        let mut current = self.bits.load(Ordering::Relaxed);
        loop {
            let next = (f64::from_bits(current) + delta).to_bits();
            match self.bits.compare_exchange_weak(
                current,
                next,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(prev) => return f64::from_bits(prev),
                Err(actual) => current = actual,
            }
        }
    }
}

impl Default for AtomicF64 {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl fmt::Debug for AtomicF64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AtomicF64").field(&self.load()).finish()
    }
}
