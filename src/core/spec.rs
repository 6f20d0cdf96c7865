//! Window specification strings.
//!
//! A window specification names how much history a [`Window`](crate::window::Window)
//! retains and how finely it is sliced:
//!
//! ```text
//! <totalNum><totalUnit><intervalNum><intervalUnit>
//!
//! "3s1s"    three one-second buckets
//! "15m10s"  ninety ten-second buckets
//! "1h1m"    sixty one-minute buckets
//! ```
//!
//! | Unit | Duration |
//! |------|----------|
//! | `s`  | 1 second |
//! | `m`  | 60 seconds |
//! | `h`  | 60 minutes |
//! | `d`  | 24 hours |
//! | `w`  | 7 days |
//! | `M`  | 30 days |
//! | `y`  | 365 days |
//!
//! # Lenient vs. strict parsing
//!
//! Metric construction uses [`WindowSpec::parse`], which never fails: a missing or
//! unparsable interval becomes one minute, and a missing or unparsable total becomes
//! fifteen intervals. Configuration loaders that would rather reject typos use
//! [`str::parse`], which reports a [`SpecParseError`].
//!
//! ```
//! use metricraft::WindowSpec;
//! use std::time::Duration;
//!
//! let spec = WindowSpec::parse("15m10s");
//! assert_eq!(spec.interval(), Duration::from_secs(10));
//! assert_eq!(spec.bucket_count(), 90);
//!
//! // Typo: falls back to 1m interval and 15m total
//! let fallback = WindowSpec::parse("oops");
//! assert_eq!(fallback.bucket_count(), 15);
//!
//! assert!("oops".parse::<WindowSpec>().is_err());
//! ```

use std::str::FromStr;
use std::time::Duration;

use crate::error::{MetricraftError, Result};

/// Interval used when the specification does not provide a usable one.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

/// Number of intervals retained when the specification does not provide a usable total.
pub const DEFAULT_BUCKETS: u32 = 15;

/// Largest number of buckets a window may have.
///
/// A total that would need more buckets than this is treated as unusable and replaced by
/// [`DEFAULT_BUCKETS`] intervals.
pub const MAX_BUCKETS: usize = 1_000_000;

const SECOND: u64 = 1;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// Seconds per unit letter.
fn unit_seconds(unit: char) -> Option<u64> {
    match unit {
        's' => Some(SECOND),
        'm' => Some(MINUTE),
        'h' => Some(HOUR),
        'd' => Some(DAY),
        'w' => Some(7 * DAY),
        'M' => Some(30 * DAY),
        'y' => Some(365 * DAY),
        _ => None,
    }
}

/// Reasons a window specification fails strict parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpecParseError {
    /// The specification was empty or only whitespace.
    #[error("specification is empty")]
    Empty,

    /// A number was expected at the given byte offset.
    #[error("expected a number at offset {offset}")]
    MissingNumber {
        /// Byte offset into the specification.
        offset: usize,
    },

    /// A unit letter was expected after a number.
    #[error("expected a unit after the number at offset {offset}")]
    MissingUnit {
        /// Byte offset into the specification.
        offset: usize,
    },

    /// The unit letter is not one of `s m h d w M y`.
    #[error("unknown unit '{0}'")]
    UnknownUnit(char),

    /// A duration term evaluated to zero.
    #[error("duration must be greater than zero")]
    ZeroDuration,

    /// A duration term does not fit in a `Duration`.
    #[error("duration is too large")]
    Overflow,

    /// The total retention is shorter than one interval.
    #[error("total {total:?} is shorter than interval {interval:?}")]
    TotalShorterThanInterval {
        /// Parsed total retention.
        total: Duration,
        /// Parsed bucket interval.
        interval: Duration,
    },

    /// Total divided by interval exceeds [`MAX_BUCKETS`].
    #[error("{buckets} buckets exceeds the limit of {max}")]
    TooManyBuckets {
        /// Buckets the specification asks for.
        buckets: u128,
        /// The limit.
        max: usize,
    },

    /// Unconsumed characters after the interval unit.
    #[error("unexpected trailing input '{0}'")]
    TrailingInput(String),
}

/// One `<number><unit>` term as scanned, before the unit is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Term {
    count: u64,
    unit: char,
}

impl Term {
    fn duration(self) -> std::result::Result<Duration, SpecParseError> {
        let per_unit = unit_seconds(self.unit).ok_or(SpecParseError::UnknownUnit(self.unit))?;
        let secs = self
            .count
            .checked_mul(per_unit)
            .ok_or(SpecParseError::Overflow)?;
        if secs == 0 {
            return Err(SpecParseError::ZeroDuration);
        }
        Ok(Duration::from_secs(secs))
    }
}

/// Scan one term starting at `offset`. Returns the term and the offset just past it.
///
/// Leading whitespace before the number is skipped. Any single character is accepted as
/// the unit here; whether it is a known unit is decided by [`Term::duration`].
fn scan_term(input: &str, offset: usize) -> std::result::Result<(Term, usize), SpecParseError> {
    let rest = &input[offset..];
    let trimmed = rest.trim_start();
    let start = offset + (rest.len() - trimmed.len());

    let digits = trimmed.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return Err(SpecParseError::MissingNumber { offset: start });
    }
    let count = trimmed[..digits]
        .parse::<u64>()
        .map_err(|_| SpecParseError::Overflow)?;

    let unit = trimmed[digits..]
        .chars()
        .next()
        .ok_or(SpecParseError::MissingUnit {
            offset: start + digits,
        })?;

    Ok((Term { count, unit }, start + digits + unit.len_utf8()))
}

/// Retention and resolution of a rolling window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowSpec {
    total: Duration,
    interval: Duration,
}

impl WindowSpec {
    /// Create a specification from explicit durations.
    ///
    /// A zero `interval` is replaced by [`DEFAULT_INTERVAL`]. A zero `total`, or one that
    /// would need more than [`MAX_BUCKETS`] buckets, is replaced by [`DEFAULT_BUCKETS`]
    /// intervals, matching what [`WindowSpec::parse`] does.
    #[must_use]
    pub fn new(total: Duration, interval: Duration) -> Self {
        let interval = if interval.is_zero() {
            DEFAULT_INTERVAL
        } else {
            interval
        };
        let buckets = total.as_nanos() / interval.as_nanos();
        let total = if total.is_zero() {
            interval.saturating_mul(DEFAULT_BUCKETS)
        } else if buckets > MAX_BUCKETS as u128 {
            #[cfg(feature = "trace")]
            tracing::warn!(
                buckets = buckets as u64,
                max = MAX_BUCKETS,
                "window needs too many buckets, using default total"
            );

            interval.saturating_mul(DEFAULT_BUCKETS)
        } else {
            total
        };
        Self { total, interval }
    }

    /// Parse a specification, falling back to defaults for anything unusable.
    ///
    /// Scanning stops at the first malformed term, so `"2ms1s"` keeps its two-minute total
    /// but loses its interval (the `s` after `m` is not a number) and ends up with two
    /// one-minute buckets.
    #[must_use]
    pub fn parse(spec: &str) -> Self {
        let (total, interval) = match scan_term(spec, 0) {
            Ok((total, next)) => (Some(total), scan_term(spec, next).ok().map(|(t, _)| t)),
            Err(_) => (None, None),
        };

        let interval = interval.and_then(|t| t.duration().ok());
        let total = total.and_then(|t| t.duration().ok());

        #[cfg(feature = "trace")]
        if interval.is_none() || total.is_none() {
            tracing::warn!(
                spec,
                total_ok = total.is_some(),
                interval_ok = interval.is_some(),
                "window specification incomplete, using defaults"
            );
        }

        Self::new(
            total.unwrap_or(Duration::ZERO),
            interval.unwrap_or(Duration::ZERO),
        )
    }

    /// Total retention.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.total
    }

    /// Length of one bucket.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of buckets: `floor(total / interval)`, at least 1.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        let n = self.total.as_nanos() / self.interval.as_nanos();
        usize::try_from(n).unwrap_or(usize::MAX).max(1)
    }
}

impl Default for WindowSpec {
    fn default() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }
}

impl FromStr for WindowSpec {
    type Err = MetricraftError;

    fn from_str(spec: &str) -> Result<Self> {
        let strict = || -> std::result::Result<Self, SpecParseError> {
            if spec.trim().is_empty() {
                return Err(SpecParseError::Empty);
            }
            let (total, next) = scan_term(spec, 0)?;
            let (interval, end) = scan_term(spec, next)?;
            let trailing = spec[end..].trim();
            if !trailing.is_empty() {
                return Err(SpecParseError::TrailingInput(trailing.to_string()));
            }

            let total = total.duration()?;
            let interval = interval.duration()?;
            if total < interval {
                return Err(SpecParseError::TotalShorterThanInterval { total, interval });
            }
            let buckets = total.as_nanos() / interval.as_nanos();
            if buckets > MAX_BUCKETS as u128 {
                return Err(SpecParseError::TooManyBuckets {
                    buckets,
                    max: MAX_BUCKETS,
                });
            }
            Ok(Self { total, interval })
        };

        strict().map_err(|reason| MetricraftError::invalid_window_spec(spec, reason))
    }
}
