//! Error types for metricraft operations.
//!
//! The hot path never fails: `add`, `reset`, `merge` and `snapshot` are infallible, and
//! metric construction falls back to defaults on a bad window specification. Errors only
//! surface from the strict, opt-in APIs such as parsing a [`WindowSpec`] with
//! [`str::parse`] or rendering a snapshot as JSON.
//!
//! # Error Propagation
//!
//! ```
//! use metricraft::{Result, WindowSpec};
//!
//! fn bucket_count(spec: &str) -> Result<usize> {
//!     let spec: WindowSpec = spec.parse()?;
//!     Ok(spec.bucket_count())
//! }
//! # assert_eq!(bucket_count("3s1s").unwrap(), 3);
//! # assert!(bucket_count("3x1s").is_err());
//! ```
//!
//! [`WindowSpec`]: crate::core::WindowSpec

#![allow(clippy::module_name_repetitions)]

use std::fmt;

use crate::core::spec::SpecParseError;

/// Result type alias for metricraft operations.
pub type Result<T> = std::result::Result<T, MetricraftError>;

/// Errors that can occur in metricraft's strict APIs.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricraftError {
    /// A window specification string could not be parsed strictly.
    InvalidWindowSpec {
        /// The specification as given.
        spec: String,
        /// What was wrong with it.
        reason: SpecParseError,
    },

    /// A metric kind name was not one of the known kinds.
    UnknownMetricKind {
        /// The name that was provided.
        name: String,
    },

    /// Converting a snapshot to or from JSON failed.
    SerializationError {
        /// Description of what failed.
        message: String,
    },
}

impl fmt::Display for MetricraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWindowSpec { spec, reason } => {
                write!(f, "Invalid window specification '{}': {}.", spec, reason)
            }
            Self::UnknownMetricKind { name } => {
                write!(
                    f,
                    "Unknown metric kind '{}'. Expected one of: counter, gauge, histogram.",
                    name
                )
            }
            Self::SerializationError { message } => {
                write!(f, "Serialization error: {}.", message)
            }
        }
    }
}

impl std::error::Error for MetricraftError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidWindowSpec { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

impl MetricraftError {
    /// Create an `InvalidWindowSpec` error.
    #[must_use]
    pub fn invalid_window_spec(spec: impl Into<String>, reason: SpecParseError) -> Self {
        Self::InvalidWindowSpec {
            spec: spec.into(),
            reason,
        }
    }

    /// Create an `UnknownMetricKind` error.
    #[must_use]
    pub fn unknown_metric_kind(name: impl Into<String>) -> Self {
        Self::UnknownMetricKind { name: name.into() }
    }

    /// Create a `SerializationError`.
    #[must_use]
    pub fn serialization_error(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Whether this error came from parsing configuration rather than from output.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidWindowSpec { .. } | Self::UnknownMetricKind { .. }
        )
    }
}

impl From<serde_json::Error> for MetricraftError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization_error(err.to_string())
    }
}
