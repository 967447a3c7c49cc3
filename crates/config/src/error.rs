//! Configuration Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction; the underlying `figment` error is kept as a child frame.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A configuration error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// An explicitly requested configuration file does not exist.
    #[display("configuration file not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    /// The configuration file extension does not name a supported format.
    #[display("unsupported configuration format: {_0}")]
    UnsupportedFormat(#[error(not(source))] String),
    /// One of the layered sources could not be parsed or merged.
    #[display("malformed configuration")]
    Malformed,
    /// The configuration parsed, but a value is out of range.
    #[display("invalid value for '{field}': {reason}")]
    InvalidValue {
        /// Dotted path of the offending key.
        field: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Only a missing file could appear between attempts.
        matches!(self, ErrorKind::NotFound(_))
    }
}
