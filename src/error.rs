//! Command-line Error Types

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A front-end error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for front-end operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Configuration could not be parsed or failed validation.
    #[display("could not load configuration")]
    Config,
    /// The requested configuration file does not exist.
    #[display("configuration file not found")]
    ConfigUnavailable,
    /// The configured log level could not be applied.
    #[display("could not apply configured log level")]
    Logging,
    /// Neither `--library` nor the configuration named a manifest.
    #[display("no library manifest given; pass --library or set `library` in the configuration")]
    NoLibrary,
    /// The manifest file could not be read.
    #[display("could not read library manifest: {}", _0.display())]
    Io(#[error(not(source))] PathBuf),
    /// The manifest is not a JSON array of book entries.
    #[display("malformed library manifest")]
    Manifest,
    /// A manifest entry describes an invalid book.
    #[display("invalid book at manifest entry #{_0}")]
    InvalidEntry(#[error(not(source))] usize),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::Io(_) | ErrorKind::ConfigUnavailable)
    }
}
