//! Catalog Error Types
//!
//! Structured errors using `exn` for automatic location tracking. Only the
//! construction of [`Book`](crate::models::Book) values can fail: every catalog
//! operation is total and represents "not found" as an empty result.

use derive_more::{Display, Error};

/// A catalog error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// Each variant is a caller programming error: the offending value was
/// rejected at construction time and no catalog state was touched.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The title is empty or whitespace only.
    #[display("book title must contain at least one non-whitespace character")]
    BlankTitle,
    /// The author list is empty.
    #[display("book must have at least one author")]
    NoAuthors,
    /// The author at the given position is empty or whitespace only.
    #[display("author #{_0} must contain at least one non-whitespace character")]
    BlankAuthor(#[error(not(source))] usize),
    /// The publication year is below zero.
    #[display("publication year must be non-negative, found: {_0}")]
    NegativeYear(#[error(not(source))] i64),
    /// A value could not be parsed.
    #[display("failed to parse field '{field}', found value: {value}")]
    ParseError {
        /// The field that failed to parse.
        field: &'static str,
        /// The rejected input.
        value: String,
    },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Validation failures are deterministic: the same input fails again.
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_display() {
        assert_eq!(ErrorKind::NoAuthors.to_string(), "book must have at least one author");
        assert_eq!(
            ErrorKind::BlankAuthor(2).to_string(),
            "author #2 must contain at least one non-whitespace character"
        );
        assert_eq!(ErrorKind::NegativeYear(-5).to_string(), "publication year must be non-negative, found: -5");
    }

    #[test]
    fn error_kind_never_retryable() {
        assert!(!ErrorKind::BlankTitle.is_retryable());
        assert!(!ErrorKind::NegativeYear(-1).is_retryable());
    }
}
