use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::Arc;

#[derive(Debug, PartialEq, Eq, Hash)]
struct Edition {
    title: String,
    authors: Vec<String>,
    year: u32,
}

/// An edition of a book: not the physical object, but the words and pictures
/// that make it up.
///
/// Identified by its title, ordered author list and publication year. Case and
/// author order are significant, so a book written by "Fred" is a different
/// book to one written by "FRED". Cloning is cheap; every clone shares the same
/// immutable allocation and compares equal by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Book(Arc<Edition>);

impl Book {
    /// Validates and constructs a new book.
    ///
    /// The title is trimmed. Fails when the title is blank, there are no
    /// authors, any author is blank, or the year is negative.
    ///
    /// ```
    /// use shelf_catalog::models::Book;
    ///
    /// let book = Book::new(" Effective Java ", ["Joshua Bloch"], 2018).unwrap();
    /// assert_eq!(book.title(), "Effective Java");
    /// assert!(Book::new("   ", ["Joshua Bloch"], 2018).is_err());
    /// assert!(Book::new("Effective Java", ["Joshua Bloch"], -1).is_err());
    /// ```
    pub fn new<A: Into<String>>(title: impl Into<String>, authors: impl IntoIterator<Item = A>, year: i64) -> Result<Self> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            exn::bail!(ErrorKind::BlankTitle);
        }
        let authors: Vec<String> = authors.into_iter().map(Into::into).collect();
        if authors.is_empty() {
            exn::bail!(ErrorKind::NoAuthors);
        }
        if let Some(position) = authors.iter().position(|author| author.trim().is_empty()) {
            exn::bail!(ErrorKind::BlankAuthor(position));
        }
        if year < 0 {
            exn::bail!(ErrorKind::NegativeYear(year));
        }
        let year = u32::try_from(year).or_raise(|| ErrorKind::ParseError {
            field: "year",
            value: year.to_string(),
        })?;
        Ok(Self(Arc::new(Edition { title, authors, year })))
    }

    pub fn title(&self) -> &str {
        &self.0.title
    }

    pub fn authors(&self) -> &[String] {
        &self.0.authors
    }

    pub fn year(&self) -> u32 {
        self.0.year
    }

    /// The title followed by every author, in order.
    pub(crate) fn fields(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.title()).chain(self.authors().iter().map(String::as_str))
    }
}

impl Display for Book {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "\"{}\" by {} ({})", self.title(), self.authors().join(", "), self.year())
    }
}

impl Ord for Book {
    /// Lexical order over title, then authors, then year. Only used to make
    /// otherwise-tied rankings deterministic; it carries no notion of relevance.
    fn cmp(&self, other: &Self) -> Ordering {
        self.title()
            .cmp(other.title())
            .then_with(|| self.authors().cmp(other.authors()))
            .then_with(|| self.year().cmp(&other.year()))
    }
}
impl PartialOrd for Book {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_value_equality() {
        let a = Book::new("Clean Code", ["Robert Martin"], 2008).unwrap();
        let b = Book::new("Clean Code", vec!["Robert Martin".to_string()], 2008).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, Book::new("Clean Code", ["Robert Martin"], 2009).unwrap());
        assert_ne!(a, Book::new("Clean Code", ["ROBERT MARTIN"], 2008).unwrap());
    }

    #[test]
    fn test_author_order_is_significant() {
        let a = Book::new("Design Patterns", ["Erich Gamma", "Richard Helm"], 1994).unwrap();
        let b = Book::new("Design Patterns", ["Richard Helm", "Erich Gamma"], 1994).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_title_is_trimmed() {
        let book = Book::new("  Clean Code\t", ["Robert Martin"], 2008).unwrap();
        assert_eq!(book.title(), "Clean Code");
        assert_eq!(book, Book::new("Clean Code", ["Robert Martin"], 2008).unwrap());
    }

    #[rstest]
    #[case("", vec!["Someone"], 2000, ErrorKind::BlankTitle)]
    #[case(" \t\n", vec!["Someone"], 2000, ErrorKind::BlankTitle)]
    #[case("Title", vec![], 2000, ErrorKind::NoAuthors)]
    #[case("Title", vec!["Someone", "  "], 2000, ErrorKind::BlankAuthor(1))]
    #[case("Title", vec![""], 2000, ErrorKind::BlankAuthor(0))]
    #[case("Title", vec!["Someone"], -1, ErrorKind::NegativeYear(-1))]
    fn test_rejects_invalid(
        #[case] title: &str,
        #[case] authors: Vec<&str>,
        #[case] year: i64,
        #[case] expected: ErrorKind,
    ) {
        let err = Book::new(title, authors, year).unwrap_err();
        assert_eq!(*err, expected);
    }

    #[test]
    fn test_year_zero_is_valid() {
        assert_eq!(Book::new("Ancient Text", ["Anonymous"], 0).unwrap().year(), 0);
    }

    #[test]
    fn test_display() {
        let book = Book::new("Design Patterns", ["Erich Gamma", "Richard Helm"], 1994).unwrap();
        assert_eq!(book.to_string(), "\"Design Patterns\" by Erich Gamma, Richard Helm (1994)");
    }

    #[test]
    fn test_fields() {
        let book = Book::new("Design Patterns", ["Erich Gamma", "Richard Helm"], 1994).unwrap();
        assert_eq!(book.fields().collect::<Vec<_>>(), vec!["Design Patterns", "Erich Gamma", "Richard Helm"]);
    }
}
