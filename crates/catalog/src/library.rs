//! The operations every catalog supports.

use crate::models::{Book, BookCopy};
use crate::rank::Match;
use std::collections::HashSet;

/// A mutable collection of book copies.
///
/// Every operation is total: unknown books and copies produce empty results or
/// are silently ignored, never errors. Sets handed back are owned snapshots, so
/// callers cannot reach into the catalog's internal state through them.
pub trait Library {
    /// Adds a new copy of `book`, available immediately, and returns it.
    fn acquire(&mut self, book: &Book) -> BookCopy;

    /// Permanently removes `copy`, whether available or not. Ignored for copies
    /// this catalog does not hold.
    fn dispose(&mut self, copy: &BookCopy);

    /// Marks a held copy as checked out. Idempotent.
    fn mark_unavailable(&mut self, copy: &BookCopy);

    /// Marks a held copy as returned. Idempotent.
    fn mark_available(&mut self, copy: &BookCopy);

    /// Whether `copy` is held and not checked out.
    fn is_available(&self, copy: &BookCopy) -> bool;

    /// Every held copy of `book`, available or not.
    fn copies_of(&self, book: &Book) -> HashSet<BookCopy>;

    /// Every held copy of `book` that is currently available.
    fn available_copies_of(&self, book: &Book) -> HashSet<BookCopy>;

    /// How many times copies of `book` have been checked out while it has been
    /// held. Forgotten once the last copy is disposed of.
    fn popularity(&self, book: &Book) -> u64;

    /// Books whose title or any author equals `text` verbatim (case-sensitive),
    /// newest first.
    fn find_exact(&self, text: &str) -> Vec<Book>;

    /// Ranked free-text search, best match first.
    ///
    /// Plain words match books containing them in the title or an author name;
    /// double-quoted phrases match books containing the words contiguously and
    /// weigh more. Matching is case-insensitive and a blank query matches
    /// nothing.
    fn search(&self, text: &str) -> Vec<Match>;

    /// [`search`](Self::search) without the scores.
    fn query(&self, text: &str) -> Vec<Book> {
        self.search(text).into_iter().map(|m| m.book).collect()
    }
}
