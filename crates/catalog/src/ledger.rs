//! Per-book copy bookkeeping.

use crate::models::{Book, BookCopy};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Default)]
struct Record {
    all: HashSet<BookCopy>,
    available: HashSet<BookCopy>,
    /// Successful available -> unavailable transitions while the book has been held.
    checkouts: u64,
}

/// Outcome of removing a copy from the [`CopyLedger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The copy was not held.
    Unknown,
    /// The copy was removed and other copies of its book remain.
    Remaining,
    /// The copy was the last of its book; the book's record is gone.
    LastCopy,
}

/// Tracks every copy of every held book, and which of them are available.
///
/// A record exists for a book exactly while at least one copy of it is held,
/// and its available copies are always a subset of all of its copies.
#[derive(Debug, Default)]
pub struct CopyLedger {
    records: HashMap<Book, Record>,
}

impl CopyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new (available) copy. Returns `true` if it is the first copy of
    /// its book, i.e. the book was absent until now.
    pub fn add(&mut self, copy: BookCopy) -> bool {
        let first = !self.records.contains_key(copy.book());
        let record = self.records.entry(copy.book().clone()).or_default();
        record.available.insert(copy.clone());
        record.all.insert(copy);
        first
    }

    pub fn remove(&mut self, copy: &BookCopy) -> Removal {
        let Some(record) = self.records.get_mut(copy.book()) else {
            return Removal::Unknown;
        };
        if !record.all.remove(copy) {
            return Removal::Unknown;
        }
        record.available.remove(copy);
        if record.all.is_empty() {
            self.records.remove(copy.book());
            return Removal::LastCopy;
        }
        Removal::Remaining
    }

    /// Marks a held, available copy as unavailable. Returns whether anything changed.
    pub fn check_out(&mut self, copy: &BookCopy) -> bool {
        match self.records.get_mut(copy.book()) {
            Some(record) if record.available.contains(copy) => {
                record.available.remove(copy);
                record.checkouts += 1;
                true
            },
            _ => false,
        }
    }

    /// Marks a held, unavailable copy as available. Returns whether anything changed.
    pub fn check_in(&mut self, copy: &BookCopy) -> bool {
        match self.records.get_mut(copy.book()) {
            Some(record) if record.all.contains(copy) => record.available.insert(copy.clone()),
            _ => false,
        }
    }

    pub fn is_available(&self, copy: &BookCopy) -> bool {
        self.records.get(copy.book()).is_some_and(|record| record.available.contains(copy))
    }

    pub fn copies_of(&self, book: &Book) -> HashSet<BookCopy> {
        self.records.get(book).map(|record| record.all.clone()).unwrap_or_default()
    }

    pub fn available_copies_of(&self, book: &Book) -> HashSet<BookCopy> {
        self.records.get(book).map(|record| record.available.clone()).unwrap_or_default()
    }

    pub fn popularity(&self, book: &Book) -> u64 {
        self.records.get(book).map_or(0, |record| record.checkouts)
    }

    pub fn contains(&self, book: &Book) -> bool {
        self.records.contains_key(book)
    }

    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.records.keys()
    }

    /// Number of distinct books held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of copies held across every book.
    pub fn copy_count(&self) -> usize {
        self.records.values().map(|record| record.all.len()).sum()
    }

    /// Asserts the record invariants for `book` in debug builds.
    pub(crate) fn check_invariants(&self, book: &Book) {
        if let Some(record) = self.records.get(book) {
            debug_assert!(!record.all.is_empty(), "record for {book} has no copies");
            debug_assert!(record.available.is_subset(&record.all), "available copies of {book} are not all held");
            debug_assert!(record.all.iter().all(|copy| copy.book() == book), "record for {book} holds a foreign copy");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> Book {
        Book::new("Effective Java", ["Joshua Bloch"], 2018).unwrap()
    }

    #[test]
    fn test_add_reports_first_copy() {
        let mut ledger = CopyLedger::new();
        assert!(ledger.add(BookCopy::new(book())));
        assert!(!ledger.add(BookCopy::new(book())));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.copy_count(), 2);
    }

    #[test]
    fn test_remove_last_copy_drops_record() {
        let mut ledger = CopyLedger::new();
        let a = BookCopy::new(book());
        let b = BookCopy::new(book());
        ledger.add(a.clone());
        ledger.add(b.clone());

        assert_eq!(ledger.remove(&a), Removal::Remaining);
        assert_eq!(ledger.remove(&a), Removal::Unknown);
        assert_eq!(ledger.remove(&b), Removal::LastCopy);
        assert!(!ledger.contains(&book()));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_check_out_and_in() {
        let mut ledger = CopyLedger::new();
        let copy = BookCopy::new(book());
        ledger.add(copy.clone());

        assert!(ledger.check_out(&copy));
        assert!(!ledger.check_out(&copy));
        assert!(!ledger.is_available(&copy));
        assert_eq!(ledger.popularity(&book()), 1);

        assert!(ledger.check_in(&copy));
        assert!(!ledger.check_in(&copy));
        assert!(ledger.is_available(&copy));
        assert_eq!(ledger.popularity(&book()), 1);
    }

    #[test]
    fn test_check_out_counts_only_transitions() {
        let mut ledger = CopyLedger::new();
        let a = BookCopy::new(book());
        let b = BookCopy::new(book());
        ledger.add(a.clone());
        ledger.add(b.clone());

        assert!(ledger.check_out(&a));
        assert!(ledger.check_out(&b));
        assert!(!ledger.check_out(&a));
        assert!(ledger.available_copies_of(&book()).is_empty());
        assert_eq!(ledger.copies_of(&book()).len(), 2);
        assert_eq!(ledger.popularity(&book()), 2);
        ledger.check_invariants(&book());
    }

    #[test]
    fn test_unknown_copies_are_ignored() {
        let mut ledger = CopyLedger::new();
        let held = BookCopy::new(book());
        let stranger = BookCopy::new(book());
        ledger.add(held);

        assert!(!ledger.check_out(&stranger));
        assert!(!ledger.check_in(&stranger));
        assert!(!ledger.is_available(&stranger));
        assert_eq!(ledger.available_copies_of(&book()).len(), 1);
    }

    #[test]
    fn test_returned_sets_are_detached() {
        let mut ledger = CopyLedger::new();
        ledger.add(BookCopy::new(book()));
        let mut copies = ledger.copies_of(&book());
        copies.clear();
        assert_eq!(ledger.copies_of(&book()).len(), 1);
        ledger.check_invariants(&book());
    }
}
