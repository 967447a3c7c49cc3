use crate::models::Book;
use std::collections::{HashMap, HashSet};

/// Maps a literal string (an entire title or an entire author name) to every
/// book carrying it. Keys are case-sensitive and stored exactly as given.
#[derive(Debug, Default, Clone)]
pub struct ExactIndex {
    entries: HashMap<String, HashSet<Book>>,
}

impl ExactIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `book` under `key`, creating the key if absent.
    pub fn put(&mut self, key: &str, book: &Book) {
        self.entries.entry(key.to_string()).or_default().insert(book.clone());
    }

    /// Removes `book` from under `key`, dropping the key once nothing is left.
    pub fn remove(&mut self, key: &str, book: &Book) {
        if let Some(books) = self.entries.get_mut(key) {
            books.remove(book);
            if books.is_empty() {
                self.entries.remove(key);
            }
        }
    }

    /// Every book under `key`; empty when the key is unknown.
    pub fn lookup(&self, key: &str) -> HashSet<Book> {
        self.entries.get(key).cloned().unwrap_or_default()
    }

    pub fn contains(&self, key: &str, book: &Book) -> bool {
        self.entries.get(key).is_some_and(|books| books.contains(book))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn books(&self) -> impl Iterator<Item = &Book> {
        self.entries.values().flatten()
    }
}
