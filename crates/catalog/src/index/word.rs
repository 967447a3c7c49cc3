use crate::models::Book;
use crate::tokenize::words;
use std::collections::{HashMap, HashSet};
use tracing::trace;

/// Inverted index from lowercased words to the books whose title or author
/// names contain them.
///
/// Alongside the postings, a reverse table records which words each book
/// contributed, so [`unindex`](Self::unindex) touches only those postings
/// instead of scanning the whole index.
#[derive(Debug, Default, Clone)]
pub struct WordIndex {
    postings: HashMap<String, HashSet<Book>>,
    contributed: HashMap<Book, HashSet<String>>,
}

impl WordIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits `text` into words and files `book` under each of them.
    pub fn index(&mut self, text: &str, book: &Book) {
        for word in words(text) {
            trace!(word = %word, "indexing word");
            self.postings.entry(word.clone()).or_default().insert(book.clone());
            self.contributed.entry(book.clone()).or_default().insert(word);
        }
    }

    /// Removes every trace of `book` from the index.
    pub fn unindex(&mut self, book: &Book) {
        let Some(contributed) = self.contributed.remove(book) else {
            return;
        };
        for word in contributed {
            if let Some(books) = self.postings.get_mut(&word) {
                books.remove(book);
                if books.is_empty() {
                    trace!(word = %word, "dropping empty posting");
                    self.postings.remove(&word);
                }
            }
        }
    }

    /// Books filed under `word`, case-insensitively.
    pub fn lookup(&self, word: &str) -> HashSet<Book> {
        self.postings.get(&word.to_lowercase()).cloned().unwrap_or_default()
    }

    /// Books filed under *every* one of `words`. An empty word list matches
    /// nothing.
    pub fn lookup_all<S: AsRef<str>>(&self, words: &[S]) -> HashSet<Book> {
        let mut postings = Vec::with_capacity(words.len());
        for word in words {
            match self.postings.get(&word.as_ref().to_lowercase()) {
                Some(books) => postings.push(books),
                None => return HashSet::new(),
            }
        }
        // Start from the rarest word to keep the intersection small.
        postings.sort_by_key(|books| books.len());
        let Some((smallest, rest)) = postings.split_first() else {
            return HashSet::new();
        };
        smallest.iter().filter(|book| rest.iter().all(|books| books.contains(*book))).cloned().collect()
    }

    /// Whether `book` currently has anything in the index.
    pub fn contains_book(&self, book: &Book) -> bool {
        self.contributed.contains_key(book)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn books(&self) -> impl Iterator<Item = &Book> {
        self.postings.values().flatten()
    }

    pub(crate) fn contains(&self, word: &str, book: &Book) -> bool {
        self.postings.get(word).is_some_and(|books| books.contains(book))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(title: &str, author: &str) -> Book {
        Book::new(title, [author], 2000).unwrap()
    }

    fn indexed(books: &[&Book]) -> WordIndex {
        let mut index = WordIndex::new();
        for book in books {
            for field in book.fields() {
                index.index(field, book);
            }
        }
        index
    }

    #[test]
    fn test_index_splits_on_non_word_characters() {
        let gof = book("Design Patterns: Object-Oriented Software", "Erich Gamma");
        let index = indexed(&[&gof]);
        for word in ["design", "patterns", "object", "oriented", "software", "erich", "gamma"] {
            assert_eq!(index.lookup(word), HashSet::from([gof.clone()]), "missing word {word}");
        }
        assert!(index.lookup("object-oriented").is_empty());
        assert!(index.lookup("patterns:").is_empty());
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let java = book("Effective Java", "Joshua Bloch");
        let index = indexed(&[&java]);
        for query in ["java", "JAVA", "JaVa"] {
            assert_eq!(index.lookup(query), HashSet::from([java.clone()]));
        }
    }

    #[test]
    fn test_unindex_removes_every_trace() {
        let java = book("Effective Java", "Joshua Bloch");
        let concurrency = book("Java Concurrency", "Brian Goetz");
        let mut index = indexed(&[&java, &concurrency]);

        index.unindex(&java);
        assert!(!index.contains_book(&java));
        assert!(index.lookup("effective").is_empty());
        assert!(index.lookup("bloch").is_empty());
        assert_eq!(index.lookup("java"), HashSet::from([concurrency.clone()]));
        assert!(index.books().all(|b| *b != java));

        index.unindex(&concurrency);
        assert!(index.is_empty());
        // Unindexing an unknown book is a no-op.
        index.unindex(&concurrency);
    }

    #[test]
    fn test_lookup_all_intersects() {
        let a = book("Java Design Patterns", "James Smith");
        let b = book("Effective Java", "Joshua Bloch");
        let c = book("Design Patterns", "Erich Gamma");
        let index = indexed(&[&a, &b, &c]);

        assert_eq!(index.lookup_all(&["java", "patterns"]), HashSet::from([a.clone()]));
        assert_eq!(index.lookup_all(&["design", "PATTERNS"]), HashSet::from([a.clone(), c.clone()]));
        assert!(index.lookup_all(&["java", "missing"]).is_empty());
        assert!(index.lookup_all::<&str>(&[]).is_empty());
    }
}
