use crate::index::{ExactIndex, WordIndex, phrase};
use crate::ledger::{CopyLedger, Removal};
use crate::library::Library;
use crate::models::{Book, BookCopy};
use crate::rank::{self, Match, Ranking};
use crate::tokenize::{Token, tokenize, words};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// A large collection of books, like a city or university library system.
///
/// Every lookup runs in time sub-linear in the number of held books: exact
/// title/author lookups go through an [`ExactIndex`], free-text queries through
/// a [`WordIndex`]. Both indexes are updated in lockstep with the
/// [`CopyLedger`]: a book is indexed when its first copy is acquired and
/// unindexed when its last copy is disposed of.
///
/// ```
/// use shelf_catalog::models::Book;
/// use shelf_catalog::{Catalog, Library};
///
/// let mut catalog = Catalog::new();
/// let gof = Book::new("Design Patterns", ["Erich Gamma"], 1994).unwrap();
/// let copy = catalog.acquire(&gof);
/// assert_eq!(catalog.query("\"design patterns\""), vec![gof.clone()]);
///
/// catalog.dispose(&copy);
/// assert!(catalog.query("patterns").is_empty());
/// ```
#[derive(Debug, Default)]
pub struct Catalog {
    ledger: CopyLedger,
    exact: ExactIndex,
    words: WordIndex,
    ranking: Ranking,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ranking(ranking: Ranking) -> Self {
        Self { ranking, ..Self::default() }
    }

    pub fn ranking(&self) -> &Ranking {
        &self.ranking
    }

    /// Number of distinct books held.
    pub fn len(&self) -> usize {
        self.ledger.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    /// Number of copies held across every book.
    pub fn copy_count(&self) -> usize {
        self.ledger.copy_count()
    }

    fn index(&mut self, book: &Book) {
        debug!(%book, "indexing book");
        for field in book.fields() {
            self.exact.put(field, book);
            self.words.index(field, book);
        }
    }

    fn unindex(&mut self, book: &Book) {
        debug!(%book, "unindexing book");
        for field in book.fields() {
            self.exact.remove(field, book);
        }
        self.words.unindex(book);
    }

    fn matching(&self, token: &Token) -> HashSet<Book> {
        match token {
            Token::Phrase(text) => phrase::resolve(&self.words, text),
            // Punctuated words must match on every piece; no pieces matches nothing.
            Token::Word(_) => self.words.lookup_all(token.pieces().as_slice()),
        }
    }

    /// Asserts, in debug builds, that `book` is either held and fully indexed
    /// or absent from the ledger and every index.
    fn check_invariants(&self, book: &Book) {
        if !cfg!(debug_assertions) {
            return;
        }
        self.ledger.check_invariants(book);
        let held = self.ledger.contains(book);
        for field in book.fields() {
            debug_assert_eq!(self.exact.contains(field, book), held, "exact index out of sync for {book}");
            for word in words(field) {
                debug_assert_eq!(self.words.contains(&word, book), held, "word index out of sync for {book}");
            }
        }
        debug_assert_eq!(self.words.contains_book(book), held, "word index out of sync for {book}");
    }

    /// Full consistency sweep over both indexes. Linear; test use only.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        for book in self.exact.books().chain(self.words.books()) {
            assert!(self.ledger.contains(book), "{book} is indexed but not held");
        }
        for book in self.ledger.books() {
            self.check_invariants(book);
        }
    }
}

impl Library for Catalog {
    #[instrument(level = "debug", skip(self), fields(book = %book))]
    fn acquire(&mut self, book: &Book) -> BookCopy {
        let copy = BookCopy::new(book.clone());
        if self.ledger.add(copy.clone()) {
            self.index(book);
        }
        self.check_invariants(book);
        copy
    }

    #[instrument(level = "debug", skip(self), fields(copy = copy.id()))]
    fn dispose(&mut self, copy: &BookCopy) {
        match self.ledger.remove(copy) {
            Removal::LastCopy => self.unindex(copy.book()),
            Removal::Remaining => {},
            Removal::Unknown => debug!("ignoring unknown copy"),
        }
        self.check_invariants(copy.book());
    }

    #[instrument(level = "trace", skip(self), fields(copy = copy.id()))]
    fn mark_unavailable(&mut self, copy: &BookCopy) {
        self.ledger.check_out(copy);
        self.check_invariants(copy.book());
    }

    #[instrument(level = "trace", skip(self), fields(copy = copy.id()))]
    fn mark_available(&mut self, copy: &BookCopy) {
        self.ledger.check_in(copy);
        self.check_invariants(copy.book());
    }

    fn is_available(&self, copy: &BookCopy) -> bool {
        self.ledger.is_available(copy)
    }

    fn copies_of(&self, book: &Book) -> HashSet<BookCopy> {
        self.ledger.copies_of(book)
    }

    fn available_copies_of(&self, book: &Book) -> HashSet<BookCopy> {
        self.ledger.available_copies_of(book)
    }

    fn popularity(&self, book: &Book) -> u64 {
        self.ledger.popularity(book)
    }

    #[instrument(level = "debug", skip(self))]
    fn find_exact(&self, text: &str) -> Vec<Book> {
        rank::newest_first(self.exact.lookup(text))
    }

    #[instrument(level = "debug", skip(self))]
    fn search(&self, text: &str) -> Vec<Match> {
        let tokens = tokenize(text);
        let scores = rank::score(&tokens, &self.ranking, |token| self.matching(token));
        let results = rank::rank(scores, &self.ranking, |book| self.ledger.popularity(book));
        debug!(tokens = tokens.len(), results = results.len(), "query complete");
        results
    }
}
