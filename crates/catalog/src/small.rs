use crate::index::phrase::contains_phrase;
use crate::library::Library;
use crate::models::{Book, BookCopy};
use crate::rank::{self, Match, Ranking};
use crate::tokenize::{Token, normalize, tokenize, words};
use std::collections::{HashMap, HashSet};
use tracing::instrument;

/// A small collection of books, like a single person's home collection.
///
/// Holds two disjoint sets of copies (on the shelf and checked out) and answers
/// every question by scanning them. Query semantics are identical to
/// [`Catalog`](crate::Catalog)'s, which makes this a reference to check the
/// indexed implementation against.
#[derive(Debug, Default)]
pub struct SmallCatalog {
    on_shelf: HashSet<BookCopy>,
    checked_out: HashSet<BookCopy>,
    checkouts: HashMap<Book, u64>,
    ranking: Ranking,
}

impl SmallCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ranking(ranking: Ranking) -> Self {
        Self { ranking, ..Self::default() }
    }

    fn copies(&self) -> impl Iterator<Item = &BookCopy> {
        self.on_shelf.iter().chain(self.checked_out.iter())
    }

    fn books(&self) -> HashSet<Book> {
        self.copies().map(|copy| copy.book().clone()).collect()
    }

    fn holds(&self, book: &Book) -> bool {
        self.copies().any(|copy| copy.book() == book)
    }

    fn check_invariants(&self) {
        debug_assert!(self.on_shelf.is_disjoint(&self.checked_out), "copy both on shelf and checked out");
    }
}

/// Whether `token` matches `book` without the help of any index.
fn matches(book: &Book, token: &Token) -> bool {
    let pieces = token.pieces();
    if pieces.is_empty() {
        return false;
    }
    let vocabulary: HashSet<String> = book.fields().flat_map(words).collect();
    if !pieces.iter().all(|piece| vocabulary.contains(piece)) {
        return false;
    }
    match token {
        Token::Phrase(text) => contains_phrase(book, &normalize(text)),
        Token::Word(_) => true,
    }
}

impl Library for SmallCatalog {
    fn acquire(&mut self, book: &Book) -> BookCopy {
        let copy = BookCopy::new(book.clone());
        self.on_shelf.insert(copy.clone());
        self.check_invariants();
        copy
    }

    fn dispose(&mut self, copy: &BookCopy) {
        if (self.on_shelf.remove(copy) || self.checked_out.remove(copy)) && !self.holds(copy.book()) {
            self.checkouts.remove(copy.book());
        }
        self.check_invariants();
    }

    fn mark_unavailable(&mut self, copy: &BookCopy) {
        if self.on_shelf.remove(copy) {
            self.checked_out.insert(copy.clone());
            *self.checkouts.entry(copy.book().clone()).or_default() += 1;
        }
        self.check_invariants();
    }

    fn mark_available(&mut self, copy: &BookCopy) {
        if self.checked_out.remove(copy) {
            self.on_shelf.insert(copy.clone());
        }
        self.check_invariants();
    }

    fn is_available(&self, copy: &BookCopy) -> bool {
        self.on_shelf.contains(copy)
    }

    fn copies_of(&self, book: &Book) -> HashSet<BookCopy> {
        self.copies().filter(|copy| copy.book() == book).cloned().collect()
    }

    fn available_copies_of(&self, book: &Book) -> HashSet<BookCopy> {
        self.on_shelf.iter().filter(|copy| copy.book() == book).cloned().collect()
    }

    fn popularity(&self, book: &Book) -> u64 {
        self.checkouts.get(book).copied().unwrap_or(0)
    }

    fn find_exact(&self, text: &str) -> Vec<Book> {
        rank::newest_first(self.books().into_iter().filter(|book| book.fields().any(|field| field == text)))
    }

    #[instrument(level = "debug", skip(self))]
    fn search(&self, text: &str) -> Vec<Match> {
        let tokens = tokenize(text);
        let books = self.books();
        let scores = rank::score(&tokens, &self.ranking, |token| {
            books.iter().filter(|book| matches(book, token)).cloned().collect()
        });
        rank::rank(scores, &self.ranking, |book| self.popularity(book))
    }
}
