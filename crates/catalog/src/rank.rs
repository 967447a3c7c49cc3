//! Relevance scoring and result ordering.

use crate::models::Book;
use crate::tokenize::Token;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Tunable weights for query scoring.
///
/// Every token an entry matches adds its weight to the entry's score. Results
/// are ordered by score, then newest year, then (optionally) popularity, then
/// [`Book`]'s lexical order so that full ties still come out deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct Ranking {
    /// Added for each quoted phrase an entry matches.
    pub phrase_weight: u32,
    /// Added for each single word an entry matches.
    pub word_weight: u32,
    /// Prefer more frequently checked-out books when score and year tie.
    pub popularity_tiebreak: bool,
}
impl Default for Ranking {
    fn default() -> Self {
        Self { phrase_weight: 3, word_weight: 1, popularity_tiebreak: true }
    }
}
impl Ranking {
    pub fn weight(&self, token: &Token) -> u32 {
        if token.is_phrase() { self.phrase_weight } else { self.word_weight }
    }
}

/// A query result: a book and its combined score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub book: Book,
    pub score: u32,
}

/// Sums the weight of every token over the books `matcher` returns for it.
pub(crate) fn score(
    tokens: &[Token],
    ranking: &Ranking,
    mut matcher: impl FnMut(&Token) -> HashSet<Book>,
) -> HashMap<Book, u32> {
    let mut scores: HashMap<Book, u32> = HashMap::new();
    for token in tokens {
        let weight = ranking.weight(token);
        for book in matcher(token) {
            let score = scores.entry(book).or_default();
            *score = score.saturating_add(weight);
        }
    }
    scores.retain(|_, score| *score > 0);
    scores
}

/// Orders scored books best-first.
pub(crate) fn rank(scores: HashMap<Book, u32>, ranking: &Ranking, popularity: impl Fn(&Book) -> u64) -> Vec<Match> {
    let mut ranked: Vec<(Match, u64)> = scores
        .into_iter()
        .map(|(book, score)| {
            let popularity = if ranking.popularity_tiebreak { popularity(&book) } else { 0 };
            (Match { book, score }, popularity)
        })
        .collect();
    ranked.sort_by(|(a, a_popularity), (b, b_popularity)| {
        b.score
            .cmp(&a.score)
            .then_with(|| b.book.year().cmp(&a.book.year()))
            .then_with(|| b_popularity.cmp(a_popularity))
            .then_with(|| a.book.cmp(&b.book))
    });
    ranked.into_iter().map(|(m, _)| m).collect()
}

/// Orders books newest year first, falling back to lexical order.
pub(crate) fn newest_first(books: impl IntoIterator<Item = Book>) -> Vec<Book> {
    let mut books: Vec<Book> = books.into_iter().collect();
    books.sort_by(|a, b| match b.year().cmp(&a.year()) {
        Ordering::Equal => a.cmp(b),
        ordering => ordering,
    });
    books
}
