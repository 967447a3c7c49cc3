//! Quoted-phrase resolution.
//!
//! Runs in two stages: intersect the word-index postings of every word in the
//! phrase to get candidates, then keep only candidates whose title or author
//! text contains the phrase contiguously. The index alone cannot tell
//! "design patterns" apart from "patterns of design".

use super::WordIndex;
use crate::consts::AUTHOR_JOINER;
use crate::models::Book;
use crate::tokenize::{normalize, words};
use std::collections::HashSet;

/// Books whose title or joined author names contain `phrase`.
///
/// The phrase is normalized (lowercased, whitespace collapsed) before matching,
/// and a phrase without any words matches nothing.
pub fn resolve(index: &WordIndex, phrase: &str) -> HashSet<Book> {
    let phrase = normalize(phrase);
    let pieces: Vec<String> = words(&phrase).collect();
    if pieces.is_empty() {
        return HashSet::new();
    }
    let mut candidates = index.lookup_all(pieces.as_slice());
    candidates.retain(|book| contains_phrase(book, &phrase));
    candidates
}

/// Substring confirmation against an already-normalized phrase.
pub(crate) fn contains_phrase(book: &Book, phrase: &str) -> bool {
    normalize(book.title()).contains(phrase) || normalize(&book.authors().join(AUTHOR_JOINER)).contains(phrase)
}
