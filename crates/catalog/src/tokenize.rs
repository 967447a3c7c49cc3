//! Query and field tokenization.
//!
//! Two different splitters live here:
//!
//! - [`tokenize`] splits a free-text *query* on whitespace, honouring
//!   double-quoted phrases, into [`Token`]s.
//! - [`words`] splits indexed *field text* (titles and author names) on runs of
//!   non-word characters. Word characters are letters, digits and underscore.
//!
//! Both lowercase their output, which is what makes lookups case-insensitive.

use crate::consts::{WHITESPACE_REGEX, WORD_SEPARATOR_REGEX};

/// A single unit of a parsed query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// A token without interior whitespace.
    Word(String),
    /// A token with interior whitespace, only possible via double quotes.
    Phrase(String),
}
impl Token {
    /// The lowercased token text.
    pub fn as_str(&self) -> &str {
        match self {
            Token::Word(text) | Token::Phrase(text) => text,
        }
    }

    pub fn is_phrase(&self) -> bool {
        matches!(self, Token::Phrase(_))
    }

    /// The index words making up this token, as [`words`] would split them.
    pub fn pieces(&self) -> Vec<String> {
        words(self.as_str()).collect()
    }

    fn classify(raw: &str) -> Option<Self> {
        let text = normalize(raw);
        if text.is_empty() {
            return None;
        }
        Some(match text.contains(' ') {
            true => Token::Phrase(text),
            false => Token::Word(text),
        })
    }
}

/// Splits a query into an ordered sequence of tokens.
///
/// Scans left to right. A `"` toggles phrase mode and is never part of a token.
/// Outside phrase mode whitespace delimits tokens; inside it, whitespace is kept
/// (collapsed to single spaces, with the ends trimmed). Unbalanced quotes are
/// tolerated: everything after the last toggle stays in whichever mode it left.
///
/// ```
/// use shelf_catalog::tokenize::{Token, tokenize};
///
/// assert_eq!(
///     tokenize(r#"Java "Design  Patterns""#),
///     vec![Token::Word("java".into()), Token::Phrase("design patterns".into())],
/// );
/// assert!(tokenize("   ").is_empty());
/// ```
pub fn tokenize(query: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_phrase = false;
    for c in query.chars() {
        match c {
            '"' => in_phrase = !in_phrase,
            c if c.is_whitespace() && !in_phrase => {
                tokens.extend(Token::classify(&current));
                current.clear();
            },
            c => current.push(c),
        }
    }
    tokens.extend(Token::classify(&current));
    tokens
}

/// Splits field text into lowercased index words.
///
/// ```
/// use shelf_catalog::tokenize::words;
///
/// let words: Vec<String> = words("Design Patterns: Object-Oriented Software").collect();
/// assert_eq!(words, vec!["design", "patterns", "object", "oriented", "software"]);
/// ```
pub fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    WORD_SEPARATOR_REGEX.split(text).filter(|word| !word.is_empty()).map(str::to_lowercase)
}

/// Lowercases, trims and collapses every run of whitespace into one space.
pub(crate) fn normalize(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text.trim(), " ").to_lowercase()
}
