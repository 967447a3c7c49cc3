//! Lookup structures maintained by the indexed [`Catalog`](crate::Catalog).
//!
//! - [`ExactIndex`] maps verbatim title/author strings to books.
//! - [`WordIndex`] is an inverted index of lowercased words to books.
//! - [`phrase`] resolves quoted phrases on top of the word index.
//!
//! Accessors hand out owned sets, never the live internal containers.

mod exact;
pub mod phrase;
mod word;

pub use self::exact::ExactIndex;
pub use self::word::WordIndex;
