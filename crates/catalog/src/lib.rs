//! In-memory book catalog with sub-linear lookups and ranked free-text search.
//!
//! The crate is built around the [`Library`] trait, implemented twice:
//!
//! - [`Catalog`] maintains an exact-match index and an inverted word index in
//!   lockstep with its copy ledger, so lookups and queries never scan the whole
//!   collection.
//! - [`SmallCatalog`] keeps nothing but the copies and scans them for every
//!   question. It answers queries identically and serves as a reference.
//!
//! Queries are tokenized into words and double-quoted phrases (see
//! [`tokenize`]), each token adds its [`Ranking`] weight to every book it
//! matches, and results come back best-first.
//!
//! The catalogs are single-writer: wrap one in a lock if it must be shared
//! between threads.

mod catalog;
mod consts;
pub mod error;
pub mod index;
pub mod ledger;
mod library;
pub mod models;
mod rank;
mod small;
pub mod tokenize;

pub use crate::catalog::Catalog;
pub use crate::library::Library;
pub use crate::rank::{Match, Ranking};
pub use crate::small::SmallCatalog;
