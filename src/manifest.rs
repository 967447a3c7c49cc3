//! JSON book manifests.
//!
//! A manifest is an array of entries, each describing one book and how many
//! copies of it the library holds:
//!
//! ```json
//! [{ "title": "Design Patterns", "authors": ["Erich Gamma"], "year": 1994, "copies": 2 }]
//! ```

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use serde::Deserialize;
use shelf_catalog::Library;
use shelf_catalog::models::Book;
use std::path::Path;
use tracing::{debug, instrument};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Entry {
    title: String,
    authors: Vec<String>,
    year: i64,
    #[serde(default = "one")]
    copies: u32,
}

fn one() -> u32 {
    1
}

/// Reads the manifest at `path` into `library`.
#[instrument(level = "debug", skip(library))]
pub fn load(path: &Path, library: &mut impl Library) -> Result<()> {
    let contents = std::fs::read_to_string(path).or_raise(|| ErrorKind::Io(path.to_path_buf()))?;
    stock(&contents, library)
}

/// Acquires every copy listed in `contents`.
///
/// Entries are validated before anything is acquired, so a bad manifest leaves
/// `library` untouched.
pub fn stock(contents: &str, library: &mut impl Library) -> Result<()> {
    let entries: Vec<Entry> = serde_json::from_str(contents).or_raise(|| ErrorKind::Manifest)?;
    let mut books = Vec::with_capacity(entries.len());
    for (position, entry) in entries.into_iter().enumerate() {
        let book = Book::new(entry.title, entry.authors, entry.year).or_raise(|| ErrorKind::InvalidEntry(position))?;
        books.push((book, entry.copies));
    }
    for (book, copies) in books {
        debug!(%book, copies, "stocking");
        for _ in 0..copies {
            library.acquire(&book);
        }
    }
    Ok(())
}
