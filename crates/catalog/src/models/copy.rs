use super::Book;
use crate::error::{Error, ErrorKind};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};

static NEXT_COPY_ID: AtomicU64 = AtomicU64::new(1);

/// Physical condition of a copy, typically set by a librarian on return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Condition {
    #[default]
    Good,
    Damaged,
}
impl Condition {
    /// Returns the display string for the condition.
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Good => "good",
            Condition::Damaged => "damaged",
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => Condition::Good,
            _ => Condition::Damaged,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            Condition::Good => 0,
            Condition::Damaged => 1,
        }
    }
}
impl FromStr for Condition {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "good" => Self::Good,
            "damaged" => Self::Damaged,
            _ => exn::bail!(ErrorKind::ParseError {
                field: "condition",
                value: s.to_string(),
            }),
        })
    }
}
impl Display for Condition {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug)]
struct Physical {
    id: u64,
    book: Book,
    condition: AtomicU8,
}

/// One physical copy of a [`Book`].
///
/// Copies have identity, not value, semantics: two copies of the same book are
/// never interchangeable. Clones of a `BookCopy` are handles to the same copy,
/// so a condition set through one clone is visible through all of them.
#[derive(Debug, Clone)]
pub struct BookCopy(Arc<Physical>);

impl BookCopy {
    /// Issues a new copy, in good condition, with a process-unique id.
    pub(crate) fn new(book: Book) -> Self {
        Self(Arc::new(Physical {
            id: NEXT_COPY_ID.fetch_add(1, Ordering::Relaxed),
            book,
            condition: AtomicU8::new(Condition::Good.as_u8()),
        }))
    }

    pub fn id(&self) -> u64 {
        self.0.id
    }

    /// The edition this is a copy of.
    pub fn book(&self) -> &Book {
        &self.0.book
    }

    pub fn condition(&self) -> Condition {
        Condition::from_u8(self.0.condition.load(Ordering::Relaxed))
    }

    /// Records the latest condition of this copy. Never affects availability.
    pub fn set_condition(&self, condition: Condition) {
        self.0.condition.store(condition.as_u8(), Ordering::Relaxed);
    }
}

impl PartialEq for BookCopy {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}
impl Eq for BookCopy {}
impl Hash for BookCopy {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl Display for BookCopy {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} [{}]", self.book(), self.condition())
    }
}
