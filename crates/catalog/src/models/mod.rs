mod book;
mod copy;

pub use self::book::Book;
pub use self::copy::{BookCopy, Condition};
