use regex::Regex;
use std::sync::LazyLock;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

// Word characters are letters, digits and underscore; any run of anything else delimits words.
regex!(WORD_SEPARATOR_REGEX, r"\W+");
regex!(WHITESPACE_REGEX, r"\s+");

/// Separator placed between author names when matching phrases against them.
pub(crate) const AUTHOR_JOINER: &str = ", ";
