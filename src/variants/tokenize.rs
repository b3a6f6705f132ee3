use std::sync::LazyLock;

use regex::Regex;

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z\-’']+|\d+|[^\sA-Za-z\-’'\d]").unwrap());
static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z\-’']+$").unwrap());
static EDGE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\w’'-]+|[^\w’'-]+$").unwrap());

/// Splits sentences into the units that substitution works on.
/// Implemented by `WordTokenizer` for production; tests may supply their own.
pub trait Tokenize {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str>;

    /// Whether a token is eligible for dictionary lookup.
    fn is_word(&self, token: &str) -> bool;
}

/// Letter runs (with hyphen and apostrophes), digit runs, and single
/// punctuation characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl Tokenize for WordTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        TOKEN.find_iter(text).map(|m| m.as_str()).collect()
    }

    fn is_word(&self, token: &str) -> bool {
        WORD.is_match(token)
    }
}

/// Removes leading and trailing characters that cannot be part of a word.
pub fn strip_punct(token: &str) -> String {
    EDGE_PUNCT.replace_all(token, "").into_owned()
}

/// Lowercases and collapses whitespace runs to single spaces.
pub fn normalize_key(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
