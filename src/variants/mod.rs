//! Variant expansion: sentence in, capped list of lexical substitution variants out.

pub mod index;
pub mod product;
pub mod segment;
pub mod tokenize;

pub use index::{LookupIndex, ReverseIndex};
pub use product::Variants;
pub use tokenize::{Tokenize, WordTokenizer};

use clap::ValueEnum;
use segment::Segment;

use crate::dictionary::EntryStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Direction {
    /// Headwords to translations, with phrase matching.
    #[default]
    #[value(name = "en2xh")]
    EnToXh,
    /// Translations back to headwords, token by token.
    #[value(name = "xh2en")]
    XhToEn,
}

/// The lookup view for one expansion direction.
#[derive(Debug, Clone)]
pub enum Translations {
    Forward(LookupIndex),
    Reverse(ReverseIndex),
}

impl Translations {
    pub fn from_store(store: &EntryStore, direction: Direction, lang: &str) -> Self {
        match direction {
            Direction::EnToXh => Self::Forward(LookupIndex::from_store(store, lang)),
            Direction::XhToEn => Self::Reverse(ReverseIndex::from_store(store, lang)),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Forward(index) => index.len(),
            Self::Reverse(index) => index.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Forward(index) => index.is_empty(),
            Self::Reverse(index) => index.is_empty(),
        }
    }

    pub fn segment(&self, tokenizer: &impl Tokenize, sentence: &str) -> Vec<Segment> {
        let tokens = tokenizer.tokenize(sentence);
        match self {
            Self::Forward(index) => segment::segment_forward(&tokens, tokenizer, index),
            Self::Reverse(index) => segment::segment_reverse(&tokens, tokenizer, index),
        }
    }
}

/// All variants of `sentence`, at most `cap`, in generation order.
/// A blank sentence has none.
pub fn expand(
    translations: &Translations,
    tokenizer: &impl Tokenize,
    sentence: &str,
    cap: usize,
) -> Vec<String> {
    let sentence = sentence.trim();
    if sentence.is_empty() {
        return Vec::new();
    }
    let segments = translations.segment(tokenizer, sentence);
    let mut out = Vec::with_capacity(product::variant_count(&segments, cap));
    out.extend(Variants::new(&segments, cap));
    out
}
