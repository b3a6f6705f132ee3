use super::index::{LookupIndex, ReverseIndex};
use super::tokenize::{Tokenize, normalize_key, strip_punct};

/// Candidate strings for one token or matched phrase. Never empty.
pub type Segment = Vec<String>;

fn passthrough(token: &str) -> Segment {
    vec![token.to_string()]
}

/// Greedy longest-match segmentation against headwords and phrases.
///
/// Punctuation and numbers pass through untouched. A word starts a phrase
/// search of up to `index.max_phrase_len()` tokens, longest first; the phrase
/// text is built from the window's word tokens only. Windows must end on a
/// word, so trailing punctuation is never consumed by a match.
pub fn segment_forward(
    tokens: &[&str],
    tokenizer: &impl Tokenize,
    index: &LookupIndex,
) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i];
        if !tokenizer.is_word(token) {
            segments.push(passthrough(token));
            i += 1;
            continue;
        }

        let longest = index.max_phrase_len().min(tokens.len() - i);
        let hit = (1..=longest).rev().find_map(|len| {
            if !tokenizer.is_word(tokens[i + len - 1]) {
                return None;
            }
            let phrase = tokens[i..i + len]
                .iter()
                .filter(|t| tokenizer.is_word(t))
                .map(|t| strip_punct(t))
                .collect::<Vec<_>>()
                .join(" ");
            index.get(&normalize_key(&phrase)).map(|found| (found, len))
        });

        match hit {
            Some((translations, len)) => {
                segments.push(translations.iter().cloned().collect());
                i += len;
            }
            None => {
                segments.push(passthrough(token));
                i += 1;
            }
        }
    }
    segments
}

/// Token-by-token segmentation from translations back to headwords.
/// Lookup is case-sensitive on the punctuation-stripped token.
pub fn segment_reverse(
    tokens: &[&str],
    tokenizer: &impl Tokenize,
    index: &ReverseIndex,
) -> Vec<Segment> {
    tokens
        .iter()
        .map(|&token| {
            if !tokenizer.is_word(token) {
                return passthrough(token);
            }
            match index.get(&strip_punct(token)) {
                Some(heads) => heads.iter().cloned().collect(),
                None => passthrough(token),
            }
        })
        .collect()
}
