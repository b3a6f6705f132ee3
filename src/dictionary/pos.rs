//! Part-of-speech abbreviation normalization.

use std::sync::LazyLock;

use regex::Regex;

/// Abbreviation (as printed, whitespace collapsed) to short form.
const POS_SHORT: &[(&str, &str)] = &[
    ("a.", "a"),
    ("adj.", "a"),
    ("adv.", "adv"),
    ("n.", "n"),
    ("v.", "v"),
    ("v. t.", "v t"),
    ("v.t.", "v t"),
    ("v. i.", "v i"),
    ("v.i.", "v i"),
    ("v. aux.", "v"),
    ("prep.", "prep"),
    ("conj.", "conj"),
    ("intj.", "intj"),
    ("pron.", "pron"),
    ("pr.", "pron"),
];

/// Longest table key, counted in abbreviations.
const MAX_KEY_PARTS: usize = 2;

static ABBREV: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-z]+\.").unwrap());

fn short_form(key: &str) -> Option<&'static str> {
    POS_SHORT
        .iter()
        .find_map(|&(k, short)| (k == key).then_some(short))
}

/// Normalizes a raw abbreviation sequence such as `"v. i. "` or `"a. n."`
/// into one short token per part of speech it names.
pub fn normalize(raw: &str) -> Vec<String> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if let Some(short) = short_form(&collapsed) {
        return vec![short.to_string()];
    }

    let parts: Vec<&str> = ABBREV.find_iter(&collapsed).map(|m| m.as_str()).collect();
    if parts.is_empty() {
        return vec![collapsed];
    }

    let mut tokens = Vec::new();
    let mut i = 0;
    while i < parts.len() {
        let longest = MAX_KEY_PARTS.min(parts.len() - i);
        let hit = (1..=longest)
            .rev()
            .find_map(|len| short_form(&parts[i..i + len].join(" ")).map(|s| (s, len)));
        match hit {
            Some((short, len)) => {
                tokens.push(short.to_string());
                i += len;
            }
            None => {
                tokens.push(parts[i].to_string());
                i += 1;
            }
        }
    }
    tokens
}

/// Whether `text` contains a part-of-speech abbreviation as a standalone word.
pub fn mentions_pos(text: &str) -> bool {
    static POS_IN_TEXT: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?i)\b(?:a|adj|adv|n|v|prep|conj|intj|pron|pr)\.").unwrap()
    });
    POS_IN_TEXT.is_match(text)
}
