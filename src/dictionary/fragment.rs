//! Body fragments: the semicolon-separated pieces of an entry body, each
//! classified by the first shape matcher that accepts it.

use std::sync::LazyLock;

use regex::Regex;

use super::pos;

static PAREN_DESC_THEN_POS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\((?P<desc>[^)]+)\)\s*,\s*(?P<pos>(?:[a-z]+\.\s*)+)\s*(?P<rest>.+)$").unwrap()
});
static DESC_THEN_POS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<desc>[^,]+?)\s*,\s*(?P<pos>(?:[a-z]+\.\s*)+)\s*(?P<rest>.+)$").unwrap()
});
static INLINE_POS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<pos>(?:[a-z]+\.\s*)+)\s*(?P<rest>.+)$").unwrap());
static PAREN_DESC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\((?P<desc>[^)]+)\)\s*,\s*(?P<rest>.+)$").unwrap());

/// What one fragment turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Translations tagged with their own parts of speech, optionally glossed.
    Tagged {
        description: String,
        pos: Vec<String>,
        items: Vec<String>,
    },
    /// Translations that inherit the header's parts of speech.
    Untagged {
        description: String,
        items: Vec<String>,
    },
    /// An unrelated `English, Xhosa` pair printed inline; becomes its own entry.
    CrossReference {
        headword: String,
        translation: String,
    },
}

type Matcher = fn(&str) -> Option<Fragment>;

/// Tried in order; the first match wins.
const MATCHERS: [Matcher; 6] = [
    paren_desc_then_pos,
    desc_then_pos,
    inline_pos,
    paren_desc,
    plain_list,
    cross_reference,
];

pub fn classify(fragment: &str) -> Option<Fragment> {
    MATCHERS.iter().find_map(|matcher| matcher(fragment))
}

/// Splits an entry body into fragments after dropping one trailing period.
pub fn split_fragments(body: &str) -> Vec<&str> {
    let body = body.trim();
    let body = body.strip_suffix('.').map_or(body, str::trim_end);
    body.split(';')
        .map(|p| p.trim_matches(|c| c == ' ' || c == ';'))
        .filter(|p| !p.is_empty())
        .collect()
}

/// Comma-separated translation list; trailing periods are ignored.
fn split_items(text: &str) -> Vec<String> {
    text.trim()
        .trim_end_matches('.')
        .split(',')
        .map(|p| p.trim_matches(|c| c == ' ' || c == ','))
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

fn tagged(re: &Regex, fragment: &str) -> Option<Fragment> {
    let caps = re.captures(fragment)?;
    Some(Fragment::Tagged {
        description: caps
            .name("desc")
            .map_or(String::new(), |m| m.as_str().trim().to_string()),
        pos: pos::normalize(caps.name("pos")?.as_str()),
        items: split_items(caps.name("rest")?.as_str()),
    })
}

fn paren_desc_then_pos(fragment: &str) -> Option<Fragment> {
    tagged(&PAREN_DESC_THEN_POS, fragment)
}

fn desc_then_pos(fragment: &str) -> Option<Fragment> {
    tagged(&DESC_THEN_POS, fragment)
}

fn inline_pos(fragment: &str) -> Option<Fragment> {
    tagged(&INLINE_POS, fragment)
}

fn paren_desc(fragment: &str) -> Option<Fragment> {
    let caps = PAREN_DESC.captures(fragment)?;
    Some(Fragment::Untagged {
        description: caps.name("desc")?.as_str().trim().to_string(),
        items: split_items(caps.name("rest")?.as_str()),
    })
}

fn plain_list(fragment: &str) -> Option<Fragment> {
    let items = split_items(fragment);
    (!items.is_empty()).then(|| Fragment::Untagged {
        description: String::new(),
        items,
    })
}

fn cross_reference(fragment: &str) -> Option<Fragment> {
    let commas = fragment.matches(',').count();
    if !(1..=2).contains(&commas) {
        return None;
    }
    let (left, right) = fragment.rsplit_once(',')?;
    let (left, right) = (left.trim(), right.trim());
    if pos::mentions_pos(left) {
        return None;
    }
    if !left.is_ascii() || !left.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    if right.is_empty() {
        return None;
    }
    Some(Fragment::CrossReference {
        headword: left.to_string(),
        translation: right.to_string(),
    })
}
