use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

static UPPER_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<head>[A-Z][A-Za-z\-’']*)\s*,\s*(?P<pos>(?:[a-z]+\.\s*)+)(?P<body>.*)$")
        .unwrap()
});

static LOWER_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<head>[a-z][a-z\-’']*)\s*,\s*(?P<pos>(?:[a-z]+\.\s*)+)(?P<body>.*)$")
        .unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadCase {
    Upper,
    Lower,
}

/// The parsed first line of an entry block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header<'a> {
    pub head: &'a str,
    pub case: HeadCase,
    pub pos: &'a str,
    /// Trimmed remainder; empty for head-only blocks.
    pub body: &'a str,
}

pub fn parse_header(block: &str) -> Option<Header<'_>> {
    [(&*UPPER_HEADER, HeadCase::Upper), (&*LOWER_HEADER, HeadCase::Lower)]
        .into_iter()
        .find_map(|(re, case)| {
            let caps = re.captures(block)?;
            Some(Header {
                head: caps.name("head")?.as_str(),
                case,
                pos: caps.name("pos")?.as_str(),
                body: caps.name("body").map_or("", |m| m.as_str().trim()),
            })
        })
}

pub fn is_entry_start(line: &str) -> bool {
    UPPER_HEADER.is_match(line) || LOWER_HEADER.is_match(line)
}

/// Joins wrapped physical lines into one logical block per entry.
pub fn glue_blocks<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut blocks = Vec::new();
    let mut current = String::new();

    for raw in lines {
        let line = raw.as_ref().trim_end();
        if line.is_empty() {
            continue;
        }
        if is_entry_start(line) {
            if !current.is_empty() {
                blocks.push(current.trim().to_string());
            }
            current = line.to_string();
        } else if current.is_empty() {
            debug!(line, "dropping text before first entry");
        } else {
            current.push(' ');
            current.push_str(line.trim());
        }
    }
    if !current.is_empty() {
        blocks.push(current.trim().to_string());
    }
    blocks
}
