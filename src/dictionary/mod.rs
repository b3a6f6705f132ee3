//! Dictionary builder: raw scanned dictionary lines to a sense-indexed entry store.

pub mod blocks;
pub mod fragment;
pub mod pos;
pub mod store;
pub mod types;

pub use types::{Entry, EntryStore, Sense, WordId};

use blocks::{HeadCase, glue_blocks, parse_header};
use fragment::{Fragment, classify, split_fragments};
use tracing::debug;

/// Translation key used when none is configured.
pub const DEFAULT_LANG: &str = "xh";

/// Inflection suffixes whose sub-entries fold into the preceding main entry.
const DERIVATIVE_SUFFIXES: [&str; 6] = ["ed", "ing", "er", "ers", "ment", "ments"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub blocks: usize,
    /// Blocks whose header did not parse.
    pub skipped_blocks: usize,
    /// Heads that produced no senses and therefore no entry.
    pub empty_heads: usize,
    pub merged_derivatives: usize,
    pub cross_references: usize,
    pub unparsed_fragments: usize,
}

/// Fold state carried from one block to the next.
struct Builder<'a> {
    lang: &'a str,
    store: EntryStore,
    next_id: u32,
    /// Arena position of the latest entry created as a main entry.
    last_main: Option<usize>,
    /// Latest head seen outside a merge, including heads with no senses.
    last_main_head: Option<String>,
    stats: BuildStats,
}

impl<'a> Builder<'a> {
    fn new(lang: &'a str) -> Self {
        Self {
            lang,
            store: EntryStore::default(),
            next_id: 1,
            last_main: None,
            last_main_head: None,
            stats: BuildStats::default(),
        }
    }

    fn allocate_id(&mut self) -> WordId {
        let id = WordId(self.next_id);
        self.next_id += 1;
        id
    }

    fn absorb(mut self, block: &str) -> Self {
        self.stats.blocks += 1;
        let Some(header) = parse_header(block) else {
            debug!(block, "skipping block without entry header");
            self.stats.skipped_blocks += 1;
            return self;
        };

        let header_pos = pos::normalize(header.pos);
        let mut senses = Vec::new();

        for text in split_fragments(header.body) {
            match classify(text) {
                Some(Fragment::Tagged {
                    description,
                    pos,
                    items,
                }) => {
                    for item in &items {
                        senses.extend(
                            pos.iter()
                                .map(|tag| Sense::new(tag, &description, self.lang, item)),
                        );
                    }
                }
                Some(Fragment::Untagged { description, items }) => {
                    for item in &items {
                        senses.extend(
                            header_pos
                                .iter()
                                .map(|tag| Sense::new(tag, &description, self.lang, item)),
                        );
                    }
                }
                Some(Fragment::CrossReference {
                    headword,
                    translation,
                }) => {
                    let id = self.allocate_id();
                    let sense = Sense::new("", "", self.lang, &translation);
                    self.store.push(Entry::new(id, &headword, vec![sense]));
                    self.stats.cross_references += 1;
                }
                None => {
                    debug!(head = header.head, fragment = text, "unparsed fragment");
                    self.stats.unparsed_fragments += 1;
                }
            }
        }

        let merge_target = match (&self.last_main_head, header.case) {
            (Some(prev), HeadCase::Lower) if is_derivative_of(prev, header.head) => self.last_main,
            _ => None,
        };

        if senses.is_empty() {
            self.stats.empty_heads += 1;
            self.last_main_head = Some(header.head.to_string());
        } else if let Some(entry) = merge_target.and_then(|pos| self.store.at_mut(pos)) {
            debug!(head = header.head, base = %entry.word_name, "merging derivative");
            entry.append_senses(senses);
            self.stats.merged_derivatives += 1;
        } else {
            let id = self.allocate_id();
            let pos = self.store.push(Entry::new(id, header.head, senses));
            self.last_main = Some(pos);
            self.last_main_head = Some(header.head.to_string());
        }
        self
    }
}

/// `this` is `prev` plus exactly one derivational suffix, ignoring case.
fn is_derivative_of(prev: &str, this: &str) -> bool {
    let (prev, this) = (prev.to_lowercase(), this.to_lowercase());
    this.strip_prefix(&prev)
        .is_some_and(|rest| DERIVATIVE_SUFFIXES.contains(&rest))
}

/// Builds an entry store from already glued blocks.
pub fn build_from_blocks<S: AsRef<str>>(blocks: &[S], lang: &str) -> (EntryStore, BuildStats) {
    let builder = blocks
        .iter()
        .fold(Builder::new(lang), |builder, block| builder.absorb(block.as_ref()));
    (builder.store, builder.stats)
}

/// Builds an entry store from physical dictionary lines.
pub fn build<I, S>(lines: I, lang: &str) -> (EntryStore, BuildStats)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    build_from_blocks(&glue_blocks(lines), lang)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_xh(lines: &[&str]) -> EntryStore {
        build(lines.iter().copied(), DEFAULT_LANG).0
    }

    fn translations(entry: &Entry) -> Vec<&str> {
        entry
            .senses()
            .iter()
            .map(|s| s.translation[DEFAULT_LANG].as_str())
            .collect()
    }

    #[test]
    fn single_entry_single_sense() {
        let store = build_xh(&["play, v. i. dlala;"]);
        assert_eq!(store.len(), 1);
        let entry = store.get(WordId(1)).unwrap();
        assert_eq!(entry.word_name, "play");
        assert_eq!(entry.senses(), &[Sense::new("v i", "", "xh", "dlala")]);
    }

    #[test]
    fn derivative_senses_append_to_main_entry() {
        let store = build_xh(&["play, v. i. dlala;", "played, v. i. dlalwe;"]);
        assert_eq!(store.len(), 1);
        let entry = store.get(WordId(1)).unwrap();
        assert_eq!(translations(entry), vec!["dlala", "dlalwe"]);
        let numbers: Vec<usize> = entry.numbered_senses().map(|(n, _)| n).collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn head_only_block_updates_merge_bookkeeping() {
        let (store, stats) = build(
            ["play, v. i. dlala;", "played, ed.", "playeder, v. x;"],
            DEFAULT_LANG,
        );
        assert_eq!(stats.empty_heads, 1);
        // "playeder" derives from "played", whose block produced no entry, so the
        // senses land on the last entry actually created.
        assert_eq!(store.len(), 1);
        assert_eq!(translations(store.get(WordId(1)).unwrap()), vec!["dlala", "x"]);
    }

    #[test]
    fn head_only_block_breaks_merge_with_earlier_head() {
        let store = build_xh(&["play, v. i. dlala;", "played, ed.", "played, v. i. dlalwe;"]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(WordId(2)).unwrap().word_name, "played");
    }

    #[test]
    fn uppercase_derivative_is_new_entry() {
        let store = build_xh(&["play, v. i. dlala;", "Played, v. i. dlalwe;"]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn suffix_set_decides_merge() {
        let store = build_xh(&["play, v. i. dlala;", "players, n. abadlali;"]);
        assert_eq!(store.len(), 1);
        let store = build_xh(&["play, v. i. dlala;", "playful, a. -dlalayo;"]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn pos_times_items_cross_product() {
        let store = build_xh(&["Light, a. n. -khanyayo, ukukhanya, isibane;"]);
        let entry = store.get(WordId(1)).unwrap();
        assert_eq!(entry.senses().len(), 6);
        let syntax: Vec<&str> = entry.senses().iter().map(|s| s.syntax.as_str()).collect();
        assert_eq!(syntax, vec!["a", "n", "a", "n", "a", "n"]);
    }

    #[test]
    fn descriptions_and_inline_pos() {
        let store = build_xh(&["Bark, n. (of tree), ixolo; (of dog), v. i. khonkotha."]);
        let entry = store.get(WordId(1)).unwrap();
        assert_eq!(
            entry.senses(),
            &[
                Sense::new("n", "of tree", "xh", "ixolo"),
                Sense::new("v i", "of dog", "xh", "khonkotha"),
            ]
        );
    }

    #[test]
    fn wrapped_entry_is_one_block() {
        let store = build_xh(&["Abandon, v. t. lahla,", "shiya; yekela."]);
        let entry = store.get(WordId(1)).unwrap();
        assert_eq!(translations(entry), vec!["lahla", "shiya", "yekela"]);
    }

    #[test]
    fn ids_strictly_increase() {
        let store = build_xh(&[
            "Able, a. -nako;",
            "about, adv. malunga;",
            "above, prep. phezu;",
            "abovement, n. x;",
            "Absent, a. -ngekho;",
        ]);
        let ids: Vec<u32> = store.iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn unparsed_fragment_spares_its_siblings() {
        let (store, stats) = build(["play, v. dlala; , ,; hamba"], DEFAULT_LANG);
        assert_eq!(stats.unparsed_fragments, 1);
        assert_eq!(store.len(), 1);
        assert_eq!(translations(store.get(WordId(1)).unwrap()), vec!["dlala", "hamba"]);
    }

    #[test]
    fn block_without_header_is_skipped() {
        let (store, stats) = build_from_blocks(&["not a header", "play, v. dlala"], DEFAULT_LANG);
        assert_eq!(stats.blocks, 2);
        assert_eq!(stats.skipped_blocks, 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(WordId(1)).unwrap().word_name, "play");
    }

    #[test]
    fn custom_language_key() {
        let (store, _) = build(["play, v. dlala"], "zu");
        let entry = store.get(WordId(1)).unwrap();
        assert_eq!(entry.senses()[0].translation["zu"], "dlala");
    }

    #[test]
    fn derivative_check() {
        assert!(is_derivative_of("play", "played"));
        assert!(is_derivative_of("Govern", "government"));
        assert!(is_derivative_of("move", "movements"));
        assert!(!is_derivative_of("play", "play"));
        assert!(!is_derivative_of("play", "plays"));
        assert!(!is_derivative_of("play", "display"));
    }
}
