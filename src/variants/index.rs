//! Lookup views derived from an entry store. Rebuilt on every run and never persisted.

use std::collections::{BTreeSet, HashMap};

use crate::dictionary::EntryStore;

use super::tokenize::normalize_key;

/// Normalized headword or phrase to every translation recorded under it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupIndex {
    entries: HashMap<String, BTreeSet<String>>,
    max_phrase_len: usize,
}

impl LookupIndex {
    /// Collects the `lang` translation of every sense, keyed by its entry's headword.
    pub fn from_store(store: &EntryStore, lang: &str) -> Self {
        let mut entries: HashMap<String, BTreeSet<String>> = HashMap::new();
        for (head, translation) in pairs(store, lang) {
            entries.entry(head).or_default().insert(translation.to_string());
        }
        let max_phrase_len = entries
            .keys()
            .map(|k| k.split(' ').count())
            .max()
            .unwrap_or(1);
        Self {
            entries,
            max_phrase_len,
        }
    }

    /// Translations in sorted order.
    pub fn get(&self, key: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(key)
    }

    /// Longest key, in words.
    pub fn max_phrase_len(&self) -> usize {
        self.max_phrase_len
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Translation text to the normalized headwords that produce it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReverseIndex {
    entries: HashMap<String, BTreeSet<String>>,
}

impl ReverseIndex {
    pub fn from_store(store: &EntryStore, lang: &str) -> Self {
        let mut entries: HashMap<String, BTreeSet<String>> = HashMap::new();
        for (head, translation) in pairs(store, lang) {
            entries
                .entry(translation.to_string())
                .or_default()
                .insert(head);
        }
        Self { entries }
    }

    pub fn get(&self, translation: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(translation)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// (normalized headword, translation) for every sense with a usable translation.
fn pairs<'a>(store: &'a EntryStore, lang: &'a str) -> impl Iterator<Item = (String, &'a str)> {
    store.iter().flat_map(move |entry| {
        let head = normalize_key(&entry.word_name);
        let keep = !head.is_empty();
        entry
            .senses()
            .iter()
            .filter_map(move |sense| sense.translation.get(lang))
            .filter(move |t| keep && !t.is_empty())
            .map(move |t| (head.clone(), t.as_str()))
    })
}
