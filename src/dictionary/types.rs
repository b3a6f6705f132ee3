use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const WORD_PREFIX: &str = "word_";
const SENSE_PREFIX: &str = "sense_";

/// Synthetic key of an entry. Headwords are not unique (homographs,
/// cross-reference entries), so the store is keyed by this instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WordId(pub u32);

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{WORD_PREFIX}{}", self.0)
    }
}

impl WordId {
    fn parse(key: &str) -> Option<Self> {
        canonical_number(key.strip_prefix(WORD_PREFIX)?).map(WordId)
    }
}

/// Decimal digits with no sign or leading zeros, so each number has one spelling.
fn canonical_number<T: FromStr + ToString>(text: &str) -> Option<T> {
    let n: T = text.parse().ok()?;
    (n.to_string() == text).then_some(n)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sense {
    pub syntax: String,
    pub description: String,
    /// Language code (e.g. `xh`) to translation.
    pub translation: BTreeMap<String, String>,
}

impl Sense {
    pub fn new(syntax: &str, description: &str, lang: &str, translation: &str) -> Self {
        Self {
            syntax: syntax.to_string(),
            description: description.to_string(),
            translation: BTreeMap::from([(lang.to_string(), translation.to_string())]),
        }
    }
}

/// One headword occurrence. `senses[i]` is persisted as `sense_{i + 1}`, so
/// sense numbers stay contiguous as long as senses are only ever appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: WordId,
    pub word_name: String,
    senses: Vec<Sense>,
}

impl Entry {
    pub fn new(id: WordId, word_name: &str, senses: Vec<Sense>) -> Self {
        Self {
            id,
            word_name: word_name.to_string(),
            senses,
        }
    }

    pub fn senses(&self) -> &[Sense] {
        &self.senses
    }

    /// 1-based sense number paired with each sense.
    pub fn numbered_senses(&self) -> impl Iterator<Item = (usize, &Sense)> {
        self.senses.iter().enumerate().map(|(i, s)| (i + 1, s))
    }

    pub fn append_senses(&mut self, senses: impl IntoIterator<Item = Sense>) {
        self.senses.extend(senses);
    }
}

/// Arena of entries in id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryStore {
    entries: Vec<Entry>,
}

impl EntryStore {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn sense_count(&self) -> usize {
        self.entries.iter().map(|e| e.senses.len()).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    #[cfg(test)]
    pub fn get(&self, id: WordId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Pushes an entry and returns its arena position.
    pub(crate) fn push(&mut self, entry: Entry) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    pub(crate) fn at_mut(&mut self, pos: usize) -> Option<&mut Entry> {
        self.entries.get_mut(pos)
    }
}

impl<'a> IntoIterator for &'a EntryStore {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

struct EntryBody<'a>(&'a Entry);

impl Serialize for EntryBody<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.senses.len() + 1))?;
        map.serialize_entry("word_name", &self.0.word_name)?;
        for (n, sense) in self.0.numbered_senses() {
            map.serialize_entry(&format!("{SENSE_PREFIX}{n}"), sense)?;
        }
        map.end()
    }
}

impl Serialize for EntryStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.id.to_string(), &EntryBody(entry))?;
        }
        map.end()
    }
}

#[derive(Deserialize)]
struct RawEntry {
    word_name: String,
    #[serde(flatten)]
    senses: BTreeMap<String, Sense>,
}

impl RawEntry {
    fn into_entry<E: de::Error>(self, id: WordId) -> Result<Entry, E> {
        let mut numbered = BTreeMap::new();
        for (key, sense) in self.senses {
            let n: usize = key
                .strip_prefix(SENSE_PREFIX)
                .and_then(canonical_number)
                .ok_or_else(|| E::custom(format!("{id}: unexpected key '{key}'")))?;
            numbered.insert(n, sense);
        }
        if numbered.keys().copied().ne(1..=numbered.len()) {
            return Err(E::custom(format!(
                "{id}: sense numbers must run 1..={} without gaps",
                numbered.len()
            )));
        }
        Ok(Entry::new(id, &self.word_name, numbered.into_values().collect()))
    }
}

struct StoreVisitor;

impl<'de> Visitor<'de> for StoreVisitor {
    type Value = EntryStore;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of word ids to entries")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut store = EntryStore::default();
        let mut seen = HashSet::new();
        while let Some((key, raw)) = access.next_entry::<String, RawEntry>()? {
            let id = WordId::parse(&key)
                .ok_or_else(|| de::Error::custom(format!("invalid word id '{key}'")))?;
            if !seen.insert(id) {
                return Err(de::Error::custom(format!("duplicate word id '{key}'")));
            }
            store.push(raw.into_entry(id)?);
        }
        Ok(store)
    }
}

impl<'de> Deserialize<'de> for EntryStore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(StoreVisitor)
    }
}
