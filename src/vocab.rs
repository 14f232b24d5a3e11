//! Vocabulary types and their wire format
//!
//! The word service and the local cache both speak the same shape: a JSON
//! array of single-key objects, `[{"benevolent": ["kind", "generous"]}, ...]`.

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::error::{Error, Result};

/// A word together with its synonyms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    pub word: String,
    pub synonyms: Vec<String>,
}

impl WordEntry {
    /// Build an entry, rejecting an empty word or an empty synonym list.
    pub fn new(word: impl Into<String>, synonyms: Vec<String>) -> Result<Self> {
        let word = word.into();
        if word.trim().is_empty() {
            return Err(Error::Validation("Word must not be empty".to_string()));
        }
        if synonyms.is_empty() {
            return Err(Error::Validation(format!("'{}' has no synonyms", word)));
        }
        Ok(Self { word, synonyms })
    }

    pub fn has_synonym(&self, candidate: &str) -> bool {
        self.synonyms.iter().any(|s| s == candidate)
    }
}

impl fmt::Display for WordEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.word, self.synonyms.join(", "))
    }
}

impl Serialize for WordEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.word, &self.synonyms)?;
        map.end()
    }
}

struct WordEntryVisitor;

impl<'de> Visitor<'de> for WordEntryVisitor {
    type Value = WordEntry;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a single-key object mapping a word to its synonyms")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<WordEntry, A::Error> {
        let (word, synonyms): (String, Vec<String>) = access
            .next_entry()?
            .ok_or_else(|| de::Error::custom("empty word object"))?;
        if access.next_key::<String>()?.is_some() {
            return Err(de::Error::custom("word object must have exactly one key"));
        }
        WordEntry::new(word, synonyms).map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for WordEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(WordEntryVisitor)
    }
}

/// Ordered list of entries as delivered by the backend.
///
/// Duplicate words are tolerated; lookups resolve to the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VocabularySet {
    entries: Vec<WordEntry>,
}

impl VocabularySet {
    pub fn new(entries: Vec<WordEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WordEntry> {
        self.entries.iter()
    }

    /// Indices of the first occurrence of every distinct word
    pub fn distinct_indices(&self) -> Vec<usize> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| seen.insert(e.word.as_str()))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn distinct_len(&self) -> usize {
        self.distinct_indices().len()
    }

    pub fn find_word(&self, word: &str) -> Option<&WordEntry> {
        self.entries.iter().find(|e| e.word == word)
    }

    /// Synonyms shown in the incorrect-answer summary.
    ///
    /// Resolves the entry whose word is `headword`, falling back to the
    /// first entry that lists `synonym`.
    pub fn synonyms_for(&self, headword: &str, synonym: &str) -> Vec<String> {
        self.find_word(headword)
            .or_else(|| self.entries.iter().find(|e| e.has_synonym(synonym)))
            .map(|e| e.synonyms.clone())
            .unwrap_or_default()
    }

    /// Append entries whose word is not present yet
    pub fn merge(&mut self, other: VocabularySet) {
        for entry in other.entries {
            if self.find_word(&entry.word).is_none() {
                self.entries.push(entry);
            }
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<BTreeMap<String, Vec<String>>> for VocabularySet {
    fn from(map: BTreeMap<String, Vec<String>>) -> Self {
        Self::new(
            map.into_iter()
                .filter(|(word, synonyms)| !word.trim().is_empty() && !synonyms.is_empty())
                .map(|(word, synonyms)| WordEntry { word, synonyms })
                .collect(),
        )
    }
}

impl FromIterator<WordEntry> for VocabularySet {
    fn from_iter<I: IntoIterator<Item = WordEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a VocabularySet {
    type Item = &'a WordEntry;
    type IntoIter = std::slice::Iter<'a, WordEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
