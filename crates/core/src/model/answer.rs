use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

/// Catalog items an answer key points at, by id and by lower-cased name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMatches {
    item_ids: BTreeSet<String>,
    item_names: BTreeSet<String>,
}

impl KeyMatches {
    /// Names are lower-cased here so later comparisons are case-insensitive.
    #[must_use]
    pub fn new<I, N>(item_ids: I, item_names: N) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        N: IntoIterator,
        N::Item: AsRef<str>,
    {
        Self {
            item_ids: item_ids
                .into_iter()
                .map(Into::into)
                .filter(|id: &String| !id.is_empty())
                .collect(),
            item_names: item_names
                .into_iter()
                .map(|name| name.as_ref().trim().to_lowercase())
                .filter(|name| !name.is_empty())
                .collect(),
        }
    }

    #[must_use]
    pub fn item_ids(&self) -> &BTreeSet<String> {
        &self.item_ids
    }

    #[must_use]
    pub fn item_names(&self) -> &BTreeSet<String> {
        &self.item_names
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.item_ids.is_empty() && self.item_names.is_empty()
    }
}

/// Answer key to recommended items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerKeyMap {
    entries: HashMap<String, KeyMatches>,
}

impl AnswerKeyMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the matches for `key`. Returns the replaced entry.
    pub fn insert(&mut self, key: impl Into<String>, matches: KeyMatches) -> Option<KeyMatches> {
        self.entries.insert(key.into(), matches)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&KeyMatches> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
