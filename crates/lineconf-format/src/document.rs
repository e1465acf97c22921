//! In-memory key/value document

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::Result;
use crate::parser;
use crate::value::Value;
use crate::writer::{self, MergeReport};

/// Mapping from key to value produced by one parse pass.
///
/// Keys are kept sorted so iteration and rendering are deterministic;
/// lookups never depend on position in the source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Document {
    entries: BTreeMap<String, Value>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a complete source text
    pub fn parse(source: &str) -> Result<Self> {
        parser::parse_str(source)
    }

    /// Get the raw value stored for a key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Insert or replace an entry, returning the previous value.
    ///
    /// The key is trimmed the same way the parser trims keys.
    pub fn insert(&mut self, key: impl AsRef<str>, value: impl Into<Value>) -> Option<Value> {
        self.entries
            .insert(key.as_ref().trim().to_string(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Merge this document into existing file lines.
    ///
    /// See [`writer::merge`].
    pub fn merge_into<S: AsRef<str>>(&self, existing: &[S]) -> Result<(Vec<String>, MergeReport)> {
        writer::merge(existing, self)
    }

    /// Render the whole document as fresh lines.
    pub fn render(&self) -> Result<Vec<String>> {
        writer::render(self)
    }
}

impl<K: AsRef<str>, V: Into<Value>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut doc = Self::new();
        for (key, value) in iter {
            doc.insert(key, value);
        }
        doc
    }
}

impl<K: AsRef<str>, V: Into<Value>> Extend<(K, V)> for Document {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl IntoIterator for Document {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
