//! The slang/normalisation map, data-owned rather than hard-coded.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Token-level substitution table: `{ "slang": "canonical", ... }`.
///
/// Loaded once at startup from a JSON file. Lookups
/// are case-sensitive on already-lowercased tokens, since `normalise` always
/// lowercases before consulting the map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlangMap {
    entries: HashMap<String, String>,
}

impl SlangMap {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the canonical form for `token`, if it has one.
    pub fn canonical_for(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(String::as_str)
    }
}

impl FromIterator<(String, String)> for SlangMap {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
