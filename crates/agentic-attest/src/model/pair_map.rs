//! Composite-key map `(outer, inner) -> value`.
//!
//! Stored records use a two-level JSON object (`{ outer: { inner: value } }`).
//! In memory the two levels are flattened into one ordered map so there is
//! no second-level map to initialise before inserting. A `null` at either
//! level decodes as empty, and an outer key with no entries is never
//! written back.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordered map keyed by `(outer, inner)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairMap<K: Ord, V> {
    entries: BTreeMap<(K, String), V>,
}

impl<K: Ord + Clone, V> PairMap<K, V> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or overwrite `(outer, inner)`. Returns the previous value.
    pub fn insert(&mut self, outer: K, inner: impl Into<String>, value: V) -> Option<V> {
        self.entries.insert((outer, inner.into()), value)
    }

    pub fn get(&self, outer: &K, inner: &str) -> Option<&V> {
        // BTreeMap<(K, String), _> cannot be queried with a borrowed tuple.
        self.entries.get(&(outer.clone(), inner.to_string()))
    }

    pub fn contains(&self, outer: &K, inner: &str) -> bool {
        self.get(outer, inner).is_some()
    }

    /// Remove `(outer, inner)` if present. Returns the removed value.
    pub fn remove(&mut self, outer: &K, inner: &str) -> Option<V> {
        self.entries.remove(&(outer.clone(), inner.to_string()))
    }

    /// Two-level view, as it appears on the wire.
    pub fn nested(&self) -> BTreeMap<&K, BTreeMap<&str, &V>> {
        let mut out: BTreeMap<&K, BTreeMap<&str, &V>> = BTreeMap::new();
        for ((outer, inner), value) in &self.entries {
            out.entry(outer).or_default().insert(inner.as_str(), value);
        }
        out
    }
}

impl<K: Ord + Clone, V> Default for PairMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Serialize for PairMap<K, V>
where
    K: Ord + Clone + Serialize,
    V: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.nested().serialize(serializer)
    }
}

impl<'de, K, V> Deserialize<'de> for PairMap<K, V>
where
    K: Ord + Clone + DeserializeOwned,
    V: DeserializeOwned,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let nested: Option<BTreeMap<K, Option<BTreeMap<String, V>>>> =
            Option::deserialize(deserializer)?;

        let mut map = PairMap::new();
        for (outer, group) in nested.unwrap_or_default() {
            for (inner, value) in group.unwrap_or_default() {
                map.insert(outer.clone(), inner, value);
            }
        }
        Ok(map)
    }
}
