//! # Migration Descriptor
//!
//! The typed, read-only form of one migration file:
//!
//! ```yaml
//! operation: create
//! notes: "orders topic"
//! partitions: 3
//! replicationFactor: 2
//! config:
//!   compression.type: snappy
//!   retention.ms: 604800000
//! ```
//!
//! Only `operation` is required. Its value is not checked against a list of
//! known operations, and `partitions`/`replicationFactor` are not range
//! checked; the planner owns those decisions. Unknown top-level keys are
//! ignored.
//!
//! A descriptor exposes accessors only. Once loaded it cannot be modified.

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use serde::{Serialize, Serializer};
use yaml_rust2::Yaml;

use crate::value::{self, TypedValue};

/// A loaded migration.
#[derive(Debug, Clone, PartialEq, Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationDescriptor {
    operation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    partitions: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    replication_factor: Option<i32>,
    #[serde(default, skip_serializing_if = "TopicConfig::is_empty")]
    config: TopicConfig,
}

impl MigrationDescriptor {
    /// The requested change, e.g. `create`.
    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Requested partition count; `None` leaves it unspecified.
    pub fn partitions(&self) -> Option<i32> {
        self.partitions
    }

    /// Requested replication factor; `None` leaves it unspecified.
    pub fn replication_factor(&self) -> Option<i32> {
        self.replication_factor
    }

    pub fn config(&self) -> &TopicConfig {
        &self.config
    }

    /// Re-type the `config` strings that `document` wrote as unquoted
    /// integers.
    pub(crate) fn promote_plain_integers(&mut self, document: &Yaml) {
        let Some(config) = document["config"].as_hash() else {
            return;
        };
        for (key, node) in config.iter() {
            if let Some(value) = key.as_str().and_then(|k| self.config.entries.get_mut(k)) {
                value::promote_plain_integer(value, node);
            }
        }
    }
}

/// Topic configuration entries in the order they were written.
///
/// Keys are unique; a document repeating a key fails to deserialize.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopicConfig {
    entries: IndexMap<String, TypedValue>,
}

impl TopicConfig {
    pub fn get(&self, key: &str) -> Option<&TypedValue> {
        self.entries.get(key)
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

    /// Entries in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypedValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<'a> IntoIterator for &'a TopicConfig {
    type Item = (&'a String, &'a TypedValue);
    type IntoIter = indexmap::map::Iter<'a, String, TypedValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for TopicConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter())
    }
}

struct TopicConfigVisitor;

impl<'de> Visitor<'de> for TopicConfigVisitor {
    type Value = TopicConfig;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping of topic configuration keys to scalars")
    }

    // `config:` with no entries.
    fn visit_unit<E: de::Error>(self) -> Result<TopicConfig, E> {
        Ok(TopicConfig::default())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<TopicConfig, A::Error> {
        let mut entries = IndexMap::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(key) = map.next_key::<String>()? {
            if entries.contains_key(&key) {
                return Err(de::Error::custom(format_args!(
                    "duplicate config key `{key}`"
                )));
            }
            let value = map.next_value::<TypedValue>()?;
            entries.insert(key, value);
        }
        Ok(TopicConfig { entries })
    }
}

impl<'de> Deserialize<'de> for TopicConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TopicConfigVisitor)
    }
}
