//! Build-time definitions handed to the compilation step.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::core::value::Value;
use crate::resolver::errors::ResolveError;

/// Which layer a definition comes from.
///
/// A platform definition may replace a generic one with the same key.
/// Anything else that writes the same key twice is a rule table defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Precedence {
    Generic,
    Platform,
}

/// A single definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefinitionEntry {
    pub key: String,
    pub value: Value,
}

/// Unique-keyed definition mapping, iterated in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefinitionSet {
    entries: BTreeMap<String, (Value, Precedence)>,
}

impl DefinitionSet {
    pub fn new() -> Self {
        DefinitionSet::default()
    }

    /// Insert a definition.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
        precedence: Precedence,
    ) -> Result<(), ResolveError> {
        let key = key.into();
        let value = value.into();

        if let Some((existing, existing_precedence)) = self.entries.get(&key) {
            if *existing_precedence >= precedence {
                return Err(ResolveError::DuplicateDefinition {
                    key,
                    existing: existing.to_string(),
                    value: value.to_string(),
                });
            }
            tracing::debug!("`{}` overridden: {} -> {}", key, existing, value);
        }

        self.entries.insert(key, (value, precedence));
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key).map(|(value, _)| value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, (v, _))| (k.as_str(), v))
    }

    /// Definitions as a list of key/value records, in key order.
    pub fn entries(&self) -> Vec<DefinitionEntry> {
        self.iter()
            .map(|(key, value)| DefinitionEntry {
                key: key.to_string(),
                value: value.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for DefinitionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
