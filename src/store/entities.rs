//! Entity store
//!
//! Per-language mapping from entity name to known values:
//! `{lang: {entity: [value, ...]}}`. An entity's name doubles as its
//! trigger word for the substitution pass.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Entities and their enumerated values, keyed by language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityStore {
    #[serde(flatten)]
    langs: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl EntityStore {
    /// Declare an entity so its name acts as a trigger word.
    /// Returns true if the entity was unseen for the language.
    pub fn declare(&mut self, lang: &str, entity: &str) -> bool {
        let entries = self.langs.entry(lang.to_string()).or_default();
        if entries.contains_key(entity) {
            return false;
        }
        entries.insert(entity.to_string(), Vec::new());
        debug!("Declared entity ({}): {}", lang, entity);
        true
    }

    /// Record a value for an entity, declaring the entity if needed.
    /// Returns true unless the value was already known.
    pub fn add_value(&mut self, lang: &str, entity: &str, value: &str) -> bool {
        let values = self
            .langs
            .entry(lang.to_string())
            .or_default()
            .entry(entity.to_string())
            .or_default();
        if values.iter().any(|v| v == value) {
            return false;
        }
        values.push(value.to_string());
        true
    }

    /// Known values of an entity.
    pub fn values(&self, lang: &str, entity: &str) -> Option<&[String]> {
        self.langs.get(lang)?.get(entity).map(Vec::as_slice)
    }

    /// Whether the token is a declared entity trigger word for the language.
    pub fn is_trigger(&self, lang: &str, token: &str) -> bool {
        self.langs
            .get(lang)
            .map(|entries| entries.contains_key(token))
            .unwrap_or(false)
    }

    /// All entities of a language, including ones with no values yet.
    pub fn entities(&self, lang: &str) -> Vec<(&str, &[String])> {
        self.langs
            .get(lang)
            .map(|entries| {
                entries
                    .iter()
                    .map(|(entity, values)| (entity.as_str(), values.as_slice()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Append-unseen union with another store.
    pub fn merge(&mut self, other: &EntityStore) {
        for (lang, entries) in &other.langs {
            for (entity, values) in entries {
                self.declare(lang, entity);
                for value in values {
                    self.add_value(lang, entity, value);
                }
            }
        }
    }

    /// Total entities across languages.
    pub fn len(&self) -> usize {
        self.langs.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_then_trigger() {
        let mut store = EntityStore::default();
        assert!(store.declare("en-us", "city"));
        assert!(!store.declare("en-us", "city"));
        assert!(store.is_trigger("en-us", "city"));
        assert!(!store.is_trigger("en-us", "town"));
        assert!(!store.is_trigger("pt-pt", "city"));
    }

    #[test]
    fn test_add_value_deduplicates_and_declares() {
        let mut store = EntityStore::default();
        assert!(store.add_value("en-us", "city", "london"));
        assert!(!store.add_value("en-us", "city", "london"));
        assert!(store.is_trigger("en-us", "city"));
        assert_eq!(
            store.values("en-us", "city"),
            Some(&["london".to_string()][..])
        );
    }

    #[test]
    fn test_entities_includes_empty() {
        let mut store = EntityStore::default();
        store.declare("en-us", "city");
        store.add_value("en-us", "person", "george");

        let entities = store.entities("en-us");
        assert_eq!(entities.len(), 2);
    }

    #[test]
    fn test_merge_is_idempotent_union() {
        let mut a = EntityStore::default();
        a.add_value("en-us", "city", "london");

        let mut b = EntityStore::default();
        b.add_value("en-us", "city", "london");
        b.add_value("en-us", "city", "paris");

        a.merge(&b);
        a.merge(&b);

        assert_eq!(a.values("en-us", "city").unwrap().len(), 2);
    }
}
