//! Utterance store
//!
//! Per-language mapping from unmatched utterance text to candidate
//! answers: `{lang: {utterance: [answer, ...]}}`. All merge operations
//! append only previously-unseen entries, so replaying the same events
//! leaves the store unchanged.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Utterances captured by the fallback, keyed by language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtteranceStore {
    #[serde(flatten)]
    langs: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl UtteranceStore {
    /// Record an unmatched utterance with no answers yet.
    /// Returns true if it was unseen for the language.
    pub fn record(&mut self, lang: &str, utterance: &str) -> bool {
        let entries = self.langs.entry(lang.to_string()).or_default();
        if entries.contains_key(utterance) {
            return false;
        }
        entries.insert(utterance.to_string(), Vec::new());
        debug!("Recorded utterance ({}): {}", lang, utterance);
        true
    }

    /// Attach an answer, creating the utterance entry if needed.
    /// Returns true unless the answer was already present.
    pub fn add_answer(&mut self, lang: &str, utterance: &str, answer: &str) -> bool {
        let answers = self
            .langs
            .entry(lang.to_string())
            .or_default()
            .entry(utterance.to_string())
            .or_default();
        if answers.iter().any(|a| a == answer) {
            return false;
        }
        answers.push(answer.to_string());
        true
    }

    /// Answers taught for an utterance, if it is known at all.
    pub fn answers(&self, lang: &str, utterance: &str) -> Option<&[String]> {
        self.langs.get(lang)?.get(utterance).map(Vec::as_slice)
    }

    /// Whether the utterance has been recorded for the language.
    pub fn contains(&self, lang: &str, utterance: &str) -> bool {
        self.langs
            .get(lang)
            .map(|entries| entries.contains_key(utterance))
            .unwrap_or(false)
    }

    /// Utterances with at least one answer, ready to become intents.
    pub fn answered(&self, lang: &str) -> Vec<(&str, &[String])> {
        self.langs
            .get(lang)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|(_, answers)| !answers.is_empty())
                    .map(|(utterance, answers)| (utterance.as_str(), answers.as_slice()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Utterances still waiting for an answer.
    pub fn unanswered(&self, lang: &str) -> Vec<&str> {
        self.langs
            .get(lang)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|(_, answers)| answers.is_empty())
                    .map(|(utterance, _)| utterance.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Languages with any recorded utterance.
    pub fn langs(&self) -> impl Iterator<Item = &str> {
        self.langs.keys().map(String::as_str)
    }

    /// Make sure a language bucket exists; fresh installs seed the default.
    pub fn ensure_lang(&mut self, lang: &str) {
        self.langs.entry(lang.to_string()).or_default();
    }

    /// Append-unseen union with another store.
    pub fn merge(&mut self, other: &UtteranceStore) {
        for (lang, entries) in &other.langs {
            for (utterance, answers) in entries {
                self.record(lang, utterance);
                for answer in answers {
                    self.add_answer(lang, utterance, answer);
                }
            }
        }
    }

    /// Total utterances across languages.
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
    fn test_record_is_idempotent() {
        let mut store = UtteranceStore::default();
        assert!(store.record("en-us", "what is love"));
        assert!(!store.record("en-us", "what is love"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_record_keeps_existing_answers() {
        let mut store = UtteranceStore::default();
        store.add_answer("en-us", "what is love", "a feeling");
        assert!(!store.record("en-us", "what is love"));
        assert_eq!(
            store.answers("en-us", "what is love"),
            Some(&["a feeling".to_string()][..])
        );
    }

    #[test]
    fn test_add_answer_deduplicates() {
        let mut store = UtteranceStore::default();
        assert!(store.add_answer("en-us", "what is love", "a feeling"));
        assert!(!store.add_answer("en-us", "what is love", "a feeling"));
        assert!(store.add_answer("en-us", "what is love", "a song"));
        assert_eq!(store.answers("en-us", "what is love").unwrap().len(), 2);
    }

    #[test]
    fn test_answered_unanswered_partition() {
        let mut store = UtteranceStore::default();
        store.record("en-us", "what is life");
        store.add_answer("en-us", "what is love", "a feeling");

        assert_eq!(store.unanswered("en-us"), vec!["what is life"]);
        let answered = store.answered("en-us");
        assert_eq!(answered.len(), 1);
        assert_eq!(answered[0].0, "what is love");
    }

    #[test]
    fn test_languages_are_isolated() {
        let mut store = UtteranceStore::default();
        store.record("en-us", "what is love");
        assert!(!store.contains("pt-pt", "what is love"));
        assert!(store.unanswered("pt-pt").is_empty());
    }

    #[test]
    fn test_merge_is_idempotent_union() {
        let mut a = UtteranceStore::default();
        a.add_answer("en-us", "what is love", "a feeling");

        let mut b = UtteranceStore::default();
        b.add_answer("en-us", "what is love", "a feeling");
        b.add_answer("en-us", "what is love", "a song");
        b.record("pt-pt", "que horas sao");

        a.merge(&b);
        a.merge(&b);

        assert_eq!(a.answers("en-us", "what is love").unwrap().len(), 2);
        assert!(a.contains("pt-pt", "que horas sao"));
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn test_json_shape() {
        let mut store = UtteranceStore::default();
        store.add_answer("en-us", "what is love", "a feeling");

        let json = serde_json::to_value(&store).unwrap();
        assert_eq!(json["en-us"]["what is love"][0], "a feeling");
    }
}
