//! Local stand-ins for the host matcher and speech output
//!
//! `LocalEngine` compares utterances token-by-token against registered
//! phrase files; a `{name}` token matches any single token that is a
//! registered value of that entity. It is not a natural-language
//! matcher and makes no parsing claims beyond that. `StdoutSpeaker`
//! renders a dialog by printing one of its lines.

use anyhow::{Context, Result};
use rand::seq::IndexedRandom;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::{IntentEngine, Speaker};
use crate::nlp;
use crate::skill::materialize::file_stem;

/// Token matcher over registered phrase files.
#[derive(Debug, Default)]
pub struct LocalEngine {
    /// intent name -> phrase patterns (stored as written, already normalized)
    intents: HashMap<String, Vec<String>>,
    /// entity name -> known values
    entities: HashMap<String, Vec<String>>,
}

impl LocalEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match an utterance against registered patterns, returning the
    /// intent name of the first pattern that fits.
    pub fn match_utterance(&self, utterance: &str) -> Option<&str> {
        let normalized = nlp::normalize(utterance);
        let tokens: Vec<&str> = normalized.split_whitespace().collect();
        if tokens.is_empty() {
            return None;
        }

        for (name, patterns) in &self.intents {
            if patterns.iter().any(|p| self.pattern_matches(p, &tokens)) {
                return Some(name);
            }
        }
        None
    }

    /// Number of registered intents.
    pub fn intent_count(&self) -> usize {
        self.intents.len()
    }

    /// Number of registered entities.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    fn pattern_matches(&self, pattern: &str, tokens: &[&str]) -> bool {
        let pattern: Vec<&str> = pattern.split_whitespace().collect();
        if pattern.len() != tokens.len() {
            return false;
        }

        pattern.iter().zip(tokens).all(|(part, token)| {
            match part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
                Some(entity) => self
                    .entities
                    .get(entity)
                    .map(|values| values.iter().any(|v| v == token))
                    .unwrap_or(false),
                None => part == token,
            }
        })
    }
}

impl IntentEngine for LocalEngine {
    fn register_intent_file(&mut self, name: &str, path: &Path) -> Result<()> {
        let patterns = read_lines(path)
            .with_context(|| format!("Failed to read intent file {}", path.display()))?;
        info!("Registered intent '{}' ({} patterns)", name, patterns.len());
        self.intents.insert(name.to_string(), patterns);
        Ok(())
    }

    fn register_entity_file(&mut self, name: &str, path: &Path) -> Result<()> {
        let values = read_lines(path)
            .with_context(|| format!("Failed to read entity file {}", path.display()))?;
        info!("Registered entity '{}' ({} values)", name, values.len());
        self.entities.insert(name.to_string(), values);
        Ok(())
    }

    fn remove_intent(&mut self, name: &str) {
        if self.intents.remove(name).is_some() {
            debug!("Removed intent '{}'", name);
        }
    }
}

/// Non-empty trimmed lines of a declaration file.
fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

/// Speaks by printing a line picked at random from the dialog file.
pub struct StdoutSpeaker {
    dialog_dir: PathBuf,
}

impl StdoutSpeaker {
    /// Speaker rooted at the skill's dialog/ directory.
    pub fn new(dialog_dir: PathBuf) -> Self {
        Self { dialog_dir }
    }
}

impl Speaker for StdoutSpeaker {
    fn speak_dialog(&mut self, name: &str, lang: &str) -> Result<()> {
        let path = self
            .dialog_dir
            .join(lang)
            .join(format!("{}.dialog", file_stem(name)));
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read dialog file {}", path.display()))?;

        let lines: Vec<&str> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let mut rng = rand::rng();
        match lines.choose(&mut rng) {
            Some(line) => {
                println!("{}", line);
                Ok(())
            }
            None => anyhow::bail!("Dialog file {} is empty", path.display()),
        }
    }
}
