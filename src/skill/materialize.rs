//! Intent materializer
//!
//! Turns the accumulated (utterance -> answers) and (entity -> values)
//! pairs into the declaration files the host matcher consumes, then
//! re-registers each intent: remove the previous binding by name, add
//! the new one. Assumes the host's single-threaded dispatch; a pass
//! racing a live fallback event is not defended against.

use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::host::IntentEngine;
use crate::store::Settings;

/// Summary of one materialization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    /// Intents written and registered
    pub intents: usize,
    /// Entities written and registered
    pub entities: usize,
    /// Utterances skipped for having no answers yet
    pub skipped: usize,
}

/// Writes declaration files under vocab/<lang>/ and dialog/<lang>/.
pub struct IntentMaterializer {
    vocab_dir: PathBuf,
    dialog_dir: PathBuf,
}

impl IntentMaterializer {
    /// Materializer rooted at the skill data directory.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            vocab_dir: data_dir.join("vocab"),
            dialog_dir: data_dir.join("dialog"),
        }
    }

    /// Emit files for one language and register them with the engine.
    ///
    /// Entities go first so intent patterns with placeholders resolve
    /// against an already-registered value set.
    pub fn run(
        &self,
        settings: &Settings,
        lang: &str,
        engine: &mut dyn IntentEngine,
    ) -> Result<MaterializeReport> {
        let vocab = self.vocab_dir.join(lang);
        let dialog = self.dialog_dir.join(lang);
        fs::create_dir_all(&vocab)
            .with_context(|| format!("Failed to create {}", vocab.display()))?;
        fs::create_dir_all(&dialog)
            .with_context(|| format!("Failed to create {}", dialog.display()))?;

        let mut report = MaterializeReport::default();

        for (entity, values) in settings.entities.entities(lang) {
            if values.is_empty() {
                continue;
            }
            let path = vocab.join(format!("{}.entity", file_stem(entity)));
            append_unseen(&path, values)?;
            engine.register_entity_file(entity, &path)?;
            report.entities += 1;
        }

        for (utterance, answers) in settings.db.answered(lang) {
            let stem = file_stem(utterance);

            let intent_path = vocab.join(format!("{}.intent", stem));
            append_unseen(&intent_path, &[utterance.to_string()])?;

            let dialog_path = dialog.join(format!("{}.dialog", stem));
            append_unseen(&dialog_path, answers)?;

            engine.remove_intent(utterance);
            engine.register_intent_file(utterance, &intent_path)?;
            debug!("Materialized intent ({}): {}", lang, utterance);
            report.intents += 1;
        }

        report.skipped = settings.db.unanswered(lang).len();

        info!(
            "Materialized {} intents and {} entities for {} ({} still unanswered)",
            report.intents, report.entities, lang, report.skipped
        );
        Ok(report)
    }
}

/// File stem for an utterance or entity name: the text itself with
/// path-hostile characters stripped, so declaration files carry the
/// phrase they define.
pub fn file_stem(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '/' | '\\' | '\0'))
        .collect()
}

/// Create the file with the given lines, or append only the lines not
/// already present.
fn append_unseen(path: &Path, lines: &[String]) -> Result<usize> {
    let existing: BTreeSet<String> = if path.exists() {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect()
    } else {
        BTreeSet::new()
    };

    let fresh: Vec<&String> = lines
        .iter()
        .filter(|line| !existing.contains(line.trim()))
        .collect();
    if fresh.is_empty() {
        return Ok(0);
    }

    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    for line in &fresh {
        writeln!(file, "{}", line)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(fresh.len())
}
