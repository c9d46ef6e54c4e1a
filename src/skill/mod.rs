//! The learn-unknown skill
//!
//! Wires the stores, the substitution pass, and the materializer behind
//! the host seams: the fallback handler records what the assistant
//! could not answer, teach statements attach answers, and a
//! materialization pass turns the accumulated pairs into the
//! intent/entity/dialog files the matcher loads.

pub mod fallback;
pub mod materialize;
pub mod teach;

pub use materialize::{IntentMaterializer, MaterializeReport};
pub use teach::parse_teach;

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::Config;
use crate::host::{IntentEngine, Speaker};
use crate::nlp;
use crate::store::{Settings, SettingsStore};
use crate::types::Message;

/// The skill: persisted stores plus the glue registered with the host.
pub struct LearnSkill {
    pub(crate) config: Config,
    pub(crate) settings: Settings,
    settings_store: SettingsStore,
    data_dir: PathBuf,
}

impl LearnSkill {
    /// Open the skill at the configured data directory.
    pub fn open(config: Config) -> Result<Self> {
        let data_dir = config.resolve_data_dir()?;
        Self::open_at(config, data_dir)
    }

    /// Open the skill with an explicit data directory.
    pub fn open_at(config: Config, data_dir: PathBuf) -> Result<Self> {
        let settings_store = SettingsStore::at(data_dir.join("settings.json"));
        let mut settings = settings_store.load()?;
        settings.db.ensure_lang(&config.skill.lang);

        Ok(Self {
            config,
            settings,
            settings_store,
            data_dir,
        })
    }

    /// Register everything already learned, like a skill does on load.
    pub fn initialize(&mut self, engine: &mut dyn IntentEngine) -> Result<MaterializeReport> {
        let report = self.materialize(engine)?;
        info!(
            "Initialized with {} learned intents and {} entities",
            report.intents, report.entities
        );
        Ok(report)
    }

    /// Fallback entry point: record the utterance and decline it.
    /// Always returns false so lower-priority fallbacks still run.
    pub fn handle_fallback(&mut self, message: &Message) -> Result<bool> {
        fallback::handle(self, message)
    }

    /// Handler bound to every learned intent: speak its dialog.
    pub fn handle_learned(
        &self,
        name: &str,
        lang: Option<&str>,
        speaker: &mut dyn Speaker,
    ) -> Result<()> {
        let lang = self.lang_or(lang);
        speaker.speak_dialog(name, lang)
    }

    /// Attach an answer to an utterance and persist.
    ///
    /// The utterance is normalized and entity-substituted first, so the
    /// key lines up with what the fallback recorded.
    pub fn teach_answer(
        &mut self,
        utterance: &str,
        answer: &str,
        lang: Option<&str>,
    ) -> Result<bool> {
        let lang = self.lang_or(lang).to_string();
        let answer = answer.trim();
        let normalized = nlp::normalize(utterance);
        if normalized.is_empty() || answer.is_empty() {
            anyhow::bail!("Both the utterance and the answer must be non-empty");
        }

        let sub = nlp::substitute_entities(&normalized, &mut self.settings.entities, &lang);
        let added = self.settings.db.add_answer(&lang, &sub.text, answer);
        self.persist()?;

        if added {
            info!("Learned answer ({}): {} -> {}", lang, sub.text, answer);
        }
        Ok(added)
    }

    /// Parse a "the answer to X is Y" statement and teach it.
    /// Returns the (utterance, answer) pair when the statement parsed.
    pub fn teach_statement(
        &mut self,
        statement: &str,
        lang: Option<&str>,
    ) -> Result<Option<(String, String)>> {
        match teach::parse_teach(statement) {
            Some((utterance, answer)) => {
                self.teach_answer(&utterance, &answer, lang)?;
                Ok(Some((utterance, answer)))
            }
            None => Ok(None),
        }
    }

    /// Declare an entity, or add a value to it, and persist.
    pub fn add_entity_value(
        &mut self,
        entity: &str,
        value: Option<&str>,
        lang: Option<&str>,
    ) -> Result<bool> {
        let lang = self.lang_or(lang).to_string();
        let entity = nlp::normalize(entity);
        if entity.is_empty() {
            anyhow::bail!("Entity name must not be empty");
        }
        if entity.contains(' ') {
            // trigger words are single tokens; a multi-word name would never fire
            anyhow::bail!("Entity name must be a single word: {}", entity);
        }

        let changed = match value {
            Some(value) => {
                let value = nlp::normalize(value);
                if value.is_empty() {
                    anyhow::bail!("Entity value must not be empty");
                }
                self.settings.entities.add_value(&lang, &entity, &value)
            }
            None => self.settings.entities.declare(&lang, &entity),
        };

        self.persist()?;
        Ok(changed)
    }

    /// Emit declaration files for the default language and (re)register
    /// them with the engine.
    pub fn materialize(&self, engine: &mut dyn IntentEngine) -> Result<MaterializeReport> {
        let lang = self.lang().to_string();
        self.materialize_lang(&lang, engine)
    }

    /// Emit declaration files for an explicit language.
    pub fn materialize_lang(
        &self,
        lang: &str,
        engine: &mut dyn IntentEngine,
    ) -> Result<MaterializeReport> {
        IntentMaterializer::new(&self.data_dir).run(&self.settings, lang, engine)
    }

    /// Default language for untagged messages.
    pub fn lang(&self) -> &str {
        &self.config.skill.lang
    }

    /// Priority the fallback registers at.
    pub fn fallback_priority(&self) -> u8 {
        self.config.skill.fallback_priority
    }

    /// Whether the interactive session asks for answers after a miss.
    pub fn elicit_answers(&self) -> bool {
        self.config.skill.elicit_answers
    }

    /// Persisted state.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Skill data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Directory the dialog files are written under.
    pub fn dialog_dir(&self) -> PathBuf {
        self.data_dir.join("dialog")
    }

    /// Directory the intent and entity files are written under.
    pub fn vocab_dir(&self) -> PathBuf {
        self.data_dir.join("vocab")
    }

    pub(crate) fn persist(&self) -> Result<()> {
        self.settings_store.store(&self.settings)
    }

    pub(crate) fn lang_or<'a>(&'a self, lang: Option<&'a str>) -> &'a str {
        lang.unwrap_or(&self.config.skill.lang)
    }
}
