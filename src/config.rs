//! Configuration management
//!
//! Manages skill configuration: the default language, the priority the
//! fallback registers at, and where the skill's data files live.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Skill behavior settings
    #[serde(default)]
    pub skill: SkillConfig,
    /// Filesystem locations
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Skill behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillConfig {
    /// Language used when a message carries no tag
    #[serde(default = "default_lang")]
    pub lang: String,
    /// Priority the fallback registers at (lower runs earlier)
    #[serde(default = "default_priority")]
    pub fallback_priority: u8,
    /// Ask for an answer right after a fallback in the interactive session
    #[serde(default = "default_elicit")]
    pub elicit_answers: bool,
}

fn default_lang() -> String {
    "en-us".to_string()
}

fn default_priority() -> u8 {
    1
}

fn default_elicit() -> bool {
    true
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            lang: default_lang(),
            fallback_priority: default_priority(),
            elicit_answers: default_elicit(),
        }
    }
}

/// Filesystem locations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Override for the skill data directory (vocab/, dialog/, settings.json)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let config_path = config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .context("Failed to read config file")?;
            let config: Config = toml::from_str(&contents)
                .context("Failed to parse config file")?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = config_path()?;
        let parent = config_path.parent()
            .context("Config path has no parent")?;

        std::fs::create_dir_all(parent)
            .context("Failed to create config directory")?;

        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        std::fs::write(&config_path, contents)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Resolve the skill data directory, honoring the override.
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        match &self.paths.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => data_dir(),
        }
    }
}

/// Get the configuration file path
pub fn config_path() -> Result<PathBuf> {
    let base = directories::ProjectDirs::from("com", "learn-unknown", "learn-unknown")
        .context("Failed to get project directories")?;
    Ok(base.config_dir().join("config.toml"))
}

/// Get the data directory path
pub fn data_dir() -> Result<PathBuf> {
    let base = directories::ProjectDirs::from("com", "learn-unknown", "learn-unknown")
        .context("Failed to get project directories")?;
    Ok(base.data_dir().to_path_buf())
}

/// Show current configuration
pub fn show_config() -> Result<()> {
    let config = Config::load()?;

    println!("Configuration");
    println!("=============");
    println!("Language:          {}", config.skill.lang);
    println!("Fallback priority: {}", config.skill.fallback_priority);
    println!("Elicit answers:    {}", config.skill.elicit_answers);
    println!("Data directory:    {}", config.resolve_data_dir()?.display());
    println!("Config file:       {}", config_path()?.display());

    Ok(())
}

/// Set the default language
pub fn set_default_lang(lang: &str) -> Result<()> {
    let lang = lang.trim().to_lowercase();
    if lang.is_empty() {
        anyhow::bail!("Language tag must not be empty");
    }

    let mut config = Config::load()?;
    config.skill.lang = lang.clone();
    config.save()?;
    println!("Default language set to {}", lang);
    Ok(())
}

/// Set the fallback priority
pub fn set_fallback_priority(priority: u8) -> Result<()> {
    let mut config = Config::load()?;
    config.skill.fallback_priority = priority;
    config.save()?;
    println!("Fallback priority set to {}", priority);
    Ok(())
}

/// Reset configuration to defaults
pub fn reset_config() -> Result<()> {
    let config = Config::default();
    config.save()?;
    println!("Configuration reset to defaults.");
    Ok(())
}
