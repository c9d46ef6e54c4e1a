//! Learn Unknown - Self-Teaching Fallback Skill Library
//!
//! A fallback skill for a voice-assistant host:
//! - records utterances no registered intent could match
//! - elicits answers from the user ("the answer to X is Y")
//! - learns entity values from trigger words
//! - compiles the accumulated pairs into intent/entity/dialog files the
//!   host matcher loads directly
//!
//! # Example
//!
//! ```ignore
//! use learn_unknown::config::Config;
//! use learn_unknown::host::local::LocalEngine;
//! use learn_unknown::skill::LearnSkill;
//! use learn_unknown::types::Message;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut skill = LearnSkill::open(Config::load()?)?;
//!     let mut engine = LocalEngine::new();
//!     skill.initialize(&mut engine)?;
//!     skill.handle_fallback(&Message::new("what is the airspeed of a swallow"))?;
//!     Ok(())
//! }
//! ```

// Core modules (order matters for cross-module dependencies)
pub mod types;
pub mod config;
pub mod host;
pub mod nlp;
pub mod store; // Must come before skill since skill depends on the stores
pub mod skill;
pub mod cli;

// Re-export commonly used types for convenience
pub use config::Config;

pub use skill::{
    LearnSkill,
    materialize::{IntentMaterializer, MaterializeReport},
};

pub use store::{
    EntityStore,
    Settings,
    SettingsStore,
    UtteranceStore,
};

pub use host::{IntentEngine, Speaker};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get the library info
pub fn info() -> String {
    format!("{} v{} - Self-Teaching Fallback Skill", NAME, VERSION)
}
