//! Host runtime seams
//!
//! The surrounding assistant (skill lifecycle, message bus, the
//! natural-language matcher that parses .intent/.entity files, and the
//! dialog/TTS subsystem) is external. These traits are the only points
//! the skill touches; `local` provides minimal stand-ins so the crate
//! runs from its own CLI and tests without a host.

pub mod local;

use anyhow::Result;
use std::path::Path;

/// Registration surface of the host's intent matcher.
pub trait IntentEngine {
    /// Bind an intent name to a phrase-pattern file.
    fn register_intent_file(&mut self, name: &str, path: &Path) -> Result<()>;

    /// Bind an entity name to a value file.
    fn register_entity_file(&mut self, name: &str, path: &Path) -> Result<()>;

    /// Remove a previously bound intent by name. Unknown names are ignored.
    fn remove_intent(&mut self, name: &str);
}

/// Dialog rendering and speech output.
pub trait Speaker {
    /// Render the named dialog in the given language.
    fn speak_dialog(&mut self, name: &str, lang: &str) -> Result<()>;
}
