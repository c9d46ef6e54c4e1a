//! Fallback handler
//!
//! Invoked by the host dispatch when no other skill matched. Registered
//! at high priority so it observes every miss, records the utterance,
//! and declines it so lower-priority fallbacks still run.

use anyhow::Result;
use tracing::info;

use super::LearnSkill;
use crate::nlp;
use crate::types::Message;

/// Record the unmatched utterance. Always returns false: the skill
/// never claims an utterance at fallback time.
pub fn handle(skill: &mut LearnSkill, message: &Message) -> Result<bool> {
    let lang = message
        .lang
        .clone()
        .unwrap_or_else(|| skill.lang().to_string());

    let normalized = nlp::normalize(&message.utterance);
    if normalized.is_empty() {
        return Ok(false);
    }

    let sub = nlp::substitute_entities(&normalized, &mut skill.settings.entities, &lang);
    let new = skill.settings.db.record(&lang, &sub.text);
    skill.persist()?;

    if new {
        info!("Recorded unanswered utterance ({}): {}", lang, sub.text);
    }
    Ok(false)
}
