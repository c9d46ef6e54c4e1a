//! Shared types used across modules
//!
//! This module contains types that are used by multiple modules
//! to avoid circular dependencies.

use serde::{Deserialize, Serialize};

/// An utterance event as delivered by the host dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Raw utterance text as heard by the host
    pub utterance: String,
    /// Language tag attached by the host, if any
    pub lang: Option<String>,
}

impl Message {
    /// Message without an explicit language tag.
    pub fn new(utterance: impl Into<String>) -> Self {
        Self {
            utterance: utterance.into(),
            lang: None,
        }
    }

    /// Message tagged with a language.
    pub fn with_lang(utterance: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            utterance: utterance.into(),
            lang: Some(lang.into()),
        }
    }
}
