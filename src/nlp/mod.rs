//! Utterance text processing
//!
//! Normalization mirrors what the host applies before matching, so the
//! phrase files this skill emits line up with what the matcher hears at
//! runtime. The substitution pass is the learning half: it collapses
//! `<value> <trigger>` pairs into entity placeholders.

pub mod normalize;
pub mod substitute;

pub use normalize::normalize;
pub use substitute::{substitute_entities, Substitution};
