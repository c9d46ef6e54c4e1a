//! Entity substitution pass
//!
//! Single left-to-right token scan: whenever a token is followed by a
//! declared entity trigger word, the token is taken as a value of that
//! entity and the pair collapses to a `{entity}` placeholder. Newly
//! seen values are recorded so the entity grows with use.
//!
//! Single-token values only. Multi-word values and repeated trigger
//! words are ambiguous under this scan; the first reading wins.

use crate::store::EntityStore;

/// Result of a substitution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    /// Utterance with `<value> <trigger>` pairs collapsed to placeholders
    pub text: String,
    /// Entity values newly recorded during the scan: (entity, value)
    pub learned: Vec<(String, String)>,
}

/// Run the substitution pass over a normalized utterance.
pub fn substitute_entities(
    utterance: &str,
    entities: &mut EntityStore,
    lang: &str,
) -> Substitution {
    let tokens: Vec<&str> = utterance.split_whitespace().collect();
    let mut out: Vec<String> = Vec::with_capacity(tokens.len());
    let mut learned = Vec::new();

    let mut i = 0;
    while i < tokens.len() {
        let trigger = tokens
            .get(i + 1)
            .filter(|next| entities.is_trigger(lang, next));

        match trigger {
            Some(&entity) => {
                if entities.add_value(lang, entity, tokens[i]) {
                    learned.push((entity.to_string(), tokens[i].to_string()));
                }
                out.push(format!("{{{}}}", entity));
                i += 2;
            }
            None => {
                out.push(tokens[i].to_string());
                i += 1;
            }
        }
    }

    Substitution {
        text: out.join(" "),
        learned,
    }
}
