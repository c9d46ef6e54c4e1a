//! Utterance normalization
//!
//! Lowercase, expand common English contractions, strip punctuation,
//! collapse whitespace. Every utterance passes through here before
//! lookup or storage.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Contractions expanded before token filtering.
static CONTRACTIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("what's", "what is"),
        ("who's", "who is"),
        ("where's", "where is"),
        ("when's", "when is"),
        ("how's", "how is"),
        ("it's", "it is"),
        ("that's", "that is"),
        ("there's", "there is"),
        ("i'm", "i am"),
        ("i've", "i have"),
        ("i'll", "i will"),
        ("i'd", "i would"),
        ("you're", "you are"),
        ("you've", "you have"),
        ("you'll", "you will"),
        ("can't", "can not"),
        ("won't", "will not"),
        ("don't", "do not"),
        ("doesn't", "does not"),
        ("didn't", "did not"),
        ("isn't", "is not"),
        ("aren't", "are not"),
        ("wasn't", "was not"),
        ("couldn't", "could not"),
        ("shouldn't", "should not"),
        ("wouldn't", "would not"),
    ])
});

/// Normalize an utterance for storage and matching.
///
/// Placeholder braces survive so already-substituted text round-trips.
pub fn normalize(utterance: &str) -> String {
    let mut out: Vec<String> = Vec::new();

    for raw in utterance.split_whitespace() {
        let token: String = raw
            .chars()
            .filter(|c| c.is_alphanumeric() || matches!(c, '\'' | '{' | '}'))
            .collect();
        let token = token.to_lowercase();
        if token.is_empty() {
            continue;
        }

        match CONTRACTIONS.get(token.as_str()) {
            Some(expansion) => out.extend(expansion.split(' ').map(String::from)),
            None => {
                let token = token.trim_matches('\'');
                if !token.is_empty() {
                    out.push(token.to_string());
                }
            }
        }
    }

    out.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_and_punctuation() {
        assert_eq!(normalize("What IS Love?!"), "what is love");
    }

    #[test]
    fn test_contractions() {
        assert_eq!(normalize("what's the time"), "what is the time");
        assert_eq!(normalize("I can't even"), "i can not even");
    }

    #[test]
    fn test_whitespace_collapse() {
        assert_eq!(normalize("  hello    there  "), "hello there");
    }

    #[test]
    fn test_placeholders_survive() {
        assert_eq!(
            normalize("what time is it in {city}"),
            "what time is it in {city}"
        );
    }

    #[test]
    fn test_stray_quotes_dropped() {
        assert_eq!(normalize("'tis 'quoted'"), "tis quoted");
        assert_eq!(normalize("''"), "");
    }

    #[test]
    fn test_empty() {
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("?!."), "");
    }
}
