//! Teach-statement parsing
//!
//! "the answer to <utterance> is <answer>" attaches an answer to a
//! recorded (or new) utterance without leaving the conversation.

use once_cell::sync::Lazy;
use regex::Regex;

/// Accepted teach forms. The first capture is the utterance, the second
/// the answer. The utterance capture is greedy, so the last " is "
/// splits the statement.
static TEACH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:the\s+)?answer\s+(?:to|for)\s+(.+)\s+is\s+(.+?)\s*$")
        .expect("teach pattern is valid")
});

/// Split a teach statement into (utterance, answer).
pub fn parse_teach(statement: &str) -> Option<(String, String)> {
    let caps = TEACH_RE.captures(statement)?;
    let utterance = caps.get(1)?.as_str().trim();
    let answer = caps.get(2)?.as_str().trim();

    if utterance.is_empty() || answer.is_empty() {
        return None;
    }
    Some((utterance.to_string(), answer.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_statement() {
        assert_eq!(
            parse_teach("the answer to what is love is a feeling"),
            Some(("what is love".to_string(), "a feeling".to_string()))
        );
    }

    #[test]
    fn test_for_variant_and_missing_article() {
        assert_eq!(
            parse_teach("answer for ping is pong"),
            Some(("ping".to_string(), "pong".to_string()))
        );
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(
            parse_teach("The Answer To ping Is pong"),
            Some(("ping".to_string(), "pong".to_string()))
        );
    }

    #[test]
    fn test_last_is_splits() {
        // the utterance itself contains " is "
        assert_eq!(
            parse_teach("the answer to what is love is baby do not hurt me"),
            Some((
                "what is love".to_string(),
                "baby do not hurt me".to_string()
            ))
        );
    }

    #[test]
    fn test_non_teach_statement() {
        assert_eq!(parse_teach("what time is it"), None);
        assert_eq!(parse_teach(""), None);
    }
}
