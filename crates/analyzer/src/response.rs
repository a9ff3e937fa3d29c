//! Tolerant JSON recovery from model replies.
//!
//! Models often wrap JSON in prose or Markdown fences. [`extract_json`]
//! tries a fixed sequence of strategies and returns the first value that
//! parses:
//!
//! 1. the whole reply;
//! 2. the body of a leading ```` ``` ```` fence, minus an optional `json` tag;
//! 3. the first JSON value starting at the first `{` or `[`;
//! 4. the whole reply with non-ASCII characters removed.
//!
//! Different malformed replies are told apart only by which strategy
//! succeeds first, so the order is fixed.

use deckcheck_core::{Error, Result};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Runs of non-ASCII characters.
static NON_ASCII_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\x00-\x7F]+").unwrap());

const FENCE: &str = "```";

/// Recover a JSON value from a model reply.
pub fn extract_json(text: &str) -> Result<Value> {
    let strategies: [(&str, fn(&str) -> Option<Value>); 4] = [
        ("direct", parse_direct),
        ("fenced block", parse_fenced),
        ("first bracket", parse_from_first_bracket),
        ("ascii only", parse_ascii_only),
    ];

    for (name, strategy) in strategies {
        if let Some(value) = strategy(text) {
            log::debug!("Recovered JSON with the {} strategy", name);
            return Ok(value);
        }
    }

    Err(Error::JsonExtraction(
        "no strategy produced valid JSON".to_string(),
    ))
}

fn parse_direct(text: &str) -> Option<Value> {
    serde_json::from_str(text).ok()
}

/// Parse the content between the first two fences of a fenced reply.
fn parse_fenced(text: &str) -> Option<Value> {
    if !text.trim().starts_with(FENCE) {
        return None;
    }

    let mut parts = text.split(FENCE);
    parts.next()?;
    let body = parts.next()?;
    // A closing fence must exist.
    parts.next()?;

    let body = match body.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => body[4..].trim_start(),
        _ => body,
    };
    serde_json::from_str(body).ok()
}

/// Parse the first JSON value found at the first `{` or `[`.
///
/// Text after that value is ignored.
fn parse_from_first_bracket(text: &str) -> Option<Value> {
    let start = text.find(['{', '['])?;
    let mut values = serde_json::Deserializer::from_str(&text[start..]).into_iter::<Value>();
    values.next()?.ok()
}

fn parse_ascii_only(text: &str) -> Option<Value> {
    let cleaned = NON_ASCII_REGEX.replace_all(text, "");
    serde_json::from_str(&cleaned).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_direct_parse() {
        assert_eq!(extract_json(r#"  [1, 2]  "#).unwrap(), json!([1, 2]));
    }

    #[test]
    fn test_fenced_json_block() {
        let text = "```json\n{\"a\": 1}\n```";
        assert_eq!(extract_json(text).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_fenced_block_without_tag() {
        let text = "\n```\n[{\"a\": 1}]\n```\n";
        assert_eq!(parse_fenced(text), Some(json!([{"a": 1}])));
    }

    #[test]
    fn test_fenced_block_uppercase_tag() {
        let text = "```JSON\n{\"a\": 2}\n```";
        assert_eq!(parse_fenced(text), Some(json!({"a": 2})));
    }

    #[test]
    fn test_unclosed_fence_is_not_fenced() {
        assert_eq!(parse_fenced("```json\n{\"a\": 1}"), None);
        // The bracket scan still recovers it.
        assert_eq!(extract_json("```json\n{\"a\": 1}").unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_first_bracket_ignores_surrounding_prose() {
        let text = r#"Here is the result: [{"slide_numbers":[1,2],"description":"x","type":"numerical","confidence":0.9}] done"#;

        let value = extract_json(text).unwrap();

        assert_eq!(
            value,
            json!([{
                "slide_numbers": [1, 2],
                "description": "x",
                "type": "numerical",
                "confidence": 0.9
            }])
        );
    }

    #[test]
    fn test_first_bracket_uses_earliest_bracket() {
        let text = r#"note {"a": [1]} then [2]"#;
        assert_eq!(parse_from_first_bracket(text), Some(json!({"a": [1]})));
    }

    #[test]
    fn test_ascii_only_fallback() {
        // A stray non-ASCII character between tokens breaks every other strategy.
        let text = "✓{\"a\":\u{00a0}1}";
        assert_eq!(parse_from_first_bracket(text), None);
        assert_eq!(extract_json(text).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_fenced_wins_over_bracket_scan() {
        // The fenced body and the first bracket disagree; the fence comes first.
        let text = "```json\n42\n```\n[1]";
        assert_eq!(parse_from_first_bracket(text), Some(json!([1])));
        assert_eq!(extract_json(text).unwrap(), json!(42));
    }

    #[test]
    fn test_unrecoverable_text() {
        assert!(matches!(
            extract_json("not json at all"),
            Err(Error::JsonExtraction(_))
        ));
    }
}
