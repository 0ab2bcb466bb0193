//! Turning raw model output into candidate titles.

use crate::prompt::{MAX_TITLE_WORDS, MIN_TITLE_WORDS};

/// Strip a surrounding Markdown code fence, if any.
pub(crate) fn clean_fences(raw: &str) -> &str {
    let mut s = raw.trim();
    if let Some(rest) = s.strip_prefix("```json") {
        s = rest.trim();
    }
    if let Some(rest) = s.strip_prefix("```") {
        s = rest.trim();
    }
    if let Some(rest) = s.strip_suffix("```") {
        s = rest.trim();
    }
    s
}

pub(crate) fn within_word_bounds(title: &str) -> bool {
    let words = title.split_whitespace().count();
    (MIN_TITLE_WORDS..=MAX_TITLE_WORDS).contains(&words)
}

/// Decode a JSON list of strings.
///
/// Non-string elements and items outside the word bounds are dropped.
/// Invalid JSON or a JSON value that is not a list is an error carrying a
/// human-readable reason.
pub(crate) fn decode_strict(cleaned: &str) -> Result<Vec<String>, String> {
    let value: serde_json::Value = serde_json::from_str(cleaned).map_err(|e| e.to_string())?;
    let serde_json::Value::Array(items) = value else {
        return Err("JSON is not a list".into());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            serde_json::Value::String(s) => Some(s.trim().to_string()),
            _ => None,
        })
        .filter(|s| !s.is_empty() && within_word_bounds(s))
        .collect())
}

/// Heuristic extraction for output that is not a clean JSON list.
///
/// Brackets and double quotes are removed, the rest is split on commas and
/// each piece is stripped of surrounding quotes, dashes and list numbering.
pub(crate) fn decode_permissive(raw: &str) -> Vec<String> {
    let flattened: String = raw
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | '"'))
        .collect();
    flattened
        .split(',')
        .map(|piece| {
            piece
                .trim_matches(|c: char| {
                    c.is_whitespace() || c.is_ascii_digit() || matches!(c, '"' | '\'' | '-' | '.')
                })
                .to_string()
        })
        .filter(|s| !s.is_empty() && within_word_bounds(s))
        .collect()
}
