//! Input checks run before any provider call.

use crate::types::{MAX_TITLES, MIN_TITLES};

/// Unselected-field placeholders that count as missing.
pub const CATEGORY_PLACEHOLDER: &str = "Select event category";
pub const EVENT_TYPE_PLACEHOLDER: &str = "Select event type";
pub const TONE_PLACEHOLDER: &str = "Select tone of event";

/// Context longer than this (in characters) draws a cost warning.
pub const CONTEXT_WARN_CHARS: usize = 200;

/// Blocking errors and advisory warnings for a request.
#[derive(Debug, Default)]
pub(crate) struct Checked {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

fn missing(value: &str, placeholder: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == placeholder
}

pub(crate) fn check_brief(
    category: &str,
    event_type: &str,
    tone: &str,
    context: Option<&str>,
) -> Checked {
    let mut checked = Checked::default();
    if missing(category, CATEGORY_PLACEHOLDER) {
        checked.errors.push("Category is required".into());
    }
    if missing(event_type, EVENT_TYPE_PLACEHOLDER) {
        checked.errors.push("Event type is required".into());
    }
    if missing(tone, TONE_PLACEHOLDER) {
        checked.errors.push("Tone is required".into());
    }
    if context.is_some_and(|c| c.chars().count() > CONTEXT_WARN_CHARS) {
        checked
            .warnings
            .push("Context is very long - may increase costs".into());
    }
    checked
}

pub(crate) fn check_title_request(
    category: &str,
    event_type: &str,
    tone: &str,
    count: usize,
    context: Option<&str>,
) -> Checked {
    let mut checked = check_brief(category, event_type, tone, context);
    if !(MIN_TITLES..=MAX_TITLES).contains(&count) {
        checked.warnings.push(format!(
            "Number of titles ({count}) should be between {MIN_TITLES}-{MAX_TITLES}"
        ));
    }
    checked
}

pub(crate) fn check_description_request(
    title: &str,
    category: &str,
    event_type: &str,
    tone: &str,
    context: Option<&str>,
) -> Checked {
    let mut checked = check_brief(category, event_type, tone, context);
    if title.trim().is_empty() {
        checked.errors.insert(0, "Title is required".into());
    }
    checked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_and_blanks_are_missing() {
        let checked = check_brief(CATEGORY_PLACEHOLDER, "  ", TONE_PLACEHOLDER, None);
        assert_eq!(
            checked.errors,
            vec![
                "Category is required",
                "Event type is required",
                "Tone is required"
            ]
        );
    }

    #[test]
    fn long_context_warns_but_passes() {
        let ctx = "x".repeat(CONTEXT_WARN_CHARS + 1);
        let checked = check_brief("Technology", "Conference", "Professional", Some(&ctx));
        assert!(checked.errors.is_empty());
        assert_eq!(checked.warnings.len(), 1);

        let ctx = "x".repeat(CONTEXT_WARN_CHARS);
        let checked = check_brief("Technology", "Conference", "Professional", Some(&ctx));
        assert!(checked.warnings.is_empty());
    }

    #[test]
    fn out_of_range_count_warns() {
        let checked = check_title_request("Technology", "Conference", "Professional", 9, None);
        assert!(checked.errors.is_empty());
        assert!(checked.warnings[0].contains("(9)"));
    }

    #[test]
    fn description_needs_title() {
        let checked = check_description_request("", "Technology", "Conference", "Casual", None);
        assert_eq!(checked.errors, vec!["Title is required"]);
    }
}
