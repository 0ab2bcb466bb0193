//! Description generation: one call, at most one extension, then a
//! sentence-aware trim to the character budget.

use std::time::Instant;

use tracing::{debug, instrument, warn};

use super::GenerationEngine;
use super::call::CallTally;
use super::validation::check_description_request;
use crate::cost::count_tokens;
use crate::prompt::{EventBrief, description_prompt, extension_prompt};
use crate::types::{
    DescriptionDiagnostics, DescriptionRequest, DescriptionResult, effective_context,
};

/// Below this share of the budget a description is extended (not in economy).
const EXTEND_BELOW: f64 = 0.75;
/// Below this share of the budget a description is flagged as short.
const SHORT_BELOW: f64 = 0.6;
/// Leading characters compared to spot an extension that restates the text.
const DUPLICATE_PREFIX_CHARS: usize = 20;

/// `text` cut to `max_chars` characters, then back to the last period.
///
/// Returns the text unchanged when it already fits.
pub(crate) fn truncate_at_sentence(text: &str, max_chars: usize) -> String {
    let Some((cut, _)) = text.char_indices().nth(max_chars) else {
        return text.to_string();
    };
    let head = &text[..cut];
    match head.rfind('.') {
        Some(period) => head[..=period].to_string(),
        None => head.to_string(),
    }
}

/// Whether `extension` opens by restating the start of `existing`.
fn restates(existing: &str, extension: &str) -> bool {
    let prefix: String = existing
        .chars()
        .take(DUPLICATE_PREFIX_CHARS)
        .collect::<String>()
        .to_lowercase();
    extension.to_lowercase().starts_with(&prefix)
}

impl GenerationEngine {
    /// Generate a description within `request.clamped_max_chars()`.
    ///
    /// Never returns an error: validation problems and a provider call that
    /// exhausts its retries (primary or extension) yield an empty
    /// description with the reason in `diagnostics.errors`.
    #[instrument(
        name = "eventsmith.description",
        skip_all,
        fields(
            category = %request.category,
            event_type = %request.event_type,
            max_chars = request.max_chars,
            mode = %request.cost_mode,
        )
    )]
    pub async fn generate_description(&self, request: &DescriptionRequest) -> DescriptionResult {
        let context = effective_context(request.context.as_deref());
        let max_chars = request.clamped_max_chars();
        let mode = request.cost_mode;
        let checked = check_description_request(
            &request.title,
            &request.category,
            &request.event_type,
            &request.tone,
            context,
        );
        let mut diagnostics = DescriptionDiagnostics {
            cost_mode: mode,
            max_chars,
            model: self.model.clone(),
            context_used: context.is_some(),
            warnings: checked.warnings,
            ..DescriptionDiagnostics::default()
        };
        if !checked.errors.is_empty() {
            debug!(errors = ?checked.errors, "description request rejected");
            diagnostics.errors = checked.errors;
            return DescriptionResult {
                description: String::new(),
                diagnostics,
            };
        }

        let brief = EventBrief {
            category: request.category.trim(),
            event_type: request.event_type.trim(),
            tone: request.tone.trim(),
            context,
        };
        let title = request.title.trim();
        let plan = description_prompt(title, &brief, max_chars, mode);
        let start = Instant::now();
        let mut tally = CallTally::default();

        let primary = match self.call_plan(&plan, mode).await {
            Ok(outcome) => outcome,
            Err(e) => {
                diagnostics.elapsed_secs = start.elapsed().as_secs_f64();
                diagnostics.system_prompt = plan.system;
                diagnostics.user_prompt = plan.user;
                diagnostics.errors.push(e.to_string());
                return DescriptionResult {
                    description: String::new(),
                    diagnostics,
                };
            }
        };
        tally.add(&primary);
        diagnostics.cache_hit = primary.from_cache;
        let mut text = primary.text;

        let extend_below = (EXTEND_BELOW * max_chars as f64) as usize;
        if text.chars().count() < extend_below && mode.allows_extension() {
            let ext_plan = extension_prompt(&text, max_chars, plan.temperature);
            match self.call_plan(&ext_plan, mode).await {
                Ok(extension) => {
                    tally.add(&extension);
                    if !extension.text.is_empty() && !restates(&text, &extension.text) {
                        text = format!("{text} {}", extension.text);
                        diagnostics.extended = true;
                    } else {
                        debug!("extension discarded as a restatement");
                    }
                }
                Err(e) => {
                    warn!(error = %e, "description extension failed");
                    diagnostics.elapsed_secs = start.elapsed().as_secs_f64();
                    diagnostics.system_prompt = plan.system;
                    diagnostics.user_prompt = plan.user;
                    diagnostics.incremental_cost = tally.incremental_cost;
                    diagnostics.provider_calls = tally.provider_calls;
                    diagnostics.cached_calls = tally.cached_calls;
                    diagnostics.errors.push(e.to_string());
                    return DescriptionResult {
                        description: String::new(),
                        diagnostics,
                    };
                }
            }
        }

        let elapsed = start.elapsed();
        let generated_chars = text.chars().count();
        let prompt_tokens = count_tokens(&plan.system) + count_tokens(&plan.user);
        let completion_tokens = count_tokens(&text);
        let estimated_cost = self
            .costs
            .estimate(prompt_tokens, completion_tokens, &self.model);
        let shorter_than_requested = generated_chars < (SHORT_BELOW * max_chars as f64) as usize;

        let description = truncate_at_sentence(&text, max_chars);
        let final_chars = description.chars().count();
        diagnostics.truncated = final_chars < generated_chars;
        if shorter_than_requested {
            diagnostics.warnings.push(format!(
                "Description is shorter than requested ({generated_chars} of {max_chars} characters)."
            ));
        }

        diagnostics.prompt_tokens = prompt_tokens;
        diagnostics.completion_tokens = completion_tokens;
        diagnostics.total_tokens = prompt_tokens + completion_tokens;
        diagnostics.elapsed_secs = elapsed.as_secs_f64();
        diagnostics.estimated_cost = estimated_cost;
        diagnostics.cost_per_char = if final_chars > 0 {
            estimated_cost / final_chars as f64
        } else {
            0.0
        };
        diagnostics.char_efficiency = if estimated_cost > 0.0 {
            generated_chars as f64 / estimated_cost
        } else {
            0.0
        };
        diagnostics.target_utilization = final_chars as f64 / max_chars as f64 * 100.0;
        diagnostics.shorter_than_requested = shorter_than_requested;
        diagnostics.system_prompt = plan.system;
        diagnostics.user_prompt = plan.user;
        diagnostics.incremental_cost = tally.incremental_cost;
        diagnostics.provider_calls = tally.provider_calls;
        diagnostics.cached_calls = tally.cached_calls;

        DescriptionResult {
            description,
            diagnostics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits_unchanged() {
        assert_eq!(truncate_at_sentence("Short. Text", 100), "Short. Text");
        assert_eq!(truncate_at_sentence("abc", 3), "abc");
    }

    #[test]
    fn cuts_back_to_last_period() {
        let text = "One sentence here. Another one follows and runs long";
        assert_eq!(truncate_at_sentence(text, 30), "One sentence here.");
    }

    #[test]
    fn hard_cut_without_period() {
        assert_eq!(truncate_at_sentence("abcdefghij", 4), "abcd");
    }

    #[test]
    fn counts_chars_not_bytes() {
        let text = "Café concerts. Ünïcödé everywhere";
        let out = truncate_at_sentence(text, 20);
        assert_eq!(out, "Café concerts.");
    }

    #[test]
    fn restatement_is_case_insensitive() {
        let existing = "Join us for the Tech Leadership Summit this spring.";
        assert!(restates(existing, "JOIN US FOR THE TECH leadership again"));
        assert!(!restates(existing, "Register today to secure your seat."));
    }
}
