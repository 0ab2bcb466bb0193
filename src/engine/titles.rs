//! Title generation: call, decode, retry for the shortfall, then backfill.

use std::collections::HashSet;
use std::time::Instant;

use tracing::{debug, info, instrument};

use super::GenerationEngine;
use super::call::CallTally;
use super::decode::{clean_fences, decode_permissive, decode_strict, within_word_bounds};
use super::validation::check_title_request;
use crate::Result;
use crate::cost::count_tokens;
use crate::prompt::{EventBrief, title_prompt, title_retry_prompt};
use crate::types::{TitleDiagnostics, TitleRequest, TitleResult, effective_context};

/// Accepted titles in acceptance order, unique ignoring case.
struct TitleSet {
    titles: Vec<String>,
    seen: HashSet<String>,
    limit: usize,
}

impl TitleSet {
    fn new(limit: usize) -> Self {
        Self {
            titles: Vec::with_capacity(limit),
            seen: HashSet::new(),
            limit,
        }
    }

    /// Accept `title` unless the set is full or already holds it.
    fn offer(&mut self, title: String) -> bool {
        if self.is_full() || !self.seen.insert(title.to_lowercase()) {
            return false;
        }
        self.titles.push(title);
        true
    }

    fn extend(&mut self, titles: impl IntoIterator<Item = String>) {
        for title in titles {
            if self.is_full() {
                break;
            }
            self.offer(title);
        }
    }

    fn is_full(&self) -> bool {
        self.titles.len() >= self.limit
    }

    fn needed(&self) -> usize {
        self.limit.saturating_sub(self.titles.len())
    }
}

/// Deterministic backfill titles, tried in order.
fn creative_fallbacks(category: &str, event_type: &str, tone: &str) -> [String; 10] {
    [
        format!("{category} Excellence Summit"),
        format!("Future of {category}"),
        format!("{tone} {event_type} Experience"),
        format!("Next-Gen {category} Forum"),
        format!("Advanced {event_type} Series"),
        format!("{category} Innovation Hub"),
        format!("Premier {event_type} Event"),
        format!("{tone} {category} Gathering"),
        format!("Professional {event_type} Network"),
        format!("Elite {category} Conference"),
    ]
}

/// `"{category} {event_type} {index}"`, shortened to stay within the title
/// word bounds. Event type words are kept first; category words fill the rest.
fn numbered_filler(category: &str, event_type: &str, index: usize) -> String {
    const MAX_WORDS: usize = 5;
    let event: Vec<&str> = event_type.split_whitespace().take(MAX_WORDS - 1).collect();
    let mut words: Vec<&str> = category
        .split_whitespace()
        .take(MAX_WORDS - event.len())
        .collect();
    words.extend(event);
    while words.len() < 2 {
        words.push("Event");
    }
    format!("{} {index}", words.join(" "))
}

impl GenerationEngine {
    /// Generate exactly `request.clamped_count()` unique titles.
    ///
    /// Missing required fields return an empty, rejected result without any
    /// provider call. Malformed or short model output is repaired by retry
    /// rounds and then by deterministic fallbacks, never by an error. A
    /// provider failure that survives the retry policy is returned as `Err`.
    #[instrument(
        name = "eventsmith.titles",
        skip_all,
        fields(
            category = %request.category,
            event_type = %request.event_type,
            count = request.count,
            mode = %request.cost_mode,
        )
    )]
    pub async fn generate_titles(&self, request: &TitleRequest) -> Result<TitleResult> {
        let context = effective_context(request.context.as_deref());
        let checked = check_title_request(
            &request.category,
            &request.event_type,
            &request.tone,
            request.count,
            context,
        );
        let count = request.clamped_count();
        if !checked.errors.is_empty() {
            debug!(errors = ?checked.errors, "title request rejected");
            return Ok(TitleResult {
                titles: Vec::new(),
                diagnostics: TitleDiagnostics {
                    titles_requested: count,
                    model: self.model.clone(),
                    context_used: context.is_some(),
                    warnings: checked.warnings,
                    errors: checked.errors,
                    ..TitleDiagnostics::default()
                },
            });
        }

        let mode = request.cost_mode;
        let brief = EventBrief {
            category: request.category.trim(),
            event_type: request.event_type.trim(),
            tone: request.tone.trim(),
            context,
        };
        let plan = title_prompt(&brief, count, mode);
        let start = Instant::now();
        let mut tally = CallTally::default();

        let primary = self.call_plan(&plan, mode).await?;
        tally.add(&primary);

        let mut accepted = TitleSet::new(count);
        let parse_error = match decode_strict(clean_fences(&primary.text)) {
            Ok(items) => {
                accepted.extend(items);
                None
            }
            Err(reason) => {
                debug!(reason = %reason, "strict decode failed, using permissive split");
                accepted.extend(decode_permissive(clean_fences(&primary.text)));
                Some(reason)
            }
        };

        let mut retry_count = 0;
        while !accepted.is_full() && retry_count < mode.title_retries() {
            retry_count += 1;
            let needed = accepted.needed();
            debug!(needed, round = retry_count, "requesting missing titles");
            let retry_plan = title_retry_prompt(&plan, &brief, count, needed, &accepted.titles);
            let outcome = self.call_plan(&retry_plan, mode).await?;
            tally.add(&outcome);
            let cleaned = clean_fences(&outcome.text);
            let items = decode_strict(cleaned).unwrap_or_else(|_| decode_permissive(cleaned));
            accepted.extend(items);
        }

        let mut fallback_used = false;
        for candidate in creative_fallbacks(brief.category, brief.event_type, brief.tone) {
            if accepted.is_full() {
                break;
            }
            if within_word_bounds(&candidate) && accepted.offer(candidate) {
                fallback_used = true;
            }
        }
        let mut index = 1;
        while !accepted.is_full() {
            let filler = numbered_filler(brief.category, brief.event_type, index);
            if accepted.offer(filler) {
                fallback_used = true;
            }
            index += 1;
        }
        if fallback_used {
            info!(mode = %mode, "backfilled titles with fallbacks");
        }

        let elapsed = start.elapsed();
        let prompt_tokens = count_tokens(&plan.system) + count_tokens(&plan.user);
        let completion_tokens = count_tokens(&primary.text);
        let estimated_cost = self
            .costs
            .estimate(prompt_tokens, completion_tokens, &self.model);
        let titles = accepted.titles;

        let mut warnings = checked.warnings;
        if fallback_used {
            warnings.push(format!(
                "Some titles use creative fallbacks due to LLM output limits in {mode} mode."
            ));
        }
        if let Some(reason) = &parse_error {
            warnings.push(format!("JSON parsing issue: {reason}"));
        }
        if retry_count > 0 {
            warnings.push(format!(
                "Required {retry_count} retries to generate sufficient titles."
            ));
        }

        let diagnostics = TitleDiagnostics {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
            elapsed_secs: elapsed.as_secs_f64(),
            estimated_cost,
            efficiency: if estimated_cost > 0.0 {
                titles.len() as f64 / estimated_cost
            } else {
                0.0
            },
            model: self.model.clone(),
            system_prompt: plan.system,
            user_prompt: plan.user,
            retry_count,
            titles_requested: count,
            titles_generated: titles.len(),
            cache_hit: primary.from_cache,
            incremental_cost: tally.incremental_cost,
            provider_calls: tally.provider_calls,
            cached_calls: tally.cached_calls,
            overall_efficiency: self.analytics().efficiency_score(),
            context_used: context.is_some(),
            fallback_used,
            parse_error,
            warnings,
            errors: Vec::new(),
        };

        Ok(TitleResult {
            titles,
            diagnostics,
        })
    }
}
