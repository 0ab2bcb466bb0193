//! The cache-or-provider call primitive.

use std::time::{Duration, Instant};

use tracing::{debug, instrument, warn};

use super::GenerationEngine;
use crate::Result;
use crate::analytics::RequestRecord;
use crate::cache::completion_key;
use crate::cost::count_tokens;
use crate::prompt::{PromptOptimizer, PromptPlan};
use crate::providers::with_retry;
use crate::telemetry;
use crate::types::{CompletionOptions, CostMode, Message};

/// What one call through the primitive produced.
#[derive(Debug, Clone, PartialEq)]
pub struct CallOutcome {
    /// Trimmed completion text.
    pub text: String,
    pub from_cache: bool,
    /// Estimated spend; zero on a cache hit.
    pub cost: f64,
    /// Tokens of the optimized prompts; zero on a cache hit.
    pub prompt_tokens: usize,
    /// Tokens of the completion; zero on a cache hit.
    pub completion_tokens: usize,
    pub elapsed: Duration,
}

impl GenerationEngine {
    /// Run one completion through the response cache.
    ///
    /// Both prompts are optimized for `mode` before they are hashed or sent.
    /// A cache hit records a zero-cost analytics entry and skips the
    /// network. A miss calls the provider under the retry policy; the
    /// trimmed text is cached and its cost recorded. When every attempt
    /// fails the error is recorded in analytics and returned.
    #[instrument(
        name = "eventsmith.call",
        skip_all,
        fields(
            model = %self.model,
            provider = self.provider.name(),
            mode = %mode,
            max_tokens = max_tokens,
        )
    )]
    pub async fn call(
        &self,
        system: &str,
        user: &str,
        max_tokens: usize,
        temperature: f32,
        mode: CostMode,
    ) -> Result<CallOutcome> {
        let system = PromptOptimizer::optimize(system, mode);
        let user = PromptOptimizer::optimize(user, mode);
        let options = CompletionOptions::new(self.model.clone(), max_tokens, temperature);
        let key = completion_key(&system, &user, &options);
        let analytics = self.analytics();
        let start = Instant::now();

        // An empty completion is never served from cache.
        if let Some(text) = self.cache.get(&key).filter(|text| !text.is_empty()) {
            let elapsed = start.elapsed();
            debug!(key = %key, "response cache hit");
            metrics::histogram!(telemetry::REQUEST_DURATION_SECONDS, "source" => "cache")
                .record(elapsed.as_secs_f64());
            analytics.record_request(RequestRecord::cache_hit(elapsed));
            return Ok(CallOutcome {
                text,
                from_cache: true,
                cost: 0.0,
                prompt_tokens: 0,
                completion_tokens: 0,
                elapsed,
            });
        }

        let messages = [Message::system(system.as_str()), Message::user(user.as_str())];
        let provider = self.provider.name();
        let result = with_retry(&self.retry, provider, || {
            self.provider.complete(&messages, &options)
        })
        .await;
        let elapsed = start.elapsed();
        metrics::histogram!(telemetry::REQUEST_DURATION_SECONDS, "source" => "provider")
            .record(elapsed.as_secs_f64());

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, attempts = self.retry.max_attempts, "completion failed");
                metrics::counter!(telemetry::REQUESTS_TOTAL,
                    "provider" => provider.to_owned(),
                    "status" => "error",
                )
                .increment(1);
                analytics.record_request(RequestRecord::failed(elapsed));
                return Err(e);
            }
        };

        let text = response.content.trim().to_string();
        if text.is_empty() {
            debug!(key = %key, "empty completion, not caching");
        } else {
            self.cache.set(&key, &text);
        }

        let prompt_tokens = count_tokens(&system) + count_tokens(&user);
        let completion_tokens = count_tokens(&text);
        let cost = self
            .costs
            .estimate(prompt_tokens, completion_tokens, &self.model);

        metrics::counter!(telemetry::REQUESTS_TOTAL,
            "provider" => provider.to_owned(),
            "status" => "ok",
        )
        .increment(1);
        metrics::counter!(telemetry::TOKENS_TOTAL, "direction" => "prompt")
            .increment(prompt_tokens as u64);
        metrics::counter!(telemetry::TOKENS_TOTAL, "direction" => "completion")
            .increment(completion_tokens as u64);
        metrics::counter!(telemetry::COST_MICRO_USD_TOTAL).increment((cost * 1e6).round() as u64);

        analytics.record_request(RequestRecord::completed(
            cost,
            (prompt_tokens + completion_tokens) as u64,
            elapsed,
        ));
        debug!(
            key = %key,
            prompt_tokens,
            completion_tokens,
            cost,
            "response cached"
        );

        Ok(CallOutcome {
            text,
            from_cache: false,
            cost,
            prompt_tokens,
            completion_tokens,
            elapsed,
        })
    }

    pub(crate) async fn call_plan(&self, plan: &PromptPlan, mode: CostMode) -> Result<CallOutcome> {
        self.call(&plan.system, &plan.user, plan.max_tokens, plan.temperature, mode)
            .await
    }
}

/// Per-request tally across every call a pipeline makes.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct CallTally {
    pub provider_calls: u32,
    pub cached_calls: u32,
    pub incremental_cost: f64,
}

impl CallTally {
    pub fn add(&mut self, outcome: &CallOutcome) {
        if outcome.from_cache {
            self.cached_calls += 1;
        } else {
            self.provider_calls += 1;
            self.incremental_cost += outcome.cost;
        }
    }
}
