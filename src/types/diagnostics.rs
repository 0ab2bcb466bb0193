//! Generation results and their diagnostics records

use serde::{Deserialize, Serialize};

use super::CostMode;

/// Diagnostics for a title generation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TitleDiagnostics {
    pub prompt_tokens: usize,
    pub completion_tokens: usize,
    pub total_tokens: usize,
    pub elapsed_secs: f64,
    /// Nominal cost of the primary prompt and completion.
    pub estimated_cost: f64,
    /// Titles per dollar of nominal cost.
    pub efficiency: f64,
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub retry_count: u32,
    pub titles_requested: usize,
    pub titles_generated: usize,
    /// The primary call was served from the response cache.
    pub cache_hit: bool,
    /// Spend actually incurred by provider calls in this request.
    pub incremental_cost: f64,
    pub provider_calls: u32,
    pub cached_calls: u32,
    /// Global efficiency score at the end of the request.
    pub overall_efficiency: f64,
    pub context_used: bool,
    pub fallback_used: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse_error: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// Diagnostics for a description generation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DescriptionDiagnostics {
    pub prompt_tokens: usize,
    pub completion_tokens: usize,
    pub total_tokens: usize,
    pub elapsed_secs: f64,
    pub estimated_cost: f64,
    pub cost_per_char: f64,
    /// Characters per dollar of nominal cost.
    pub char_efficiency: f64,
    /// Final length as a percentage of `max_chars`.
    pub target_utilization: f64,
    pub cost_mode: CostMode,
    /// Generated text was under 60% of the budget before truncation.
    pub shorter_than_requested: bool,
    pub max_chars: usize,
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub context_used: bool,
    pub extended: bool,
    pub truncated: bool,
    pub cache_hit: bool,
    pub incremental_cost: f64,
    pub provider_calls: u32,
    pub cached_calls: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// Titles plus diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleResult {
    pub titles: Vec<String>,
    pub diagnostics: TitleDiagnostics,
}

/// Description plus diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescriptionResult {
    pub description: String,
    pub diagnostics: DescriptionDiagnostics,
}

impl TitleResult {
    /// Whether the request was rejected before any API call.
    pub fn is_rejected(&self) -> bool {
        !self.diagnostics.errors.is_empty()
    }
}

impl DescriptionResult {
    /// Whether the request failed validation or the primary call failed.
    pub fn is_failed(&self) -> bool {
        !self.diagnostics.errors.is_empty()
    }
}
