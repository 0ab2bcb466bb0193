//! Token counting and cost estimation.
//!
//! Token counts are a heuristic proxy (`max(words, ceil(chars / 3.5))`),
//! not a real tokenizer. The same function is used for prompts and
//! completions so cost comparisons stay consistent.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Flat cost charged for a call to a model missing from the table.
pub const DEFAULT_FLAT_COST: f64 = 0.02;

/// Approximate token count for `text`.
pub fn count_tokens(text: &str) -> usize {
    let words = text.split_whitespace().count();
    let by_chars = (text.chars().count() as f64 / 3.5).ceil() as usize;
    words.max(by_chars)
}

/// USD per 1000 tokens for one model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelRates {
    pub input: f64,
    pub output: f64,
}

impl ModelRates {
    pub const fn new(input: f64, output: f64) -> Self {
        Self { input, output }
    }
}

/// Per-model pricing table.
///
/// ```rust
/// # use eventsmith::{CostTable, ModelRates};
/// let table = CostTable::default().with_model("my-model", ModelRates::new(0.001, 0.002));
/// let cost = table.estimate(1000, 1000, "my-model");
/// assert!((cost - 0.003).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostTable {
    rates: HashMap<String, ModelRates>,
    /// Cost of a call to an unknown model.
    pub fallback_cost: f64,
}

impl Default for CostTable {
    fn default() -> Self {
        let rates = HashMap::from([
            ("gpt-3.5-turbo".to_string(), ModelRates::new(0.0005, 0.0015)),
            ("gpt-4".to_string(), ModelRates::new(0.03, 0.06)),
        ]);
        Self {
            rates,
            fallback_cost: DEFAULT_FLAT_COST,
        }
    }
}

impl CostTable {
    /// An empty table: every model uses the fallback cost.
    pub fn empty() -> Self {
        Self {
            rates: HashMap::new(),
            fallback_cost: DEFAULT_FLAT_COST,
        }
    }

    /// Add or replace the rates for `model`.
    pub fn with_model(mut self, model: impl Into<String>, rates: ModelRates) -> Self {
        self.rates.insert(model.into(), rates);
        self
    }

    /// Set the flat cost used for unknown models.
    pub fn fallback_cost(mut self, cost: f64) -> Self {
        self.fallback_cost = cost;
        self
    }

    pub fn rates(&self, model: &str) -> Option<ModelRates> {
        self.rates.get(model).copied()
    }

    /// Estimated USD cost of one call.
    pub fn estimate(&self, prompt_tokens: usize, completion_tokens: usize, model: &str) -> f64 {
        match self.rates(model) {
            Some(rates) => {
                rates.input * (prompt_tokens as f64 / 1000.0)
                    + rates.output * (completion_tokens as f64 / 1000.0)
            }
            None => self.fallback_cost,
        }
    }
}
