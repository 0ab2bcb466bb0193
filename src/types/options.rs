//! Completion options

use serde::{Deserialize, Serialize};

/// Nucleus sampling threshold applied to every completion call.
pub const DEFAULT_TOP_P: f32 = 0.9;
/// Frequency penalty applied to every completion call.
pub const DEFAULT_FREQUENCY_PENALTY: f32 = 0.6;
/// Presence penalty applied to every completion call.
pub const DEFAULT_PRESENCE_PENALTY: f32 = 0.4;

/// Options for a single completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionOptions {
    pub model: String,
    pub max_tokens: usize,
    pub temperature: f32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

impl CompletionOptions {
    /// Options for `model` with the fixed sampling parameters.
    pub fn new(model: impl Into<String>, max_tokens: usize, temperature: f32) -> Self {
        Self {
            model: model.into(),
            max_tokens,
            temperature,
            top_p: DEFAULT_TOP_P,
            frequency_penalty: DEFAULT_FREQUENCY_PENALTY,
            presence_penalty: DEFAULT_PRESENCE_PENALTY,
        }
    }

    pub fn top_p(mut self, p: f32) -> Self {
        self.top_p = p;
        self
    }

    pub fn frequency_penalty(mut self, penalty: f32) -> Self {
        self.frequency_penalty = penalty;
        self
    }

    pub fn presence_penalty(mut self, penalty: f32) -> Self {
        self.presence_penalty = penalty;
        self
    }
}
