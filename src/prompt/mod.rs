//! Prompt construction and cost-mode shaping.

mod optimizer;
mod templates;

pub use optimizer::{
    BALANCED_REDUCTION, ECONOMY_REDUCTION, EMPHASIS_MARKERS, FILLER_PHRASES, PromptOptimizer,
};
pub use templates::{
    EventBrief, MAX_TITLE_WORDS, MIN_TITLE_WORDS, PromptPlan, description_prompt,
    extension_prompt, title_examples, title_prompt, title_retry_prompt,
};
