//! Eventsmith - cost-aware LLM copywriting for events
//!
//! This crate generates event titles and descriptions through a chat
//! completion API. Prompts are shaped per [`CostMode`], responses are cached
//! in a two-layer content-addressed cache, malformed or short output is
//! repaired by retries and deterministic fallbacks, and every call feeds a
//! rolling [`PerformanceAnalytics`] aggregate.
//!
//! # Titles Example
//!
//! ```rust,no_run
//! use eventsmith::{CostMode, Eventsmith, TitleRequest};
//!
//! #[tokio::main]
//! async fn main() -> eventsmith::Result<()> {
//!     let engine = Eventsmith::builder()
//!         .openai("sk-your-key")
//!         .build()?;
//!
//!     let result = engine
//!         .generate_titles(
//!             &TitleRequest::new("Technology", "Conference", "Professional")
//!                 .count(3)
//!                 .cost_mode(CostMode::Economy),
//!         )
//!         .await?;
//!
//!     for title in &result.titles {
//!         println!("{title}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Description Example
//!
//! ```rust,no_run
//! use eventsmith::{DescriptionRequest, Eventsmith};
//!
//! #[tokio::main]
//! async fn main() -> eventsmith::Result<()> {
//!     let engine = Eventsmith::builder()
//!         .openai("sk-your-key")
//!         .build()?;
//!
//!     let result = engine
//!         .generate_description(
//!             &DescriptionRequest::new(
//!                 "Tech Leadership Summit",
//!                 "Technology",
//!                 "Conference",
//!                 "Professional",
//!             )
//!             .max_chars(800),
//!         )
//!         .await;
//!
//!     println!("{}", result.description);
//!     println!("{:.1}% of target", result.diagnostics.target_utilization);
//!     Ok(())
//! }
//! ```

pub mod advice;
pub mod analytics;
pub mod cache;
pub mod config;
pub mod cost;
pub mod engine;
pub mod error;
pub mod fuzzy;
pub mod prompt;
pub mod providers;
pub mod telemetry;
pub mod types;

// Re-export main types at crate root
pub use analytics::{AnalyticsMetrics, AnalyticsReport, PerformanceAnalytics, RequestRecord};
pub use cache::{CacheConfig, LayeredCache};
pub use config::{Config, Secrets};
pub use cost::{CostTable, ModelRates, count_tokens};
pub use engine::{CallOutcome, Eventsmith, EventsmithBuilder, GenerationEngine};
pub use error::{EventsmithError, Result};
pub use fuzzy::fuzzy_correct;
pub use prompt::PromptOptimizer;
pub use providers::{CompletionProvider, OpenAiClient, RetryConfig};

// Re-export all types
pub use types::{
    ChatResponse, CompletionOptions, CostMode, DescriptionDiagnostics, DescriptionRequest,
    DescriptionResult, Message, Role, TitleDiagnostics, TitleRequest, TitleResult, Usage,
};
