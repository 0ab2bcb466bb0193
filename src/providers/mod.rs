//! Completion providers and the retry layer around them.

pub mod openai;
pub mod retry;
pub mod traits;

pub use openai::OpenAiClient;
pub use retry::{RetryConfig, with_retry};
pub use traits::CompletionProvider;
