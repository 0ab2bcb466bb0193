//! Provider trait for chat-completion backends.
//!
//! The generation engine talks to the model through [`CompletionProvider`]
//! only, so tests can substitute scripted providers and alternative
//! backends can be plugged in without touching the engine.

use async_trait::async_trait;

use crate::Result;
use crate::types::{ChatResponse, CompletionOptions, Message};

/// Backend that turns a message list into a single completion.
///
/// Implementations perform exactly one attempt per call; retry and caching
/// are layered on top by the engine.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name for logging/metrics.
    fn name(&self) -> &str;

    /// Run one chat completion.
    async fn complete(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<ChatResponse>;
}
