//! Shared fixtures for engine integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tempfile::TempDir;

use eventsmith::{
    CacheConfig, ChatResponse, CompletionOptions, CompletionProvider, Eventsmith, EventsmithError,
    GenerationEngine, Message, Result, RetryConfig,
};

/// Provider that replays a fixed script of replies, one per call.
///
/// Once the script runs out every call fails with a 500.
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<String>>>,
    calls: AtomicU32,
    user_prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new(replies: impl IntoIterator<Item = Result<String>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().collect()),
            calls: AtomicU32::new(0),
            user_prompts: Mutex::new(Vec::new()),
        })
    }

    /// Script of successful replies.
    pub fn replying<S: Into<String>>(replies: impl IntoIterator<Item = S>) -> Arc<Self> {
        Self::new(replies.into_iter().map(|r| Ok(r.into())))
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// User prompts received, in call order.
    pub fn user_prompts(&self) -> Vec<String> {
        self.user_prompts.lock().clone()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(
        &self,
        messages: &[Message],
        _options: &CompletionOptions,
    ) -> Result<ChatResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(user) = messages.last() {
            self.user_prompts.lock().push(user.content.clone());
        }
        let reply = self.replies.lock().pop_front().unwrap_or_else(|| {
            Err(EventsmithError::Api {
                status: 500,
                message: "script exhausted".into(),
            })
        });
        reply.map(|content| ChatResponse {
            content,
            ..ChatResponse::default()
        })
    }
}

/// Retry policy that keeps tests fast.
pub fn fast_retry() -> RetryConfig {
    RetryConfig::new().initial_delay(Duration::from_millis(1))
}

/// Engine over `provider` with a private cache directory.
///
/// Keep the returned [`TempDir`] alive for the duration of the test.
pub fn engine_with(provider: Arc<ScriptedProvider>) -> (GenerationEngine, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let engine = Eventsmith::builder()
        .provider(provider)
        .cache_config(CacheConfig::new().dir(dir.path()))
        .retry(fast_retry())
        .build()
        .unwrap();
    (engine, dir)
}

/// Prose of roughly `chars` characters built from whole sentences.
pub fn prose(chars: usize) -> String {
    const SENTENCE: &str = "Join us for a day of talks and hands-on sessions. ";
    let mut text = String::new();
    while text.len() < chars {
        text.push_str(SENTENCE);
    }
    text.trim_end().to_string()
}
