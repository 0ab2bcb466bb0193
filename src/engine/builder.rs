//! Builder for configuring engine instances

use std::sync::Arc;
use std::time::Duration;

use super::GenerationEngine;
use crate::cache::{CacheConfig, LayeredCache};
use crate::config::{Config, Secrets};
use crate::cost::CostTable;
use crate::providers::openai::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::providers::{CompletionProvider, OpenAiClient, RetryConfig};
use crate::{EventsmithError, Result};

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Main entry point for creating engine instances.
pub struct Eventsmith;

impl Eventsmith {
    /// Create a new builder for configuring the engine.
    pub fn builder() -> EventsmithBuilder {
        EventsmithBuilder::new()
    }
}

/// Builder for configuring engine instances.
///
/// ```rust,no_run
/// # use eventsmith::{CacheConfig, Eventsmith};
/// let engine = Eventsmith::builder()
///     .openai("sk-...")
///     .cache_config(CacheConfig::new().dir("/tmp/eventsmith"))
///     .build()?;
/// # Ok::<(), eventsmith::EventsmithError>(())
/// ```
pub struct EventsmithBuilder {
    openai_key: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    model: Option<String>,
    cache_config: Option<CacheConfig>,
    cost_table: Option<CostTable>,
    retry: Option<RetryConfig>,
    provider: Option<Arc<dyn CompletionProvider>>,
}

impl Default for EventsmithBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EventsmithBuilder {
    pub fn new() -> Self {
        Self {
            openai_key: None,
            base_url: None,
            timeout_secs: None,
            model: None,
            cache_config: None,
            cost_table: None,
            retry: None,
            provider: None,
        }
    }

    /// Configure the OpenAI provider.
    pub fn openai(mut self, api_key: impl Into<String>) -> Self {
        self.openai_key = Some(api_key.into());
        self
    }

    /// Override the OpenAI base URL (proxies, compatible servers).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the per-attempt request timeout (seconds).
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn cache_config(mut self, config: CacheConfig) -> Self {
        self.cache_config = Some(config);
        self
    }

    pub fn cost_table(mut self, table: CostTable) -> Self {
        self.cost_table = Some(table);
        self
    }

    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.retry = Some(config);
        self
    }

    /// Use a custom provider instead of the OpenAI client.
    ///
    /// Takes precedence over [`openai`](Self::openai).
    pub fn provider(mut self, provider: Arc<dyn CompletionProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Apply a loaded [`Config`] and [`Secrets`].
    ///
    /// Settings made explicitly on the builder before this call are kept.
    pub fn from_config(mut self, config: &Config, secrets: &Secrets) -> Self {
        if self.openai_key.is_none() {
            self.openai_key = secrets.api_key();
        }
        self.base_url.get_or_insert_with(|| config.api.base_url.clone());
        self.timeout_secs.get_or_insert(config.api.timeout_secs);
        self.model.get_or_insert_with(|| config.api.model.clone());
        self.cache_config.get_or_insert_with(|| config.cache_config());
        self.cost_table.get_or_insert_with(|| config.cost_table());
        self.retry.get_or_insert_with(|| config.retry_config());
        self
    }

    /// Build the engine.
    ///
    /// Fails with a configuration error when neither a provider nor an API
    /// key was supplied.
    pub fn build(self) -> Result<GenerationEngine> {
        let provider: Arc<dyn CompletionProvider> = match (self.provider, self.openai_key) {
            (Some(provider), _) => provider,
            (None, Some(key)) => {
                let timeout = self
                    .timeout_secs
                    .map(Duration::from_secs)
                    .unwrap_or(DEFAULT_TIMEOUT);
                let base_url = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
                Arc::new(OpenAiClient::with_base_url(key, base_url, timeout)?)
            }
            (None, None) => {
                return Err(EventsmithError::Configuration(
                    "no completion provider configured; set OPENAI_API_KEY or add [openai] \
                     api_key to ~/.eventsmith/secrets.toml"
                        .into(),
                ));
            }
        };

        let cache = LayeredCache::new(&self.cache_config.unwrap_or_default());

        Ok(GenerationEngine::new(
            provider,
            Arc::new(cache),
            self.cost_table.unwrap_or_default(),
            self.retry.unwrap_or_default(),
            self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        ))
    }
}
