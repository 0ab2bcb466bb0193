//! The generation engine: titles, descriptions and the call primitive
//! they share.

mod builder;
mod call;
mod decode;
mod description;
mod titles;
mod validation;

use std::sync::Arc;

use parking_lot::RwLock;

use crate::analytics::{AnalyticsReport, PerformanceAnalytics};
use crate::cache::LayeredCache;
use crate::cost::CostTable;
use crate::providers::{CompletionProvider, RetryConfig};

pub use builder::{DEFAULT_MODEL, Eventsmith, EventsmithBuilder};
pub use call::CallOutcome;
pub use validation::{
    CATEGORY_PLACEHOLDER, CONTEXT_WARN_CHARS, EVENT_TYPE_PLACEHOLDER, TONE_PLACEHOLDER,
};

/// Orchestrates prompt shaping, caching, retries and analytics around a
/// [`CompletionProvider`].
///
/// Cheap to share behind an `Arc`; every method takes `&self`. The cache and
/// the analytics aggregate serialise their own updates.
pub struct GenerationEngine {
    provider: Arc<dyn CompletionProvider>,
    cache: Arc<LayeredCache>,
    analytics: RwLock<Arc<PerformanceAnalytics>>,
    costs: CostTable,
    retry: RetryConfig,
    model: String,
}

impl GenerationEngine {
    pub(crate) fn new(
        provider: Arc<dyn CompletionProvider>,
        cache: Arc<LayeredCache>,
        costs: CostTable,
        retry: RetryConfig,
        model: String,
    ) -> Self {
        Self {
            provider,
            cache,
            analytics: RwLock::new(Arc::new(PerformanceAnalytics::new())),
            costs,
            retry,
            model,
        }
    }

    /// Model name sent with every completion request.
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn cache(&self) -> &LayeredCache {
        &self.cache
    }

    pub fn cost_table(&self) -> &CostTable {
        &self.costs
    }

    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    /// The aggregator currently receiving records.
    pub fn analytics(&self) -> Arc<PerformanceAnalytics> {
        self.analytics.read().clone()
    }

    /// Swap in a fresh aggregator. Requests already holding the old one
    /// finish recording into it; every later request sees the new one.
    pub fn reset_analytics(&self) {
        *self.analytics.write() = Arc::new(PerformanceAnalytics::new());
    }

    /// Snapshot of the aggregate plus recommendations.
    pub fn global_analytics(&self) -> AnalyticsReport {
        self.analytics().report()
    }
}

impl std::fmt::Debug for GenerationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationEngine")
            .field("provider", &self.provider.name())
            .field("model", &self.model)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}
