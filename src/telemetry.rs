//! Telemetry metric name constants.
//!
//! Centralised metric names for eventsmith operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `eventsmith_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `provider` — completion provider name (e.g. "openai")
//! - `status` — outcome: "ok" or "error"
//! - `direction` — token direction: "prompt" or "completion"
//! - `layer` — cache layer that served a hit: "memory" or "disk"

/// Total completion calls that reached the provider (cache misses).
///
/// Labels: `provider`, `status` ("ok" | "error").
pub const REQUESTS_TOTAL: &str = "eventsmith_requests_total";

/// Wall-clock duration of the call primitive in seconds, hits included.
///
/// Labels: `source` ("cache" | "provider").
pub const REQUEST_DURATION_SECONDS: &str = "eventsmith_request_duration_seconds";

/// Total retry attempts (not counting the initial request).
///
/// Labels: `provider`.
pub const RETRIES_TOTAL: &str = "eventsmith_retries_total";

/// Total estimated tokens consumed.
///
/// Labels: `direction` ("prompt" | "completion").
pub const TOKENS_TOTAL: &str = "eventsmith_tokens_total";

/// Total estimated spend in micro-dollars.
pub const COST_MICRO_USD_TOTAL: &str = "eventsmith_cost_micro_usd_total";

/// Total response cache hits.
///
/// Labels: `layer` ("memory" | "disk").
pub const CACHE_HITS_TOTAL: &str = "eventsmith_cache_hits_total";

/// Total response cache misses.
pub const CACHE_MISSES_TOTAL: &str = "eventsmith_cache_misses_total";

/// Total cache entries dropped because their TTL had elapsed.
pub const CACHE_EXPIRED_TOTAL: &str = "eventsmith_cache_expired_total";
