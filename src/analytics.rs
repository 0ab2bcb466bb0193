//! Rolling performance analytics.
//!
//! [`PerformanceAnalytics`] aggregates every call made through the call
//! primitive: request and cache-hit counts, spend, tokens, mean latency and
//! error rate. From those it derives a 0–100 efficiency score and a list of
//! human-readable recommendations.
//!
//! The aggregator is an explicit instance owned by the
//! [`GenerationEngine`](crate::GenerationEngine); resetting replaces the
//! instance rather than clearing shared global state.

use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Per-request cost that scores zero on cost efficiency.
const COST_CEILING: f64 = 0.005;
/// Mean latency (seconds) that scores zero on speed efficiency.
const LATENCY_CEILING_SECS: f64 = 15.0;
/// Mean tokens per request that score zero on token efficiency.
const TOKEN_CEILING: f64 = 2000.0;

const CACHE_WEIGHT: f64 = 0.25;
const COST_WEIGHT: f64 = 0.25;
const SPEED_WEIGHT: f64 = 0.20;
const ERROR_WEIGHT: f64 = 0.20;
const TOKEN_WEIGHT: f64 = 0.10;

/// Assumed spend avoided by each cache hit, in USD.
pub const SAVINGS_PER_HIT: f64 = 0.002;

/// Outcome of one call through the call primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequestRecord {
    pub cost: f64,
    pub tokens: u64,
    pub response_time: Duration,
    pub from_cache: bool,
    pub error: bool,
}

impl RequestRecord {
    /// A call answered from the response cache.
    pub fn cache_hit(response_time: Duration) -> Self {
        Self {
            cost: 0.0,
            tokens: 0,
            response_time,
            from_cache: true,
            error: false,
        }
    }

    /// A successful provider call.
    pub fn completed(cost: f64, tokens: u64, response_time: Duration) -> Self {
        Self {
            cost,
            tokens,
            response_time,
            from_cache: false,
            error: false,
        }
    }

    /// A provider call that failed after exhausting its retries.
    pub fn failed(response_time: Duration) -> Self {
        Self {
            cost: 0.0,
            tokens: 0,
            response_time,
            from_cache: false,
            error: true,
        }
    }
}

/// Running aggregate. `cache_hits <= total_requests` always holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsMetrics {
    pub total_requests: u64,
    pub cache_hits: u64,
    /// USD spent on provider calls (cache hits add nothing).
    pub total_cost: f64,
    /// Tokens spent on provider calls (cache hits add nothing).
    pub total_tokens: u64,
    /// Mean latency in seconds over all requests, hits included.
    pub avg_response_time: f64,
    /// Fraction of all requests that ended in an error.
    pub error_rate: f64,
}

impl AnalyticsMetrics {
    /// Fold one request into the aggregate.
    pub fn record(&mut self, record: &RequestRecord) {
        self.total_requests += 1;
        if record.from_cache {
            self.cache_hits += 1;
        } else {
            self.total_cost += record.cost;
            self.total_tokens += record.tokens;
        }

        let n = self.total_requests as f64;
        let latency = record.response_time.as_secs_f64();
        self.avg_response_time += (latency - self.avg_response_time) / n;
        let indicator = if record.error { 1.0 } else { 0.0 };
        self.error_rate += (indicator - self.error_rate) / n;
    }

    pub fn cache_hit_rate(&self) -> f64 {
        if self.total_requests == 0 {
            return 0.0;
        }
        (self.cache_hits as f64 / self.total_requests as f64).min(1.0)
    }

    /// Mean spend per request.
    pub fn avg_cost(&self) -> f64 {
        self.total_cost / self.total_requests.max(1) as f64
    }

    /// Mean tokens per request.
    pub fn avg_tokens(&self) -> f64 {
        self.total_tokens as f64 / self.total_requests.max(1) as f64
    }

    /// Composite 0–100 score; 0 when nothing has been recorded.
    ///
    /// Weighted sum of five sub-scores, each in `[0, 1]` with higher meaning
    /// better: cache hit rate (0.25), cost per request against $0.005
    /// (0.25), mean latency against 15 s (0.20), error rate (0.20) and
    /// tokens per request against 2000 (0.10).
    pub fn efficiency_score(&self) -> f64 {
        if self.total_requests == 0 {
            return 0.0;
        }
        let cache = self.cache_hit_rate();
        let cost = (1.0 - (self.avg_cost() / COST_CEILING).min(1.0)).max(0.0);
        let speed = (1.0 - (self.avg_response_time / LATENCY_CEILING_SECS).min(1.0)).max(0.0);
        let errors = (1.0 - self.error_rate).clamp(0.0, 1.0);
        let tokens = (1.0 - (self.avg_tokens() / TOKEN_CEILING).min(1.0)).max(0.0);

        let score = CACHE_WEIGHT * cache
            + COST_WEIGHT * cost
            + SPEED_WEIGHT * speed
            + ERROR_WEIGHT * errors
            + TOKEN_WEIGHT * tokens;
        (score * 100.0).clamp(0.0, 100.0)
    }

    /// Rule-based suggestions derived from the current aggregate.
    pub fn recommendations(&self) -> Vec<String> {
        let mut out = Vec::new();

        let cache_rate = self.cache_hit_rate();
        if cache_rate < 0.2 {
            out.push(
                "Use similar content parameters to boost cache efficiency (target: 60%+)".into(),
            );
        } else if cache_rate < 0.5 {
            out.push("Good cache performance - try reusing successful prompts".into());
        }

        let avg_cost = self.avg_cost();
        if avg_cost > 0.008 {
            out.push("High cost per request - switch to economy mode to reduce spend".into());
        } else if avg_cost > 0.005 {
            out.push("Moderate costs - consider economy mode for non-critical requests".into());
        }

        if self.avg_response_time > 8.0 {
            out.push("Slow responses detected - cache hits will improve this significantly".into());
        } else if self.avg_response_time > 5.0 {
            out.push("Response time acceptable - will improve with cache hits".into());
        }

        if self.avg_tokens() > 1500.0 {
            out.push("High token usage - use economy mode to shrink prompts".into());
        }

        if self.error_rate > 0.05 {
            out.push("Errors detected - verify the API key and network stability".into());
        }

        let score = self.efficiency_score();
        out.push(
            if score > 80.0 {
                "Excellent performance - system optimized"
            } else if score > 60.0 {
                "Good performance - minor optimizations available"
            } else if score > 40.0 {
                "Moderate efficiency - implement caching strategies"
            } else {
                "Low efficiency - review cost mode and enable caching"
            }
            .into(),
        );

        out
    }
}

/// Point-in-time view of the aggregate for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub metrics: AnalyticsMetrics,
    pub cache_hit_rate: f64,
    pub efficiency_score: f64,
    /// Estimated USD avoided by cache hits.
    pub cost_savings: f64,
    pub recommendations: Vec<String>,
}

/// Thread-safe aggregator; updates are serialised through a mutex.
#[derive(Debug, Default)]
pub struct PerformanceAnalytics {
    metrics: Mutex<AnalyticsMetrics>,
}

impl PerformanceAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self, record: RequestRecord) {
        self.metrics.lock().record(&record);
    }

    /// Copy of the current aggregate.
    pub fn snapshot(&self) -> AnalyticsMetrics {
        self.metrics.lock().clone()
    }

    pub fn efficiency_score(&self) -> f64 {
        self.metrics.lock().efficiency_score()
    }

    /// Replace the aggregate with a zeroed one.
    pub fn reset(&self) {
        *self.metrics.lock() = AnalyticsMetrics::default();
    }

    pub fn report(&self) -> AnalyticsReport {
        let metrics = self.snapshot();
        AnalyticsReport {
            cache_hit_rate: metrics.cache_hit_rate(),
            efficiency_score: metrics.efficiency_score(),
            cost_savings: metrics.cache_hits as f64 * SAVINGS_PER_HIT,
            recommendations: metrics.recommendations(),
            metrics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn empty_score_is_zero() {
        assert_eq!(AnalyticsMetrics::default().efficiency_score(), 0.0);
    }

    #[test]
    fn cache_hits_do_not_add_cost_or_tokens() {
        let mut m = AnalyticsMetrics::default();
        m.record(&RequestRecord::completed(0.01, 500, secs(2.0)));
        let before = (m.total_cost, m.total_tokens);
        m.record(&RequestRecord {
            cost: 99.0,
            tokens: 99,
            response_time: secs(0.0),
            from_cache: true,
            error: false,
        });
        assert_eq!((m.total_cost, m.total_tokens), before);
        assert_eq!(m.cache_hits, 1);
        assert_eq!(m.total_requests, 2);
    }

    #[test]
    fn running_means_cover_all_requests() {
        let mut m = AnalyticsMetrics::default();
        m.record(&RequestRecord::completed(0.0, 0, secs(4.0)));
        m.record(&RequestRecord::cache_hit(secs(0.0)));
        m.record(&RequestRecord::failed(secs(2.0)));
        m.record(&RequestRecord::completed(0.0, 0, secs(2.0)));

        assert!((m.avg_response_time - 2.0).abs() < 1e-9);
        assert!((m.error_rate - 0.25).abs() < 1e-9);
    }

    #[test]
    fn perfect_run_scores_one_hundred() {
        let mut m = AnalyticsMetrics::default();
        for _ in 0..4 {
            m.record(&RequestRecord::cache_hit(Duration::ZERO));
        }
        assert!((m.efficiency_score() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn score_uses_documented_weights() {
        let mut m = AnalyticsMetrics::default();
        // one miss: cost 0.0025 (half of ceiling), 7.5s (half), 1000 tokens (half)
        m.record(&RequestRecord::completed(0.0025, 1000, secs(7.5)));
        // cache 0, cost 0.5, speed 0.5, errors 1, tokens 0.5
        let expected = 100.0 * (0.25 * 0.0 + 0.25 * 0.5 + 0.20 * 0.5 + 0.20 * 1.0 + 0.10 * 0.5);
        assert!((m.efficiency_score() - expected).abs() < 1e-9);
    }

    #[test]
    fn score_rises_with_hit_ratio() {
        let mut low = AnalyticsMetrics::default();
        low.record(&RequestRecord::completed(0.001, 100, secs(1.0)));
        low.record(&RequestRecord::completed(0.001, 100, secs(1.0)));

        let mut high = AnalyticsMetrics::default();
        high.record(&RequestRecord::completed(0.001, 100, secs(1.0)));
        high.record(&RequestRecord::cache_hit(secs(1.0)));

        assert!(high.efficiency_score() > low.efficiency_score());
    }

    #[test]
    fn score_stays_in_range_under_extremes() {
        let mut m = AnalyticsMetrics::default();
        for _ in 0..5 {
            m.record(&RequestRecord::completed(10.0, 1_000_000, secs(120.0)));
            m.record(&RequestRecord::failed(secs(120.0)));
        }
        let score = m.efficiency_score();
        assert!((0.0..=100.0).contains(&score));
        assert_eq!(score, 10.0); // only the error sub-score (0.5) contributes
    }

    #[test]
    fn reset_zeroes_everything() {
        let analytics = PerformanceAnalytics::new();
        analytics.record_request(RequestRecord::completed(0.01, 10, secs(1.0)));
        analytics.reset();
        assert_eq!(analytics.snapshot(), AnalyticsMetrics::default());
    }

    #[test]
    fn recommendations_flag_errors_and_low_cache() {
        let analytics = PerformanceAnalytics::new();
        analytics.record_request(RequestRecord::failed(secs(9.0)));
        let report = analytics.report();
        let recs = report.recommendations.join("\n");
        assert!(recs.contains("boost cache efficiency"));
        assert!(recs.contains("Slow responses"));
        assert!(recs.contains("verify the API key"));
        assert!(recs.contains("Low efficiency"));
    }

    #[test]
    fn report_estimates_savings_from_hits() {
        let analytics = PerformanceAnalytics::new();
        analytics.record_request(RequestRecord::cache_hit(Duration::ZERO));
        analytics.record_request(RequestRecord::cache_hit(Duration::ZERO));
        let report = analytics.report();
        assert!((report.cost_savings - 0.004).abs() < 1e-12);
        assert_eq!(report.cache_hit_rate, 1.0);
    }
}
