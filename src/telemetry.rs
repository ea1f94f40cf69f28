//! Telemetry metric name constants.
//!
//! Centralised metric names for gateway operations. Consumers install their
//! own `metrics` recorder (e.g. prometheus, statsd); without a recorder
//! installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `novus_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `provider` — provider name (e.g. "gemini", "openai", "demo")
//! - `operation` — classified operation ("chat", "image_analysis", "image_generation")
//! - `status` — outcome: "ok" or "error"

/// Total requests dispatched through the cascade.
///
/// Labels: `provider`, `operation`, `status` ("ok" | "error").
pub const REQUESTS_TOTAL: &str = "novus_requests_total";

/// Duration of a single provider attempt in seconds. Each cascade step
/// records its own timing, so a request that falls through several
/// providers emits one sample per attempt.
///
/// Labels: `provider`, `operation`.
pub const REQUEST_DURATION_SECONDS: &str = "novus_request_duration_seconds";

/// Total article sets produced by a live provider.
pub const ARTICLES_GENERATED_TOTAL: &str = "novus_articles_generated_total";

/// Total article requests served from the curated fallback set.
pub const ARTICLES_FALLBACK_TOTAL: &str = "novus_articles_fallback_total";

/// Total requests answered by the demo responder.
pub const DEMO_RESPONSES_TOTAL: &str = "novus_demo_responses_total";

/// Total trend cache hits.
pub const TREND_CACHE_HITS_TOTAL: &str = "novus_trend_cache_hits_total";

/// Total trend cache misses (stale or absent entries).
pub const TREND_CACHE_MISSES_TOTAL: &str = "novus_trend_cache_misses_total";
