//! Demo/fallback responder.
//!
//! When no provider is configured, or every configured provider fails, text
//! chat is answered from a fixed keyword table instead of an error. The
//! caller-visible contract is identical to a real provider success, which
//! keeps the endpoint testable without network access and ensures a
//! well-formed request never hard-fails.

use crate::telemetry;
use crate::types::ProviderResponse;

/// Responder name reported in [`ProviderResponse::provider`].
pub const DEMO_PROVIDER_NAME: &str = "demo";

/// Keyword table, checked in priority order; first match wins.
/// Matching is lowercase substring against the raw (unshaped) prompt.
const KEYWORD_REPLIES: &[(&[&str], &str)] = &[
    (
        &["hello", "hi"],
        "Hello! Ready to explore Novus? Ask me about articles, trending topics, or the site itself.",
    ),
    (
        &["who are you", "your name"],
        "I'm Novee, your AI partner here at Novus Exchange. My advanced brain is offline right now, but my heart is still here.",
    ),
    (
        &["article"],
        "The Feed is stocked with articles on global finance, AI trends, and geopolitics. Head to the articles section and pick a thread.",
    ),
    (
        &["trend"],
        "The trending board tracks high-impact global stories: AI regulation, quantum computing, resource futures. The full analysis is one click away.",
    ),
    (
        &["image"],
        "Image features need a connected provider, and I'm running without one at the moment. Text questions are fair game though.",
    ),
];

/// Reply when no keyword matches.
const DEFAULT_REPLY: &str =
    "I can help you navigate Novus Exchange: ask about articles, trending topics, or what the site is all about.";

/// Deterministic canned responder for demo mode and cascade exhaustion.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoResponder;

impl DemoResponder {
    /// Produce a canned reply for the given prompt.
    ///
    /// Deterministic: the same prompt always yields the same reply.
    pub fn respond(&self, prompt: Option<&str>) -> ProviderResponse {
        metrics::counter!(telemetry::DEMO_RESPONSES_TOTAL).increment(1);

        let lowered = prompt.unwrap_or_default().to_lowercase();
        let reply = KEYWORD_REPLIES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
            .map(|(_, reply)| *reply)
            .unwrap_or(DEFAULT_REPLY);

        ProviderResponse::text(reply, DEMO_PROVIDER_NAME)
    }
}
