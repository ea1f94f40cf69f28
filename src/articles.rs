//! AI-written article feed.
//!
//! Articles for The Feed are generated through the same provider cascade
//! as chat: one prompt asks the live provider for three articles as a
//! JSON array, the reply is stripped of Markdown code fences (models wrap
//! JSON in ```json fences despite being told not to), and parsed. Any
//! failure along the way, including demo mode, serves the curated static
//! set instead. The endpoint never errors.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::gateway::Gateway;
use crate::telemetry;
use crate::types::ChatRequest;

/// Prompt sent upstream when generating the feed.
const GENERATION_PROMPT: &str = r#"Generate 3 high-quality, realistic news articles for a "Novus Exchange" website.
Topics: AI, Economics, Geopolitics.
Format as a valid JSON array of objects with keys:
"id" (string), "title" (string), "category" (string), "summary" (string),
"fullText" (html string, at least 2 paragraphs), "author" (string), "date" (YYYY-MM-DD), "readTime" (string),
"image" (use placeholder URL https://placehold.co/1920x1080/1a1a1a/ffffff?text=Topic).
Do NOT use Markdown. Return ONLY the JSON string."#;

/// One article in The Feed.
///
/// Field-level defaults keep parsing lenient: a model that drops a minor
/// key still yields a usable set instead of falling back wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Article {
    pub id: String,
    pub image: String,
    pub category: String,
    pub title: String,
    pub summary: String,
    pub author: String,
    pub date: String,
    pub read_time: String,
    pub full_text: String,
}

/// Produce the article set, falling back to the curated articles on any
/// failure. Never errors.
///
/// Demo mode short-circuits to the fallback: the demo responder answers
/// chat prompts but cannot produce a parseable article feed.
pub async fn generate(gateway: &Gateway) -> Vec<Article> {
    if !gateway.has_providers() {
        metrics::counter!(telemetry::ARTICLES_FALLBACK_TOTAL).increment(1);
        return curated_articles();
    }

    let reply = match gateway.handle(&ChatRequest::text(GENERATION_PROMPT)).await {
        Ok(response) => response.text,
        Err(e) => {
            warn!(error = %e, "article generation failed, serving curated set");
            metrics::counter!(telemetry::ARTICLES_FALLBACK_TOTAL).increment(1);
            return curated_articles();
        }
    };

    match serde_json::from_str::<Vec<Article>>(&strip_code_fences(&reply)) {
        Ok(articles) if !articles.is_empty() => {
            metrics::counter!(telemetry::ARTICLES_GENERATED_TOTAL).increment(1);
            articles
        }
        Ok(_) => {
            warn!("provider returned an empty article set, serving curated set");
            metrics::counter!(telemetry::ARTICLES_FALLBACK_TOTAL).increment(1);
            curated_articles()
        }
        Err(e) => {
            warn!(error = %e, "article reply was not valid JSON, serving curated set");
            metrics::counter!(telemetry::ARTICLES_FALLBACK_TOTAL).increment(1);
            curated_articles()
        }
    }
}

/// Remove Markdown code fences a model may have wrapped the JSON in.
fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// The curated static article set used when no provider can generate one.
pub fn curated_articles() -> Vec<Article> {
    vec![
        Article {
            id: "1".into(),
            image: "https://placehold.co/1920x1080/1f2937/9ca3af?text=AI+in+Finance".into(),
            category: "Artificial Intelligence".into(),
            title: "The New Wave: How Generative AI is Reshaping Financial Markets".into(),
            summary: "From algorithmic trading to risk assessment, AI is no longer just a tool, \
                      it's becoming the architect."
                .into(),
            author: "Marcio Rodrigues".into(),
            date: "2025-11-08".into(),
            read_time: "7 min read".into(),
            full_text: "<p>Generative AI is rapidly moving from a theoretical concept to a \
                        practical powerhouse...</p>"
                .into(),
        },
        Article {
            id: "2".into(),
            image: "https://placehold.co/1920x1080/1e3a8a/60a5fa?text=Global+Supply+Chain".into(),
            category: "Economics".into(),
            title: "The Great Unwinding: Are Global Supply Chains Permanently Broken?".into(),
            summary: "A deep dive into the post-pandemic shifts that are forcing companies to \
                      rethink \"just-in-time\" manufacturing."
                .into(),
            author: "Marcio Rodrigues".into(),
            date: "2025-11-05".into(),
            read_time: "6 min read".into(),
            full_text: "<p>For decades, \"just-in-time\" (JIT) manufacturing was the gold \
                        standard...</p>"
                .into(),
        },
        Article {
            id: "3".into(),
            image: "https://placehold.co/1920x1080/3f6212/a3e635?text=Energy+Transition".into(),
            category: "Energy Markets".into(),
            title: "The Copper Conundrum: Why the Energy Transition Runs on a Red Metal".into(),
            summary: "The world needs to go green, but the green transition requires a massive, \
                      unprecedented amount of copper."
                .into(),
            author: "Marcio Rodrigues".into(),
            date: "2025-11-02".into(),
            read_time: "5 min read".into(),
            full_text: "<p>From wind turbines and solar panels to electric vehicles...</p>".into(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::providers::{Provider, ProviderCapabilities, ShapedRequest};
    use crate::types::ProviderResponse;
    use crate::{GatewayError, Result};

    /// Provider that always replies with the same canned text.
    struct StaticProvider {
        reply: &'static str,
        fail: bool,
    }

    impl StaticProvider {
        fn replying(reply: &'static str) -> Arc<Self> {
            Arc::new(Self { reply, fail: false })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self { reply: "", fail: true })
        }
    }

    #[async_trait]
    impl Provider for StaticProvider {
        fn name(&self) -> &str {
            "static"
        }

        fn capabilities(&self) -> ProviderCapabilities {
            ProviderCapabilities::text_only()
        }

        async fn invoke(&self, _request: &ShapedRequest<'_>) -> Result<ProviderResponse> {
            if self.fail {
                return Err(GatewayError::Http("connection reset".into()));
            }
            Ok(ProviderResponse::text(self.reply, self.name()))
        }
    }

    const VALID_REPLY: &str = r#"[{
        "id": "gen-1",
        "title": "Markets Hold Their Breath",
        "category": "Economics",
        "summary": "s",
        "fullText": "<p>a</p><p>b</p>",
        "author": "A. Writer",
        "date": "2025-11-10",
        "readTime": "4 min read",
        "image": "https://placehold.co/1920x1080/1a1a1a/ffffff?text=Economics"
    }]"#;

    #[test]
    fn code_fences_are_stripped() {
        assert_eq!(strip_code_fences("```json\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fences("```\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fences("  [1]  "), "[1]");
    }

    #[test]
    fn curated_set_has_three_articles() {
        let articles = curated_articles();
        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0].id, "1");
        assert!(articles[0].title.contains("Generative AI"));
    }

    #[test]
    fn missing_keys_fill_in_defaults() {
        let articles: Vec<Article> =
            serde_json::from_str(r#"[{"id": "x", "title": "Sparse"}]"#).unwrap();
        assert_eq!(articles[0].title, "Sparse");
        assert!(articles[0].author.is_empty());
    }

    #[tokio::test]
    async fn demo_mode_serves_the_curated_set() {
        let gateway = Gateway::builder().build();
        assert_eq!(generate(&gateway).await, curated_articles());
    }

    #[tokio::test]
    async fn provider_json_reply_is_parsed() {
        let gateway = Gateway::builder()
            .provider(StaticProvider::replying(VALID_REPLY))
            .build();

        let articles = generate(&gateway).await;
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Markets Hold Their Breath");
        assert_eq!(articles[0].read_time, "4 min read");
    }

    #[tokio::test]
    async fn fenced_json_reply_is_parsed() {
        // Leak a fenced copy so the provider can hold a 'static reply.
        let fenced: &'static str =
            Box::leak(format!("```json\n{VALID_REPLY}\n```").into_boxed_str());
        let gateway = Gateway::builder()
            .provider(StaticProvider::replying(fenced))
            .build();

        let articles = generate(&gateway).await;
        assert_eq!(articles[0].id, "gen-1");
    }

    #[tokio::test]
    async fn prose_reply_falls_back_to_curated() {
        let gateway = Gateway::builder()
            .provider(StaticProvider::replying("Sorry, I can't do JSON today."))
            .build();

        assert_eq!(generate(&gateway).await, curated_articles());
    }

    #[tokio::test]
    async fn empty_array_reply_falls_back_to_curated() {
        let gateway = Gateway::builder()
            .provider(StaticProvider::replying("[]"))
            .build();

        assert_eq!(generate(&gateway).await, curated_articles());
    }

    #[tokio::test]
    async fn provider_failure_falls_back_to_curated() {
        // The failing provider exhausts the cascade; the demo responder's
        // text reply is not valid JSON, so the curated set is served.
        let gateway = Gateway::builder()
            .provider(StaticProvider::failing())
            .build();

        assert_eq!(generate(&gateway).await, curated_articles());
    }
}
