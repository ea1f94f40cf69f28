//! Provider invocation cascade.
//!
//! The [`Gateway`] holds providers in priority order (index 0 = highest).
//! An inbound request is validated, classified, shaped once, then attempted
//! against every capability-matching provider in order. A failed provider
//! call never reaches the caller: it is logged, counted, and the cascade
//! advances. There is deliberately no per-provider retry — the system
//! optimizes for "always answer something" over "get the best possible
//! answer".
//!
//! # Cascade flow
//!
//! ```text
//! ChatRequest ──validate──▶ classify ──shape──▶ ┌──────────────┐
//!                                               │ provider #0  │──ok──▶ response
//!                                               └──────┬───────┘
//!                                                      │ failure (absorbed)
//!                                               ┌──────▼───────┐
//!                                               │ provider #1  │──ok──▶ response
//!                                               └──────┬───────┘
//!                                                      │ exhausted
//!                                  TextChat ──▶ demo responder (success)
//!                                  image ops ──▶ ImageUnavailable (declarative)
//! ```

mod builder;

pub use builder::GatewayBuilder;

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, instrument, warn};

use crate::demo::DemoResponder;
use crate::persona;
use crate::providers::{Provider, ShapedRequest};
use crate::telemetry;
use crate::types::{ChatRequest, OperationKind, ProviderResponse};
use crate::{GatewayError, Result};

/// The provider cascade plus its terminal fallback.
///
/// Cheap to share: construct once at process start, read-only afterwards.
pub struct Gateway {
    providers: Vec<Arc<dyn Provider>>,
    demo: DemoResponder,
}

impl Gateway {
    /// Create a builder for configuring a gateway.
    pub fn builder() -> GatewayBuilder {
        GatewayBuilder::new()
    }

    pub(crate) fn new(providers: Vec<Arc<dyn Provider>>) -> Self {
        Self {
            providers,
            demo: DemoResponder,
        }
    }

    /// Whether any upstream provider is configured. False means every
    /// text request will be answered in demo mode.
    pub fn has_providers(&self) -> bool {
        !self.providers.is_empty()
    }

    /// Registered provider names in priority order.
    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    /// Handle one chat request end to end.
    ///
    /// Only [`GatewayError::MalformedRequest`] and
    /// [`GatewayError::ImageUnavailable`] can reach the caller; provider
    /// failures are absorbed by the cascade and, for text chat, masked by
    /// the demo responder.
    #[instrument(skip(self, request))]
    pub async fn handle(&self, request: &ChatRequest) -> Result<ProviderResponse> {
        request.validate()?;
        let operation = OperationKind::classify(request);

        let site_chat = request.is_site_chat && operation == OperationKind::TextChat;
        let shaped = ShapedRequest {
            operation,
            prompt: persona::shape_prompt(request.prompt.as_deref().unwrap_or_default(), site_chat),
            image: request.image.as_ref(),
        };

        for provider in self
            .providers
            .iter()
            .filter(|p| p.capabilities().supports(operation))
        {
            let start = Instant::now();
            match provider.invoke(&shaped).await {
                Ok(response) => {
                    debug!(provider = provider.name(), operation = operation.as_str(), "provider answered");
                    Self::record_request(operation, provider.name(), start, true);
                    return Ok(response);
                }
                Err(e) if e.is_provider_failure() => {
                    warn!(
                        provider = provider.name(),
                        operation = operation.as_str(),
                        error = %e,
                        "provider call failed, advancing cascade"
                    );
                    Self::record_request(operation, provider.name(), start, false);
                }
                Err(e) => {
                    Self::record_request(operation, provider.name(), start, false);
                    return Err(e);
                }
            }
        }

        // Cascade exhausted, or no capable provider was configured.
        match operation {
            OperationKind::TextChat => {
                let start = Instant::now();
                let response = self.demo.respond(request.prompt.as_deref());
                Self::record_request(operation, "demo", start, true);
                Ok(response)
            }
            OperationKind::ImageAnalysis => Err(GatewayError::ImageUnavailable {
                operation: "image analysis",
            }),
            OperationKind::ImageGeneration => Err(GatewayError::ImageUnavailable {
                operation: "image generation",
            }),
        }
    }

    /// Record request outcome metrics (counter + histogram).
    fn record_request(operation: OperationKind, provider: &str, start: Instant, ok: bool) {
        let status = if ok { "ok" } else { "error" };
        let elapsed = start.elapsed().as_secs_f64();
        metrics::counter!(telemetry::REQUESTS_TOTAL,
            "provider" => provider.to_owned(),
            "operation" => operation.as_str(),
            "status" => status,
        )
        .increment(1);
        metrics::histogram!(telemetry::REQUEST_DURATION_SECONDS,
            "provider" => provider.to_owned(),
            "operation" => operation.as_str(),
        )
        .record(elapsed);
    }
}
