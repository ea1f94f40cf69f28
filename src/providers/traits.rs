//! The polymorphic provider seam.
//!
//! Every upstream AI service is wrapped in a single [`Provider`] trait
//! exposing capability flags and one `invoke` entry point. The cascade
//! iterates an ordered list of these instead of branching on provider
//! names, which is what lets one code path replace the per-provider
//! endpoint variants.

use async_trait::async_trait;

use crate::Result;
use crate::types::{ImagePayload, OperationKind, ProviderResponse};

/// What a provider can do. Drives cascade routing: a provider is only
/// attempted for operations it declares support for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProviderCapabilities {
    /// Text completion.
    pub text: bool,
    /// Multimodal input (image analysis).
    pub image_input: bool,
    /// Image synthesis.
    pub image_output: bool,
}

impl ProviderCapabilities {
    /// Text-only provider.
    pub fn text_only() -> Self {
        Self {
            text: true,
            ..Self::default()
        }
    }

    /// Whether this provider can serve the given operation.
    pub fn supports(&self, operation: OperationKind) -> bool {
        match operation {
            OperationKind::TextChat => self.text,
            OperationKind::ImageAnalysis => self.image_input,
            OperationKind::ImageGeneration => self.image_output,
        }
    }
}

/// A classified request with its final prompt, ready for dispatch.
///
/// Shaping (persona prepending) happens once before the cascade, so every
/// provider in the chain receives the identical request.
#[derive(Debug)]
pub struct ShapedRequest<'a> {
    pub operation: OperationKind,
    pub prompt: String,
    pub image: Option<&'a ImagePayload>,
}

/// An upstream generative-AI service.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Provider name for logging/metrics.
    fn name(&self) -> &str;

    /// Declared capabilities; consulted before `invoke` is ever called.
    fn capabilities(&self) -> ProviderCapabilities;

    /// Perform the operation.
    ///
    /// Transport and API-level failures are returned as errors classified
    /// by [`GatewayError::is_provider_failure`](crate::GatewayError::is_provider_failure);
    /// the cascade absorbs those and advances to the next provider.
    async fn invoke(&self, request: &ShapedRequest<'_>) -> Result<ProviderResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_routing_matrix() {
        let text_only = ProviderCapabilities::text_only();
        assert!(text_only.supports(OperationKind::TextChat));
        assert!(!text_only.supports(OperationKind::ImageAnalysis));
        assert!(!text_only.supports(OperationKind::ImageGeneration));

        let full = ProviderCapabilities {
            text: true,
            image_input: true,
            image_output: true,
        };
        assert!(full.supports(OperationKind::ImageAnalysis));
        assert!(full.supports(OperationKind::ImageGeneration));
    }
}
