//! Normalized provider response.

use serde::{Deserialize, Serialize};

/// The normalized result of a provider call.
///
/// Every successful cascade outcome, including the demo responder, produces
/// one of these; the caller cannot tell a canned reply from a live one by
/// shape. Failure is expressed through `Result`, not through a flag here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// Reply text. Always non-empty on the success path.
    pub text: String,
    /// URL of a synthesized image, for image generation responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Name of the provider that produced the reply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

impl ProviderResponse {
    /// A text-only response from the named provider.
    pub fn text(text: impl Into<String>, provider: &str) -> Self {
        Self {
            text: text.into(),
            image_url: None,
            provider: Some(provider.to_string()),
        }
    }

    /// An image generation response carrying the synthesized image URL.
    pub fn image(text: impl Into<String>, image_url: impl Into<String>, provider: &str) -> Self {
        Self {
            text: text.into(),
            image_url: Some(image_url.into()),
            provider: Some(provider.to_string()),
        }
    }
}
