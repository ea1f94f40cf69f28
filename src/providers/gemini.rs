//! Google Gemini client.
//!
//! Speaks the `generativelanguage.googleapis.com` REST API directly:
//! `POST /v1beta/models/{model}:generateContent?key=...` with a
//! `contents`/`parts` body. Image payloads ride along as inline base64
//! data, which covers both text chat and image analysis. Gemini is not
//! registered for image synthesis.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::traits::{Provider, ProviderCapabilities, ShapedRequest};
use crate::types::{ImagePayload, OperationKind, ProviderResponse};
use crate::{GatewayError, Result};

/// Default base URL for the Generative Language API.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model when none is configured.
const DEFAULT_MODEL: &str = "gemini-pro";

/// Client for the Google Generative Language API.
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    http: Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("failed to build HTTP client");

        Self {
            api_key: api_key.into(),
            http,
            base_url: base_url.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Override the model.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the request timeout.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.http = Client::builder()
            .timeout(Duration::from_secs(secs))
            .build()
            .expect("failed to build HTTP client");
        self
    }

    /// Call `:generateContent` with a text prompt and optional inline image.
    async fn generate(&self, prompt: &str, image: Option<&ImagePayload>) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let mut parts = vec![Part::Text { text: prompt }];
        if let Some(image) = image {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: &image.mime_type,
                    data: BASE64.encode(&image.data),
                },
            });
        }

        let response = self
            .http
            .post(&url)
            .json(&GenerateRequest {
                contents: vec![Content { parts }],
            })
            .send()
            .await
            .map_err(|e| GatewayError::Http(e.to_string()))?;

        handle_response_errors(&response)?;

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Http(e.to_string()))?;

        body.candidates
            .into_iter()
            .flat_map(|c| c.content.into_iter().flat_map(|content| content.parts))
            .map(|p| p.text)
            .find(|t| !t.is_empty())
            .ok_or(GatewayError::EmptyResponse)
    }
}

/// Check response status and map to the appropriate error.
fn handle_response_errors(response: &reqwest::Response) -> Result<()> {
    let status = response.status();

    if status.is_success() {
        return Ok(());
    }

    match status.as_u16() {
        401 | 403 => Err(GatewayError::AuthenticationFailed),
        429 => {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .map(Duration::from_secs);
            Err(GatewayError::RateLimited { retry_after })
        }
        code => Err(GatewayError::Api {
            status: code,
            message: format!("Gemini API error: {status}"),
        }),
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text {
        text: &'a str,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData<'a>,
    },
}

#[derive(Serialize)]
struct InlineData<'a> {
    #[serde(rename = "mimeType")]
    mime_type: &'a str,
    data: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<TextPart>,
}

#[derive(Deserialize)]
struct TextPart {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl Provider for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            text: true,
            image_input: true,
            image_output: false,
        }
    }

    async fn invoke(&self, request: &ShapedRequest<'_>) -> Result<ProviderResponse> {
        match request.operation {
            OperationKind::TextChat | OperationKind::ImageAnalysis => {
                let text = self.generate(&request.prompt, request.image).await?;
                Ok(ProviderResponse::text(text, self.name()))
            }
            // Routing never sends synthesis here; declared unsupported.
            OperationKind::ImageGeneration => Err(GatewayError::ImageUnavailable {
                operation: "image generation",
            }),
        }
    }
}
