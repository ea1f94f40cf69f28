//! OpenAI client.
//!
//! Covers two endpoints: `/v1/chat/completions` for text chat and image
//! analysis (vision input via data-URL content parts), and
//! `/v1/images/generations` for image synthesis. The only provider in the
//! default cascade with image output capability.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::traits::{Provider, ProviderCapabilities, ShapedRequest};
use crate::types::{ImagePayload, OperationKind, ProviderResponse};
use crate::{GatewayError, Result};

/// Default base URL for the OpenAI API.
const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Default chat model.
const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";

/// Default image synthesis model.
const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";

/// Client for the OpenAI API.
#[derive(Clone)]
pub struct OpenAiClient {
    api_key: String,
    http: Client,
    base_url: String,
    chat_model: String,
    image_model: String,
}

impl OpenAiClient {
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
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
        }
    }

    /// Override the chat model.
    pub fn chat_model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = model.into();
        self
    }

    /// Override the image synthesis model.
    pub fn image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
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

    /// Chat completion with optional vision input.
    async fn chat(&self, prompt: &str, image: Option<&ImagePayload>) -> Result<String> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        let content = match image {
            None => MessageContent::Text(prompt),
            Some(image) => {
                let data_url = format!(
                    "data:{};base64,{}",
                    image.mime_type,
                    BASE64.encode(&image.data)
                );
                MessageContent::Parts(vec![
                    ContentPart::Text { text: prompt },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl { url: data_url },
                    },
                ])
            }
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&ChatRequestBody {
                model: &self.chat_model,
                messages: vec![ChatMessage {
                    role: "user",
                    content,
                }],
            })
            .send()
            .await
            .map_err(|e| GatewayError::Http(e.to_string()))?;

        handle_response_errors(&response)?;

        let body: ChatResponseBody = response
            .json()
            .await
            .map_err(|e| GatewayError::Http(e.to_string()))?;

        body.choices
            .into_iter()
            .filter_map(|c| c.message.content)
            .find(|t| !t.is_empty())
            .ok_or(GatewayError::EmptyResponse)
    }

    /// Synthesize one image, returning its URL.
    async fn generate_image(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/v1/images/generations", self.base_url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&ImageRequestBody {
                model: &self.image_model,
                prompt,
                n: 1,
                size: "1024x1024",
            })
            .send()
            .await
            .map_err(|e| GatewayError::Http(e.to_string()))?;

        handle_response_errors(&response)?;

        let body: ImageResponseBody = response
            .json()
            .await
            .map_err(|e| GatewayError::Http(e.to_string()))?;

        body.data
            .into_iter()
            .filter_map(|d| d.url)
            .next()
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
        401 => Err(GatewayError::AuthenticationFailed),
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
            message: format!("OpenAI API error: {status}"),
        }),
    }
}

#[derive(Serialize)]
struct ChatRequestBody<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: MessageContent<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum MessageContent<'a> {
    Text(&'a str),
    Parts(Vec<ContentPart<'a>>),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Deserialize)]
struct ChatResponseBody {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Serialize)]
struct ImageRequestBody<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u32,
    size: &'a str,
}

#[derive(Deserialize)]
struct ImageResponseBody {
    #[serde(default)]
    data: Vec<ImageDatum>,
}

#[derive(Deserialize)]
struct ImageDatum {
    url: Option<String>,
}

#[async_trait]
impl Provider for OpenAiClient {
    fn name(&self) -> &str {
        "openai"
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            text: true,
            image_input: true,
            image_output: true,
        }
    }

    async fn invoke(&self, request: &ShapedRequest<'_>) -> Result<ProviderResponse> {
        match request.operation {
            OperationKind::TextChat | OperationKind::ImageAnalysis => {
                let text = self.chat(&request.prompt, request.image).await?;
                Ok(ProviderResponse::text(text, self.name()))
            }
            OperationKind::ImageGeneration => {
                let image_url = self.generate_image(&request.prompt).await?;
                Ok(ProviderResponse::image(
                    "Here's the image you asked for.",
                    image_url,
                    self.name(),
                ))
            }
        }
    }
}
