//! Gateway error types

use std::time::Duration;

/// Gateway error types
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    // Caller errors (surfaced as 4xx)
    #[error("malformed request: {0}")]
    MalformedRequest(&'static str),

    /// No configured provider can fulfil an image operation.
    ///
    /// Declarative by policy: the demo responder can fake a text reply but
    /// not an image analysis or a synthesized image, so these surface to the
    /// caller instead of being masked.
    #[error("{operation} is currently unavailable: no capable provider configured")]
    ImageUnavailable { operation: &'static str },

    // Provider/network errors (absorbed by the cascade)
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("empty response from model")]
    EmptyResponse,

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Configuration errors
    #[error("no provider configured")]
    NoProvider,

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl GatewayError {
    /// Whether this error counts as a failed provider call.
    ///
    /// Failed calls advance the cascade to the next provider and are never
    /// surfaced to the caller directly. Everything else is terminal.
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            Self::Http(_)
                | Self::Api { .. }
                | Self::RateLimited { .. }
                | Self::AuthenticationFailed
                | Self::EmptyResponse
        )
    }
}

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, GatewayError>;
