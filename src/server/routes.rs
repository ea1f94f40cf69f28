//! HTTP handlers for the chat and trending endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::AppState;
use crate::GatewayError;
use crate::articles::{self, Article};
use crate::trends::TrendEntry;
use crate::types::{ChatRequest, ImagePayload};

/// Cache-Control for the trending feed: CDN-cacheable for a day, stale
/// content servable for half a day while revalidating.
const TRENDING_CACHE_CONTROL: &str = "public, s-maxage=86400, stale-while-revalidate=43200";

/// MIME type assumed when image data arrives without one.
const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Inbound chat body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatBody {
    #[serde(default)]
    pub prompt: Option<String>,
    /// Base64-encoded image bytes.
    #[serde(default)]
    pub image_data: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub is_site_chat: bool,
}

/// Chat reply payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Trending reply payload.
#[derive(Debug, Serialize)]
pub struct TrendingReply {
    pub trending: Vec<TrendEntry>,
}

/// Articles reply payload.
#[derive(Debug, Serialize)]
pub struct ArticlesReply {
    pub articles: Vec<Article>,
}

/// Error wrapper mapping [`GatewayError`] onto HTTP statuses.
///
/// Provider failures never show up here — the gateway absorbs them — so
/// the only statuses callers see are 400 for malformed/unfulfillable
/// requests and 500 for daemon misconfiguration.
pub struct ApiError(pub GatewayError);

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            GatewayError::MalformedRequest(_) | GatewayError::ImageUnavailable { .. } => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::Configuration(_) | GatewayError::NoProvider => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::BAD_GATEWAY,
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

/// `POST /api/chat`
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ChatBody>,
) -> Result<Json<ChatReply>, ApiError> {
    let image = body
        .image_data
        .map(|data| {
            let bytes = BASE64
                .decode(data.trim())
                .map_err(|_| GatewayError::MalformedRequest("imageData is not valid base64"))?;
            Ok::<_, GatewayError>(ImagePayload::new(
                bytes,
                body.mime_type.unwrap_or_else(|| DEFAULT_IMAGE_MIME.into()),
            ))
        })
        .transpose()?;

    let request = ChatRequest {
        prompt: body.prompt,
        image,
        is_site_chat: body.is_site_chat,
    };

    let response = state.gateway.handle(&request).await?;
    Ok(Json(ChatReply {
        text: response.text,
        image_url: response.image_url,
    }))
}

/// `GET /api/trending`
pub async fn trending(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let entries = state.trends.get().await;
    (
        [(header::CACHE_CONTROL, TRENDING_CACHE_CONTROL)],
        Json(TrendingReply { trending: entries }),
    )
}

/// `GET /api/articles`
///
/// Always 200: generation failures of any kind serve the curated set.
pub async fn articles(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let articles = articles::generate(&state.gateway).await;
    Json(ArticlesReply { articles })
}

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
