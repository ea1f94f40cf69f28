//! HTTP serving surface for the novusd daemon.
//!
//! Three JSON endpoints plus a health probe, mirroring the serverless
//! layer the gateway replaces:
//!
//! - `POST /api/chat` — classify, cascade, respond
//! - `GET /api/articles` — AI-written article feed with curated fallback
//! - `GET /api/trending` — cached trend feed with CDN cache headers
//! - `GET /health`

pub mod config;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::gateway::Gateway;
use crate::trends::{CuratedSource, MemoryStore, TrendCache};

/// Shared per-process state: read-only after startup, safe to share
/// across request handlers without locking.
pub struct AppState {
    pub gateway: Gateway,
    pub trends: TrendCache<MemoryStore, CuratedSource>,
}

impl AppState {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway,
            trends: TrendCache::new(MemoryStore::new(), CuratedSource),
        }
    }
}

/// Build the router with all routes and middleware.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/chat", post(routes::chat))
        .route("/api/articles", get(routes::articles))
        .route("/api/trending", get(routes::trending))
        .route("/health", get(routes::health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
