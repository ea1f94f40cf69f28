//! Novus Gateway — provider cascade for the Novus Exchange AI assistant.
//!
//! This crate classifies inbound chat requests, routes them through an
//! ordered cascade of generative-AI providers, and degrades to a
//! deterministic demo responder when no provider is usable, so a
//! well-formed text request always gets an answer. It also serves the
//! site's trending-topics feed through a freshness-window cache and its
//! AI-written article feed with a curated fallback set.
//!
//! # Example
//!
//! ```rust,no_run
//! use novus_gateway::gateway::Gateway;
//! use novus_gateway::types::ChatRequest;
//!
//! #[tokio::main]
//! async fn main() -> novus_gateway::Result<()> {
//!     let gateway = Gateway::builder()
//!         .gemini("your-api-key")
//!         .build();
//!
//!     let response = gateway
//!         .handle(&ChatRequest::site_chat("What's trending in AI policy?"))
//!         .await?;
//!
//!     println!("{}", response.text);
//!     Ok(())
//! }
//! ```
//!
//! With no credentials at all the same call still succeeds — the demo
//! responder answers from a fixed keyword table. Only malformed requests
//! and image operations without a capable provider produce errors.

pub mod articles;
pub mod config;
pub mod demo;
pub mod error;
pub mod gateway;
pub mod persona;
pub mod providers;
#[cfg(feature = "server")]
pub mod server;
pub mod telemetry;
pub mod trends;
pub mod types;

// Re-export main types at crate root
pub use config::{ProviderPreference, ProviderSettings};
pub use error::{GatewayError, Result};
pub use gateway::{Gateway, GatewayBuilder};
pub use types::{ChatRequest, ImagePayload, OperationKind, ProviderResponse};
