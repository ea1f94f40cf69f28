//! Upstream provider implementations.

pub mod gemini;
pub mod openai;
pub mod traits;

pub use gemini::GeminiClient;
pub use openai::OpenAiClient;
pub use traits::{Provider, ProviderCapabilities, ShapedRequest};
