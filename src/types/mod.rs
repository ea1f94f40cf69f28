//! Core request/response types.

pub mod operation;
pub mod request;
pub mod response;

pub use operation::OperationKind;
pub use request::{ChatRequest, ImagePayload};
pub use response::ProviderResponse;
