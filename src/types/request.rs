//! Inbound chat request types.

use crate::{GatewayError, Result};

/// Raw image bytes with their MIME type, as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub data: Vec<u8>,
    pub mime_type: String,
}

impl ImagePayload {
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
        }
    }
}

/// An inbound chat operation descriptor.
///
/// Owned by the handling request context and discarded once the response
/// is sent. At least one of `prompt` or `image` must be present; requests
/// carrying neither are rejected before classification.
#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    /// Prompt text, if any. A blank prompt counts as absent.
    pub prompt: Option<String>,
    /// Image payload for analysis, if any.
    pub image: Option<ImagePayload>,
    /// Whether this request comes from the on-site assistant widget.
    /// Site chat gets the Novee persona prepended to the prompt.
    pub is_site_chat: bool,
}

impl ChatRequest {
    /// A plain text request.
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
            ..Self::default()
        }
    }

    /// A text request from the on-site assistant widget.
    pub fn site_chat(prompt: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
            is_site_chat: true,
            ..Self::default()
        }
    }

    /// Attach an image payload.
    pub fn with_image(mut self, image: ImagePayload) -> Self {
        self.image = Some(image);
        self
    }

    /// Whether the prompt carries any non-whitespace text.
    pub fn has_prompt(&self) -> bool {
        self.prompt
            .as_deref()
            .is_some_and(|p| !p.trim().is_empty())
    }

    /// Reject requests with neither prompt text nor an image.
    ///
    /// Runs before classification; a rejected request never reaches
    /// a provider.
    pub fn validate(&self) -> Result<()> {
        if !self.has_prompt() && self.image.is_none() {
            return Err(GatewayError::MalformedRequest(
                "prompt or image data is required",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_request_is_rejected() {
        let request = ChatRequest::default();
        assert!(matches!(
            request.validate(),
            Err(GatewayError::MalformedRequest(_))
        ));
    }

    #[test]
    fn blank_prompt_counts_as_absent() {
        let request = ChatRequest::text("   \n\t");
        assert!(request.validate().is_err());
    }

    #[test]
    fn prompt_only_is_valid() {
        assert!(ChatRequest::text("hello").validate().is_ok());
    }

    #[test]
    fn image_only_is_valid() {
        let request =
            ChatRequest::default().with_image(ImagePayload::new(vec![0xFF, 0xD8], "image/jpeg"));
        assert!(request.validate().is_ok());
    }
}
