//! Request classification.
//!
//! The operation kind is derived purely from the shape of a [`ChatRequest`]:
//! an attached image always means analysis of that image, a prompt opening
//! with a generation trigger phrase means image synthesis, and everything
//! else is plain text chat.

use super::request::ChatRequest;

/// Prompt prefixes that request image synthesis. Matched anchored at
/// the start of the trimmed prompt, case-insensitive.
const GENERATION_TRIGGERS: &[&str] = &["image:", "generate an image", "create an image"];

/// The kind of operation an inbound request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// Plain conversational text completion.
    TextChat,
    /// Multimodal analysis of a caller-supplied image.
    ImageAnalysis,
    /// Synthesis of a new image from the prompt.
    ImageGeneration,
}

impl OperationKind {
    /// Classify a validated request.
    ///
    /// An attached image wins over any generation trigger in the prompt:
    /// the caller supplied content to reason about, not a creation request.
    pub fn classify(request: &ChatRequest) -> Self {
        if request.image.is_some() {
            return Self::ImageAnalysis;
        }
        if request
            .prompt
            .as_deref()
            .is_some_and(is_generation_trigger)
        {
            return Self::ImageGeneration;
        }
        Self::TextChat
    }

    /// Stable label for logging and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TextChat => "chat",
            Self::ImageAnalysis => "image_analysis",
            Self::ImageGeneration => "image_generation",
        }
    }
}

fn is_generation_trigger(prompt: &str) -> bool {
    let lowered = prompt.trim_start().to_lowercase();
    GENERATION_TRIGGERS
        .iter()
        .any(|trigger| lowered.starts_with(trigger))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::request::ImagePayload;

    #[test]
    fn plain_prompt_is_text_chat() {
        let request = ChatRequest::text("What moved the markets today?");
        assert_eq!(OperationKind::classify(&request), OperationKind::TextChat);
    }

    #[test]
    fn generation_triggers_are_anchored_and_case_insensitive() {
        for prompt in [
            "image: a red fox",
            "Generate an image of a cat",
            "CREATE AN IMAGE of the skyline",
            "  generate an image with leading spaces",
        ] {
            let request = ChatRequest::text(prompt);
            assert_eq!(
                OperationKind::classify(&request),
                OperationKind::ImageGeneration,
                "prompt: {prompt}"
            );
        }
    }

    #[test]
    fn trigger_mid_prompt_does_not_count() {
        let request = ChatRequest::text("Could you generate an image for me?");
        assert_eq!(OperationKind::classify(&request), OperationKind::TextChat);
    }

    #[test]
    fn image_payload_forces_analysis() {
        let request = ChatRequest::text("generate an image of a cat")
            .with_image(ImagePayload::new(vec![1, 2, 3], "image/png"));
        assert_eq!(
            OperationKind::classify(&request),
            OperationKind::ImageAnalysis
        );
    }

    #[test]
    fn image_without_prompt_is_analysis() {
        let request = ChatRequest::default().with_image(ImagePayload::new(vec![1], "image/png"));
        assert_eq!(
            OperationKind::classify(&request),
            OperationKind::ImageAnalysis
        );
    }
}
