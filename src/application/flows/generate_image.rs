//! Image generation flow.
//!
//! Invokes the image model with a text prompt and returns the generated
//! image as a data URI. Used standalone by the images endpoint and nested
//! by the chat flow's `imageGeneration` tool.

use std::sync::Arc;
use thiserror::Error;

use crate::ports::{GenerationRequest, GenerationResponse, Generator};

/// Input for image generation.
#[derive(Debug, Clone)]
pub struct GenerateImageInput {
    /// Text description of the image to generate.
    pub prompt: String,
}

impl GenerateImageInput {
    /// Creates a new input.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

/// A generated image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// Data URI of the generated image.
    pub image_url: String,
}

/// Errors from the image generation flow.
#[derive(Debug, Clone, Error)]
pub enum ImageFlowError {
    /// Prompt is empty or whitespace only.
    #[error("image prompt cannot be empty")]
    EmptyPrompt,

    /// The model call failed or produced no image.
    #[error("image generation failed: {0}")]
    GenerationFailed(String),
}

/// Flow generating one image from a text prompt.
pub struct GenerateImageFlow<G: Generator + ?Sized> {
    generator: Arc<G>,
    model: String,
}

impl<G: Generator + ?Sized> GenerateImageFlow<G> {
    /// Creates the flow over the given generator and image model.
    pub fn new(generator: Arc<G>, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
        }
    }

    /// Generates an image, returning its data URI.
    pub async fn execute(
        &self,
        input: GenerateImageInput,
    ) -> Result<GeneratedImage, ImageFlowError> {
        let prompt = input.prompt.trim();
        if prompt.is_empty() {
            return Err(ImageFlowError::EmptyPrompt);
        }

        let request = GenerationRequest::new(&self.model).with_user_text(prompt);

        let response = self
            .generator
            .generate(request)
            .await
            .map_err(|e| ImageFlowError::GenerationFailed(e.to_string()))?;

        match response {
            GenerationResponse::Media(media) => Ok(GeneratedImage {
                image_url: media.url,
            }),
            _ => Err(ImageFlowError::GenerationFailed(
                "model produced no image data".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockGenerator;
    use crate::ports::GenerationError;

    fn flow(generator: MockGenerator) -> GenerateImageFlow<MockGenerator> {
        GenerateImageFlow::new(Arc::new(generator), "imagen-4.0-fast-generate-001")
    }

    #[tokio::test]
    async fn returns_data_uri_from_media_response() {
        let generator = MockGenerator::new().with_media("data:image/png;base64,AAAA");
        let flow = flow(generator);

        let image = flow
            .execute(GenerateImageInput::new("a cat"))
            .await
            .unwrap();

        assert_eq!(image.image_url, "data:image/png;base64,AAAA");
    }

    #[tokio::test]
    async fn targets_the_image_model() {
        let generator = MockGenerator::new().with_media("data:image/png;base64,AAAA");
        let flow = GenerateImageFlow::new(Arc::new(generator.clone()), "imagen-test");

        flow.execute(GenerateImageInput::new("a cat")).await.unwrap();

        let calls = generator.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].model, "imagen-test");
        assert!(calls[0].tools.is_empty());
    }

    #[tokio::test]
    async fn text_response_is_a_failure() {
        let generator = MockGenerator::new().with_text("I cannot draw that");
        let flow = flow(generator);

        let err = flow
            .execute(GenerateImageInput::new("a cat"))
            .await
            .unwrap_err();

        assert!(matches!(err, ImageFlowError::GenerationFailed(_)));
    }

    #[tokio::test]
    async fn provider_error_is_a_failure() {
        let generator = MockGenerator::new().with_error(GenerationError::NoOutput);
        let flow = flow(generator);

        let err = flow
            .execute(GenerateImageInput::new("a cat"))
            .await
            .unwrap_err();

        assert!(matches!(err, ImageFlowError::GenerationFailed(_)));
    }

    #[tokio::test]
    async fn empty_prompt_fails_without_calling_model() {
        let generator = MockGenerator::new();
        let flow = GenerateImageFlow::new(Arc::new(generator.clone()), "imagen-test");

        let err = flow.execute(GenerateImageInput::new("   ")).await.unwrap_err();

        assert!(matches!(err, ImageFlowError::EmptyPrompt));
        assert_eq!(generator.call_count(), 0);
    }
}
