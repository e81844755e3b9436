pub mod openai;

use crate::{error::Result, models::ImageGenerationRequest};
use async_trait::async_trait;

pub use openai::OpenAiImageClient;

/// Message used when the provider gives no usable error text.
pub const GENERIC_FAILURE: &str = "Failed to generate image";
/// Message used for transport and decoding failures.
pub const GENERIC_RETRY_FAILURE: &str = "Failed to generate image. Please try again.";

/// A text-to-image backend returning a URL for the first generated image.
///
/// Implementations report every failure as `StudioError::GenerationFailed`.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    async fn generate(&self, request: &ImageGenerationRequest) -> Result<String>;
}
