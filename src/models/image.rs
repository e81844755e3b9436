use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const IMAGE_MODEL: &str = "dall-e-3";
pub const IMAGE_QUALITY: &str = "standard";
pub const RESPONSE_FORMAT_URL: &str = "url";

/// Request body for `POST /images/generations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageGenerationRequest {
    pub model: String,
    pub prompt: String,
    pub n: u32,
    pub size: String,
    pub quality: String,
    pub response_format: String,
}

impl ImageGenerationRequest {
    /// Everything but the prompt and size is fixed.
    pub fn new(prompt: impl Into<String>, size: impl Into<String>) -> Self {
        Self {
            model: IMAGE_MODEL.to_string(),
            prompt: prompt.into(),
            n: 1,
            size: size.into(),
            quality: IMAGE_QUALITY.to_string(),
            response_format: RESPONSE_FORMAT_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ImagesResponse {
    #[serde(default)]
    pub data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
pub struct ImageData {
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub message: Option<String>,
}

/// The live image held by the workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationResult {
    pub id: String,
    pub image_url: String,
    pub size: String,
    pub style: String,
    pub created_at: DateTime<Utc>,
}

impl GenerationResult {
    pub fn new(image_url: String, size: String, style: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            image_url,
            size,
            style,
            created_at: Utc::now(),
        }
    }
}
