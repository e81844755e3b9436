use crate::{
    config::OpenAiConfig,
    error::{Result, StudioError},
    models::{ApiErrorResponse, ImageGenerationRequest, ImagesResponse},
    provider::{ImageProvider, GENERIC_FAILURE, GENERIC_RETRY_FAILURE},
};
use async_trait::async_trait;
use reqwest::{header, Client};

#[derive(Clone)]
pub struct OpenAiImageClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl OpenAiImageClient {
    pub fn new(config: &OpenAiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| StudioError::ConfigError("OPENAI_API_KEY is required".into()))?;

        Ok(Self {
            client: Client::new(),
            endpoint: format!("{}/images/generations", config.base_url.trim_end_matches('/')),
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        let auth = header::HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|_| StudioError::ConfigError("API key contains invalid characters".into()))?;
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        Ok(headers)
    }
}

#[async_trait]
impl ImageProvider for OpenAiImageClient {
    async fn generate(&self, request: &ImageGenerationRequest) -> Result<String> {
        log::info!(
            "Requesting image from {} (model: {}, size: {}, prompt: {} chars)",
            self.endpoint,
            request.model,
            request.size,
            request.prompt.chars().count()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .headers(self.build_headers()?)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                log::warn!("Image request failed before a response arrived: {}", e);
                StudioError::GenerationFailed(GENERIC_RETRY_FAILURE.into())
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            log::warn!("Failed to read image response body: {}", e);
            StudioError::GenerationFailed(GENERIC_RETRY_FAILURE.into())
        })?;

        interpret_response(status.as_u16(), &body)
    }
}

/// Maps a raw provider reply to the first image URL or a `GenerationFailed`.
pub fn interpret_response(status: u16, body: &str) -> Result<String> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ApiErrorResponse>(body)
            .ok()
            .and_then(|r| r.error)
            .and_then(|e| e.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_FAILURE.to_string());
        log::warn!("Provider rejected image request with status {}", status);
        return Err(StudioError::GenerationFailed(message));
    }

    let parsed: ImagesResponse = serde_json::from_str(body).map_err(|e| {
        log::warn!("Unreadable image response: {}", e);
        StudioError::GenerationFailed(GENERIC_RETRY_FAILURE.into())
    })?;

    parsed
        .data
        .into_iter()
        .next()
        .and_then(|d| d.url)
        .ok_or_else(|| {
            log::warn!("Image response carried no URL");
            StudioError::GenerationFailed(GENERIC_RETRY_FAILURE.into())
        })
}
