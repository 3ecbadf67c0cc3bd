//! Image synthesis through Gemini's image model

use super::gemini::{
    GeminiContent, GeminiEndpoint, GeminiGenerationConfig, GeminiImageConfig, GeminiRequest,
    GeminiResponse,
};
use super::types::AspectRatio;
use super::SynthesisError;
use crate::runtime::ImageSynthesizer;
use crate::session::ImageRef;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::sync::Arc;

const DEFAULT_MIME_TYPE: &str = "image/png";

pub struct GeminiImageService {
    endpoint: Arc<GeminiEndpoint>,
    model: String,
}

impl GeminiImageService {
    pub(super) fn new(endpoint: Arc<GeminiEndpoint>, model: impl Into<String>) -> Self {
        Self {
            endpoint,
            model: model.into(),
        }
    }

    fn build_request(prompt: &str, aspect_ratio: AspectRatio) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent::user_text(prompt)],
            system_instruction: None,
            tools: None,
            generation_config: Some(GeminiGenerationConfig {
                max_output_tokens: None,
                image_config: Some(GeminiImageConfig {
                    aspect_ratio: aspect_ratio.as_str().to_string(),
                }),
            }),
        }
    }
}

#[async_trait]
impl ImageSynthesizer for GeminiImageService {
    async fn synthesize(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
    ) -> Result<ImageRef, SynthesisError> {
        let start = std::time::Instant::now();
        let request = Self::build_request(prompt, aspect_ratio);
        let response = self.endpoint.generate_content(&self.model, &request).await?;
        let result = extract_image(response);

        match &result {
            Ok(image) => tracing::info!(
                model = %self.model,
                duration_ms = %start.elapsed().as_millis(),
                image = %image,
                "Image synthesized"
            ),
            Err(e) => tracing::warn!(
                model = %self.model,
                duration_ms = %start.elapsed().as_millis(),
                error = %e,
                "Image synthesis produced no image"
            ),
        }
        result
    }
}

/// First inline image across all candidates, as a data URI
fn extract_image(response: GeminiResponse) -> Result<ImageRef, SynthesisError> {
    let blob = response
        .candidates
        .into_iter()
        .filter_map(|c| c.content)
        .flat_map(|content| content.parts)
        .find_map(|part| part.inline_data)
        .ok_or(SynthesisError::NoImageProduced)?;

    if blob.data.is_empty() || STANDARD.decode(&blob.data).is_err() {
        return Err(SynthesisError::NoImageProduced);
    }

    let mime = blob.mime_type.as_deref().unwrap_or(DEFAULT_MIME_TYPE);
    Ok(ImageRef::data_uri(mime, &blob.data))
}
