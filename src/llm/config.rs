//! Collaborator configuration

use super::gemini::{GeminiConversationService, GeminiEndpoint};
use super::imagen::GeminiImageService;
use super::LlmError;
use std::sync::Arc;

pub const DEFAULT_CHAT_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

/// Configuration for the Gemini collaborators
#[derive(Debug, Clone, Default)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    /// Gateway URL (e.g., `http://169.254.169.254/gateway/llm`)
    pub gateway: Option<String>,
    pub chat_model: Option<String>,
    pub image_model: Option<String>,
}

impl LlmConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("GEMINI_API_KEY")
                .or_else(|_| std::env::var("API_KEY"))
                .ok(),
            gateway: std::env::var("LLM_GATEWAY").ok(),
            chat_model: std::env::var("STRATEGIST_CHAT_MODEL").ok(),
            image_model: std::env::var("STRATEGIST_IMAGE_MODEL").ok(),
        }
    }

    pub fn chat_model(&self) -> &str {
        self.chat_model.as_deref().unwrap_or(DEFAULT_CHAT_MODEL)
    }

    pub fn image_model(&self) -> &str {
        self.image_model.as_deref().unwrap_or(DEFAULT_IMAGE_MODEL)
    }

    /// Key to send with requests
    fn resolved_key(&self) -> Result<String, LlmError> {
        // In gateway mode the gateway handles authentication
        if self.gateway.is_some() {
            return Ok("implicit".to_string());
        }
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key.to_string()),
            _ => Err(LlmError::auth(
                "No API key configured: set GEMINI_API_KEY or LLM_GATEWAY",
            )),
        }
    }

    /// Build both collaborators over one shared HTTP endpoint
    pub fn connect(&self) -> Result<(GeminiConversationService, GeminiImageService), LlmError> {
        let endpoint = Arc::new(GeminiEndpoint::new(
            self.resolved_key()?,
            self.gateway.as_deref(),
        )?);
        Ok((
            GeminiConversationService::new(endpoint.clone(), self.chat_model()),
            GeminiImageService::new(endpoint, self.image_model()),
        ))
    }
}
