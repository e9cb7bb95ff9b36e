//! Gemini AI provider implementation.
//!
//! Implements text generation using Google's Gemini generateContent API.

use super::{ProviderError, TextProvider};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

/// Gemini provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Secret<String>,
    pub model: String,
    pub api_base_url: String,
}

/// Gemini text provider.
pub struct GeminiTextProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiTextProvider {
    /// Create a new provider. No request timeout is set; the client's
    /// ambient default governs worst-case latency.
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Check if the provider is configured (credential is set).
    pub fn is_configured(&self) -> bool {
        !self.config.api_key.expose_secret().is_empty()
    }

    /// Build the generateContent URL for the configured model.
    fn api_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.config.api_base_url,
            self.config.model,
            self.config.api_key.expose_secret()
        )
    }
}

#[async_trait]
impl TextProvider for GeminiTextProvider {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(self.api_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Gemini API returned an error");
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let api_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        // First candidate, first content part.
        api_response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .ok_or_else(|| {
                ProviderError::MalformedResponse("response contained no candidate text".to_string())
            })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(ProviderError::NotConfigured(
                "Gemini API key not configured".to_string(),
            ))
        }
    }
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}
