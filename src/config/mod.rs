use anyhow::Result;
use dotenvy::dotenv;
use secrecy::Secret;
use serde::Deserialize;
use std::env;

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub server: ServerConfig,
    pub gemini: GeminiSettings,
    pub service_name: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Clone, Debug)]
pub struct GeminiSettings {
    /// Upstream credential. May be empty when the environment is not
    /// provisioned; the generate handler reports that per request.
    pub api_key: Secret<String>,
    pub model: String,
    /// Base URL of the Gemini REST API. Overridable so tests can point the
    /// provider at a local mock server.
    pub api_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let host = env::var("RELAY_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("RELAY_SERVICE_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()?;

        let api_key = env::var("GEMINI_API_KEY").unwrap_or_default();
        let model = env::var("GEMINI_MODEL")
            .unwrap_or_else(|_| "gemini-2.5-flash-preview-05-20".to_string());
        let api_base_url = env::var("GEMINI_API_BASE_URL")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".to_string());

        Ok(Self {
            server: ServerConfig { host, port },
            gemini: GeminiSettings {
                api_key: Secret::new(api_key),
                model,
                api_base_url,
            },
            service_name: "prompt-relay-service".to_string(),
        })
    }
}
