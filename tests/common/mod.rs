//! Test helper module for prompt-relay-service integration tests.

#![allow(dead_code)]

use prompt_relay_service::config::{Config, GeminiSettings, ServerConfig};
use prompt_relay_service::startup::Application;
use secrecy::Secret;

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_MODEL: &str = "gemini-2.0-flash";

/// Upstream base URL for tests that must never reach the upstream.
pub const UNREACHABLE_UPSTREAM: &str = "http://127.0.0.1:9";

pub struct TestApp {
    pub address: String,
}

impl TestApp {
    /// Spawn the app on a random port with the given credential and
    /// upstream base URL.
    pub async fn spawn(api_key: &str, api_base_url: &str) -> Self {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0, // Random port
            },
            gemini: GeminiSettings {
                api_key: Secret::new(api_key.to_string()),
                model: TEST_MODEL.to_string(),
                api_base_url: api_base_url.to_string(),
            },
            service_name: "prompt-relay-service-test".to_string(),
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint.
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        }

        TestApp { address }
    }

    pub fn client(&self) -> reqwest::Client {
        reqwest::Client::new()
    }
}
