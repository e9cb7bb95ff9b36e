use axum::{body::Bytes, extract::State, Json};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::services::TextProvider;
use crate::startup::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub text: String,
}

/// Relay a prompt to the configured text provider.
///
/// The body is taken as raw bytes rather than through the `Json` extractor
/// so that a malformed body lands on the internal-error arm instead of the
/// extractor's own rejection shape. The credential check deliberately
/// precedes the prompt check.
#[tracing::instrument(skip(state, body))]
pub async fn generate_text(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GenerateResponse>, AppError> {
    let request: GenerateRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::error!(error = %e, "Failed to parse request body");
        AppError::Internal(e.into())
    })?;

    if state.config.gemini.api_key.expose_secret().is_empty() {
        return Err(AppError::MissingApiKey);
    }

    if request.prompt.is_empty() {
        return Err(AppError::MissingPrompt);
    }

    let text = state.text_provider.generate(&request.prompt).await?;

    Ok(Json(GenerateResponse { text }))
}

/// Method fallback for the generate route.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

#[cfg(test)]
mod tests {
    use crate::config::{Config, GeminiSettings, ServerConfig};
    use crate::services::providers::mock::MockTextProvider;
    use crate::startup::{app_router, AppState};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use secrecy::Secret;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_state(api_key: &str) -> AppState {
        AppState {
            config: Config {
                server: ServerConfig {
                    host: "127.0.0.1".to_string(),
                    port: 0,
                },
                gemini: GeminiSettings {
                    api_key: Secret::new(api_key.to_string()),
                    model: "gemini-2.0-flash".to_string(),
                    api_base_url: "http://127.0.0.1:9".to_string(),
                },
                service_name: "prompt-relay-service-test".to_string(),
            },
            text_provider: Arc::new(MockTextProvider::new(true)),
        }
    }

    async fn send(state: AppState, request: Request<Body>) -> (StatusCode, String) {
        let response = app_router(state)
            .oneshot(request)
            .await
            .expect("Failed to handle request");
        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        (status, String::from_utf8(body.to_vec()).expect("Body is not UTF-8"))
    }

    fn post_generate(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/generate")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request")
    }

    #[tokio::test]
    async fn post_with_prompt_relays_provider_text() {
        let (status, body) = send(test_state("test-api-key"), post_generate(r#"{"prompt":"Say hi"}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"text":"Mock response for: Say hi"}"#);
    }

    #[tokio::test]
    async fn get_is_method_not_allowed() {
        let request = Request::builder()
            .method("GET")
            .uri("/generate")
            .body(Body::empty())
            .expect("Failed to build request");
        let (status, body) = send(test_state("test-api-key"), request).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, "Method Not Allowed");
    }

    #[tokio::test]
    async fn missing_credential_is_checked_before_missing_prompt() {
        let (status, body) = send(test_state(""), post_generate("{}")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "API key not found.");
    }

    #[tokio::test]
    async fn missing_prompt_is_bad_request() {
        let (status, body) = send(test_state("test-api-key"), post_generate("{}")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Prompt is required.");
    }

    #[tokio::test]
    async fn empty_prompt_is_bad_request() {
        let (status, body) = send(test_state("test-api-key"), post_generate(r#"{"prompt":""}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Prompt is required.");
    }

    #[tokio::test]
    async fn malformed_body_is_an_internal_error() {
        let (status, body) = send(test_state("test-api-key"), post_generate("{not json")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "An error occurred.");
    }
}
