use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::services::ProviderError;

/// Service-level error. Every request terminates in exactly one of these
/// variants or in success; `IntoResponse` realises the wire contract.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("API key not found")]
    MissingApiKey,

    #[error("prompt is required")]
    MissingPrompt,

    /// Upstream answered with a non-success status; status and body are
    /// passed through to the caller verbatim.
    #[error("Gemini API error {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Explicit catch-all: network failures, malformed JSON on either side.
    /// Detail is logged server-side, never sent to the caller.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(anyhow::Error::new(err))
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Api { status, body } => AppError::Upstream { status, body },
            other => {
                tracing::error!(error = %other, "Text generation failed");
                AppError::Internal(anyhow::Error::new(other))
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method Not Allowed".to_string(),
            ),
            AppError::MissingApiKey => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "API key not found.".to_string(),
            ),
            AppError::MissingPrompt => {
                (StatusCode::BAD_REQUEST, "Prompt is required.".to_string())
            }
            AppError::Upstream { status, body } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                format!("Gemini API Error: {}", body),
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An error occurred.".to_string(),
            ),
        };

        (status, body).into_response()
    }
}
