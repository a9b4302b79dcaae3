//! Common error type and result alias.
//!
//! One variant per failure class: transport errors wrap `reqwest::Error`,
//! provider errors carry the remote service's message, and validation /
//! credential problems are caught before any network call is made.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Network or protocol-level failure from the HTTP client.
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// GitHub answered with a non-success status; carries its message.
    #[error("GitHub API error: {0}")]
    GitHub(String),

    /// Generation API answered with a non-success status; carries its message.
    #[error("generation API error: {0}")]
    Generation(String),

    /// No API key resolvable from configuration.
    #[error("API key not found")]
    MissingCredential,

    /// Pro-tier generation requested but no key has been selected.
    #[error("no API key selected; select a key before using pro generation")]
    KeyNotSelected,

    /// Provider responded successfully but carried no extractable payload.
    #[error("{0}")]
    NoPayload(&'static str),

    /// Malformed user input, rejected before any network call.
    #[error("{0}")]
    Validation(String),

    /// A second export was requested while one is still running.
    #[error("an export is already running")]
    ExportInProgress,
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::HttpClient(_) => StatusCode::BAD_GATEWAY,
            AppError::GitHub(_) => StatusCode::BAD_GATEWAY,
            AppError::Generation(_) => StatusCode::BAD_GATEWAY,
            AppError::MissingCredential => StatusCode::PRECONDITION_FAILED,
            AppError::KeyNotSelected => StatusCode::PRECONDITION_FAILED,
            AppError::NoPayload(_) => StatusCode::BAD_GATEWAY,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::ExportInProgress => StatusCode::CONFLICT,
        };
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
