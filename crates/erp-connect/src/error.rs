//! Error types for the ERP demo client.
//!
//! The original demo aborted the process on any failure. Here every failure
//! is an explicit `Result` mapped to an HTTP status so one bad request does
//! not take the service down; tests that exercise failure paths call out
//! this deviation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors surfaced by the HTTP handlers.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// A configured provider URL failed to parse.
    #[error("invalid provider URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The token exchange against the provider failed (network error,
    /// invalid code, provider error response).
    #[error("token exchange failed: {0}")]
    Exchange(String),

    /// An outbound call to the protected resource failed.
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl AppError {
    /// Create an exchange error.
    #[must_use]
    pub fn exchange(message: impl Into<String>) -> Self {
        Self::Exchange(message.into())
    }

    /// HTTP status this error maps to.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidUrl(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Exchange(_) | Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");
        (self.status(), self.to_string()).into_response()
    }
}

/// Result type alias for handler operations.
pub type AppResult<T> = Result<T, AppError>;
