// SPDX-License-Identifier: MPL-2.0
//! Failure taxonomy for remote calls.

use reqwest::StatusCode;
use serde::Deserialize;

/// Result type for remote operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by the remote API client.
///
/// Variants carry strings rather than the underlying `reqwest` errors so the
/// value can travel inside Iced messages, which must be `Clone`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Network unreachable, connection refused, timeout.
    #[error("Network error: {0}")]
    Transport(String),

    /// Non-2xx response from the service.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Malformed response body, unreadable upload source, anything else.
    #[error("Unexpected error: {0}")]
    Unexpected(String),

    /// No credential was configured for the remote service.
    #[error("No API key configured")]
    MissingApiKey,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl ApiError {
    /// Builds an [`ApiError::Api`] from a failed response.
    ///
    /// The service usually answers with `{"message": "..."}`; plain-text bodies
    /// are used verbatim and an empty body falls back to the status reason.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|parsed| parsed.message)
            .ok()
            .or_else(|| {
                let trimmed = body.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown status")
                    .to_string()
            });

        ApiError::Api {
            status: status.as_u16(),
            message,
        }
    }

    /// Short text shown to the user after the operation prefix.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Transport(message) => message.clone(),
            ApiError::Api { message, .. } => message.clone(),
            ApiError::Unexpected(_) => "Unexpected error".to_string(),
            ApiError::MissingApiKey => "No API key configured".to_string(),
        }
    }

    /// Returns `true` for failures that never reached the service.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() || err.is_request() {
            ApiError::Transport(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::Api {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            ApiError::Unexpected(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Unexpected(err.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::Unexpected(err.to_string())
    }
}
