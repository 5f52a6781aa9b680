//! Error types for remote generation.

use crate::types::ErrorResponse;

/// Upstream error type reported for malformed requests.
const INVALID_REQUEST_ERROR: &str = "invalid_request_error";

/// HTTP status class of a failed generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStatus {
    /// The component or request was rejected (400).
    InvalidRequest,
    /// The generation service is throttling (429).
    RateLimited,
    /// Anything else (500).
    Server,
}

impl ErrorStatus {
    /// HTTP status code.
    #[must_use]
    pub fn code(self) -> u16 {
        match self {
            Self::InvalidRequest => 400,
            Self::RateLimited => 429,
            Self::Server => 500,
        }
    }
}

/// Error from a generation request.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GenerateError {
    /// Component failed validation before any network call.
    #[error("{0}")]
    Validation(String),

    /// No API key is configured.
    #[error("Generation service API key is not configured (set generator.api_key or OPENAI_API_KEY)")]
    MissingApiKey,

    /// Generation service returned an error status.
    #[error("{message}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Error type reported by the service, if any.
        kind: Option<String>,
        /// Error message reported by the service.
        message: String,
    },

    /// HTTP request failed (network error, timeout, etc).
    #[error("Failed to reach generation service: {0}")]
    Transport(#[from] ureq::Error),

    /// Response body was not the expected JSON.
    #[error("Invalid response from generation service: {0}")]
    Json(#[from] serde_json::Error),

    /// Generated code lacks the placeholder fill or loading marker.
    #[error("Failed to generate valid skeleton loader")]
    InvalidOutput,
}

impl GenerateError {
    /// Status class used for the HTTP response.
    #[must_use]
    pub fn status(&self) -> ErrorStatus {
        match self {
            Self::Validation(_) => ErrorStatus::InvalidRequest,
            Self::Upstream { status: 429, .. } => ErrorStatus::RateLimited,
            Self::Upstream { status, .. } if (400..500).contains(status) => {
                ErrorStatus::InvalidRequest
            }
            Self::MissingApiKey
            | Self::Upstream { .. }
            | Self::Transport(_)
            | Self::Json(_)
            | Self::InvalidOutput => ErrorStatus::Server,
        }
    }

    /// Client-facing error body.
    ///
    /// Validation and output failures carry only the message; service
    /// failures add details and a suggestion.
    #[must_use]
    pub fn to_response(&self) -> ErrorResponse {
        let error = self.to_string();
        match self {
            Self::Validation(_) | Self::InvalidOutput => ErrorResponse::new(error),
            _ => {
                let details = match self {
                    Self::Upstream {
                        kind: Some(kind), ..
                    } if kind == INVALID_REQUEST_ERROR => "Invalid request parameters",
                    _ => "Server error",
                };
                let suggestion = if self.status() == ErrorStatus::RateLimited {
                    "Rate limit exceeded, please try again later"
                } else {
                    "Please check your component code and try again"
                };
                ErrorResponse::new(error)
                    .with_details(details)
                    .with_suggestion(suggestion)
            }
        }
    }
}
