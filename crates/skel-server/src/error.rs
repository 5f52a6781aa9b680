//! Error types for the HTTP server.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use skel_engine::SkeletonError;
use skel_generate::{ErrorResponse, GenerateError};

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Request body is not valid JSON of the expected shape.
    #[error("Invalid request body: {0}")]
    Body(#[from] JsonRejection),

    /// Request has no component.
    #[error("Component structure is required")]
    MissingComponent,

    /// Local engine could not parse the component.
    #[error(transparent)]
    Skeleton(#[from] SkeletonError),

    /// Remote generation failed.
    #[error(transparent)]
    Generate(#[from] GenerateError),

    /// Blocking generation task panicked or was cancelled.
    #[error("Generation task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Body(rejection) => (
                StatusCode::BAD_REQUEST,
                json!({"error": "Invalid request body", "details": rejection.body_text()}),
            ),
            Self::MissingComponent => (
                StatusCode::BAD_REQUEST,
                json!(ErrorResponse::new(self.to_string())),
            ),
            Self::Skeleton(SkeletonError::Parse(e)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({"error": "Failed to parse component structure", "details": e.to_string()}),
            ),
            Self::Skeleton(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": e.to_string()}),
            ),
            Self::Generate(e) => {
                tracing::warn!(error = %e, "Skeleton generation failed");
                let status = StatusCode::from_u16(e.status().code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, json!(e.to_response()))
            }
            Self::Task(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": "Failed to generate skeleton loader", "details": e.to_string()}),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}
