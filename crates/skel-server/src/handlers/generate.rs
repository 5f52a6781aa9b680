//! Remote generation API endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use skel_generate::{GenerateRequest, GenerateResponse};
use tracing::info;

use crate::error::ServerError;
use crate::state::AppState;

/// Handle POST /api/generate.
///
/// The HTTP call to the generation service blocks, so it runs on the blocking
/// thread pool.
pub(crate) async fn generate(
    State(state): State<Arc<AppState>>,
    body: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ServerError> {
    let Json(request) = body?;
    let client = Arc::clone(&state.generator);

    let response = tokio::task::spawn_blocking(move || client.generate(&request)).await??;
    info!(
        framework = %response.framework,
        model = %response.generated_with,
        "Generated remote skeleton"
    );
    Ok(Json(response))
}
