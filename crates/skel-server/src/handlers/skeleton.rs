//! Local skeleton API endpoint.
//!
//! Runs the rule-based engine on the submitted component and returns both the
//! rendered markup and the placeholder tree.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Serialize;
use skel_engine::PlaceholderNode;
use skel_generate::{GenerateRequest, validate_length};
use tracing::info;

use crate::error::ServerError;
use crate::state::AppState;

/// Response for POST /api/skeleton.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SkeletonResponse {
    /// Rendered markup; empty when the component has no content.
    skeleton_code: String,
    /// Placeholder tree; `null` when the component has no content.
    tree: Option<PlaceholderNode>,
}

/// Handle POST /api/skeleton.
pub(crate) async fn create_skeleton(
    State(state): State<Arc<AppState>>,
    body: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<SkeletonResponse>, ServerError> {
    let Json(request) = body?;
    let component = request.component.ok_or(ServerError::MissingComponent)?;
    validate_length(&component, state.max_input_chars)?;

    let skeleton = state.skeletons.generate(&component)?;
    info!(
        chars = component.chars().count(),
        empty = skeleton.is_none(),
        "Generated local skeleton"
    );

    Ok(Json(match skeleton {
        Some(skeleton) => SkeletonResponse {
            skeleton_code: skeleton.markup,
            tree: Some(skeleton.tree),
        },
        None => SkeletonResponse {
            skeleton_code: String::new(),
            tree: None,
        },
    }))
}
