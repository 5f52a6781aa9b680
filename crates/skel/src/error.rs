//! CLI error types.

use skel_config::ConfigError;
use skel_engine::SkeletonError;
use skel_generate::GenerateError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Skeleton(#[from] SkeletonError),

    #[error("{0}")]
    Generate(#[from] GenerateError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Watch(#[from] notify::Error),

    #[error("{0}")]
    Server(String),
}
