//! Error types for skeleton generation.

use skel_markup::MarkupError;

/// Error produced by [`SkeletonGenerator`](crate::SkeletonGenerator).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SkeletonError {
    /// Input markup could not be parsed; no skeleton was produced.
    #[error("failed to parse component structure: {0}")]
    Parse(#[from] MarkupError),
}
