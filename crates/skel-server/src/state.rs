//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use skel_config::GeneratorConfig;
use skel_engine::{RenderStyle, ShapeOptions, SkeletonGenerator};
use skel_generate::GeneratorClient;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Local rule-based generator.
    pub(crate) skeletons: SkeletonGenerator,
    /// Remote generator, shared with blocking tasks.
    pub(crate) generator: Arc<GeneratorClient>,
    /// Whether an API key is configured.
    remote_enabled: bool,
    /// Longest component accepted by either endpoint, in characters.
    pub(crate) max_input_chars: usize,
    /// Application version.
    pub(crate) version: String,
}

impl AppState {
    pub(crate) fn new(options: ShapeOptions, generator: &GeneratorConfig, version: String) -> Self {
        Self {
            skeletons: SkeletonGenerator::with_options(options).render_style(RenderStyle::Pretty),
            generator: Arc::new(GeneratorClient::from_config(generator)),
            remote_enabled: generator.api_key().is_some(),
            max_input_chars: generator.max_input_chars,
            version,
        }
    }

    pub(crate) fn remote_enabled(&self) -> bool {
        self.remote_enabled
    }
}
