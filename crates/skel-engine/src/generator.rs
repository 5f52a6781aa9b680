//! Parse, transduce, and render in one call.

use skel_markup::MarkupParser;
use tracing::{debug, warn};

use crate::classify::Classifier;
use crate::error::SkeletonError;
use crate::placeholder::PlaceholderNode;
use crate::render::{HtmlRenderer, RenderStyle};
use crate::shape::ShapeOptions;
use crate::transduce::Transducer;

/// A generated skeleton: the placeholder tree and its rendered markup.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Skeleton {
    pub tree: PlaceholderNode,
    pub markup: String,
}

/// Local skeleton generator.
///
/// Each call parses the input afresh; nothing is cached between calls.
#[derive(Debug, Clone, Default)]
pub struct SkeletonGenerator {
    parser: MarkupParser,
    transducer: Transducer,
    renderer: HtmlRenderer,
}

impl SkeletonGenerator {
    /// Generator with the built-in rules and pretty output.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generator with the built-in rules and the given synthetic counts.
    #[must_use]
    pub fn with_options(options: ShapeOptions) -> Self {
        Self::with_classifier(Classifier::with_options(options))
    }

    /// Generator using a custom classifier.
    #[must_use]
    pub fn with_classifier(classifier: Classifier) -> Self {
        Self {
            transducer: Transducer::new(classifier),
            ..Self::default()
        }
    }

    /// Use a different output layout.
    #[must_use]
    pub fn render_style(mut self, style: RenderStyle) -> Self {
        self.renderer = HtmlRenderer::new(style);
        self
    }

    /// Generate a skeleton for a markup fragment.
    ///
    /// Returns `Ok(None)` when the fragment holds nothing but whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`SkeletonError::Parse`] if the markup is malformed. No partial
    /// skeleton is produced.
    pub fn generate(&self, markup: &str) -> Result<Option<Skeleton>, SkeletonError> {
        let nodes = self.parser.parse(markup).map_err(|e| {
            warn!(error = %e, "Failed to parse component structure");
            SkeletonError::from(e)
        })?;

        let (tree, stats) = self.transducer.transduce_document_with_stats(&nodes);
        let Some(tree) = tree else {
            debug!("Component has no content, no skeleton generated");
            return Ok(None);
        };

        let markup = self.renderer.render(&tree);
        debug!(
            visited = stats.visited(),
            bytes = markup.len(),
            "Generated skeleton"
        );
        Ok(Some(Skeleton { tree, markup }))
    }
}
