//! Skeleton loader engine.
//!
//! Converts a component markup fragment into a skeleton: a tree of filled
//! placeholder boxes with the same layout structure, used as a loading state.
//!
//! The pipeline has four stages:
//! - [`extract_dimensions`] pulls a size hint out of inline styles and
//!   utility classes
//! - [`Classifier`] maps each element to a [`ShapeDescriptor`] using an
//!   ordered rule table (first match wins, with a total fallback)
//! - [`Transducer`] walks the source tree top-down and builds
//!   [`PlaceholderNode`]s, recursing only into structure-preserving shapes
//! - [`HtmlRenderer`] serializes the placeholder tree
//!
//! [`SkeletonGenerator`] runs all of them, parser included, as one call.
//!
//! # Example
//!
//! ```
//! use skel_engine::{RenderStyle, SkeletonGenerator};
//!
//! let skeleton = SkeletonGenerator::new()
//!     .render_style(RenderStyle::Compact)
//!     .generate("<h1>Welcome</h1>")
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(
//!     skeleton.markup,
//!     r#"<div class="w-3/4 h-8 bg-gray-300 rounded-md animate-pulse" role="status" aria-busy="true"></div>"#
//! );
//! ```

mod classify;
mod dimensions;
mod error;
mod generator;
mod placeholder;
mod render;
mod shape;
mod transduce;

pub use classify::{BuildFn, Classifier, FALLBACK_RULE, MatchFn, Rule, default_rules, heading_defaults};
pub use dimensions::{Axis, Dimension, DimensionHint, extract_dimensions, extract_dimensions_with};
pub use error::SkeletonError;
pub use generator::{Skeleton, SkeletonGenerator};
pub use placeholder::{Descendants, FILL_TOKEN, LOADING_MARKER, PLACEHOLDER_TAG, PlaceholderNode, Rounding};
pub use render::{HtmlRenderer, RenderStyle};
pub use shape::{ChildrenPolicy, ShapeDescriptor, ShapeOptions};
pub use transduce::{TransduceStats, Transducer};
