//! Placeholder tree produced by the transducer.

use crate::dimensions::{Dimension, DimensionHint};

/// The single fill token carried by every placeholder leaf.
pub const FILL_TOKEN: &str = "bg-gray-300";

/// Decoration marking the root of a skeleton as a loading state.
pub const LOADING_MARKER: &str = "animate-pulse";

/// Tag used for every built-in placeholder element.
pub const PLACEHOLDER_TAG: &str = "div";

/// Corner rounding of a placeholder leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rounding {
    /// `rounded`
    #[default]
    Default,
    /// `rounded-md`
    Md,
    /// `rounded-lg`
    Lg,
    /// `rounded-full`, for circular shapes
    Full,
}

impl Rounding {
    /// Utility class for this rounding.
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Default => "rounded",
            Self::Md => "rounded-md",
            Self::Lg => "rounded-lg",
            Self::Full => "rounded-full",
        }
    }
}

/// A node of a skeleton tree.
///
/// Placeholders have no text content. Leaves are filled boxes carrying
/// [`FILL_TOKEN`]; containers only arrange their children and carry no fill.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PlaceholderNode {
    tag: &'static str,
    size: Vec<String>,
    decoration: Vec<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "std::ops::Not::not"))]
    loading_root: bool,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    children: Vec<PlaceholderNode>,
}

impl PlaceholderNode {
    /// Filled box of the given size with default rounding.
    #[must_use]
    pub fn leaf(width: Dimension, height: Dimension) -> Self {
        Self::sized(DimensionHint::new(width, height))
    }

    /// Filled box sized by a dimension hint.
    #[must_use]
    pub fn sized(hint: DimensionHint) -> Self {
        Self {
            tag: PLACEHOLDER_TAG,
            size: hint.classes(),
            decoration: vec![FILL_TOKEN.to_owned(), Rounding::Default.class().to_owned()],
            loading_root: false,
            children: Vec::new(),
        }
    }

    /// Default text line: `w-3/4 h-4`.
    #[must_use]
    pub fn text_line() -> Self {
        Self::leaf(Dimension::Fraction(3, 4), Dimension::Scale(4))
    }

    /// Layout container built from a utility-class string.
    ///
    /// `w-*`/`h-*` tokens become size classes, everything else decoration.
    #[must_use]
    pub fn container(classes: &str) -> Self {
        let (size, decoration): (Vec<&str>, Vec<&str>) = classes
            .split_whitespace()
            .partition(|token| is_size_class(token));
        Self {
            tag: PLACEHOLDER_TAG,
            size: size.into_iter().map(str::to_owned).collect(),
            decoration: decoration.into_iter().map(str::to_owned).collect(),
            loading_root: false,
            children: Vec::new(),
        }
    }

    /// Replace the rounding class of a leaf.
    #[must_use]
    pub fn rounded(mut self, rounding: Rounding) -> Self {
        self.decoration.retain(|class| !is_rounding_class(class));
        self.decoration.push(rounding.class().to_owned());
        self
    }

    /// Append decoration classes.
    ///
    /// Fill tokens other than [`FILL_TOKEN`] are dropped.
    #[must_use]
    pub fn with_decoration(mut self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            if class.starts_with("bg-") {
                continue;
            }
            if !self.decoration.iter().any(|existing| existing == class) {
                self.decoration.push(class.to_owned());
            }
        }
        self
    }

    /// Append a size class.
    #[must_use]
    pub fn with_size_class(mut self, class: impl Into<String>) -> Self {
        self.size.push(class.into());
        self
    }

    /// Use a different element tag.
    #[must_use]
    pub fn with_tag(mut self, tag: &'static str) -> Self {
        self.tag = tag;
        self
    }

    /// Append a child.
    #[must_use]
    pub fn with_child(mut self, child: PlaceholderNode) -> Self {
        self.children.push(child);
        self
    }

    /// Append children.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = PlaceholderNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Mark this node as the root of a skeleton.
    pub(crate) fn mark_loading_root(&mut self) {
        if !self.decoration.iter().any(|class| class == LOADING_MARKER) {
            self.decoration.push(LOADING_MARKER.to_owned());
        }
        self.loading_root = true;
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn size(&self) -> &[String] {
        &self.size
    }

    pub fn decoration(&self) -> &[String] {
        &self.decoration
    }

    pub fn children(&self) -> &[PlaceholderNode] {
        &self.children
    }

    /// Whether this node carries the loading-state and accessibility markers.
    pub fn is_loading_root(&self) -> bool {
        self.loading_root
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Size classes followed by decoration classes.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.size
            .iter()
            .chain(&self.decoration)
            .map(String::as_str)
    }

    /// This node and all descendants, depth-first in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Depth-first iterator over a placeholder subtree.
pub struct Descendants<'a> {
    stack: Vec<&'a PlaceholderNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a PlaceholderNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

fn is_size_class(token: &str) -> bool {
    token.starts_with("w-") || token.starts_with("h-")
}

fn is_rounding_class(token: &str) -> bool {
    token == "rounded" || token.starts_with("rounded-")
}
