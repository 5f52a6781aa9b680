//! Source tree produced by the parser.

use std::collections::BTreeMap;

/// A node of a parsed markup fragment.
///
/// Trees are built once by [`MarkupParser`](crate::MarkupParser) (or by the
/// builder methods in tests) and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceNode {
    /// Character data between tags.
    Text(String),
    /// A tagged element.
    Element(Element),
}

impl SourceNode {
    /// Create a text node.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// Return the element if this is an element node.
    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    /// Check whether this is a text node containing only whitespace.
    #[must_use]
    pub fn is_blank_text(&self) -> bool {
        matches!(self, Self::Text(content) if content.trim().is_empty())
    }
}

impl From<Element> for SourceNode {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

/// A tagged element with attributes and ordered children.
///
/// Tag names are lower-cased; attribute names keep their original case so
/// `className` and `class` stay distinguishable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: BTreeMap<String, String>,
    children: Vec<SourceNode>,
}

impl Element {
    /// Create an element with no attributes or children.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Default::default()
        }
    }

    /// Add an attribute.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Replace all attributes.
    #[must_use]
    pub fn with_attrs(mut self, attrs: BTreeMap<String, String>) -> Self {
        self.attrs = attrs;
        self
    }

    /// Append a child node.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<SourceNode>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Replace all children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<SourceNode>) -> Self {
        self.children = children;
        self
    }

    /// Lower-cased tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Look up an attribute value.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// All attributes in key order.
    #[must_use]
    pub fn attrs(&self) -> &BTreeMap<String, String> {
        &self.attrs
    }

    /// Child nodes in document order.
    #[must_use]
    pub fn children(&self) -> &[SourceNode] {
        &self.children
    }

    /// Utility-class string: `className`, falling back to `class`.
    #[must_use]
    pub fn class_name(&self) -> &str {
        self.attr("className")
            .or_else(|| self.attr("class"))
            .unwrap_or_default()
    }

    /// Whitespace-separated class tokens.
    pub fn class_tokens(&self) -> impl Iterator<Item = &str> {
        self.class_name().split_whitespace()
    }

    /// Check whether a class token equals `token` exactly.
    #[must_use]
    pub fn has_class_token(&self, token: &str) -> bool {
        self.class_tokens().any(|t| t == token)
    }

    /// Check whether the tag is one of `tags`.
    #[must_use]
    pub fn is_any_of(&self, tags: &[&str]) -> bool {
        tags.contains(&self.tag.as_str())
    }
}
