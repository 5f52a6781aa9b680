//! Ordered rule table mapping source elements to placeholder shapes.
//!
//! Rules are evaluated top to bottom and the first match wins. An element no
//! rule claims gets the generic `element` shape, so classification is total.

mod composite;
mod leaf;

use std::fmt;

use skel_markup::Element;

use crate::dimensions::{Axis, DimensionHint, extract_dimensions};
use crate::placeholder::PlaceholderNode;
use crate::shape::{ShapeDescriptor, ShapeOptions};

pub use leaf::heading_defaults;

/// Name of the shape used when no rule matches.
pub const FALLBACK_RULE: &str = "element";

/// Container classes for structure-preserving shapes.
const BLOCK_CONTAINER: &str = "w-full space-y-4";

const BLOCK_TAGS: &[&str] = &[
    "div", "section", "article", "main", "aside", "header", "footer", "form",
];

/// Predicate over a source element.
pub type MatchFn = fn(&Element) -> bool;

/// Shape builder for an element a rule has matched.
pub type BuildFn = fn(&Element, &ShapeOptions) -> ShapeDescriptor;

/// A single classification rule.
#[derive(Clone, Copy)]
pub struct Rule {
    name: &'static str,
    matches: MatchFn,
    build: BuildFn,
}

impl Rule {
    #[must_use]
    pub const fn new(name: &'static str, matches: MatchFn, build: BuildFn) -> Self {
        Self {
            name,
            matches,
            build,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn matches(&self, element: &Element) -> bool {
        (self.matches)(element)
    }

    pub fn build(&self, element: &Element, options: &ShapeOptions) -> ShapeDescriptor {
        (self.build)(element, options)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// Built-in rules in priority order.
#[must_use]
pub fn default_rules() -> Vec<Rule> {
    vec![
        Rule::new("navigation", composite::is_navigation, composite::navigation),
        Rule::new("table", composite::is_table, composite::table),
        Rule::new("card", composite::is_card, composite::card),
        Rule::new(
            "avatar-with-text",
            composite::is_avatar_with_text,
            composite::avatar_with_text,
        ),
        Rule::new("form-field", leaf::is_form_field, leaf::form_field),
        Rule::new("list", composite::is_list, composite::list),
        Rule::new("breadcrumb", composite::is_breadcrumb, composite::breadcrumb),
        Rule::new("table-row", composite::is_table_row, composite::table_row),
        Rule::new("table-cell", leaf::is_table_cell, leaf::table_cell),
        Rule::new("paragraph", leaf::is_paragraph, leaf::paragraph),
        Rule::new("image", leaf::is_image, leaf::image),
        Rule::new("heading", leaf::is_heading, leaf::heading),
        Rule::new("button", leaf::is_button, leaf::button),
        Rule::new("badge", leaf::is_badge, leaf::badge),
        Rule::new("inline", leaf::is_inline, leaf::inline),
        Rule::new("block", is_block, block),
    ]
}

/// Ordered rule table plus the counts used by synthetic shapes.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<Rule>,
    options: ShapeOptions,
}

impl Classifier {
    /// Classifier with the built-in rules and default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(ShapeOptions::default())
    }

    /// Classifier with the built-in rules.
    #[must_use]
    pub fn with_options(options: ShapeOptions) -> Self {
        Self {
            rules: default_rules(),
            options: options.clamped(),
        }
    }

    /// Insert `rule` directly before the rule named `before`.
    ///
    /// Appends it when no rule has that name (still ahead of the fallback).
    #[must_use]
    pub fn with_rule_before(mut self, before: &str, rule: Rule) -> Self {
        let index = self
            .rules
            .iter()
            .position(|existing| existing.name == before)
            .unwrap_or(self.rules.len());
        self.rules.insert(index, rule);
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn options(&self) -> &ShapeOptions {
        &self.options
    }

    /// Pick the shape for `element`. Total: falls back to [`FALLBACK_RULE`].
    #[must_use]
    pub fn classify(&self, element: &Element) -> ShapeDescriptor {
        self.rules
            .iter()
            .find(|rule| rule.matches(element))
            .map_or_else(
                || fallback(element),
                |rule| rule.build(element, &self.options),
            )
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

fn is_block(element: &Element) -> bool {
    element.is_any_of(BLOCK_TAGS)
}

/// Generic container that keeps the real children.
fn block(element: &Element, _: &ShapeOptions) -> ShapeDescriptor {
    let mut container = PlaceholderNode::container(BLOCK_CONTAINER);
    let height = extract_dimensions(element).height;
    if height != DimensionHint::default().height {
        container = container.with_size_class(height.class(Axis::Height));
    }
    ShapeDescriptor::transformed("block", container, PlaceholderNode::text_line())
}

fn fallback(_: &Element) -> ShapeDescriptor {
    ShapeDescriptor::transformed(
        FALLBACK_RULE,
        PlaceholderNode::container(BLOCK_CONTAINER),
        PlaceholderNode::text_line(),
    )
}
