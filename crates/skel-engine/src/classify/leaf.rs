//! Leaf shapes: a single filled box (or a fixed stack of text lines) that
//! never inspects the source element's children.

use skel_markup::Element;

use crate::dimensions::Dimension::{Fraction, Full, Px, Scale};
use crate::dimensions::{Dimension, DimensionHint, extract_dimensions, extract_dimensions_with};
use crate::placeholder::{PlaceholderNode, Rounding};
use crate::shape::{ShapeDescriptor, ShapeOptions};

const INLINE_TAGS: &[&str] = &["span", "a", "strong", "em", "b", "i", "code", "small"];

pub(super) fn is_form_field(element: &Element) -> bool {
    element.is_any_of(&["input", "textarea", "select"])
}

pub(super) fn form_field(element: &Element, _: &ShapeOptions) -> ShapeDescriptor {
    let height = if element.tag() == "textarea" {
        Scale(24)
    } else {
        Scale(10)
    };
    let node = PlaceholderNode::leaf(Full, height).rounded(Rounding::Md);
    ShapeDescriptor::leaf("form-field", node)
}

pub(super) fn is_table_cell(element: &Element) -> bool {
    element.is_any_of(&["td", "th"])
}

pub(super) fn table_cell(_: &Element, _: &ShapeOptions) -> ShapeDescriptor {
    ShapeDescriptor::leaf("table-cell", PlaceholderNode::leaf(Full, Scale(8)))
}

pub(super) fn is_paragraph(element: &Element) -> bool {
    element.is_any_of(&["p", "blockquote"])
}

/// Three text lines, each shorter than the one before.
pub(super) fn paragraph(element: &Element, _: &ShapeOptions) -> ShapeDescriptor {
    let small = element.has_class_token("text-xs") || element.has_class_token("text-sm");
    let height = if small { Scale(3) } else { Scale(4) };
    let lines = [Full, Fraction(11, 12), Fraction(4, 5)]
        .into_iter()
        .map(|width| PlaceholderNode::leaf(width, height));
    let template = PlaceholderNode::container("w-full space-y-2").with_children(lines);
    ShapeDescriptor::synthetic("paragraph", template)
}

pub(super) fn is_image(element: &Element) -> bool {
    element.is_any_of(&["img", "svg", "picture", "video", "canvas"])
}

/// Box matching the media size; explicit `width`/`height` attributes are
/// echoed in pixels.
pub(super) fn image(element: &Element, _: &ShapeOptions) -> ShapeDescriptor {
    let mut hint = extract_dimensions_with(element, DimensionHint::new(Full, Scale(48)));
    if let Some(width) = pixel_attr(element, "width") {
        hint.width = width;
    }
    if let Some(height) = pixel_attr(element, "height") {
        hint.height = height;
    }

    let circular = element.class_tokens().any(|token| {
        token == "rounded-full" || token == "rounded-circle" || token.contains("avatar")
    });
    let rounding = if circular { Rounding::Full } else { Rounding::Md };
    ShapeDescriptor::leaf("image", PlaceholderNode::sized(hint).rounded(rounding))
}

/// `400` or `400px` in a presentational attribute.
fn pixel_attr(element: &Element, name: &str) -> Option<Dimension> {
    let value = element.attr(name)?.trim();
    let digits = value.strip_suffix("px").unwrap_or(value);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().map(Px)
}

pub(super) fn is_heading(element: &Element) -> bool {
    heading_level(element.tag()).is_some()
}

fn heading_level(tag: &str) -> Option<u8> {
    match tag.as_bytes() {
        [b'h', level @ b'1'..=b'6'] => Some(level - b'0'),
        _ => None,
    }
}

/// Default box for each heading level, largest first.
#[must_use]
pub fn heading_defaults(level: u8) -> DimensionHint {
    let (width, height) = match level {
        1 => (Fraction(3, 4), 8),
        2 => (Fraction(2, 3), 7),
        3 => (Fraction(1, 2), 6),
        4 => (Fraction(2, 5), 5),
        5 => (Fraction(1, 3), 4),
        _ => (Fraction(1, 4), 3),
    };
    DimensionHint::new(width, Scale(height))
}

pub(super) fn heading(element: &Element, _: &ShapeOptions) -> ShapeDescriptor {
    let level = heading_level(element.tag()).unwrap_or(6);
    let hint = extract_dimensions_with(element, heading_defaults(level));
    ShapeDescriptor::leaf("heading", PlaceholderNode::sized(hint).rounded(Rounding::Md))
}

pub(super) fn is_button(element: &Element) -> bool {
    element.tag() == "button"
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ButtonSize {
    Small,
    Default,
    Large,
}

fn button_size(element: &Element) -> ButtonSize {
    const SMALL: &[&str] = &["btn-sm", "text-xs", "text-sm", "py-1", "sm"];
    const LARGE: &[&str] = &["btn-lg", "text-lg", "text-xl", "py-3", "py-4", "lg"];

    for token in element.class_tokens() {
        if SMALL.contains(&token) {
            return ButtonSize::Small;
        }
        if LARGE.contains(&token) {
            return ButtonSize::Large;
        }
    }
    match element.attr("size").map(str::to_ascii_lowercase).as_deref() {
        Some("sm" | "small") => ButtonSize::Small,
        Some("lg" | "large") => ButtonSize::Large,
        _ => ButtonSize::Default,
    }
}

pub(super) fn button(element: &Element, _: &ShapeOptions) -> ShapeDescriptor {
    let (width, height) = match button_size(element) {
        ButtonSize::Small => (16, 8),
        ButtonSize::Default => (24, 10),
        ButtonSize::Large => (32, 12),
    };
    let rounding = if element.has_class_token("rounded-full") {
        Rounding::Full
    } else {
        Rounding::Md
    };
    let node = PlaceholderNode::leaf(Scale(width), Scale(height)).rounded(rounding);
    ShapeDescriptor::leaf("button", node)
}

pub(super) fn is_badge(element: &Element) -> bool {
    element.is_any_of(INLINE_TAGS)
        && element.class_tokens().any(|token| {
            token == "tag"
                || token.contains("badge")
                || token.contains("chip")
                || token.contains("pill")
        })
}

pub(super) fn badge(_: &Element, _: &ShapeOptions) -> ShapeDescriptor {
    let node = PlaceholderNode::leaf(Scale(12), Scale(5)).rounded(Rounding::Full);
    ShapeDescriptor::leaf("badge", node)
}

pub(super) fn is_inline(element: &Element) -> bool {
    element.is_any_of(INLINE_TAGS)
}

/// Short inline box; a full-width hint would break the line, so it is
/// narrowed to `w-20`.
pub(super) fn inline(element: &Element, _: &ShapeOptions) -> ShapeDescriptor {
    let mut hint = extract_dimensions(element);
    if hint.width == Full {
        hint.width = Scale(20);
    }
    let node = PlaceholderNode::sized(hint).with_decoration("inline-block mx-1");
    ShapeDescriptor::leaf("inline", node)
}
