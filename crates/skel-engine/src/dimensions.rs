//! Best-effort width/height extraction from inline styles and utility classes.
//!
//! The extractor never resolves layout. It pulls a size token out of the
//! `style` attribute and the utility-class string and hands it to the
//! classifier, which turns it into placeholder size classes.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use skel_markup::Element;

/// `width: 400px` / `height: 2rem` declarations. The property must start a
/// declaration so `max-width` and `line-height` do not match.
static STYLE_DIMENSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[;{\s])(width|height)\s*:\s*(\d+)(px|%|rem|em)")
        .expect("invalid style dimension regex")
});

/// Axis a dimension applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl Axis {
    /// Utility-class prefix (`w` or `h`).
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Width => "w",
            Self::Height => "h",
        }
    }
}

/// A size token.
///
/// The extractor only produces `Scale`, `Full`, `Screen`, `Auto`, and `Px`;
/// `Fraction` is used by placeholder shapes (`w-3/4`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    /// Bare spacing-scale number (`4` in `h-4`).
    Scale(u32),
    /// Fraction of the parent (`3/4`).
    Fraction(u8, u8),
    /// `full`.
    Full,
    /// `screen`.
    Screen,
    /// `auto`.
    Auto,
    /// Exact pixel value, rendered as an arbitrary value (`[400px]`).
    /// A single pixel uses the `px` keyword.
    Px(u32),
}

impl Dimension {
    /// Parse the part of a utility class after `w-` / `h-`.
    ///
    /// Accepts digits, `full`, `screen`, `auto`, `px`, and `[<n>px]`.
    #[must_use]
    pub fn parse_token(token: &str) -> Option<Self> {
        match token {
            "full" => Some(Self::Full),
            "screen" => Some(Self::Screen),
            "auto" => Some(Self::Auto),
            "px" => Some(Self::Px(1)),
            _ if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) => {
                token.parse().ok().map(Self::Scale)
            }
            _ => token
                .strip_prefix('[')
                .and_then(|t| t.strip_suffix("px]"))
                .and_then(|n| n.parse().ok())
                .map(Self::Px),
        }
    }

    /// Utility class for this dimension on `axis`.
    #[must_use]
    pub fn class(self, axis: Axis) -> String {
        format!("{}-{self}", axis.prefix())
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scale(n) => write!(f, "{n}"),
            Self::Fraction(n, d) => write!(f, "{n}/{d}"),
            Self::Full => f.write_str("full"),
            Self::Screen => f.write_str("screen"),
            Self::Auto => f.write_str("auto"),
            Self::Px(1) => f.write_str("px"),
            Self::Px(n) => write!(f, "[{n}px]"),
        }
    }
}

/// Width and height hint for one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionHint {
    pub width: Dimension,
    pub height: Dimension,
}

impl DimensionHint {
    /// Create a hint from explicit dimensions.
    #[must_use]
    pub const fn new(width: Dimension, height: Dimension) -> Self {
        Self { width, height }
    }

    /// Size classes in `[width, height]` order.
    #[must_use]
    pub fn classes(&self) -> Vec<String> {
        vec![self.width.class(Axis::Width), self.height.class(Axis::Height)]
    }
}

impl Default for DimensionHint {
    fn default() -> Self {
        Self::new(Dimension::Full, Dimension::Scale(4))
    }
}

/// Extract dimensions with the standard defaults (`w-full`, `h-4`).
#[must_use]
pub fn extract_dimensions(element: &Element) -> DimensionHint {
    extract_dimensions_with(element, DimensionHint::default())
}

/// Extract dimensions, falling back to `defaults` per axis.
///
/// Inline style overrides the defaults; utility classes override both.
#[must_use]
pub fn extract_dimensions_with(element: &Element, defaults: DimensionHint) -> DimensionHint {
    let mut hint = defaults;

    if let Some(style) = element.attr("style") {
        let (width, height) = style_dimensions(style);
        if let Some(width) = width {
            hint.width = width;
        }
        if let Some(height) = height {
            hint.height = height;
        }
    }

    if let Some(width) = class_dimension(element, Axis::Width) {
        hint.width = width;
    }
    if let Some(height) = class_dimension(element, Axis::Height) {
        hint.height = height;
    }

    hint
}

/// First `width` and `height` declarations in an inline style.
fn style_dimensions(style: &str) -> (Option<Dimension>, Option<Dimension>) {
    let mut width = None;
    let mut height = None;

    for caps in STYLE_DIMENSION.captures_iter(style) {
        let Ok(value) = caps[2].parse::<u32>() else {
            continue;
        };
        let dimension = if caps[3].eq_ignore_ascii_case("px") {
            Dimension::Px(value)
        } else {
            Dimension::Scale(value)
        };
        let slot = if caps[1].eq_ignore_ascii_case("width") {
            &mut width
        } else {
            &mut height
        };
        if slot.is_none() {
            *slot = Some(dimension);
        }
    }

    (width, height)
}

/// First `w-*` / `h-*` utility token with a recognised value.
fn class_dimension(element: &Element, axis: Axis) -> Option<Dimension> {
    let prefix = axis.prefix();
    element.class_tokens().find_map(|token| {
        token
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix('-'))
            .and_then(Dimension::parse_token)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn div() -> Element {
        Element::new("div")
    }

    #[test]
    fn test_defaults_without_attributes() {
        assert_eq!(
            extract_dimensions(&div()),
            DimensionHint::new(Dimension::Full, Dimension::Scale(4))
        );
    }

    #[test]
    fn test_style_px_is_pixel_exact() {
        let element = div().with_attr("style", "width: 400px; height:120px");
        assert_eq!(
            extract_dimensions(&element),
            DimensionHint::new(Dimension::Px(400), Dimension::Px(120))
        );
    }

    #[test]
    fn test_style_other_units_echo_number() {
        let element = div().with_attr("style", "width: 50%; height: 3rem");
        assert_eq!(
            extract_dimensions(&element),
            DimensionHint::new(Dimension::Scale(50), Dimension::Scale(3))
        );
    }

    #[test]
    fn test_style_ignores_compound_properties() {
        let element = div().with_attr("style", "max-width: 300px; line-height: 20px");
        assert_eq!(extract_dimensions(&element), DimensionHint::default());
    }

    #[test]
    fn test_style_without_unit_ignored() {
        let element = div().with_attr("style", "width: 300");
        assert_eq!(extract_dimensions(&element).width, Dimension::Full);
    }

    #[test]
    fn test_class_tokens() {
        let element = div().with_attr("className", "p-4 w-32 h-screen");
        assert_eq!(
            extract_dimensions(&element),
            DimensionHint::new(Dimension::Scale(32), Dimension::Screen)
        );
    }

    #[test]
    fn test_class_arbitrary_pixels() {
        let element = div().with_attr("class", "w-[250px]");
        assert_eq!(extract_dimensions(&element).width, Dimension::Px(250));
    }

    #[test]
    fn test_class_first_match_wins() {
        let element = div().with_attr("class", "w-auto w-10");
        assert_eq!(extract_dimensions(&element).width, Dimension::Auto);
    }

    #[test]
    fn test_class_ignores_compound_and_variant_utilities() {
        let element = div().with_attr("class", "max-w-4 min-h-screen md:w-10 w-1/2");
        assert_eq!(extract_dimensions(&element), DimensionHint::default());
    }

    #[test]
    fn test_class_wins_over_style() {
        let element = div()
            .with_attr("style", "width: 400px; height: 80px")
            .with_attr("className", "w-64");
        let hint = extract_dimensions(&element);

        assert_eq!(hint.width, Dimension::Scale(64));
        // No height class, so the style value survives
        assert_eq!(hint.height, Dimension::Px(80));
    }

    #[test]
    fn test_custom_defaults() {
        let defaults = DimensionHint::new(Dimension::Full, Dimension::Scale(48));
        let element = div().with_attr("class", "w-20");
        assert_eq!(
            extract_dimensions_with(&element, defaults),
            DimensionHint::new(Dimension::Scale(20), Dimension::Scale(48))
        );
    }

    #[test]
    fn test_malformed_values_fall_through() {
        let element = div()
            .with_attr("style", "width: 99999999999999px")
            .with_attr("class", "w- h-[abc] w-[px]");
        assert_eq!(extract_dimensions(&element), DimensionHint::default());
    }

    #[test]
    fn test_dimension_classes() {
        assert_eq!(Dimension::Scale(4).class(Axis::Height), "h-4");
        assert_eq!(Dimension::Fraction(3, 4).class(Axis::Width), "w-3/4");
        assert_eq!(Dimension::Px(400).class(Axis::Width), "w-[400px]");
        assert_eq!(Dimension::Px(1).class(Axis::Width), "w-px");
        assert_eq!(Dimension::Screen.class(Axis::Height), "h-screen");
    }
}
