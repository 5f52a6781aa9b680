//! Structure-replacing shapes.
//!
//! These widgets get a uniform placeholder no matter what the source contains,
//! so the builders never look at the element's children.

use skel_markup::Element;

use crate::dimensions::Dimension::{Fraction, Full, Px, Scale};
use crate::placeholder::{FILL_TOKEN, PlaceholderNode, Rounding};
use crate::shape::{ShapeDescriptor, ShapeOptions};

pub(super) fn is_navigation(element: &Element) -> bool {
    element.tag() == "nav"
}

/// Logo, four menu items, and a circular account button.
pub(super) fn navigation(_: &Element, _: &ShapeOptions) -> ShapeDescriptor {
    let items = (0..4).map(|_| PlaceholderNode::leaf(Scale(20), Scale(4)));
    let template = PlaceholderNode::container(
        "w-full flex items-center justify-between p-4 border-b border-gray-200",
    )
    .with_child(PlaceholderNode::leaf(Scale(32), Scale(8)))
    .with_child(PlaceholderNode::container("flex gap-4").with_children(items))
    .with_child(PlaceholderNode::leaf(Scale(10), Scale(10)).rounded(Rounding::Full));
    ShapeDescriptor::synthetic("navigation", template)
}

pub(super) fn is_table(element: &Element) -> bool {
    element.tag() == "table"
}

/// Grid of `table_rows` × `table_columns` boxes; the first row is the header.
pub(super) fn table(_: &Element, options: &ShapeOptions) -> ShapeDescriptor {
    let header = PlaceholderNode::container("flex gap-4 pb-2 border-b border-gray-200")
        .with_children((0..options.table_columns).map(|_| PlaceholderNode::leaf(Full, Scale(6))));
    let body = (1..options.table_rows).map(|_| {
        PlaceholderNode::container("flex gap-4")
            .with_children((0..options.table_columns).map(|_| PlaceholderNode::leaf(Full, Scale(4))))
    });
    let template = PlaceholderNode::container("w-full space-y-3")
        .with_child(header)
        .with_children(body);
    ShapeDescriptor::synthetic("table", template)
}

pub(super) fn is_card(element: &Element) -> bool {
    element.tag() == "div" && element.class_tokens().any(|token| token.contains("card"))
}

/// Title, two body lines, and a footer with an action and an icon.
pub(super) fn card(_: &Element, _: &ShapeOptions) -> ShapeDescriptor {
    let body = PlaceholderNode::container("space-y-2")
        .with_child(PlaceholderNode::leaf(Full, Scale(4)))
        .with_child(PlaceholderNode::leaf(Fraction(5, 6), Scale(4)));
    let footer = PlaceholderNode::container("flex justify-between items-center pt-2")
        .with_child(PlaceholderNode::leaf(Scale(24), Scale(8)))
        .with_child(PlaceholderNode::leaf(Scale(8), Scale(8)).rounded(Rounding::Full));
    let template = PlaceholderNode::container("w-full p-4 border rounded-lg space-y-4")
        .with_child(PlaceholderNode::leaf(Fraction(3, 4), Scale(4)))
        .with_child(body)
        .with_child(footer);
    ShapeDescriptor::synthetic("card", template)
}

/// `flex` followed somewhere later by `items-center`.
pub(super) fn is_avatar_with_text(element: &Element) -> bool {
    if element.tag() != "div" {
        return false;
    }
    let mut tokens = element.class_tokens();
    tokens.any(|token| token == "flex") && tokens.any(|token| token == "items-center")
}

/// Circular avatar followed by a name line and a shorter caption line.
pub(super) fn avatar_with_text(_: &Element, _: &ShapeOptions) -> ShapeDescriptor {
    let lines = PlaceholderNode::container("space-y-1")
        .with_child(PlaceholderNode::leaf(Scale(24), Scale(4)))
        .with_child(PlaceholderNode::leaf(Scale(32), Scale(3)));
    let template = PlaceholderNode::container("flex items-center gap-2")
        .with_child(PlaceholderNode::leaf(Scale(10), Scale(10)).rounded(Rounding::Full))
        .with_child(lines);
    ShapeDescriptor::synthetic("avatar-with-text", template)
}

pub(super) fn is_list(element: &Element) -> bool {
    element.is_any_of(&["ol", "ul"])
}

/// `list_items` rows; ordered lists get a circular marker per row.
pub(super) fn list(element: &Element, options: &ShapeOptions) -> ShapeDescriptor {
    let ordered = element.tag() == "ol";
    let items = (0..options.list_items).map(|_| {
        let row = PlaceholderNode::leaf(Full, Scale(6));
        if ordered {
            PlaceholderNode::container("flex items-center gap-3")
                .with_child(PlaceholderNode::leaf(Scale(6), Scale(6)).rounded(Rounding::Full))
                .with_child(row)
        } else {
            row
        }
    });
    let template = PlaceholderNode::container("w-full space-y-3").with_children(items);
    ShapeDescriptor::synthetic("list", template)
}

pub(super) fn is_breadcrumb(element: &Element) -> bool {
    let labelled = element
        .attr("aria-label")
        .is_some_and(|label| label.to_ascii_lowercase().contains("breadcrumb"));
    element
        .class_tokens()
        .any(|token| token.to_ascii_lowercase().contains("breadcrumb"))
        || labelled
}

/// Three crumbs separated by faint dividers.
pub(super) fn breadcrumb(_: &Element, _: &ShapeOptions) -> ShapeDescriptor {
    let divider = || PlaceholderNode::leaf(Px(1), Scale(4)).with_decoration("opacity-50");
    let template = PlaceholderNode::container("flex items-center gap-2")
        .with_child(PlaceholderNode::leaf(Scale(16), Scale(4)))
        .with_child(divider())
        .with_child(PlaceholderNode::leaf(Scale(20), Scale(4)))
        .with_child(divider())
        .with_child(PlaceholderNode::leaf(Scale(24), Scale(4)));
    ShapeDescriptor::synthetic("breadcrumb", template)
}

pub(super) fn is_table_row(element: &Element) -> bool {
    element.tag() == "tr"
}

/// `row_cells` flex cells, each holding one cell box.
pub(super) fn table_row(_: &Element, options: &ShapeOptions) -> ShapeDescriptor {
    let cells = (0..options.row_cells).map(|_| {
        PlaceholderNode::container("flex-1").with_child(PlaceholderNode::leaf(Full, Scale(8)))
    });
    let template = PlaceholderNode::container("flex gap-4 w-full").with_children(cells);
    ShapeDescriptor::synthetic("table-row", template)
}

/// Every synthetic leaf above must use the shared fill.
#[cfg(test)]
fn uses_only_shared_fill(node: &PlaceholderNode) -> bool {
    node.descendants().filter(|n| n.is_leaf()).all(|leaf| {
        leaf.decoration()
            .iter()
            .filter(|class| class.starts_with("bg-"))
            .eq([FILL_TOKEN].iter().copied())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn widths(node: &PlaceholderNode) -> Vec<String> {
        node.children().iter().map(|c| c.size()[0].clone()).collect()
    }

    #[test]
    fn test_navigation_composite() {
        let shape = navigation(&Element::new("nav"), &ShapeOptions::default());
        let nav = shape.template();

        assert_eq!(nav.children().len(), 3);
        assert_eq!(nav.children()[1].children().len(), 4);
        assert!(nav.children()[2].decoration().contains(&"rounded-full".to_owned()));
        assert!(uses_only_shared_fill(nav));
    }

    #[test]
    fn test_table_default_grid() {
        let shape = table(&Element::new("table"), &ShapeOptions::default());
        let rows = shape.template().children();

        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|row| row.children().len() == 8));
        // Header row is taller and underlined
        assert_eq!(rows[0].children()[0].size()[1], "h-6");
        assert!(rows[0].decoration().contains(&"border-b".to_owned()));
        assert_eq!(rows[1].children()[0].size()[1], "h-4");
        assert!(uses_only_shared_fill(shape.template()));
    }

    #[test]
    fn test_table_custom_grid() {
        let options = ShapeOptions {
            table_columns: 3,
            table_rows: 2,
            ..ShapeOptions::default()
        };
        let shape = table(&Element::new("table"), &options);

        let counts: Vec<_> = shape
            .template()
            .children()
            .iter()
            .map(|row| row.children().len())
            .collect();
        assert_eq!(counts, vec![3, 3]);
    }

    #[test]
    fn test_card_predicate() {
        assert!(is_card(&Element::new("div").with_attr("className", "product-card shadow")));
        assert!(!is_card(&Element::new("section").with_attr("className", "card")));
        assert!(!is_card(&Element::new("div").with_attr("className", "flex")));
    }

    #[test]
    fn test_card_body_lines_differ() {
        let shape = card(&Element::new("div"), &ShapeOptions::default());
        let body = &shape.template().children()[1];

        assert_eq!(widths(body), vec!["w-full", "w-5/6"]);
    }

    #[test]
    fn test_avatar_predicate_needs_both_tokens() {
        let both = Element::new("div").with_attr("class", "flex gap-2 items-center");
        let flex_only = Element::new("div").with_attr("class", "flex");

        assert!(is_avatar_with_text(&both));
        assert!(!is_avatar_with_text(&flex_only));
    }

    #[test]
    fn test_avatar_predicate_is_ordered() {
        let reversed = Element::new("div").with_attr("class", "items-center flex");

        assert!(!is_avatar_with_text(&reversed));
    }

    #[test]
    fn test_avatar_lines_differ() {
        let shape = avatar_with_text(&Element::new("div"), &ShapeOptions::default());
        let lines = &shape.template().children()[1];

        assert_eq!(widths(lines), vec!["w-24", "w-32"]);
    }

    #[test]
    fn test_ordered_list_has_markers() {
        let shape = list(&Element::new("ol"), &ShapeOptions::default());
        let items = shape.template().children();

        assert_eq!(items.len(), 5);
        assert!(items.iter().all(|item| item.children().len() == 2));
        assert!(items[0].children()[0]
            .decoration()
            .contains(&"rounded-full".to_owned()));
    }

    #[test]
    fn test_unordered_list_has_no_markers() {
        let shape = list(&Element::new("ul"), &ShapeOptions::default());

        assert!(shape.template().children().iter().all(PlaceholderNode::is_leaf));
    }

    #[test]
    fn test_breadcrumb_predicates() {
        assert!(is_breadcrumb(&Element::new("div").with_attr("class", "Breadcrumbs")));
        assert!(is_breadcrumb(&Element::new("div").with_attr("aria-label", "Breadcrumb")));
        assert!(is_breadcrumb(
            &Element::new("div")
                .with_attr("role", "navigation")
                .with_attr("aria-label", "breadcrumb trail")
        ));
        assert!(!is_breadcrumb(&Element::new("div").with_attr("role", "navigation")));
    }

    #[test]
    fn test_breadcrumb_dividers_are_faint() {
        let shape = breadcrumb(&Element::new("div"), &ShapeOptions::default());
        let parts = shape.template().children();

        assert_eq!(parts.len(), 5);
        assert_eq!(parts[1].size(), &["w-px", "h-4"]);
        assert!(parts[1].decoration().contains(&"opacity-50".to_owned()));
        assert!(uses_only_shared_fill(shape.template()));
    }

    #[test]
    fn test_table_row_cells() {
        let shape = table_row(&Element::new("tr"), &ShapeOptions::default());
        let cells = shape.template().children();

        assert_eq!(cells.len(), 8);
        assert!(cells.iter().all(|cell| cell.decoration() == ["flex-1"]));
    }
}
