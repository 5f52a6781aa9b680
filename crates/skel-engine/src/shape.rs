//! Shape descriptors returned by the classifier.

use crate::placeholder::PlaceholderNode;

/// Counts used by the synthetic shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeOptions {
    /// Columns in a synthetic table grid.
    pub table_columns: usize,
    /// Rows in a synthetic table grid, header row included.
    pub table_rows: usize,
    /// Items in a synthetic list.
    pub list_items: usize,
    /// Cells in a synthetic table row.
    pub row_cells: usize,
}

impl Default for ShapeOptions {
    fn default() -> Self {
        Self {
            table_columns: 8,
            table_rows: 5,
            list_items: 5,
            row_cells: 8,
        }
    }
}

impl ShapeOptions {
    /// Copy with every count raised to at least one.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            table_columns: self.table_columns.max(1),
            table_rows: self.table_rows.max(1),
            list_items: self.list_items.max(1),
            row_cells: self.row_cells.max(1),
        }
    }
}

/// What the transducer does with the source element's children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildrenPolicy {
    /// Leaf shape; children are neither read nor emitted.
    None,
    /// Fixed synthetic children already present in the template.
    Synthetic(usize),
    /// Transformed real children are embedded in the template.
    /// `fallback` is emitted when none survive.
    Transformed { fallback: PlaceholderNode },
}

/// Output of classifying one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeDescriptor {
    rule: &'static str,
    template: PlaceholderNode,
    children: ChildrenPolicy,
}

impl ShapeDescriptor {
    /// Shape with no children at all.
    #[must_use]
    pub fn leaf(rule: &'static str, template: PlaceholderNode) -> Self {
        Self {
            rule,
            template,
            children: ChildrenPolicy::None,
        }
    }

    /// Shape whose children are fixed and independent of the source.
    #[must_use]
    pub fn synthetic(rule: &'static str, template: PlaceholderNode) -> Self {
        let count = template.children().len();
        Self {
            rule,
            template,
            children: ChildrenPolicy::Synthetic(count),
        }
    }

    /// Container that wraps the transformed source children.
    #[must_use]
    pub fn transformed(
        rule: &'static str,
        container: PlaceholderNode,
        fallback: PlaceholderNode,
    ) -> Self {
        Self {
            rule,
            template: container,
            children: ChildrenPolicy::Transformed { fallback },
        }
    }

    /// Name of the rule that produced this shape.
    pub fn rule(&self) -> &'static str {
        self.rule
    }

    pub fn template(&self) -> &PlaceholderNode {
        &self.template
    }

    pub fn children_policy(&self) -> &ChildrenPolicy {
        &self.children
    }

    /// Whether the transducer must transform the source element's children.
    pub fn uses_source_children(&self) -> bool {
        matches!(self.children, ChildrenPolicy::Transformed { .. })
    }

    pub(crate) fn into_parts(self) -> (PlaceholderNode, ChildrenPolicy) {
        (self.template, self.children)
    }
}
