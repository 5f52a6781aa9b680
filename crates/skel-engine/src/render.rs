//! Placeholder tree serializer.

use crate::placeholder::PlaceholderNode;

/// Output layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderStyle {
    /// One element per line, two-space indentation.
    #[default]
    Pretty,
    /// Everything on one line.
    Compact,
}

/// Serialize placeholder trees to plain markup with `class` attributes.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer {
    style: RenderStyle,
}

impl HtmlRenderer {
    #[must_use]
    pub fn new(style: RenderStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> RenderStyle {
        self.style
    }

    /// Render `root` and its subtree.
    #[must_use]
    pub fn render(&self, root: &PlaceholderNode) -> String {
        let mut out = String::with_capacity(1024);
        self.render_node(root, 0, &mut out);
        out
    }

    fn render_node(&self, node: &PlaceholderNode, depth: usize, out: &mut String) {
        self.indent(depth, out);

        out.push('<');
        out.push_str(node.tag());
        let classes = node.classes().collect::<Vec<_>>().join(" ");
        if !classes.is_empty() {
            push_attr(out, "class", &classes);
        }
        if node.is_loading_root() {
            push_attr(out, "role", "status");
            push_attr(out, "aria-busy", "true");
        }
        out.push('>');

        if !node.is_leaf() {
            for child in node.children() {
                self.newline(out);
                self.render_node(child, depth + 1, out);
            }
            self.newline(out);
            self.indent(depth, out);
        }

        out.push_str("</");
        out.push_str(node.tag());
        out.push('>');
    }

    fn indent(&self, depth: usize, out: &mut String) {
        if self.style == RenderStyle::Pretty {
            for _ in 0..depth {
                out.push_str("  ");
            }
        }
    }

    fn newline(&self, out: &mut String) {
        if self.style == RenderStyle::Pretty {
            out.push('\n');
        }
    }
}

fn push_attr(out: &mut String, key: &str, value: &str) {
    out.push(' ');
    out.push_str(key);
    out.push_str("=\"");
    out.push_str(&escape_attr(value));
    out.push('"');
}

/// Escape special characters in an attribute value.
fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
