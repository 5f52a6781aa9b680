//! Recursive source-to-placeholder transducer.

use skel_markup::{Element, SourceNode};
use tracing::debug;

use crate::classify::Classifier;
use crate::placeholder::PlaceholderNode;
use crate::shape::ChildrenPolicy;

/// Container used when a document has several top-level placeholders.
const DOCUMENT_CONTAINER: &str = "w-full space-y-4";

/// Counters for one transduction pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransduceStats {
    /// Source elements classified.
    pub elements: usize,
    /// Source text nodes inspected.
    pub text_nodes: usize,
}

impl TransduceStats {
    pub fn visited(&self) -> usize {
        self.elements + self.text_nodes
    }
}

/// Walks a source tree top-down and rewrites every node into a placeholder.
#[derive(Debug, Clone, Default)]
pub struct Transducer {
    classifier: Classifier,
}

impl Transducer {
    #[must_use]
    pub fn new(classifier: Classifier) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Transduce one node.
    ///
    /// Blank text yields `None`; everything else yields a placeholder.
    #[must_use]
    pub fn transduce(&self, node: &SourceNode) -> Option<PlaceholderNode> {
        self.transduce_node(node, &mut TransduceStats::default())
    }

    /// Transduce top-level nodes into a marked skeleton root.
    ///
    /// Returns `None` when nothing produces a placeholder.
    #[must_use]
    pub fn transduce_document(&self, nodes: &[SourceNode]) -> Option<PlaceholderNode> {
        self.transduce_document_with_stats(nodes).0
    }

    /// Like [`transduce_document`](Self::transduce_document), also returning
    /// what the pass visited.
    #[must_use]
    pub fn transduce_document_with_stats(
        &self,
        nodes: &[SourceNode],
    ) -> (Option<PlaceholderNode>, TransduceStats) {
        let mut stats = TransduceStats::default();
        let mut placeholders: Vec<_> = nodes
            .iter()
            .filter_map(|node| self.transduce_node(node, &mut stats))
            .collect();

        let root = match placeholders.len() {
            0 => None,
            1 => placeholders.pop(),
            _ => Some(PlaceholderNode::container(DOCUMENT_CONTAINER).with_children(placeholders)),
        };
        let root = root.map(|mut root| {
            root.mark_loading_root();
            root
        });

        debug!(
            elements = stats.elements,
            text_nodes = stats.text_nodes,
            "Transduced document"
        );
        (root, stats)
    }

    fn transduce_node(
        &self,
        node: &SourceNode,
        stats: &mut TransduceStats,
    ) -> Option<PlaceholderNode> {
        match node {
            SourceNode::Text(content) => {
                stats.text_nodes += 1;
                (!content.trim().is_empty()).then(PlaceholderNode::text_line)
            }
            SourceNode::Element(element) => Some(self.transduce_element(element, stats)),
        }
    }

    fn transduce_element(&self, element: &Element, stats: &mut TransduceStats) -> PlaceholderNode {
        stats.elements += 1;
        let (template, policy) = self.classifier.classify(element).into_parts();

        match policy {
            ChildrenPolicy::None | ChildrenPolicy::Synthetic(_) => template,
            ChildrenPolicy::Transformed { fallback } => {
                let children: Vec<_> = element
                    .children()
                    .iter()
                    .filter_map(|child| self.transduce_node(child, stats))
                    .collect();
                if children.is_empty() {
                    template.with_child(fallback)
                } else {
                    template.with_children(children)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placeholder::{FILL_TOKEN, LOADING_MARKER};
    use pretty_assertions::assert_eq;
    use skel_markup::MarkupParser;

    fn parse(markup: &str) -> Vec<SourceNode> {
        MarkupParser::new().parse(markup).unwrap()
    }

    fn skeleton(markup: &str) -> PlaceholderNode {
        Transducer::default()
            .transduce_document(&parse(markup))
            .unwrap()
    }

    #[test]
    fn test_blank_text_is_dropped() {
        let transducer = Transducer::default();

        assert_eq!(transducer.transduce(&SourceNode::text("  \n\t")), None);
        assert_eq!(
            transducer.transduce(&SourceNode::text("Hello")),
            Some(PlaceholderNode::text_line())
        );
    }

    #[test]
    fn test_block_keeps_structure() {
        let root = skeleton("<section><h1>Title</h1>\n<p>Body</p>\n<button>Go</button></section>");
        let rules: Vec<_> = root.children().iter().map(|c| c.size()[0].clone()).collect();

        // heading, paragraph container, button
        assert_eq!(rules, vec!["w-3/4", "w-full", "w-24"]);
    }

    #[test]
    fn test_empty_block_gets_fallback_line() {
        let root = skeleton("<div></div>");

        assert_eq!(root.children(), &[PlaceholderNode::text_line()]);
    }

    #[test]
    fn test_whitespace_only_block_gets_fallback_line() {
        let root = skeleton("<div>   </div>");

        assert_eq!(root.children(), &[PlaceholderNode::text_line()]);
    }

    #[test]
    fn test_single_root_is_marked() {
        let root = skeleton("<div><span>x</span></div>");

        assert!(root.is_loading_root());
        assert!(root.decoration().contains(&LOADING_MARKER.to_owned()));
        assert!(root.descendants().skip(1).all(|n| !n.is_loading_root()));
    }

    #[test]
    fn test_multiple_roots_are_wrapped() {
        let root = skeleton("<h1>A</h1>\n<p>B</p>");

        assert_eq!(root.children().len(), 2);
        assert_eq!(root.size(), &["w-full"]);
        assert!(root.is_loading_root());
        assert!(!root.children()[0].is_loading_root());
    }

    #[test]
    fn test_blank_document_has_no_root() {
        let transducer = Transducer::default();

        assert_eq!(transducer.transduce_document(&parse("  \n ")), None);
        assert_eq!(transducer.transduce_document(&[]), None);
    }

    #[test]
    fn test_structure_replacing_children_are_not_visited() {
        let markup = "<nav><a>One</a><a>Two</a><ul><li>Deep</li></ul></nav>";
        let (_, stats) = Transducer::default().transduce_document_with_stats(&parse(markup));

        assert_eq!(stats, TransduceStats { elements: 1, text_nodes: 0 });
    }

    #[test]
    fn test_structure_preserving_children_are_visited() {
        let markup = "<div><span>a</span> <em>b</em></div>";
        let (_, stats) = Transducer::default().transduce_document_with_stats(&parse(markup));

        // div, span, em; text " " plus the leaf text is never reached
        assert_eq!(stats.elements, 3);
        assert_eq!(stats.text_nodes, 1);
        assert_eq!(stats.visited(), 4);
    }

    #[test]
    fn test_navigation_is_uniform() {
        let sparse = skeleton("<nav><a>Home</a></nav>");
        let dense = skeleton(
            r#"<nav class="bg-blue-500"><img src="logo.png"><ul><li>A</li><li>B</li><li>C</li></ul><button>Login</button></nav>"#,
        );

        assert_eq!(sparse, dense);
    }

    #[test]
    fn test_deterministic() {
        let markup = r#"<div class="card"><h2>T</h2></div><table><tr><td>1</td></tr></table><main><p class="text-sm">x</p><img width="40" height="40"></main>"#;

        assert_eq!(skeleton(markup), skeleton(markup));
    }

    #[test]
    fn test_fill_token_uniformity() {
        let root = skeleton(
            r#"<main class="bg-white"><nav></nav><div class="card bg-red-100"></div><ol><li>x</li></ol><form><input><textarea></textarea><select></select></form><span class="badge bg-green-500">New</span><div class="breadcrumb"></div><table></table><p>t</p></main>"#,
        );

        for node in root.descendants() {
            let fills: Vec<_> = node
                .decoration()
                .iter()
                .filter(|class| class.starts_with("bg-"))
                .collect();
            if node.is_leaf() {
                assert_eq!(fills, vec![FILL_TOKEN]);
            } else {
                assert!(fills.is_empty(), "container with fill: {node:?}");
            }
        }
    }

    #[test]
    fn test_table_shape_in_document() {
        let root = skeleton("<table><thead><tr><th>A</th></tr></thead></table>");

        assert_eq!(root.children().len(), 5);
        assert!(root.children().iter().all(|row| row.children().len() == 8));
    }

    #[test]
    fn test_custom_classifier() {
        let transducer = Transducer::new(Classifier::with_options(crate::ShapeOptions {
            table_columns: 2,
            table_rows: 3,
            ..crate::ShapeOptions::default()
        }));
        let root = transducer.transduce_document(&parse("<table></table>")).unwrap();

        assert_eq!(root.children().len(), 3);
        assert_eq!(root.children()[0].children().len(), 2);
    }
}
