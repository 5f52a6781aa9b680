//! Lenient markup fragment parser built on quick-xml.

#![allow(clippy::unused_self)] // Unit struct methods have &self for API consistency

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::entities::{decode_html_entities, resolve_reference};
use crate::error::MarkupError;
use crate::node::{Element, SourceNode};

/// HTML elements that never have content or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Deepest element nesting accepted by [`MarkupParser::parse`].
pub const MAX_DEPTH: usize = 256;

/// Check whether `tag` (lower-case) is an HTML void element.
#[must_use]
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Parse component markup fragments into [`SourceNode`] trees.
///
/// A fragment may have any number of top-level nodes, including text.
#[derive(Debug, Clone, Copy)]
pub struct MarkupParser;

impl MarkupParser {
    /// Create a new parser.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse a fragment into its top-level nodes.
    ///
    /// # Errors
    ///
    /// Returns an error if the reader rejects the input, elements are not
    /// properly nested, or nesting exceeds [`MAX_DEPTH`]. No partial tree is
    /// returned.
    pub fn parse(&self, markup: &str) -> Result<Vec<SourceNode>, MarkupError> {
        let markup = decode_html_entities(markup);

        let mut reader = Reader::from_str(&markup);
        let config = reader.config_mut();
        config.trim_text(false);
        // Nesting is validated here so void elements can stay unclosed.
        config.check_end_names = false;
        config.allow_dangling_amp = true;

        self.parse_children(&mut reader, None, 0)
    }

    /// Read nodes until the closing tag of `parent` (or end of input at top level).
    ///
    /// `depth` is the number of open elements around the nodes being read.
    fn parse_children<R: BufRead>(
        &self,
        reader: &mut Reader<R>,
        parent: Option<&str>,
        depth: usize,
    ) -> Result<Vec<SourceNode>, MarkupError> {
        let mut buf = Vec::new();
        let mut children = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    let tag = self.decode_tag(reader, e.name().as_ref());
                    let attrs = self.decode_attrs(reader, &e);
                    let element = Element::new(tag).with_attrs(attrs);
                    let element = if is_void_element(element.tag()) {
                        element
                    } else {
                        if depth >= MAX_DEPTH {
                            return Err(MarkupError::TooDeep { limit: MAX_DEPTH });
                        }
                        let nested = self.parse_children(reader, Some(element.tag()), depth + 1)?;
                        element.with_children(nested)
                    };
                    children.push(SourceNode::Element(element));
                }
                Event::Empty(e) => {
                    let tag = self.decode_tag(reader, e.name().as_ref());
                    let attrs = self.decode_attrs(reader, &e);
                    children.push(SourceNode::Element(Element::new(tag).with_attrs(attrs)));
                }
                Event::Text(e) => {
                    let text = reader.decoder().decode(&e)?;
                    append_text(&mut children, &text);
                }
                Event::GeneralRef(e) => {
                    let name = reader.decoder().decode(&e)?;
                    append_text(&mut children, &resolve_reference(&name));
                }
                Event::CData(e) => {
                    append_text(&mut children, &String::from_utf8_lossy(&e));
                }
                Event::End(e) => {
                    let found = self
                        .decode_tag(reader, e.name().as_ref())
                        .to_ascii_lowercase();
                    match parent {
                        Some(expected) if expected == found => return Ok(children),
                        // `<img></img>` and friends: the element is already complete
                        _ if is_void_element(&found) => {}
                        Some(expected) => {
                            return Err(MarkupError::MismatchedEnd {
                                expected: expected.to_owned(),
                                found,
                            });
                        }
                        None => return Err(MarkupError::UnexpectedEnd { found }),
                    }
                }
                Event::Eof => {
                    return match parent {
                        Some(tag) => Err(MarkupError::UnclosedElement {
                            tag: tag.to_owned(),
                        }),
                        None => Ok(children),
                    };
                }
                Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            }
            buf.clear();
        }
    }

    fn decode_tag<R: BufRead>(&self, reader: &Reader<R>, name: &[u8]) -> String {
        reader
            .decoder()
            .decode(name)
            .map_or_else(|_| String::from_utf8_lossy(name).into_owned(), Cow::into_owned)
    }

    fn decode_attrs<R: BufRead>(
        &self,
        reader: &Reader<R>,
        e: &BytesStart,
    ) -> BTreeMap<String, String> {
        let mut attrs = BTreeMap::new();
        for attr in e.html_attributes().flatten() {
            let key = self.decode_tag(reader, attr.key.as_ref());
            let value = attr.unescape_value().map_or_else(
                |_| String::from_utf8_lossy(&attr.value).into_owned(),
                Cow::into_owned,
            );
            attrs.insert(key, value);
        }
        attrs
    }
}

impl Default for MarkupParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Append character data, merging with a preceding text node.
fn append_text(children: &mut Vec<SourceNode>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(SourceNode::Text(last)) = children.last_mut() {
        last.push_str(text);
    } else {
        children.push(SourceNode::text(text));
    }
}
