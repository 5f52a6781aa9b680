//! Markup fragment parsing for skel.
//!
//! This crate turns a component markup fragment (HTML or JSX-flavoured markup)
//! into an immutable [`SourceNode`] tree that the skeleton engine walks.
//!
//! The parser is intentionally lenient about HTML conventions that are not
//! valid XML:
//! - void elements (`<img>`, `<input>`, `<br>`) need no closing tag
//! - attributes may be unquoted or valueless (`<input disabled>`)
//! - named HTML entities (`&nbsp;`, `&mdash;`) are decoded
//!
//! Structural errors (unclosed or mismatched elements, broken tags, nesting
//! deeper than [`MAX_DEPTH`]) are reported as [`MarkupError`] and no partial
//! tree is returned.
//!
//! # Example
//!
//! ```
//! use skel_markup::{MarkupParser, SourceNode};
//!
//! let nodes = MarkupParser::new()
//!     .parse(r#"<div class="card"><h1>Title</h1></div>"#)
//!     .unwrap();
//! let SourceNode::Element(card) = &nodes[0] else { panic!() };
//! assert_eq!(card.tag(), "div");
//! assert!(card.has_class_token("card"));
//! ```

mod entities;
mod error;
mod node;
mod parser;

pub use error::MarkupError;
pub use node::{Element, SourceNode};
pub use parser::{MAX_DEPTH, MarkupParser, is_void_element};
