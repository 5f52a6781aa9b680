//! Error types for markup parsing.

/// Error produced when a markup fragment cannot be turned into a tree.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum MarkupError {
    /// Low-level syntax error reported by the XML reader.
    #[error("markup syntax error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Text or names could not be decoded.
    #[error("encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// Input ended while an element was still open.
    #[error("element <{tag}> is never closed")]
    UnclosedElement {
        /// Tag of the innermost open element.
        tag: String,
    },

    /// A closing tag does not match the innermost open element.
    #[error("expected </{expected}> but found </{found}>")]
    MismatchedEnd {
        /// Tag of the innermost open element.
        expected: String,
        /// Tag named by the closing tag.
        found: String,
    },

    /// Elements are nested deeper than the parser accepts.
    #[error("elements are nested more than {limit} levels deep")]
    TooDeep {
        /// Deepest accepted nesting.
        limit: usize,
    },

    /// A closing tag appeared with no open element.
    #[error("unexpected closing tag </{found}>")]
    UnexpectedEnd {
        /// Tag named by the closing tag.
        found: String,
    },
}
