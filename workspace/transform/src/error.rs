use thiserror::Error;

/// Error types for the XML conversion
#[derive(Error, Debug)]
pub enum TransformError {
    /// Error reported by the XML reader (malformed markup, mismatched end tag, bad escape)
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Element or attribute name that is not valid UTF-8
    #[error("Invalid UTF-8 in document: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Document ended while elements were still open
    #[error("Unclosed element at end of document: {0}")]
    UnclosedElement(String),

    /// A second top-level element was found after the root was closed
    #[error("Multiple root elements: {0}")]
    MultipleRoots(String),

    /// Non-whitespace text outside of the root element
    #[error("Text outside of root element")]
    TextOutsideRoot,

    /// The document has no root element at all
    #[error("Document is empty")]
    EmptyDocument,
}

/// Type alias for Result with TransformError
pub type Result<T> = std::result::Result<T, TransformError>;
