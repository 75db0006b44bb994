//! Error types for the CloudFront XML codec.

use std::io;

/// Errors that can occur while decoding or encoding CloudFront XML.
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    /// An I/O error during XML writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A tokenization failure in the underlying XML reader, surfaced
    /// as-is.
    #[error("malformed XML document: {0}")]
    Malformed(#[from] quick_xml::Error),

    /// A typed field whose text content failed coercion. Carries the
    /// wire field name and the raw text so schema drift on the remote
    /// side can be diagnosed from the error alone.
    #[error("failed to decode field {field}: invalid value {value:?}")]
    Decode {
        /// Wire name of the element that failed coercion.
        field: &'static str,
        /// The raw text content that could not be coerced.
        value: String,
    },

    /// Non-UTF-8 element names or broken escape sequences in text
    /// content.
    #[error("XML parse error: {0}")]
    Parse(String),

    /// The encoder was handed a value shape it has no rule for at a
    /// position that requires a mapping.
    #[error("unsupported config shape: {0}")]
    UnsupportedShape(String),
}
