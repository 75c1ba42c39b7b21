//! Error types for the extractor.
//!
//! Decoding problems keep their own variants so callers can see what the
//! input did wrong; parse and structural problems are folded into
//! [`ExtractorError::InvalidDocument`] at the ingestion boundary, carrying
//! the underlying cause as text only.

use thiserror::Error;

/// Main error type for the extractor library.
#[derive(Debug, Error)]
pub enum ExtractorError {
    /// Declared encoding label is not a known character encoding.
    #[error("Unknown character encoding: '{0}'")]
    UnknownEncoding(String),

    /// Byte stream is malformed under the declared (or default) encoding.
    #[error("Input is not valid {encoding}")]
    Decode { encoding: String },

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// Missing required XML element.
    #[error("Missing required element <{element}> in {context}")]
    MissingElement { element: String, context: String },

    /// Missing required attribute.
    #[error("Missing required attribute '{attribute}' on <{element}>")]
    MissingAttribute { attribute: String, element: String },

    /// Required element is present but carries no text.
    #[error("Element <{element}> in {context} has no text content")]
    EmptyElement { element: String, context: String },

    /// Document failed extraction as a whole. The detail text is the
    /// original parse or structural failure.
    #[error(
        "Invalid XML document. Check that the schema of the uploaded file matches \
         the publication schema expected by the extractor. Details: {detail}"
    )]
    InvalidDocument { detail: String },

    /// One or more inputs in a batch run failed.
    #[error("{failed} of {total} documents failed to extract")]
    Batch { failed: usize, total: usize },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for extractor operations.
pub type Result<T> = std::result::Result<T, ExtractorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_element_display() {
        let err = ExtractorError::MissingElement {
            element: "CELEX".to_string(),
            context: "META".to_string(),
        };
        assert_eq!(err.to_string(), "Missing required element <CELEX> in META");
    }

    #[test]
    fn test_invalid_document_carries_detail() {
        let cause = ExtractorError::MissingAttribute {
            attribute: "FILE".to_string(),
            element: "PUBLICATION.REF".to_string(),
        };
        let err = ExtractorError::InvalidDocument {
            detail: cause.to_string(),
        };
        assert!(err.to_string().starts_with("Invalid XML document."));
        assert!(err.to_string().contains("'FILE' on <PUBLICATION.REF>"));
    }

    #[test]
    fn test_unknown_encoding_display() {
        let err = ExtractorError::UnknownEncoding("klingon-8".to_string());
        assert!(err.to_string().contains("klingon-8"));
    }
}
