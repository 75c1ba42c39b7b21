//! Character encoding detection and decoding for uploaded documents.
//!
//! Publication files arrive as raw bytes in whatever encoding the source
//! system produced. The declared encoding is sniffed from the byte stream
//! itself, before any XML parsing, so that the decoder never depends on the
//! document being well formed.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::bytes::Regex;

use crate::error::{ExtractorError, Result};

/// An `encoding='...'` or `encoding="..."` declaration anywhere in the
/// stream. The first match wins; in practice that is the XML declaration on
/// the first line.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ENCODING_DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)encoding=['"](.*?)['"]"#).expect("valid regex"));

/// Find the encoding label declared in a byte stream, if any.
///
/// Scans the whole stream for the first `encoding=` declaration, matching
/// the keyword case-insensitively. Returns the label as written, without
/// validating it against the set of supported encodings.
pub fn declared_encoding(bytes: &[u8]) -> Option<String> {
    ENCODING_DECLARATION
        .captures(bytes)
        .map(|caps| String::from_utf8_lossy(&caps[1]).into_owned())
}

/// Decode a document byte stream into a string.
///
/// Uses the declared encoding when present, falling back to UTF-8. Labels
/// are resolved per the WHATWG encoding registry, so aliases such as
/// `latin1` or `ISO-8859-1` work. A leading byte order mark is removed.
///
/// # Errors
/// Returns [`ExtractorError::UnknownEncoding`] when the declared label is
/// not a known encoding, and [`ExtractorError::Decode`] when the bytes are
/// malformed for the chosen encoding. Decoding is strict: malformed input
/// is rejected rather than replaced.
pub fn decode_document(bytes: &[u8]) -> Result<String> {
    let encoding = match declared_encoding(bytes) {
        Some(label) => match Encoding::for_label(label.as_bytes()) {
            Some(encoding) => encoding,
            None => return Err(ExtractorError::UnknownEncoding(label)),
        },
        None => UTF_8,
    };

    let (text, had_errors) = encoding.decode_with_bom_removal(bytes);
    if had_errors {
        return Err(ExtractorError::Decode {
            encoding: encoding.name().to_string(),
        });
    }

    Ok(text.into_owned())
}
