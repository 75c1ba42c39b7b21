//! Core data types for the extractor.
//!
//! An extracted publication is a flat field mapping: five metadata values
//! read from `META`, and five content sections normalized to plain text.

use serde::{Deserialize, Serialize};

/// A single publication extracted from a Formex document.
///
/// All fields are required; extraction either fills every one of them or
/// fails for the whole document. The record is built once and never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    /// Publication date from `META/DOCUMENT.REF/DATE`, as written (ISO 8601).
    pub document_ref_date: String,

    /// Source file name from the `FILE` attribute of `META/PUBLICATION.REF`.
    pub publication_ref_file: String,

    /// Official Journal language code from `META/PUBLICATION.REF/LG.OJ`.
    pub publication_ref_language: String,

    /// Publishing source code from `META/SOURCE`.
    pub source: String,

    /// CELEX identifier from `META/CELEX`.
    pub celex: String,

    /// Normalized text of the `CONTENU/TITRE` subtree.
    pub content_title: String,

    /// Normalized text of the `CONTENU/PREAMBULE` subtree.
    pub content_preamble: String,

    /// Normalized text of the `CONTENU/ARTICLES` subtree.
    pub content_articles: String,

    /// Normalized text of the `CONTENU/SIGNATURE` subtree.
    pub content_signature: String,

    /// Normalized text of the root-level `ANNEXES` subtree.
    pub annexes: String,
}

impl ExtractedDocument {
    /// File name for JSON output, derived from the CELEX identifier.
    #[must_use]
    pub fn output_file_name(&self) -> String {
        format!("{}.json", self.celex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ExtractedDocument {
        ExtractedDocument {
            document_ref_date: "2024-01-01".to_string(),
            publication_ref_file: "file.xml".to_string(),
            publication_ref_language: "LAN".to_string(),
            source: "J_Name".to_string(),
            celex: "12345A6789".to_string(),
            content_title: "Doc title.".to_string(),
            content_preamble: "Doc preambule.".to_string(),
            content_articles: "Doc articles.".to_string(),
            content_signature: "Signed.".to_string(),
            annexes: "Doc annexes.".to_string(),
        }
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(sample().output_file_name(), "12345A6789.json");
    }

    #[test]
    fn test_serializes_all_ten_fields() {
        let value = serde_json::to_value(sample()).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 10);
        assert_eq!(object["celex"], "12345A6789");
        assert_eq!(object["content_title"], "Doc title.");
    }

    #[test]
    fn test_json_round_trip() {
        let document = sample();
        let json = serde_json::to_string(&document).unwrap();
        let back: ExtractedDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back, document);
    }
}
