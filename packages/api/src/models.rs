use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use formex_extractor::ExtractedDocument;

use crate::error::{ApiError, Result};

// Column widths from the documents table
const MAX_FILE_LEN: usize = 50;
const MAX_LANGUAGE_LEN: usize = 3;
const MAX_SOURCE_LEN: usize = 6;
const MAX_CELEX_LEN: usize = 11;

/// A stored publication record.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Document {
    pub id: i64,
    pub document_ref_date: NaiveDate,
    pub publication_ref_file: String,
    pub publication_ref_language: String,
    pub source: String,
    pub celex: String,
    pub content_title: String,
    pub content_preamble: String,
    pub content_articles: String,
    pub content_signature: String,
    pub annexes: String,
    pub created_at: DateTime<Utc>,
}

/// A record ready for insertion, validated against the table constraints.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub document_ref_date: NaiveDate,
    pub publication_ref_file: String,
    pub publication_ref_language: String,
    pub source: String,
    pub celex: String,
    pub content_title: String,
    pub content_preamble: String,
    pub content_articles: String,
    pub content_signature: String,
    pub annexes: String,
}

impl NewDocument {
    /// Validate an extracted record against the storage constraints.
    ///
    /// The date string must be an ISO 8601 calendar date and the short
    /// metadata fields must fit their column widths. Violations are
    /// unprocessable input, reported before any insert is attempted.
    pub fn from_extracted(extracted: ExtractedDocument) -> Result<Self> {
        let document_ref_date =
            NaiveDate::parse_from_str(&extracted.document_ref_date, "%Y-%m-%d").map_err(
                |source| ApiError::InvalidDate {
                    value: extracted.document_ref_date.clone(),
                    source,
                },
            )?;

        check_len(
            "publication_ref_file",
            &extracted.publication_ref_file,
            MAX_FILE_LEN,
        )?;
        check_len(
            "publication_ref_language",
            &extracted.publication_ref_language,
            MAX_LANGUAGE_LEN,
        )?;
        check_len("source", &extracted.source, MAX_SOURCE_LEN)?;
        check_len("celex", &extracted.celex, MAX_CELEX_LEN)?;

        Ok(Self {
            document_ref_date,
            publication_ref_file: extracted.publication_ref_file,
            publication_ref_language: extracted.publication_ref_language,
            source: extracted.source,
            celex: extracted.celex,
            content_title: extracted.content_title,
            content_preamble: extracted.content_preamble,
            content_articles: extracted.content_articles,
            content_signature: extracted.content_signature,
            annexes: extracted.annexes,
        })
    }
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<()> {
    if value.chars().count() > max {
        return Err(ApiError::FieldTooLong { field, max });
    }
    Ok(())
}

#[derive(Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    pub data: Vec<T>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extracted() -> ExtractedDocument {
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
    fn test_from_extracted_parses_date() {
        let new = NewDocument::from_extracted(extracted()).unwrap();

        assert_eq!(
            new.document_ref_date,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert_eq!(new.celex, "12345A6789");
    }

    #[test]
    fn test_from_extracted_rejects_bad_date() {
        let mut doc = extracted();
        doc.document_ref_date = "20240101".to_string();

        let err = NewDocument::from_extracted(doc).unwrap_err();
        assert!(matches!(err, ApiError::InvalidDate { ref value, .. } if value == "20240101"));
    }

    #[test]
    fn test_from_extracted_rejects_overlong_celex() {
        let mut doc = extracted();
        doc.celex = "12345A678901".to_string();

        let err = NewDocument::from_extracted(doc).unwrap_err();
        assert!(matches!(
            err,
            ApiError::FieldTooLong {
                field: "celex",
                max: 11
            }
        ));
    }

    #[test]
    fn test_from_extracted_rejects_overlong_language() {
        let mut doc = extracted();
        doc.publication_ref_language = "LANG".to_string();

        let err = NewDocument::from_extracted(doc).unwrap_err();
        assert!(matches!(
            err,
            ApiError::FieldTooLong {
                field: "publication_ref_language",
                ..
            }
        ));
    }
}
