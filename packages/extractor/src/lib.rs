//! Formex Extractor - Extract publication records from EU Formex XML.
//!
//! This crate turns one Formex document into a flat publication record:
//! five metadata fields read from the `META` section and five content
//! sections normalized to plain text. Input arrives as raw bytes; the
//! declared character encoding is detected and applied before parsing.
//!
//! # Example
//!
//! ```
//! use formex_extractor::from_bytes;
//!
//! let xml = br#"<STANDARD>
//!   <META>
//!     <DOCUMENT.REF><DATE>2024-01-01</DATE></DOCUMENT.REF>
//!     <PUBLICATION.REF FILE="file.xml"><LG.OJ>LAN</LG.OJ></PUBLICATION.REF>
//!     <SOURCE>J_Name</SOURCE>
//!     <CELEX>12345A6789</CELEX>
//!   </META>
//!   <CONTENU>
//!     <TITRE>A <HT TYPE="BOLD">title</HT> .</TITRE>
//!     <PREAMBULE>Preambule</PREAMBULE>
//!     <ARTICLES>Articles</ARTICLES>
//!     <SIGNATURE>Signature</SIGNATURE>
//!   </CONTENU>
//!   <ANNEXES>Annexes</ANNEXES>
//! </STANDARD>"#;
//!
//! let document = from_bytes(xml).unwrap();
//! assert_eq!(document.celex, "12345A6789");
//! assert_eq!(document.content_title, "A title.");
//! ```
//!
//! # Architecture
//!
//! The extractor is organized into several modules:
//!
//! - [`text`]: markup-to-text normalization
//! - [`xml`]: XML navigation utilities
//! - [`encoding`]: encoding detection and strict decoding
//! - [`types`]: the extracted record type
//! - [`error`]: error types and Result alias
//! - [`extractor`]: tag-path extraction pipeline
//! - [`cli`]: command-line interface

pub mod cli;
pub mod encoding;
pub mod error;
pub mod extractor;
pub mod text;
pub mod types;
pub mod xml;

// Re-export the main entry points
pub use error::{ExtractorError, Result};
pub use extractor::{from_bytes, parse_document};
pub use types::ExtractedDocument;
