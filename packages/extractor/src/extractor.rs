//! Publication extraction from Formex XML documents.
//!
//! Documents must conform to this general shape:
//!
//! ```xml
//! <STANDARD>
//!    <META>
//!        <DOCUMENT.REF>
//!            <DATE>
//!        <PUBLICATION.REF FILE="...">
//!            <LG.OJ>
//!        <SOURCE>
//!        <CELEX>
//!    <CONTENU>
//!        <TITRE>
//!        <PREAMBULE>
//!        <ARTICLES>
//!        <SIGNATURE>
//!    <ANNEXES>
//! </STANDARD>
//! ```
//!
//! Metadata values are read as element text or attributes; content sections
//! are serialized back to markup and run through the text normalizer. Every
//! field is required, so extraction fails whole-document on the first
//! missing path. Documents may open with a `<!DOCTYPE>` declaration for the
//! Formex DTD.

use roxmltree::{Document, Node, ParsingOptions};

use crate::encoding::decode_document;
use crate::error::{ExtractorError, Result};
use crate::text::markup_to_text;
use crate::types::ExtractedDocument;
use crate::xml::{find_child, get_attribute, get_tag_name, get_text, subtree_to_markup};

/// Extract a publication record from raw document bytes.
///
/// Runs the full ingestion pipeline: detect and apply the declared
/// character encoding, parse the XML, walk the required tag paths, and
/// normalize the content sections.
///
/// # Errors
/// Decoding failures ([`ExtractorError::UnknownEncoding`],
/// [`ExtractorError::Decode`]) pass through unchanged. Everything after
/// decoding - malformed XML or a missing required path - is folded into a
/// single [`ExtractorError::InvalidDocument`] carrying the underlying cause,
/// so callers see one uniform classification for unusable documents.
pub fn from_bytes(bytes: &[u8]) -> Result<ExtractedDocument> {
    let xml = decode_document(bytes)?;

    let document = parse_document(&xml).map_err(|source| ExtractorError::InvalidDocument {
        detail: source.to_string(),
    })?;

    tracing::debug!(celex = %document.celex, "extracted publication");
    Ok(document)
}

/// Parse a decoded XML document and extract the publication record.
///
/// Unlike [`from_bytes`], this reports the precise failure (parse error,
/// missing element or attribute, empty element) instead of the uniform
/// invalid-document classification.
pub fn parse_document(xml: &str) -> Result<ExtractedDocument> {
    // Publications ship with a doctype declaration for the Formex DTD
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(xml, options)?;
    let root = doc.root_element();

    // Metadata under META
    let meta = required_child(root, "META")?;
    let document_ref = required_child(meta, "DOCUMENT.REF")?;
    let document_ref_date = required_text(document_ref, "DATE")?;

    let publication_ref = required_child(meta, "PUBLICATION.REF")?;
    let publication_ref_file = required_attribute(publication_ref, "FILE")?;
    let publication_ref_language = required_text(publication_ref, "LG.OJ")?;

    let source = required_text(meta, "SOURCE")?;
    let celex = required_text(meta, "CELEX")?;

    // Content sections under CONTENU
    let contenu = required_child(root, "CONTENU")?;
    let content_title = normalized_subtree(contenu, "TITRE")?;
    let content_preamble = normalized_subtree(contenu, "PREAMBULE")?;
    let content_articles = normalized_subtree(contenu, "ARTICLES")?;
    let content_signature = normalized_subtree(contenu, "SIGNATURE")?;

    // ANNEXES sits at the root, beside META and CONTENU
    let annexes = normalized_subtree(root, "ANNEXES")?;

    Ok(ExtractedDocument {
        document_ref_date,
        publication_ref_file,
        publication_ref_language,
        source,
        celex,
        content_title,
        content_preamble,
        content_articles,
        content_signature,
        annexes,
    })
}

/// Render a node as `<TAG>` for error messages.
fn element_context(node: Node<'_, '_>) -> String {
    format!("<{}>", get_tag_name(node))
}

/// Find a required direct child element.
fn required_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Result<Node<'a, 'input>> {
    find_child(node, tag).ok_or_else(|| ExtractorError::MissingElement {
        element: tag.to_string(),
        context: element_context(node),
    })
}

/// Get the non-empty text of a required child element.
fn required_text(node: Node<'_, '_>, tag: &str) -> Result<String> {
    let child = required_child(node, tag)?;
    let text = get_text(child);
    if text.is_empty() {
        return Err(ExtractorError::EmptyElement {
            element: tag.to_string(),
            context: element_context(node),
        });
    }
    Ok(text)
}

/// Get a required attribute value.
fn required_attribute(node: Node<'_, '_>, name: &str) -> Result<String> {
    get_attribute(node, name)
        .map(str::to_string)
        .ok_or_else(|| ExtractorError::MissingAttribute {
            attribute: name.to_string(),
            element: get_tag_name(node).to_string(),
        })
}

/// Serialize a required child subtree and normalize it to plain text.
fn normalized_subtree(node: Node<'_, '_>, tag: &str) -> Result<String> {
    let child = required_child(node, tag)?;
    Ok(markup_to_text(&subtree_to_markup(child)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE_DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<STANDARD>
  <META>
    <DOCUMENT.REF>
      <DATE>2024-01-01</DATE>
    </DOCUMENT.REF>
    <PUBLICATION.REF FILE="file.xml">
      <LG.OJ>LAN</LG.OJ>
    </PUBLICATION.REF>
    <SOURCE>J_Name</SOURCE>
    <CELEX>12345A6789</CELEX>
  </META>
  <CONTENU>
    <TITRE>Doc title.</TITRE>
    <PREAMBULE>Doc preambule.</PREAMBULE>
    <ARTICLES>Doc articles.</ARTICLES>
    <SIGNATURE>Signed.</SIGNATURE>
  </CONTENU>
  <ANNEXES>Doc annexes.</ANNEXES>
</STANDARD>"#;

    #[test]
    fn test_parse_document_full_record() {
        let document = parse_document(SAMPLE_DOCUMENT).unwrap();

        assert_eq!(document.document_ref_date, "2024-01-01");
        assert_eq!(document.publication_ref_file, "file.xml");
        assert_eq!(document.publication_ref_language, "LAN");
        assert_eq!(document.source, "J_Name");
        assert_eq!(document.celex, "12345A6789");
        assert_eq!(document.content_title, "Doc title.");
        assert_eq!(document.content_preamble, "Doc preambule.");
        assert_eq!(document.content_articles, "Doc articles.");
        assert_eq!(document.content_signature, "Signed.");
        assert_eq!(document.annexes, "Doc annexes.");
    }

    #[test]
    fn test_parse_document_normalizes_content_markup() {
        let xml = SAMPLE_DOCUMENT.replace(
            "<TITRE>Doc title.</TITRE>",
            "<TITRE><P>Doc</P>\n  <HT TYPE=\"ITALIC\">title</HT> <NOTE>n</NOTE> .</TITRE>",
        );

        let document = parse_document(&xml).unwrap();
        assert_eq!(document.content_title, "Doc title (n).");
    }

    #[test]
    fn test_parse_document_accepts_doctype() {
        let xml = SAMPLE_DOCUMENT.replace(
            "<STANDARD>",
            "<!DOCTYPE STANDARD SYSTEM \"formex-05.59.dtd\">\n<STANDARD>",
        );

        let document = parse_document(&xml).unwrap();
        assert_eq!(document.celex, "12345A6789");
    }

    #[test]
    fn test_parse_document_expands_character_references() {
        let xml = SAMPLE_DOCUMENT.replace(
            "<TITRE>Doc title.</TITRE>",
            "<TITRE>Caf&#233; &quot;title&quot;.</TITRE>",
        );

        let document = parse_document(&xml).unwrap();
        assert_eq!(document.content_title, "Café \"title\".");
    }

    #[test]
    fn test_parse_document_missing_meta() {
        let xml = "<STANDARD><CONTENU/></STANDARD>";
        let err = parse_document(xml).unwrap_err();

        assert!(matches!(
            err,
            ExtractorError::MissingElement { ref element, ref context }
                if element == "META" && context == "<STANDARD>"
        ));
    }

    #[test]
    fn test_parse_document_missing_file_attribute() {
        let xml = SAMPLE_DOCUMENT.replace(r#"<PUBLICATION.REF FILE="file.xml">"#, "<PUBLICATION.REF>");
        let err = parse_document(&xml).unwrap_err();

        assert!(matches!(
            err,
            ExtractorError::MissingAttribute { ref attribute, ref element }
                if attribute == "FILE" && element == "PUBLICATION.REF"
        ));
    }

    #[test]
    fn test_parse_document_empty_date() {
        let xml = SAMPLE_DOCUMENT.replace("<DATE>2024-01-01</DATE>", "<DATE>  </DATE>");
        let err = parse_document(&xml).unwrap_err();

        assert!(matches!(
            err,
            ExtractorError::EmptyElement { ref element, .. } if element == "DATE"
        ));
    }

    #[test]
    fn test_parse_document_malformed_xml() {
        let err = parse_document("<STANDARD><META>").unwrap_err();
        assert!(matches!(err, ExtractorError::XmlParse(_)));
    }

    #[test]
    fn test_from_bytes_round_trip() {
        let document = from_bytes(SAMPLE_DOCUMENT.as_bytes()).unwrap();
        assert_eq!(document.celex, "12345A6789");
        assert_eq!(document.annexes, "Doc annexes.");
    }

    #[test]
    fn test_from_bytes_unifies_structural_errors() {
        let xml = SAMPLE_DOCUMENT.replace("<CELEX>12345A6789</CELEX>", "");
        let err = from_bytes(xml.as_bytes()).unwrap_err();

        match err {
            ExtractorError::InvalidDocument { detail } => {
                assert!(detail.contains("CELEX"), "detail was: {detail}");
            }
            other => panic!("expected InvalidDocument, got: {other}"),
        }
    }

    #[test]
    fn test_from_bytes_unifies_parse_errors() {
        let err = from_bytes(b"not xml at all").unwrap_err();
        assert!(matches!(err, ExtractorError::InvalidDocument { .. }));
    }

    #[test]
    fn test_from_bytes_keeps_decode_errors_distinct() {
        let bytes = br#"<?xml version="1.0" encoding="martian-5"?><STANDARD/>"#;
        let err = from_bytes(bytes).unwrap_err();
        assert!(matches!(err, ExtractorError::UnknownEncoding(_)));
    }
}
