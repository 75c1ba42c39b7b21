//! Markup-to-text normalization for content fragments.
//!
//! Formex content elements carry inline markup: formatting wrappers,
//! highlights, and `NOTE` footnote anchors. Readers want a flat single-line
//! string with footnotes folded in as parenthesised asides; this module does
//! that with a fixed sequence of regex passes over the raw fragment text.

use regex::Regex;
use std::sync::LazyLock;

/// Opening NOTE tag, attributes included. Matches across newlines since
/// attribute lists in real publications wrap.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NOTE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<NOTE.*?>").expect("valid regex"));

/// Closing NOTE tag.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NOTE_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)</NOTE.*?>").expect("valid regex"));

/// Any remaining markup tag.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<.*?>").expect("valid regex"));

/// A run of whitespace, newlines included.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// An optional stray space before closing punctuation.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SPACE_BEFORE_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s?([.,:;?)])").expect("valid regex"));

/// Convert a markup fragment to normalized plain text.
///
/// The passes run in a fixed order; later ones assume the earlier ones
/// already ran:
///
/// 1. `<NOTE ...>` becomes `(` and `</NOTE>` becomes `)`, so footnote
///    content reads as a parenthesised aside.
/// 2. Every remaining tag is dropped, keeping text content in document
///    order.
/// 3. Whitespace runs collapse to single spaces; leading and trailing
///    whitespace is trimmed.
/// 4. A space left dangling before `.` `,` `:` `;` `?` `)` is removed.
///
/// This is a pure text transformation, not a parser: it cannot fail, and it
/// tolerates malformed micro-fragments.
///
/// # Examples
/// ```
/// use formex_extractor::text::markup_to_text;
///
/// let fragment = r#"<P>See <NOTE ID="E0001">OJ L 123, p. 4</NOTE> .</P>"#;
/// assert_eq!(markup_to_text(fragment), "See (OJ L 123, p. 4).");
/// ```
pub fn markup_to_text(fragment: &str) -> String {
    let text = NOTE_OPEN.replace_all(fragment, "(");
    let text = NOTE_CLOSE.replace_all(&text, ")");
    let text = TAG.replace_all(&text, "");
    let text = WHITESPACE_RUN.replace_all(&text, " ");
    let text = text.trim();
    SPACE_BEFORE_PUNCTUATION.replace_all(text, "$1").to_string()
}
