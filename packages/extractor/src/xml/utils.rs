//! XML utility functions for navigating and extracting data from DOM trees.

use roxmltree::{Node, NodeType};

/// Get the tag name without namespace prefix.
///
/// # Arguments
/// * `node` - XML node
///
/// # Returns
/// Tag name without namespace (e.g., "TITRE" not "{ns}TITRE")
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use formex_extractor::xml::get_tag_name;
///
/// let xml = r#"<root><TITRE>text</TITRE></root>"#;
/// let doc = Document::parse(xml).unwrap();
/// let titre = doc.root_element().first_element_child().unwrap();
/// assert_eq!(get_tag_name(titre), "TITRE");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Find the first child element with the given tag name.
///
/// # Arguments
/// * `node` - Parent node to search in
/// * `tag` - Tag name to search for
///
/// # Returns
/// First matching child element, or `None` if not found
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use formex_extractor::xml::find_child;
///
/// let xml = r#"<root><META/><CONTENU/></root>"#;
/// let doc = Document::parse(xml).unwrap();
/// let root = doc.root_element();
///
/// assert!(find_child(root, "META").is_some());
/// assert!(find_child(root, "missing").is_none());
/// ```
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && get_tag_name(*child) == tag)
}

/// Get the text content of a node, trimmed.
///
/// # Arguments
/// * `node` - Node to get text from
///
/// # Returns
/// Trimmed text content, or empty string if no text
pub fn get_text(node: Node<'_, '_>) -> String {
    node.text()
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Get an attribute value from a node.
///
/// # Arguments
/// * `node` - Node to get attribute from
/// * `name` - Attribute name
///
/// # Returns
/// Attribute value, or `None` if not found
pub fn get_attribute<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute(name)
}

/// Serialize a node's subtree back to markup text.
///
/// Rebuilds the markup from the parsed tree, where character and entity
/// references are already expanded; `&`, `<` and `>` in text are re-escaped
/// on output so the result is still well-formed markup. Comments and
/// processing instructions are dropped.
///
/// # Arguments
/// * `node` - Root of the subtree to serialize
///
/// # Returns
/// Markup for the subtree, start tag through end tag
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use formex_extractor::xml::subtree_to_markup;
///
/// let xml = r#"<root><TITRE><P>Caf&#233; title</P></TITRE></root>"#;
/// let doc = Document::parse(xml).unwrap();
/// let titre = doc.root_element().first_element_child().unwrap();
/// assert_eq!(subtree_to_markup(titre), "<TITRE><P>Café title</P></TITRE>");
/// ```
pub fn subtree_to_markup(node: Node<'_, '_>) -> String {
    let mut markup = String::new();
    write_node(node, &mut markup);
    markup
}

fn write_node(node: Node<'_, '_>, out: &mut String) {
    match node.node_type() {
        NodeType::Element => {
            out.push('<');
            out.push_str(get_tag_name(node));
            for attribute in node.attributes() {
                out.push(' ');
                out.push_str(attribute.name());
                out.push_str("=\"");
                push_escaped(attribute.value(), true, out);
                out.push('"');
            }
            if node.has_children() {
                out.push('>');
                for child in node.children() {
                    write_node(child, out);
                }
                out.push_str("</");
                out.push_str(get_tag_name(node));
                out.push('>');
            } else {
                out.push_str("/>");
            }
        }
        NodeType::Text => {
            if let Some(text) = node.text() {
                push_escaped(text, false, out);
            }
        }
        NodeType::Root | NodeType::Comment | NodeType::PI => {}
    }
}

/// Escape markup characters so the output parses back to the same text.
fn push_escaped(value: &str, in_attribute: bool, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if in_attribute => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
}
