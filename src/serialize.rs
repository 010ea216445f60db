//! HTML Serialization
//!
//! Turns an arena document back into markup. Text and attribute values are
//! escaped on the way out, raw-text contents and comments are emitted
//! verbatim, and void elements take no end tag. Quoting and entity
//! spellings are normalized; structure and values are preserved.

use crate::core::entities::{encode_attribute, encode_text};
use crate::dom::{is_void_element, HtmlDocument, NodeId, NodeKind};

/// Serialize a document to an HTML string
pub fn to_html(doc: &HtmlDocument) -> String {
    let mut out = String::with_capacity(doc.strings.bytes_used() + 64);
    for child in doc.children(0) {
        write_node(doc, child, &mut out);
    }
    out
}

/// Write one node and its subtree
fn write_node(doc: &HtmlDocument, id: NodeId, out: &mut String) {
    let node = match doc.get_node(id) {
        Some(node) => node,
        None => return,
    };

    match node.kind {
        NodeKind::Document => {
            for child in doc.children(id) {
                write_node(doc, child, out);
            }
        }

        NodeKind::Element => {
            let name = match doc.node_name(id) {
                Some(name) => name,
                None => return,
            };

            out.push('<');
            out.push_str(name);
            for (attr_name, attr_value) in doc.get_attribute_values(id) {
                out.push(' ');
                out.push_str(attr_name);
                out.push_str("=\"");
                out.push_str(&encode_attribute(attr_value));
                out.push('"');
            }
            out.push('>');

            if is_void_element(name) {
                return;
            }

            for child in doc.children(id) {
                write_node(doc, child, out);
            }

            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }

        NodeKind::Text => {
            if let Some(text) = doc.text_content(id) {
                out.push_str(&encode_text(text));
            }
        }

        NodeKind::RawText => {
            if let Some(text) = doc.text_content(id) {
                out.push_str(text);
            }
        }

        NodeKind::Comment => {
            out.push_str("<!--");
            if let Some(text) = doc.text_content(id) {
                out.push_str(text);
            }
            out.push_str("-->");
        }

        NodeKind::Doctype => {
            out.push_str("<!");
            if let Some(text) = doc.text_content(id) {
                out.push_str(text);
            }
            out.push('>');
        }
    }
}
