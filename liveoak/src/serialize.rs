//! HTML5-correct serialization of arena documents.
//!
//! Follows the HTML serialization rules that matter for round-tripping:
//!
//! - Void elements never get end tags
//! - Text content is escaped (`&`, `<`, `>`)
//! - Attribute values are escaped and double-quoted
//! - Raw text elements (script, style) are not escaped
//! - RCDATA elements (title, textarea) escape only `&` and `<`

use crate::arena::{NodeId, NodeKind};
use crate::document::Document;
use crate::element::ElementData;

/// Serialize a whole document, DOCTYPE included.
pub fn serialize_document(doc: &Document) -> String {
    let mut out = String::new();
    for child in doc.arena().children(doc.root()) {
        serialize_node(doc, child, &mut out);
    }
    out
}

/// The markup of the node's children (`element.innerHTML`).
pub fn inner_html(doc: &Document, node: NodeId) -> String {
    let mut out = String::new();
    let raw = doc
        .element(node)
        .is_some_and(|e| e.tag().is_raw_text());
    for child in doc.arena().children(node) {
        if raw {
            serialize_raw(doc, child, &mut out);
        } else {
            serialize_node(doc, child, &mut out);
        }
    }
    out
}

/// The markup of the node itself (`element.outerHTML`).
pub fn outer_html(doc: &Document, node: NodeId) -> String {
    let mut out = String::new();
    serialize_node(doc, node, &mut out);
    out
}

fn serialize_node(doc: &Document, node: NodeId, out: &mut String) {
    match doc.kind(node) {
        NodeKind::Document | NodeKind::Fragment => {
            for child in doc.arena().children(node) {
                serialize_node(doc, child, out);
            }
        }
        NodeKind::Doctype(name) => {
            out.push_str("<!DOCTYPE ");
            out.push_str(name);
            out.push('>');
        }
        NodeKind::Element(el) => serialize_element(doc, node, el, out),
        NodeKind::Text(text) => escape_text(text, out),
        NodeKind::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
    }
}

fn serialize_element(doc: &Document, node: NodeId, el: &ElementData, out: &mut String) {
    out.push('<');
    out.push_str(el.name());
    for (name, value) in el.attrs().iter() {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape_attr(value, out);
        out.push('"');
    }
    out.push('>');

    let tag = el.tag();
    if tag.is_void() {
        return;
    }

    for child in doc.arena().children(node) {
        if tag.is_raw_text() {
            serialize_raw(doc, child, out);
        } else if tag.is_rcdata() {
            serialize_rcdata(doc, child, out);
        } else {
            serialize_node(doc, child, out);
        }
    }

    out.push_str("</");
    out.push_str(el.name());
    out.push('>');
}

/// script/style content goes out verbatim.
fn serialize_raw(doc: &Document, node: NodeId, out: &mut String) {
    match doc.kind(node) {
        NodeKind::Text(text) => out.push_str(text),
        _ => serialize_node(doc, node, out),
    }
}

/// title/textarea content escapes only `&` and `<`.
fn serialize_rcdata(doc: &Document, node: NodeId, out: &mut String) {
    match doc.kind(node) {
        NodeKind::Text(text) => {
            for c in text.chars() {
                match c {
                    '&' => out.push_str("&amp;"),
                    '<' => out.push_str("&lt;"),
                    _ => out.push(c),
                }
            }
        }
        _ => serialize_node(doc, node, out),
    }
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn escape_attr(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}
