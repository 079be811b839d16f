//! Thin helpers over the kuchiki DOM shared by the sanitizer, the parser
//! and the export pipeline.

use html5ever::{LocalName, Namespace, QualName};
use kuchiki::traits::TendrilSink;
use kuchiki::NodeRef;
use std::io;

pub const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Parse text into a full HTML5 document tree.
///
/// Missing `<html>`, `<head>` and `<body>` elements are implied and unclosed
/// tags are closed, exactly as a browser would.
pub fn parse_html(html: &str) -> NodeRef {
    kuchiki::parse_html().one(html)
}

/// Serialize a node including its own tags.
pub fn outer_html(node: &NodeRef) -> io::Result<String> {
    let mut buffer = Vec::new();
    node.serialize(&mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Serialize the children of a node, without the node's own tags.
pub fn inner_html(node: &NodeRef) -> io::Result<String> {
    let mut output = String::new();
    for child in node.children() {
        output.push_str(&outer_html(&child)?);
    }
    Ok(output)
}

/// First element matching `selector`, if any.
pub fn first_match(document: &NodeRef, selector: &str) -> Option<NodeRef> {
    document
        .select_first(selector)
        .ok()
        .map(|element| element.as_node().clone())
}

/// Every element matching `selector` in document order.
///
/// Invalid selectors yield an empty list.
pub fn all_matches(document: &NodeRef, selector: &str) -> Vec<NodeRef> {
    match document.select(selector) {
        Ok(matches) => matches.map(|element| element.as_node().clone()).collect(),
        Err(()) => Vec::new(),
    }
}

/// Create a detached element in the HTML namespace.
pub fn new_html_element(local_name: &str) -> NodeRef {
    let name = QualName::new(
        None,
        Namespace::from(HTML_NAMESPACE),
        LocalName::from(local_name),
    );
    NodeRef::new_element(name, std::iter::empty())
}

/// Lowercased tag name of an element node.
pub fn tag_name(node: &NodeRef) -> Option<String> {
    node.as_element().map(|element| {
        let local: &str = &element.name.local;
        local.to_ascii_lowercase()
    })
}

/// Whether an element node lives in the HTML namespace.
pub fn is_html_element(node: &NodeRef) -> bool {
    node.as_element()
        .map_or(false, |element| element.name.ns == Namespace::from(HTML_NAMESPACE))
}

/// Whether the text is a whole document rather than a body fragment.
pub fn looks_like_document(html: &str) -> bool {
    let lowered = html.trim_start().to_ascii_lowercase();
    lowered.starts_with("<!doctype") || lowered.contains("<html")
}
