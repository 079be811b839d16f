//! Structural parsing of HTML text.

use crate::dom;
use crate::sanitizer::{sanitize, SanitizationOptions, SanitizationPolicy};
use kuchiki::NodeRef;
use serde::Serialize;
use std::io;
use tracing::debug;

pub const DEFAULT_TITLE: &str = "Untitled";

/// Everything the editors need from one parse of an HTML document.
///
/// Produced fresh by [`parse_document`]; never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedDocument {
    /// Root `<html>` element as parsed.
    pub full_markup: String,
    pub head_markup: String,
    /// `<body>` element including its own tags.
    pub body_markup: String,
    /// Inner markup of `<body>`.
    pub body_content: String,
    /// Text of every `<style>` element, in document order.
    pub styles: Vec<String>,
    pub stylesheet_links: Vec<String>,
    /// Inline script text, or the `src` of external scripts.
    pub scripts: Vec<String>,
    pub title: String,
}

impl ParsedDocument {
    /// All style blocks joined into one stylesheet.
    pub fn style_text(&self) -> String {
        self.styles
            .iter()
            .map(|style| style.trim())
            .filter(|style| !style.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Parse HTML text into a [`ParsedDocument`].
///
/// Never fails: a document that cannot be serialized back yields empty
/// markup fields rather than an error.
pub fn parse_document(html: &str) -> ParsedDocument {
    let document = dom::parse_html(html);

    let head = dom::first_match(&document, "head");
    let body = dom::first_match(&document, "body");

    ParsedDocument {
        full_markup: markup_or_empty("html", dom::first_match(&document, "html"), dom::outer_html),
        head_markup: markup_or_empty("head", head, dom::outer_html),
        body_markup: markup_or_empty("body", body.clone(), dom::outer_html),
        body_content: markup_or_empty("body content", body, dom::inner_html)
            .trim()
            .to_string(),
        styles: extract_styles(&document),
        stylesheet_links: extract_stylesheet_links(&document),
        scripts: extract_scripts(&document),
        title: extract_title(&document),
    }
}

/// Sanitize then parse, the path every imported document takes.
pub fn import_html(html: &str, options: &SanitizationOptions) -> ParsedDocument {
    let policy = SanitizationPolicy::from_options(options);
    parse_document(&sanitize(html, &policy))
}

fn markup_or_empty(
    what: &str,
    node: Option<NodeRef>,
    serialize: fn(&NodeRef) -> io::Result<String>,
) -> String {
    let Some(node) = node else {
        return String::new();
    };
    serialize(&node).unwrap_or_else(|err| {
        debug!("failed to serialize {}: {}", what, err);
        String::new()
    })
}

fn extract_styles(document: &NodeRef) -> Vec<String> {
    dom::all_matches(document, "style")
        .iter()
        .map(|style| style.text_contents())
        .collect()
}

fn extract_stylesheet_links(document: &NodeRef) -> Vec<String> {
    dom::all_matches(document, "link")
        .iter()
        .filter_map(|link| {
            let element = link.as_element()?;
            let attributes = element.attributes.borrow();
            let is_stylesheet = attributes.get("rel").map_or(false, |rel| {
                rel.split_whitespace()
                    .any(|token| token.eq_ignore_ascii_case("stylesheet"))
            });
            if !is_stylesheet {
                return None;
            }
            attributes
                .get("href")
                .filter(|href| !href.is_empty())
                .map(str::to_string)
        })
        .collect()
}

fn extract_scripts(document: &NodeRef) -> Vec<String> {
    dom::all_matches(document, "script")
        .iter()
        .filter_map(|script| {
            let inline = script.text_contents();
            if !inline.is_empty() {
                return Some(inline);
            }
            let element = script.as_element()?;
            let attributes = element.attributes.borrow();
            attributes
                .get("src")
                .filter(|src| !src.is_empty())
                .map(str::to_string)
        })
        .collect()
}

fn extract_title(document: &NodeRef) -> String {
    dom::first_match(document, "title")
        .map(|title| title.text_contents().trim().to_string())
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string())
}
