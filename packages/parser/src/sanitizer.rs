//! HTML sanitization.
//!
//! Walks the parsed tree and removes whatever the policy does not allow.
//! Disallowed elements are unwrapped so their text survives, except for
//! elements whose content is itself executable or opaque, which are
//! dropped together with everything inside them.
//!
//! Elements outside the HTML namespace (SVG, MathML) are always dropped:
//! their children parse as elements where HTML would see raw text, so the
//! cleaned tree could serialize into markup that re-parses differently.

use crate::dom;
use kuchiki::{ElementData, NodeData, NodeRef};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

const DEFAULT_ALLOWED_TAGS: &[&str] = &[
    "html", "head", "body", "title", "meta", "link", "style", "div", "span", "p", "h1", "h2",
    "h3", "h4", "h5", "h6", "a", "img", "ul", "ol", "li", "table", "tr", "td", "th", "thead",
    "tbody", "form", "input", "textarea", "select", "option", "button", "section", "article",
    "header", "footer", "nav", "main", "aside", "br", "hr", "strong", "em", "b", "i", "u",
    "small", "blockquote", "pre", "code", "iframe", "video", "audio", "source",
];

const DEFAULT_ALLOWED_ATTRIBUTES: &[&str] = &[
    "id", "class", "style", "src", "href", "alt", "title", "width", "height", "type", "name",
    "value", "placeholder", "required", "disabled", "target", "rel", "role", "aria-*",
    "tabindex",
];

/// Elements removed together with their content when not allowed.
const DROP_WITH_CONTENT: &[&str] = &[
    "script", "noscript", "template", "object", "embed", "applet", "frame", "frameset",
];

/// Elements whose content HTML parses as text; element children are never kept.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "style", "script", "title", "textarea", "iframe", "xmp", "noembed", "noframes",
    "noscript", "plaintext",
];

const URL_ATTRIBUTES: &[&str] = &["href", "src", "action", "formaction"];

/// Caller-facing switches, mirrored by the export options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SanitizationOptions {
    pub preserve_scripts: bool,
    pub allow_data_attributes: bool,
    pub allow_styles: bool,
}

impl Default for SanitizationOptions {
    fn default() -> Self {
        Self {
            preserve_scripts: false,
            allow_data_attributes: true,
            allow_styles: true,
        }
    }
}

/// What survives sanitization.
///
/// Attribute patterns ending in `*` match by prefix (`aria-*`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizationPolicy {
    pub allowed_tags: HashSet<String>,
    pub allowed_attributes: Vec<String>,
    pub allow_data_attributes: bool,
    pub allow_styles: bool,
    /// Keep `<script>` elements and `on*` handlers untouched.
    pub preserve_scripts: bool,
}

impl Default for SanitizationPolicy {
    fn default() -> Self {
        Self::from_options(&SanitizationOptions::default())
    }
}

enum Verdict {
    Keep,
    Unwrap,
    Drop,
}

impl SanitizationPolicy {
    pub fn from_options(options: &SanitizationOptions) -> Self {
        Self {
            allowed_tags: DEFAULT_ALLOWED_TAGS.iter().map(|t| t.to_string()).collect(),
            allowed_attributes: DEFAULT_ALLOWED_ATTRIBUTES
                .iter()
                .map(|a| a.to_string())
                .collect(),
            allow_data_attributes: options.allow_data_attributes,
            allow_styles: options.allow_styles,
            preserve_scripts: options.preserve_scripts,
        }
    }

    pub fn allows_tag(&self, tag: &str) -> bool {
        matches!(self.verdict(&tag.to_ascii_lowercase()), Verdict::Keep)
    }

    pub fn allows_attribute(&self, name: &str) -> bool {
        let name = name.to_ascii_lowercase();

        if is_event_handler(&name) {
            return self.preserve_scripts;
        }
        if name.starts_with("data-") {
            return self.allow_data_attributes;
        }
        if name == "style" && !self.allow_styles {
            return false;
        }

        self.allowed_attributes
            .iter()
            .any(|pattern| match pattern.strip_suffix('*') {
                Some(prefix) => name.starts_with(&prefix.to_ascii_lowercase()),
                None => pattern.eq_ignore_ascii_case(&name),
            })
    }

    fn verdict(&self, tag: &str) -> Verdict {
        match tag {
            "script" if self.preserve_scripts => Verdict::Keep,
            "style" if !self.allow_styles => Verdict::Drop,
            _ if self.allowed_tags.contains(tag) => Verdict::Keep,
            _ if DROP_WITH_CONTENT.contains(&tag) => Verdict::Drop,
            _ => Verdict::Unwrap,
        }
    }

    fn allows_url(&self, attribute: &str, value: &str) -> bool {
        if self.preserve_scripts || !URL_ATTRIBUTES.contains(&attribute) {
            return true;
        }
        let normalized: String = value
            .chars()
            .filter(|c| !c.is_whitespace() && !c.is_control())
            .collect::<String>()
            .to_ascii_lowercase();
        !normalized.starts_with("javascript:")
    }
}

fn is_event_handler(name: &str) -> bool {
    name.len() > 2 && name.starts_with("on")
}

/// Remove every tag and attribute the policy does not allow.
///
/// A whole document comes back as a whole document (doctype included when
/// present); anything else comes back as a fragment.
pub fn sanitize(html: &str, policy: &SanitizationPolicy) -> String {
    let document = dom::parse_html(html);
    clean_children(&document, policy);

    let serialized = if dom::looks_like_document(html) {
        dom::outer_html(&document)
    } else {
        serialize_fragment(&document)
    };

    serialized.unwrap_or_else(|err| {
        debug!("sanitizer could not serialize the cleaned tree: {}", err);
        String::new()
    })
}

/// Head content first (leading `<style>`/`<script>` land there), then body.
fn serialize_fragment(document: &NodeRef) -> std::io::Result<String> {
    let mut output = String::new();
    for section in ["head", "body"] {
        if let Some(node) = dom::first_match(document, section) {
            output.push_str(&dom::inner_html(&node)?);
        }
    }
    Ok(output)
}

fn clean_children(node: &NodeRef, policy: &SanitizationPolicy) {
    let children: Vec<NodeRef> = node.children().collect();

    for child in children {
        let NodeData::Element(element) = child.data() else {
            continue;
        };
        let Some(tag) = dom::tag_name(&child) else {
            continue;
        };
        if !dom::is_html_element(&child) {
            debug!("dropping foreign element <{}>", tag);
            child.detach();
            continue;
        }

        match policy.verdict(&tag) {
            Verdict::Keep => {
                // Preserved scripts keep defer, async, integrity and the rest.
                if !(tag == "script" && policy.preserve_scripts) {
                    clean_attributes(element, policy);
                }
                if RAW_TEXT_ELEMENTS.contains(&tag.as_str()) {
                    strip_element_children(&child);
                } else {
                    clean_children(&child, policy);
                }
            }
            Verdict::Unwrap => {
                clean_children(&child, policy);
                while let Some(grandchild) = child.first_child() {
                    child.insert_before(grandchild);
                }
                child.detach();
            }
            Verdict::Drop => child.detach(),
        }
    }
}

fn strip_element_children(node: &NodeRef) {
    let children: Vec<NodeRef> = node.children().collect();
    for child in children {
        if child.as_text().is_none() {
            child.detach();
        }
    }
}

fn clean_attributes(element: &ElementData, policy: &SanitizationPolicy) {
    let mut attributes = element.attributes.borrow_mut();
    attributes.map.retain(|name, attribute| {
        let local: &str = &name.local;
        policy.allows_attribute(local) && policy.allows_url(local, &attribute.value)
    });
}
