//! Export pipeline: turn editor content into a downloadable document.
//!
//! ```text
//! parse → replace <style> → inline CSS? → serialize (+DOCTYPE) → format? → sanitize
//! ```

use crate::formatter::format_html;
use crate::inliner::inline_css;
use kuchiki::NodeRef;
use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;
use tracing::error;
use twinpane_parser::{dom, sanitize, SanitizationOptions, SanitizationPolicy};

/// Errors that can occur during export.
///
/// Export is all-or-nothing: on error no partial document is returned.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to export HTML")]
    Failed(#[source] io::Error),
}

/// Options for one export call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportOptions {
    /// Keep `<script>` elements and `on*` handlers
    pub preserve_scripts: bool,
    pub allow_data_attributes: bool,
    pub allow_styles: bool,
    /// Move `<style>` rules onto matching elements
    #[serde(rename = "inlineCSS", alias = "inlineCss")]
    pub inline_css: bool,
    /// Re-indent the output
    #[serde(rename = "formatHTML", alias = "formatHtml")]
    pub format_html: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            preserve_scripts: false,
            allow_data_attributes: true,
            allow_styles: true,
            inline_css: false,
            format_html: false,
        }
    }
}

impl ExportOptions {
    pub fn sanitization(&self) -> SanitizationOptions {
        SanitizationOptions {
            preserve_scripts: self.preserve_scripts,
            allow_data_attributes: self.allow_data_attributes,
            allow_styles: self.allow_styles,
        }
    }
}

/// Produce the final document for download.
///
/// When `styles` is non-empty it replaces every `<style>` element in the
/// document head, one element per non-blank entry.
pub fn export_html(
    html: &str,
    styles: &[String],
    options: &ExportOptions,
) -> Result<String, ExportError> {
    render(html, styles, options).map_err(|err| {
        error!("Export error: {}", err);
        ExportError::Failed(err)
    })
}

fn render(html: &str, styles: &[String], options: &ExportOptions) -> io::Result<String> {
    let document = dom::parse_html(html);

    if !styles.is_empty() {
        replace_styles(&document, styles)?;
    }

    if options.inline_css {
        inline_css(&document);
    }

    let root = dom::first_match(&document, "html")
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "document has no root element"))?;
    let mut output = dom::outer_html(&root)?;

    if !output.to_ascii_lowercase().contains("<!doctype") {
        output = format!("<!DOCTYPE html>\n{}", output);
    }

    if options.format_html {
        output = format_html(&output);
    }

    let policy = SanitizationPolicy::from_options(&options.sanitization());
    Ok(sanitize(&output, &policy))
}

fn replace_styles(document: &NodeRef, styles: &[String]) -> io::Result<()> {
    let head = dom::first_match(document, "head")
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "document has no head"))?;

    for existing in dom::all_matches(&head, "style") {
        existing.detach();
    }

    for css in styles.iter().filter(|css| !css.trim().is_empty()) {
        let style = dom::new_html_element("style");
        style.append(NodeRef::new_text(css.as_str()));
        head.append(style);
    }

    Ok(())
}

/// File name offered for download, always ending in `.html`.
pub fn download_file_name(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        "document.html".to_string()
    } else if name.to_ascii_lowercase().ends_with(".html") {
        name.to_string()
    } else {
        format!("{}.html", name)
    }
}
