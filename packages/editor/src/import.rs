//! # Document Flows
//!
//! Import, new and export on top of a [`SyncEngine`].
//!
//! ```text
//! import: size check → sanitize → parse → seed both editors
//! new:    default template → seed both editors
//! export: flush → read structural editor → clamp options → export pipeline
//! ```

use crate::sync::SyncEngine;
use crate::{EditorError, ImportError, SyncError};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use twinpane_compiler_html::{export_html, ExportOptions, DEFAULT_TEMPLATE};
use twinpane_parser::{import_html, parse_document, ParsedDocument, SanitizationOptions};

/// What an account tier is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportLimits {
    /// Largest accepted document, in bytes
    pub max_file_size: usize,
    pub can_preserve_scripts: bool,
    pub can_inline_css: bool,
}

impl ImportLimits {
    pub fn free() -> Self {
        Self {
            max_file_size: 100 * 1024,
            can_preserve_scripts: false,
            can_inline_css: false,
        }
    }

    pub fn pro() -> Self {
        Self {
            max_file_size: 5 * 1024 * 1024,
            can_preserve_scripts: true,
            can_inline_css: true,
        }
    }

    /// Reject `html` if it is larger than allowed.
    pub fn check_size(&self, html: &str) -> Result<(), ImportError> {
        if html.len() > self.max_file_size {
            return Err(ImportError::TooLarge {
                size: html.len(),
                limit: self.max_file_size,
            });
        }
        Ok(())
    }

    /// Turn off export options this tier does not include.
    pub fn clamp(&self, options: &ExportOptions) -> ExportOptions {
        ExportOptions {
            preserve_scripts: options.preserve_scripts && self.can_preserve_scripts,
            inline_css: options.inline_css && self.can_inline_css,
            ..*options
        }
    }
}

impl Default for ImportLimits {
    fn default() -> Self {
        Self::free()
    }
}

/// Load external HTML into both editors.
///
/// Oversized input is rejected before the engine is touched.
pub fn import_document(
    engine: &SyncEngine,
    html: &str,
    preserve_scripts: bool,
    limits: &ImportLimits,
) -> Result<ParsedDocument, ImportError> {
    if let Err(err) = limits.check_size(html) {
        warn!("import rejected: {}", err);
        return Err(err);
    }

    let options = SanitizationOptions {
        preserve_scripts: preserve_scripts && limits.can_preserve_scripts,
        ..Default::default()
    };
    let parsed = import_html(html, &options);

    let seed = format!("<!DOCTYPE html>\n{}", parsed.full_markup);
    engine.set_initial_content(&seed, Some(&parsed.styles.join("\n")))?;

    info!(
        "imported \"{}\": {} style blocks, {} stylesheet links, {} scripts",
        parsed.title,
        parsed.styles.len(),
        parsed.stylesheet_links.len(),
        parsed.scripts.len()
    );

    Ok(parsed)
}

/// Replace both editors' content with the starter template.
pub fn new_document(engine: &SyncEngine) -> Result<(), SyncError> {
    let css = parse_document(DEFAULT_TEMPLATE).style_text();
    engine.set_initial_content(DEFAULT_TEMPLATE, Some(&css))
}

/// Export the current document as a standalone HTML file.
pub fn export_document(
    engine: &SyncEngine,
    limits: &ImportLimits,
    options: &ExportOptions,
) -> Result<String, EditorError> {
    engine.flush()?;
    let content = engine.current_content()?;
    let options = limits.clamp(options);

    let styles = if content.style_text.trim().is_empty() {
        Vec::new()
    } else {
        vec![content.style_text.clone()]
    };

    Ok(export_html(&content.full_markup, &styles, &options)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(ImportLimits::default(), ImportLimits::free());
        assert_eq!(ImportLimits::free().max_file_size, 102_400);
        assert!(ImportLimits::pro().can_inline_css);
    }

    #[test]
    fn test_check_size_boundary() {
        let limits = ImportLimits {
            max_file_size: 4,
            ..ImportLimits::free()
        };

        assert!(limits.check_size("abcd").is_ok());
        assert!(matches!(
            limits.check_size("abcde"),
            Err(ImportError::TooLarge { size: 5, limit: 4 })
        ));
    }

    #[test]
    fn test_clamp_disables_unavailable_features() {
        let requested = ExportOptions {
            preserve_scripts: true,
            inline_css: true,
            format_html: true,
            ..Default::default()
        };

        let free = ImportLimits::free().clamp(&requested);
        assert!(!free.preserve_scripts);
        assert!(!free.inline_css);
        assert!(free.format_html);

        let pro = ImportLimits::pro().clamp(&requested);
        assert_eq!(pro, requested);
    }

    #[test]
    fn test_limits_deserialize() {
        let limits: ImportLimits = serde_json::from_str(
            r#"{ "maxFileSize": 10, "canPreserveScripts": true, "canInlineCss": false }"#,
        )
        .unwrap();

        assert_eq!(limits.max_file_size, 10);
        assert!(limits.can_preserve_scripts);
    }
}
