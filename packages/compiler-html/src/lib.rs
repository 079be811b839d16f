mod assembler;
mod export;
mod formatter;
mod inliner;

#[cfg(test)]
mod tests;

pub use assembler::{assemble, DEFAULT_TEMPLATE, DOCUMENT_TITLE};
pub use export::{download_file_name, export_html, ExportError, ExportOptions};
pub use formatter::format_html;
pub use inliner::{inline_css, parse_css_rules, CssRule};
