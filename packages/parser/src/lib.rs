//! # Twinpane Parser
//!
//! Turns untrusted HTML text into something the editors can work with.
//!
//! ```text
//! raw HTML ──► sanitize ──► parse_document ──► ParsedDocument
//!              (policy)      (html5ever DOM)    styles / links / scripts / body
//! ```
//!
//! Neither stage ever fails: malformed markup is repaired by the HTML5
//! tree builder before anything is filtered or extracted.

pub mod dom;
pub mod parser;
pub mod sanitizer;

#[cfg(test)]
mod tests;

pub use parser::{import_html, parse_document, ParsedDocument, DEFAULT_TITLE};
pub use sanitizer::{sanitize, SanitizationOptions, SanitizationPolicy};
