//! # Twinpane Editor
//!
//! Keeps a visual editor and a source editor in agreement about one HTML
//! document.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────┐                      ┌──────────────────────┐
//! │ StructuralEditor     │  body + css          │ SourceEditor         │
//! │  component tree      │ ───── assemble ────► │  full document text  │
//! │  stylesheet          │ ◄──── parse ──────── │                      │
//! └──────────────────────┘                      └──────────────────────┘
//!              ▲                                          ▲
//!              └──────────── SyncEngine ──────────────────┘
//!                 debounce · echo guard · idempotence
//! ```
//!
//! ## Core Principles
//!
//! 1. **Nothing loops**: writes made by the engine never schedule a sync
//! 2. **Bursts coalesce**: one propagation per quiet period
//! 3. **Failures stay local**: a failed propagation is logged and forgotten
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use twinpane_editor::{MemorySourceEditor, MemoryStructuralEditor, SyncConfig, SyncEngine};
//!
//! let engine = SyncEngine::new(SyncConfig::default())?;
//! engine.attach_structural_editor(Arc::new(MemoryStructuralEditor::default()));
//! engine.attach_source_editor(Arc::new(MemorySourceEditor::default()));
//!
//! twinpane_editor::new_document(&engine)?;
//! ```

mod capabilities;
mod debounce;
mod errors;
mod import;
mod memory;
mod sync;

pub use capabilities::{
    SourceEditor, SourceListener, StructuralChange, StructuralEditor, StructuralListener,
    SyncOrigin,
};
pub use errors::{CapabilityError, EditorError, ImportError, SyncError};
pub use import::{export_document, import_document, new_document, ImportLimits};
pub use memory::{MemorySourceEditor, MemoryStructuralEditor};
pub use sync::{
    DocumentContent, Propagation, SyncConfig, SyncEngine, SyncStats, DEFAULT_SYNC_DELAY,
};

// Re-export common types for convenience
pub use twinpane_compiler_html::ExportOptions;
pub use twinpane_parser::ParsedDocument;
