//! Error types for the editor

use thiserror::Error;
use twinpane_compiler_html::ExportError;

/// Failure reported by an editor adapter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    #[error("Editor is not ready")]
    NotReady,

    #[error("Editor rejected content: {0}")]
    Rejected(String),
}

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Structural editor error: {0}")]
    Structural(#[source] CapabilityError),

    #[error("Source editor error: {0}")]
    Source(#[source] CapabilityError),

    #[error("A propagation is already in flight")]
    Busy,

    #[error("Sync engine needs a tokio runtime: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Document is {size} bytes, the limit is {limit} bytes")]
    TooLarge { size: usize, limit: usize },

    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),
}

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}
