//! # Editor Capabilities
//!
//! The sync engine never sees a concrete editing widget. It talks to two
//! narrow capabilities, and adapters bind them to whatever visual or text
//! editor is in use.
//!
//! Setters are expected to fire the editor's own change notification, the
//! same way a real widget reports programmatic edits. The engine treats
//! those notifications as echoes of its own writes.

use crate::CapabilityError;
use std::sync::Arc;

/// Which editor a change came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncOrigin {
    /// Visual component tree / stylesheet editor
    Structural,
    /// Raw source text editor
    Source,
}

/// Kind of mutation reported by a structural editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralChange {
    ComponentAdded,
    ComponentRemoved,
    ComponentUpdated,
    StyleUpdated,
}

pub type StructuralListener = Arc<dyn Fn(StructuralChange) + Send + Sync>;
pub type SourceListener = Arc<dyn Fn() + Send + Sync>;

/// Visual editor owning a component tree and a stylesheet.
pub trait StructuralEditor: Send + Sync {
    /// Body markup of the current component tree
    fn body_markup(&self) -> Result<String, CapabilityError>;

    /// Concatenated text of every style rule
    fn style_text(&self) -> Result<String, CapabilityError>;

    fn set_body_markup(&self, markup: &str) -> Result<(), CapabilityError>;

    fn set_style_text(&self, css: &str) -> Result<(), CapabilityError>;

    /// Register a listener fired on any structural or style mutation.
    fn on_change(&self, listener: StructuralListener);
}

/// Text editor owning a single buffer holding the whole document.
pub trait SourceEditor: Send + Sync {
    fn text(&self) -> Result<String, CapabilityError>;

    fn set_text(&self, text: &str) -> Result<(), CapabilityError>;

    /// Register a listener fired on any text mutation.
    fn on_change(&self, listener: SourceListener);
}
