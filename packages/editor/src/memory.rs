//! In-memory editor adapters.
//!
//! Both adapters fire their listeners on every write, including writes made
//! by the sync engine, which is what real widgets do too. `edit_*` methods
//! stand in for a user typing or dragging.

use crate::capabilities::{
    SourceEditor, SourceListener, StructuralChange, StructuralEditor, StructuralListener,
};
use crate::CapabilityError;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Default)]
struct StructuralContent {
    body: String,
    css: String,
}

/// Structural editor backed by two strings.
pub struct MemoryStructuralEditor {
    content: Mutex<StructuralContent>,
    listeners: Mutex<Vec<StructuralListener>>,
    writes: AtomicUsize,
    available: AtomicBool,
}

impl Default for MemoryStructuralEditor {
    fn default() -> Self {
        Self::new("", "")
    }
}

impl MemoryStructuralEditor {
    pub fn new(body: &str, css: &str) -> Self {
        Self {
            content: Mutex::new(StructuralContent {
                body: body.to_string(),
                css: css.to_string(),
            }),
            listeners: Mutex::new(Vec::new()),
            writes: AtomicUsize::new(0),
            available: AtomicBool::new(true),
        }
    }

    /// Simulate a user rearranging components.
    pub fn edit_body(&self, markup: &str) {
        lock(&self.content).body = markup.to_string();
        self.notify(StructuralChange::ComponentUpdated);
    }

    /// Simulate a user changing a style in the style manager.
    pub fn edit_style(&self, css: &str) {
        lock(&self.content).css = css.to_string();
        self.notify(StructuralChange::StyleUpdated);
    }

    /// Number of writes made through the capability setters.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// While unavailable every capability call fails with `NotReady`.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), CapabilityError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(CapabilityError::NotReady)
        }
    }

    fn notify(&self, change: StructuralChange) {
        let listeners = lock(&self.listeners).clone();
        for listener in listeners {
            listener(change);
        }
    }
}

impl StructuralEditor for MemoryStructuralEditor {
    fn body_markup(&self) -> Result<String, CapabilityError> {
        self.check_available()?;
        Ok(lock(&self.content).body.clone())
    }

    fn style_text(&self) -> Result<String, CapabilityError> {
        self.check_available()?;
        Ok(lock(&self.content).css.clone())
    }

    fn set_body_markup(&self, markup: &str) -> Result<(), CapabilityError> {
        self.check_available()?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        lock(&self.content).body = markup.to_string();
        self.notify(StructuralChange::ComponentAdded);
        Ok(())
    }

    fn set_style_text(&self, css: &str) -> Result<(), CapabilityError> {
        self.check_available()?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        lock(&self.content).css = css.to_string();
        self.notify(StructuralChange::StyleUpdated);
        Ok(())
    }

    fn on_change(&self, listener: StructuralListener) {
        lock(&self.listeners).push(listener);
    }
}

/// Source editor backed by one string.
pub struct MemorySourceEditor {
    text: Mutex<String>,
    listeners: Mutex<Vec<SourceListener>>,
    writes: AtomicUsize,
    available: AtomicBool,
}

impl Default for MemorySourceEditor {
    fn default() -> Self {
        Self::new("")
    }
}

impl MemorySourceEditor {
    pub fn new(text: &str) -> Self {
        Self {
            text: Mutex::new(text.to_string()),
            listeners: Mutex::new(Vec::new()),
            writes: AtomicUsize::new(0),
            available: AtomicBool::new(true),
        }
    }

    /// Simulate a keystroke that leaves the buffer holding `text`.
    pub fn type_text(&self, text: &str) {
        *lock(&self.text) = text.to_string();
        self.notify();
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), CapabilityError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(CapabilityError::NotReady)
        }
    }

    fn notify(&self) {
        let listeners = lock(&self.listeners).clone();
        for listener in listeners {
            listener();
        }
    }
}

impl SourceEditor for MemorySourceEditor {
    fn text(&self) -> Result<String, CapabilityError> {
        self.check_available()?;
        Ok(lock(&self.text).clone())
    }

    fn set_text(&self, text: &str) -> Result<(), CapabilityError> {
        self.check_available()?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        *lock(&self.text) = text.to_string();
        self.notify();
        Ok(())
    }

    fn on_change(&self, listener: SourceListener) {
        lock(&self.listeners).push(listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_setters_fire_listeners() {
        let editor = MemorySourceEditor::new("a");
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        editor.on_change(Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        editor.set_text("b").unwrap();
        editor.type_text("c");

        assert_eq!(fired.load(Ordering::SeqCst), 2);
        assert_eq!(editor.writes(), 1);
        assert_eq!(editor.text().unwrap(), "c");
    }

    #[test]
    fn test_unavailable_editor_fails() {
        let editor = MemoryStructuralEditor::new("<p>x</p>", "");
        editor.set_available(false);

        assert_eq!(editor.body_markup(), Err(CapabilityError::NotReady));
        assert!(editor.set_style_text("p {}").is_err());
        assert_eq!(editor.writes(), 0);
    }
}
