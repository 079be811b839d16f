//! # Sync Engine
//!
//! Keeps a structural editor and a source editor showing the same document.
//!
//! ```text
//!            change event                 debounce elapsed
//!   Idle ───────────────────► Pending(origin) ──────────────► Propagating(origin) ──► Idle
//!                              │      ▲
//!                              └──────┘ another event: timer restarts
//! ```
//!
//! Writing into an editor makes that editor report a change of its own.
//! Those echoes arrive while the `updating` flag is raised and are dropped,
//! so one user edit produces exactly one propagation.
//!
//! The engine is best-effort: a propagation that fails is logged and
//! abandoned, leaving the last recorded state untouched.

use crate::capabilities::{SourceEditor, StructuralEditor, SyncOrigin};
use crate::debounce::DebounceTimer;
use crate::SyncError;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::{debug, error, info};
use twinpane_compiler_html::assemble;
use twinpane_parser::parse_document;

pub const DEFAULT_SYNC_DELAY: Duration = Duration::from_millis(500);

/// Configuration for the sync engine
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Quiet period before a burst of edits is propagated
    pub debounce: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_SYNC_DELAY,
        }
    }
}

impl SyncConfig {
    pub fn from_millis(debounce_ms: u64) -> Self {
        Self {
            debounce: Duration::from_millis(debounce_ms),
        }
    }
}

/// Snapshot of the document as the structural editor sees it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentContent {
    pub body_markup: String,
    pub style_text: String,
    /// `body_markup` and `style_text` assembled into a full document
    pub full_markup: String,
}

/// Outcome of one propagation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// The other editor was rewritten
    Applied,
    /// Content matched what was last synchronized; nothing written
    Unchanged,
    /// Nothing was pending, or an editor is not attached
    Skipped,
}

/// Counters for everything the engine did since it was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub structural_to_source: u64,
    pub source_to_structural: u64,
    /// Change events dropped because a propagation was writing
    pub echoes_ignored: u64,
    pub failures: u64,
}

struct SyncState {
    last_source_text: String,
    last_structural_body: String,
    /// Reentrancy guard: true only while a propagation is writing
    updating: bool,
    timer: DebounceTimer,
    disposed: bool,
    stats: SyncStats,
}

struct SyncInner {
    config: SyncConfig,
    runtime: Handle,
    structural: RwLock<Option<Arc<dyn StructuralEditor>>>,
    source: RwLock<Option<Arc<dyn SourceEditor>>>,
    state: Mutex<SyncState>,
}

/// Releases the reentrancy guard when dropped, on every exit path.
struct UpdatingGuard<'a> {
    inner: &'a SyncInner,
}

impl Drop for UpdatingGuard<'_> {
    fn drop(&mut self) {
        self.inner.lock_state().updating = false;
    }
}

/// Bidirectional synchronization between a structural and a source editor.
///
/// Dropping the engine disposes it.
pub struct SyncEngine {
    inner: Arc<SyncInner>,
}

impl SyncEngine {
    /// Create an engine on the current tokio runtime.
    pub fn new(config: SyncConfig) -> Result<Self, SyncError> {
        Ok(Self::with_runtime(config, Handle::try_current()?))
    }

    /// Create an engine whose debounce tasks run on `runtime`.
    pub fn with_runtime(config: SyncConfig, runtime: Handle) -> Self {
        Self {
            inner: Arc::new(SyncInner {
                config,
                runtime,
                structural: RwLock::new(None),
                source: RwLock::new(None),
                state: Mutex::new(SyncState {
                    last_source_text: String::new(),
                    last_structural_body: String::new(),
                    updating: false,
                    timer: DebounceTimer::default(),
                    disposed: false,
                    stats: SyncStats::default(),
                }),
            }),
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.inner.config
    }

    /// Bind the visual editor; any of its change events schedules a
    /// structural → source propagation.
    pub fn attach_structural_editor(&self, editor: Arc<dyn StructuralEditor>) {
        let weak: Weak<SyncInner> = Arc::downgrade(&self.inner);
        editor.on_change(Arc::new(move |change| {
            if let Some(inner) = weak.upgrade() {
                debug!("structural change: {:?}", change);
                inner.schedule_sync(SyncOrigin::Structural);
            }
        }));
        *self
            .inner
            .structural
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(editor);
    }

    /// Bind the text editor; any of its change events schedules a
    /// source → structural propagation.
    pub fn attach_source_editor(&self, editor: Arc<dyn SourceEditor>) {
        let weak: Weak<SyncInner> = Arc::downgrade(&self.inner);
        editor.on_change(Arc::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.schedule_sync(SyncOrigin::Source);
            }
        }));
        *self
            .inner
            .source
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(editor);
    }

    /// (Re)start the debounce timer for `origin`.
    ///
    /// Ignored while a propagation is writing, since the event is then an
    /// echo of the engine's own write.
    pub fn schedule_sync(&self, origin: SyncOrigin) {
        self.inner.schedule_sync(origin);
    }

    /// Run the pending propagation now instead of waiting for the timer.
    ///
    /// Returns [`SyncError::Busy`] while another propagation is writing; the
    /// pending propagation then stays scheduled.
    pub fn flush(&self) -> Result<Propagation, SyncError> {
        let origin = {
            let mut state = self.inner.lock_state();
            if state.updating {
                return Err(SyncError::Busy);
            }
            state.timer.cancel()
        };
        let Some(origin) = origin else {
            return Ok(Propagation::Skipped);
        };

        let result = self.inner.propagate(origin);
        if let Err(SyncError::Busy) = result {
            self.inner.rearm(origin);
        }
        result
    }

    /// Seed both editors with a fresh document, bypassing the debounce.
    ///
    /// Used at startup and for "new document" / "import". Echo events from
    /// the seeding writes are ignored and any pending propagation is
    /// cancelled.
    pub fn set_initial_content(&self, html: &str, css: Option<&str>) -> Result<(), SyncError> {
        let _guard = self.inner.begin_update().ok_or(SyncError::Busy)?;
        self.inner.lock_state().timer.cancel();

        if let Some(structural) = self.inner.structural() {
            let parsed = parse_document(html);
            structural
                .set_body_markup(&parsed.body_content)
                .map_err(SyncError::Structural)?;
            if let Some(css) = css {
                structural
                    .set_style_text(css)
                    .map_err(SyncError::Structural)?;
            }
        }

        if let Some(source) = self.inner.source() {
            source.set_text(html).map_err(SyncError::Source)?;
        }

        let mut state = self.inner.lock_state();
        state.last_source_text = html.to_string();
        state.last_structural_body = html.to_string();
        info!("seeded editors with {} bytes", html.len());

        Ok(())
    }

    /// Current document, read live from the structural editor.
    pub fn current_content(&self) -> Result<DocumentContent, SyncError> {
        let (body_markup, style_text) = match self.inner.structural() {
            Some(structural) => (
                structural.body_markup().map_err(SyncError::Structural)?,
                structural.style_text().map_err(SyncError::Structural)?,
            ),
            None => (String::new(), String::new()),
        };
        let full_markup = assemble(&body_markup, &style_text);

        Ok(DocumentContent {
            body_markup,
            style_text,
            full_markup,
        })
    }

    /// Cancel any pending propagation and stop reacting to change events.
    pub fn dispose(&self) {
        let mut state = self.inner.lock_state();
        state.timer.cancel();
        state.disposed = true;
    }

    pub fn is_pending(&self) -> bool {
        self.inner.lock_state().timer.is_armed()
    }

    pub fn pending_origin(&self) -> Option<SyncOrigin> {
        self.inner.lock_state().timer.pending_origin()
    }

    pub fn stats(&self) -> SyncStats {
        self.inner.lock_state().stats
    }

    /// Source text recorded after the last successful propagation.
    pub fn last_source_text(&self) -> String {
        self.inner.lock_state().last_source_text.clone()
    }

    /// Structural body recorded after the last successful propagation.
    pub fn last_structural_body(&self) -> String {
        self.inner.lock_state().last_structural_body.clone()
    }
}

impl Drop for SyncEngine {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl SyncInner {
    fn lock_state(&self) -> MutexGuard<'_, SyncState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn structural(&self) -> Option<Arc<dyn StructuralEditor>> {
        self.structural
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn source(&self) -> Option<Arc<dyn SourceEditor>> {
        self.source
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn begin_update(&self) -> Option<UpdatingGuard<'_>> {
        let mut state = self.lock_state();
        if state.updating {
            return None;
        }
        state.updating = true;
        Some(UpdatingGuard { inner: self })
    }

    fn schedule_sync(self: &Arc<Self>, origin: SyncOrigin) {
        let mut state = self.lock_state();

        if state.disposed {
            return;
        }
        if state.updating {
            state.stats.echoes_ignored += 1;
            debug!("ignoring {:?} change made by an in-flight propagation", origin);
            return;
        }

        self.arm(&mut state, origin);
    }

    /// Put back a propagation that lost the race for the guard.
    fn rearm(self: &Arc<Self>, origin: SyncOrigin) {
        let mut state = self.lock_state();
        if !state.disposed {
            debug!("{:?} propagation deferred behind an in-flight one", origin);
            self.arm(&mut state, origin);
        }
    }

    fn arm(self: &Arc<Self>, state: &mut SyncState, origin: SyncOrigin) {
        let weak = Arc::downgrade(self);
        let delay = self.config.debounce;
        let runtime = &self.runtime;
        state.timer.arm(origin, |generation| {
            runtime.spawn(async move {
                tokio::time::sleep(delay).await;
                if let Some(inner) = weak.upgrade() {
                    inner.fire(generation);
                }
            })
        });
    }

    fn fire(self: &Arc<Self>, generation: u64) {
        let origin = {
            let mut state = self.lock_state();
            if state.disposed {
                return;
            }
            match state.timer.take_if_current(generation) {
                Some(origin) => origin,
                None => return,
            }
        };

        // Failures stay inside the engine; the next edit gets another try.
        if let Err(SyncError::Busy) = self.propagate(origin) {
            self.rearm(origin);
        }
    }

    fn propagate(&self, origin: SyncOrigin) -> Result<Propagation, SyncError> {
        let result = match origin {
            SyncOrigin::Structural => self.propagate_from_structural(),
            SyncOrigin::Source => self.propagate_from_source(),
        };

        match &result {
            Ok(outcome) => debug!("{:?} propagation finished: {:?}", origin, outcome),
            Err(SyncError::Busy) => {}
            Err(err) => {
                error!("Error syncing from {:?} editor: {}", origin, err);
                self.lock_state().stats.failures += 1;
            }
        }

        result
    }

    fn propagate_from_structural(&self) -> Result<Propagation, SyncError> {
        let (Some(structural), Some(source)) = (self.structural(), self.source()) else {
            return Ok(Propagation::Skipped);
        };
        let Some(_guard) = self.begin_update() else {
            return Err(SyncError::Busy);
        };

        let body = structural.body_markup().map_err(SyncError::Structural)?;
        let css = structural.style_text().map_err(SyncError::Structural)?;
        let full = assemble(&body, &css);

        if full == self.lock_state().last_source_text {
            return Ok(Propagation::Unchanged);
        }

        source.set_text(&full).map_err(SyncError::Source)?;

        let mut state = self.lock_state();
        info!("structural → source: {} bytes", full.len());
        state.last_source_text = full;
        state.last_structural_body = body;
        state.stats.structural_to_source += 1;

        Ok(Propagation::Applied)
    }

    fn propagate_from_source(&self) -> Result<Propagation, SyncError> {
        let (Some(structural), Some(source)) = (self.structural(), self.source()) else {
            return Ok(Propagation::Skipped);
        };
        let Some(_guard) = self.begin_update() else {
            return Err(SyncError::Busy);
        };

        let text = source.text().map_err(SyncError::Source)?;

        if text == self.lock_state().last_source_text {
            return Ok(Propagation::Unchanged);
        }

        let parsed = parse_document(&text);
        let css = parsed.style_text();
        structural
            .set_body_markup(&parsed.body_content)
            .map_err(SyncError::Structural)?;
        structural
            .set_style_text(&css)
            .map_err(SyncError::Structural)?;

        let mut state = self.lock_state();
        info!("source → structural: {} bytes", text.len());
        state.last_source_text = text;
        state.last_structural_body = parsed.body_content;
        state.stats.source_to_structural += 1;

        Ok(Propagation::Applied)
    }
}
