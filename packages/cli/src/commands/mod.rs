pub mod export;
pub mod format;
pub mod import;
pub mod new;
pub mod sanitize;

pub use export::{export, ExportArgs};
pub use format::{format, FormatArgs};
pub use import::{import, ImportArgs};
pub use new::{new, NewArgs};
pub use sanitize::{sanitize, SanitizeArgs};

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use twinpane_editor::{MemorySourceEditor, MemoryStructuralEditor, SyncConfig, SyncEngine};

/// Resolve `path` against the working directory and read it.
fn read_input(path: &Path, cwd: &str) -> Result<String> {
    let path = PathBuf::from(cwd).join(path);
    fs::read_to_string(&path).with_context(|| format!("Cannot read {}", path.display()))
}

/// Write to `output` when given, otherwise print to stdout.
fn write_output(output: Option<&Path>, cwd: &str, content: &str) -> Result<()> {
    match output {
        Some(output) => {
            let path = PathBuf::from(cwd).join(output);
            fs::write(&path, content)
                .with_context(|| format!("Cannot write {}", path.display()))?;
            eprintln!("  {} Wrote {}", "✓".green(), output.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

/// Engine wired to in-memory editors, for commands that run the full
/// editing pipeline without a UI.
struct Workspace {
    engine: SyncEngine,
    structural: Arc<MemoryStructuralEditor>,
    source: Arc<MemorySourceEditor>,
}

impl Workspace {
    fn new(config: SyncConfig) -> Result<Self> {
        let engine = SyncEngine::new(config)?;
        let structural = Arc::new(MemoryStructuralEditor::default());
        let source = Arc::new(MemorySourceEditor::default());
        engine.attach_structural_editor(structural.clone());
        engine.attach_source_editor(source.clone());

        Ok(Self {
            engine,
            structural,
            source,
        })
    }
}
