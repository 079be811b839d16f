use super::{write_output, Workspace};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use twinpane_editor::{new_document, SourceEditor};

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn new(args: NewArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let workspace = Workspace::new(config.sync())?;

    new_document(&workspace.engine)?;

    if args.output.is_some() {
        eprintln!("{}", "📝 Creating new document...".bright_blue().bold());
    }
    write_output(args.output.as_deref(), cwd, &workspace.source.text()?)
}
