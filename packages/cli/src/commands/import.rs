use super::{read_input, Workspace};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use tracing::warn;
use twinpane_editor::{import_document, StructuralEditor};

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// HTML file to import
    pub input: PathBuf,

    /// Keep scripts and event handlers (if the configured tier allows it)
    #[arg(long)]
    pub preserve_scripts: bool,

    /// Print the parsed document as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn import(args: ImportArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let html = read_input(&args.input, cwd)?;
    let workspace = Workspace::new(config.sync())?;

    let parsed = import_document(&workspace.engine, &html, args.preserve_scripts, &config.limits)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
        return Ok(());
    }

    if args.preserve_scripts && !config.limits.can_preserve_scripts {
        warn!("script preservation is not available on this tier; scripts were removed");
    }

    println!("{} {}", "📄 Imported".bright_blue().bold(), args.input.display());
    println!("   Title:       {}", parsed.title.bright_white());
    println!("   Size:        {} bytes", html.len());
    println!(
        "   Body:        {} bytes",
        workspace.structural.body_markup()?.len()
    );
    println!("   Styles:      {} blocks", parsed.styles.len());
    for link in &parsed.stylesheet_links {
        println!("   Stylesheet:  {}", link);
    }
    println!("   Scripts:     {}", parsed.scripts.len());

    Ok(())
}
