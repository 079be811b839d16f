mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    export, format, import, new, sanitize, ExportArgs, FormatArgs, ImportArgs, NewArgs,
    SanitizeArgs,
};
use tracing_subscriber::EnvFilter;

/// Twinpane CLI - Edit HTML visually and as source, side by side
#[derive(Parser, Debug)]
#[command(name = "twinpane")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the starter document
    New(NewArgs),

    /// Import an HTML file and summarize what was kept
    Import(ImportArgs),

    /// Remove unsafe markup from an HTML file
    Sanitize(SanitizeArgs),

    /// Produce a standalone, downloadable HTML file
    Export(ExportArgs),

    /// Re-indent an HTML file
    Format(FormatArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(cwd) => cwd.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::New(args) => new(args, &cwd),
        Command::Import(args) => import(args, &cwd),
        Command::Sanitize(args) => sanitize(args, &cwd),
        Command::Export(args) => export(args, &cwd),
        Command::Format(args) => format(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
