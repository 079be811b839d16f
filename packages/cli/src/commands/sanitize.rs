use super::{read_input, write_output};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use twinpane_parser::{sanitize as sanitize_html, SanitizationOptions, SanitizationPolicy};

#[derive(Debug, Args)]
pub struct SanitizeArgs {
    /// HTML file to clean
    pub input: PathBuf,

    /// Keep scripts and event handlers
    #[arg(long)]
    pub preserve_scripts: bool,

    /// Strip data-* attributes
    #[arg(long)]
    pub no_data_attributes: bool,

    /// Strip style attributes
    #[arg(long)]
    pub no_styles: bool,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn sanitize(args: SanitizeArgs, cwd: &str) -> Result<()> {
    let html = read_input(&args.input, cwd)?;
    let options = SanitizationOptions {
        preserve_scripts: args.preserve_scripts,
        allow_data_attributes: !args.no_data_attributes,
        allow_styles: !args.no_styles,
    };

    let clean = sanitize_html(&html, &SanitizationPolicy::from_options(&options));
    write_output(args.output.as_deref(), cwd, &clean)
}
