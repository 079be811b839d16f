use super::{read_input, write_output};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use twinpane_compiler_html::format_html;

#[derive(Debug, Args)]
pub struct FormatArgs {
    /// HTML file to re-indent
    pub input: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn format(args: FormatArgs, cwd: &str) -> Result<()> {
    let html = read_input(&args.input, cwd)?;
    write_output(args.output.as_deref(), cwd, &format_html(&html))
}
