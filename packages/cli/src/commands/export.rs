use super::{read_input, write_output, Workspace};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use twinpane_compiler_html::{download_file_name, export_html};
use tracing::warn;
use twinpane_editor::{export_document, import_document, ExportOptions};

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// HTML file to export
    pub input: PathBuf,

    /// Output file; `.html` is appended when missing (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Move <style> rules onto matching elements
    #[arg(long)]
    pub inline_css: bool,

    /// Re-indent the output
    #[arg(long)]
    pub format: bool,

    /// Keep scripts and event handlers
    #[arg(long)]
    pub preserve_scripts: bool,

    /// Replace the document's <style> blocks (repeatable)
    #[arg(long = "style", value_name = "CSS")]
    pub styles: Vec<String>,
}

pub fn export(args: ExportArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let html = read_input(&args.input, cwd)?;
    let workspace = Workspace::new(config.sync())?;

    import_document(&workspace.engine, &html, args.preserve_scripts, &config.limits)?;

    let options = resolve_options(&config, &args);

    let document = if args.styles.is_empty() {
        export_document(&workspace.engine, &config.limits, &options)?
    } else {
        let content = workspace.engine.current_content()?;
        export_html(&content.full_markup, &args.styles, &options)?
    };

    let output = args.output.map(with_html_extension);
    write_output(output.as_deref(), cwd, &document)
}

/// Config defaults with command-line switches turned on, clamped to the tier.
fn resolve_options(config: &Config, args: &ExportArgs) -> ExportOptions {
    let requested = ExportOptions {
        preserve_scripts: config.export.preserve_scripts || args.preserve_scripts,
        inline_css: config.export.inline_css || args.inline_css,
        format_html: config.export.format_html || args.format,
        ..config.export
    };
    let options = config.limits.clamp(&requested);
    if options != requested {
        warn!(
            "export options not available on this tier were ignored: {:?} -> {:?}",
            requested, options
        );
    }
    options
}

fn with_html_extension(output: PathBuf) -> PathBuf {
    let name = output
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    output.with_file_name(download_file_name(&name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use twinpane_editor::ImportLimits;

    fn args(inline_css: bool, format: bool) -> ExportArgs {
        ExportArgs {
            input: PathBuf::from("page.html"),
            output: None,
            inline_css,
            format,
            preserve_scripts: true,
            styles: Vec::new(),
        }
    }

    #[test]
    fn test_free_tier_clamps_requested_options() {
        let options = resolve_options(&Config::default(), &args(true, true));

        assert!(!options.inline_css);
        assert!(!options.preserve_scripts);
        assert!(options.format_html);
    }

    #[test]
    fn test_flags_combine_with_config_defaults() {
        let mut config = Config {
            limits: ImportLimits::pro(),
            ..Config::default()
        };
        config.export.format_html = true;

        let options = resolve_options(&config, &args(true, false));

        assert!(options.inline_css);
        assert!(options.preserve_scripts);
        assert!(options.format_html);
    }

    #[test]
    fn test_output_gets_html_extension() {
        assert_eq!(
            with_html_extension(PathBuf::from("out/page")),
            PathBuf::from("out/page.html")
        );
        assert_eq!(
            with_html_extension(PathBuf::from("page.html")),
            PathBuf::from("page.html")
        );
    }
}
