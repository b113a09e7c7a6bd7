//! `tplmin` command line: read a template, minify it, write the result.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tplmin_compactor::TemplateMinifier;
use tplmin_core::MinifyConfig;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "tplmin", version, about = "Minify HTML templates with inline CSS and JavaScript")]
pub struct Args {
    /// The HTML file to be compressed.
    #[arg(short, long, value_name = "PATH")]
    pub input: PathBuf,

    /// The output HTML file path.
    #[arg(short, long, value_name = "PATH")]
    pub output: PathBuf,

    /// JSON configuration file.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log every fragment and payload.
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors.
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        }
    }
}

/// Install the stderr subscriber. `RUST_LOG` overrides the flags.
pub fn init_logging(args: &Args) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn load_config(path: Option<&Path>) -> Result<MinifyConfig> {
    match path {
        Some(path) => MinifyConfig::from_file(path)
            .with_context(|| format!("Failed to load config file {}", path.display())),
        None => Ok(MinifyConfig::default()),
    }
}

pub fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => anyhow!("The input file does not exist, {}.", path.display()),
        _ => anyhow!(e).context(format!("Failed to read input file {}", path.display())),
    })
}

/// Write through a sibling temp file and rename, so a failed run never
/// leaves a partial file at `path`.
pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    let write = || -> std::io::Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    };
    write().context("Output file failed. Please make sure the file path is valid.")
}

pub fn run(args: &Args) -> Result<()> {
    let template = read_input(&args.input)?;
    let config = load_config(args.config.as_deref())?;
    let minifier = TemplateMinifier::new(config)?;

    let report = minifier.minify_with_report(&template)?;
    tracing::info!(
        input = %args.input.display(),
        original = report.original_len,
        minified = report.minified_len,
        reduction_pct = report.reduction_pct,
        styles = report.style_fragments,
        scripts = report.script_fragments,
        variables = report.variables_protected,
        "minified template"
    );

    write_output(&args.output, &report.output)
}

#[cfg(test)]
mod tests;
