//! Command-line interface for commit-changes
//!
//! Two mutually exclusive modes: `format-input` rewrites a change file with
//! paths relative to the working directory, `apply-changes` fetches a
//! workflow run's artifacts and applies the formatted changes they contain.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::load_config;
use crate::domain::WorkflowRun;

pub mod apply;
pub mod format;

/// Apply lint changes produced by CI to the local working tree
#[derive(Parser)]
#[command(name = "commit-changes")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Mode of operation
    #[arg(long, value_enum)]
    mode: Mode,

    /// Change file to normalize (format-input mode)
    #[arg(long, value_name = "FILE")]
    input_file: Option<PathBuf>,

    /// Working directory that record paths are relative to [default: current directory]
    #[arg(long, value_name = "DIR")]
    cwd: Option<PathBuf>,

    /// Workflow run whose artifacts are applied (apply-changes mode)
    #[arg(long, value_name = "ID", default_value = "commit_changes")]
    workflow_id: String,

    /// Repository owning the workflow run, as OWNER/NAME
    #[arg(long, value_name = "OWNER/NAME")]
    repo: Option<String>,

    /// Directory under which artifacts are downloaded and extracted
    #[arg(long, value_name = "DIR")]
    temp_root: Option<PathBuf>,

    /// Path to config file (commit-changes.toml or .commit-changes.yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print diffs without terminal colors
    #[arg(long)]
    no_color: bool,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Fetch CI artifacts and apply the changes they carry
    ApplyChanges,
    /// Normalize a change file and write `<input>.formatted`
    FormatInput,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let cwd = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    match cli.mode {
        Mode::FormatInput => {
            let Some(input) = cli.input_file else {
                anyhow::bail!("--input-file is required for --mode format-input");
            };
            format::run(&input, &cwd).map(|_| ())
        }
        Mode::ApplyChanges => {
            let mut config = load_config(&cwd, cli.config.as_deref())?;
            if let Some(repo) = cli.repo {
                config.repo = repo;
            }
            if let Some(temp_root) = cli.temp_root {
                config.temp_root = temp_root;
            }
            let options = apply::ApplyOptions {
                cwd,
                run: WorkflowRun::new(cli.workflow_id),
                color: !cli.no_color,
            };
            apply::run(&config, &options).map(|_| ())
        }
    }
}
