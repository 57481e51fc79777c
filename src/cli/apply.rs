//! apply-changes mode

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::apply::{apply_records, ApplySummary};
use crate::domain::{Config, WorkflowRun};
use crate::fetch::{fetch_artifacts, ArtifactClient, ArtifactSource, ArtifactWorkspace};
use crate::records::format_input_file;
use crate::scan::find_formatted_files;

pub struct ApplyOptions {
    pub cwd: PathBuf,
    pub run: WorkflowRun,
    /// Colorize stale-record diffs
    pub color: bool,
}

pub fn run(config: &Config, options: &ApplyOptions) -> Result<ApplySummary> {
    let client = ArtifactClient::new(config)?;
    run_with_source(&client, &config.temp_root, options)
}

/// Fetch, apply and clean up. The workspace is removed whether or not the
/// fetch succeeded.
pub fn run_with_source(
    source: &impl ArtifactSource,
    temp_root: &Path,
    options: &ApplyOptions,
) -> Result<ApplySummary> {
    let mut workspace = ArtifactWorkspace::create(temp_root, &options.run)
        .context("Failed to prepare artifact workspace")?;

    let result = apply_artifacts(source, &workspace, options);

    if workspace.cleanup() {
        println!("Cleaned up temporary directory: {}", workspace.root().display());
    }
    result
}

fn apply_artifacts(
    source: &impl ArtifactSource,
    workspace: &ArtifactWorkspace,
    options: &ApplyOptions,
) -> Result<ApplySummary> {
    let locations = fetch_artifacts(source, workspace, &options.run)
        .with_context(|| format!("Failed to fetch artifacts for workflow run {}", options.run))?;

    let mut summary = ApplySummary::default();
    for location in &locations {
        println!("Downloaded and extracted artifacts to: {}", location.path().display());
        for file in find_formatted_files(location.path())? {
            let records = match format_input_file(&file, &options.cwd) {
                Ok(records) => records,
                Err(err) => {
                    tracing::warn!("Skipping change file {}: {:#}", file.display(), err);
                    continue;
                }
            };
            tracing::debug!("Applying {} records from {}", records.len(), file.display());
            for outcome in apply_records(&records, &options.cwd) {
                for line in outcome.report_lines(options.color) {
                    println!("{line}");
                }
                summary.record(&outcome);
            }
        }
    }

    println!("{summary}");
    Ok(summary)
}
