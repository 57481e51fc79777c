//! What happened to each record, and how it is reported.

use console::Style;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::render::colorize;

/// Filesystem failure confined to a single record.
#[derive(Error, Debug)]
pub enum ApplyError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug)]
pub enum ApplyOutcome {
    /// Target matched `original` and now holds `replacement`.
    Applied { path: PathBuf },
    /// Record lacked `original` or `replacement`.
    SkippedIncomplete { path: PathBuf },
    /// Target no longer holds `original`; `diff` shows the intended edit.
    SkippedStale { path: PathBuf, diff: Vec<String> },
    /// Target could not be read or written. It was left untouched.
    Failed { path: PathBuf, error: ApplyError },
}

impl ApplyOutcome {
    pub fn path(&self) -> &Path {
        match self {
            ApplyOutcome::Applied { path }
            | ApplyOutcome::SkippedIncomplete { path }
            | ApplyOutcome::SkippedStale { path, .. }
            | ApplyOutcome::Failed { path, .. } => path,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, ApplyOutcome::Applied { .. })
    }

    /// Operator-facing report lines. Stale skips end with the diff and a
    /// blank separator line.
    pub fn report_lines(&self, color: bool) -> Vec<String> {
        let path = self.path().display();
        match self {
            ApplyOutcome::Applied { .. } => vec![format!("Applied change to {path}.")],
            ApplyOutcome::SkippedIncomplete { .. } => vec![format!(
                "Skipping change for {path}: the record is missing its original or replacement content."
            )],
            ApplyOutcome::Failed { error, .. } => {
                vec![format!("Skipping change for {path}: {error}.")]
            }
            ApplyOutcome::SkippedStale { diff, .. } => {
                let notice = format!(
                    "Skipping change for {path} as the original content does not match the file \
                     content. This may be because another change has already been applied. \
                     Please see the changes lintrunner wanted to apply below and apply them \
                     manually:"
                );
                let mut lines = Vec::with_capacity(diff.len() + 2);
                if color {
                    let warning = Style::new().yellow().bold().force_styling(true);
                    lines.push(warning.apply_to(notice).to_string());
                    lines.extend(colorize(diff));
                } else {
                    lines.push(notice);
                    lines.extend(diff.iter().cloned());
                }
                lines.push(String::new());
                lines
            }
        }
    }
}

/// Per-run tally of outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplySummary {
    pub applied: usize,
    pub skipped_incomplete: usize,
    pub skipped_stale: usize,
    pub failed: usize,
}

impl ApplySummary {
    pub fn record(&mut self, outcome: &ApplyOutcome) {
        match outcome {
            ApplyOutcome::Applied { .. } => self.applied += 1,
            ApplyOutcome::SkippedIncomplete { .. } => self.skipped_incomplete += 1,
            ApplyOutcome::SkippedStale { .. } => self.skipped_stale += 1,
            ApplyOutcome::Failed { .. } => self.failed += 1,
        }
    }

    pub fn skipped(&self) -> usize {
        self.skipped_incomplete + self.skipped_stale + self.failed
    }
}

impl fmt::Display for ApplySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Summary: {} applied, {} skipped ({} stale, {} incomplete, {} unreadable or unwritable)",
            self.applied,
            self.skipped(),
            self.skipped_stale,
            self.skipped_incomplete,
            self.failed
        )
    }
}
