//! Workflow runs and the directories their artifacts are unpacked into.

use std::fmt;
use std::path::{Path, PathBuf};

/// A remote CI execution, identified by the provider's run id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowRun {
    pub workflow_id: String,
}

impl WorkflowRun {
    pub fn new(workflow_id: impl Into<String>) -> Self {
        Self { workflow_id: workflow_id.into() }
    }
}

impl fmt::Display for WorkflowRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.workflow_id)
    }
}

/// Directory holding one extracted artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLocation {
    pub name: String,
    pub archive_path: PathBuf,
    pub extracted_dir: PathBuf,
}

impl ArtifactLocation {
    pub fn path(&self) -> &Path {
        &self.extracted_dir
    }
}
