//! Scoped temporary storage for one workflow run's artifacts.

use super::FetchError;
use crate::domain::WorkflowRun;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Directory `<temp_root>/<workflow_id>` holding raw archives and their
/// `<name>_extracted` siblings.
///
/// Re-running the same workflow id reuses the directory. The whole tree is
/// removed by [`ArtifactWorkspace::cleanup`], or on drop if cleanup was never
/// called. `temp_root` itself is only removed if this workspace created it.
#[derive(Debug)]
pub struct ArtifactWorkspace {
    temp_root: PathBuf,
    created_temp_root: bool,
    root: PathBuf,
    cleaned: bool,
}

impl ArtifactWorkspace {
    pub fn create(temp_root: &Path, run: &WorkflowRun) -> Result<Self, FetchError> {
        let root = temp_root.join(sanitize_name(&run.workflow_id));
        let created_temp_root = !temp_root.exists();
        fs::create_dir_all(&root).map_err(FetchError::io(&root))?;
        tracing::debug!("Using artifact workspace {}", root.display());
        Ok(Self { temp_root: temp_root.to_path_buf(), created_temp_root, root, cleaned: false })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn archive_path(&self, artifact_name: &str) -> PathBuf {
        self.root.join(sanitize_name(artifact_name))
    }

    pub fn extraction_dir(&self, artifact_name: &str) -> PathBuf {
        self.root.join(format!("{}_extracted", sanitize_name(artifact_name)))
    }

    /// Remove everything this workspace created. Best-effort: failures are
    /// logged and reported through the return value, never raised.
    pub fn cleanup(&mut self) -> bool {
        if self.cleaned {
            return true;
        }
        self.cleaned = true;

        let removed = match fs::remove_dir_all(&self.root) {
            Ok(()) => true,
            Err(err) if err.kind() == ErrorKind::NotFound => true,
            Err(err) => {
                tracing::warn!(
                    "Failed to clean up temporary directory {}: {}",
                    self.root.display(),
                    err
                );
                false
            }
        };
        // remove_dir refuses while another workflow still has a directory here.
        if self.created_temp_root {
            let _ = fs::remove_dir(&self.temp_root);
        }
        removed
    }
}

impl Drop for ArtifactWorkspace {
    fn drop(&mut self) {
        self.cleanup();
    }
}

/// Make a provider-supplied name safe to use as a single path component.
pub fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') { c } else { '_' })
        .collect();
    if cleaned.trim_matches('.').is_empty() {
        "artifact".to_string()
    } else {
        cleaned
    }
}
