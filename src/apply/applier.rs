//! Compare-then-replace of whole files.

use super::{ApplyError, ApplyOutcome};
use crate::domain::{ChangeRecord, RecordShape};
use crate::render::unified_diff;
use crate::utils::content_digest;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Apply one record against `cwd`.
///
/// The target is overwritten with `replacement` only when its current bytes
/// equal `original` exactly. Every other case leaves the file as it was.
/// Problems are returned as outcomes, never as errors, so one bad record
/// does not stop the batch.
pub fn apply_change(record: &ChangeRecord, cwd: &Path) -> ApplyOutcome {
    let abs_path = cwd.join(&record.path);

    let change = match record.shape() {
        RecordShape::Complete(change) => change,
        RecordShape::Incomplete { path } => {
            tracing::debug!("Record for {} is missing original or replacement", path);
            return ApplyOutcome::SkippedIncomplete { path: abs_path };
        }
    };

    let current = match fs::read(&abs_path) {
        Ok(bytes) => bytes,
        Err(source) => {
            let error = ApplyError::Read { path: abs_path.clone(), source };
            tracing::warn!("{}", error);
            return ApplyOutcome::Failed { path: abs_path, error };
        }
    };

    if current != change.original.as_bytes() {
        tracing::debug!(
            "Stale original for {}: on disk {} bytes, record expects {} bytes",
            abs_path.display(),
            current.len(),
            change.original.len()
        );
        let diff = unified_diff(change.original, change.replacement);
        return ApplyOutcome::SkippedStale { path: abs_path, diff };
    }

    if let Err(source) = replace_file(&abs_path, change.replacement) {
        let error = ApplyError::Write { path: abs_path.clone(), source };
        tracing::warn!("{}", error);
        return ApplyOutcome::Failed { path: abs_path, error };
    }

    tracing::debug!(
        "Replaced {} ({} -> {})",
        abs_path.display(),
        content_digest(change.original),
        content_digest(change.replacement)
    );
    ApplyOutcome::Applied { path: abs_path }
}

/// Apply records strictly in order; each one sees the previous one's result.
pub fn apply_records(records: &[ChangeRecord], cwd: &Path) -> Vec<ApplyOutcome> {
    records.iter().map(|record| apply_change(record, cwd)).collect()
}

/// Replace the bytes of the file `path` names.
///
/// Symlinks are resolved first so the link survives and its target changes.
/// A file with other hard links is rewritten in place so every name sees the
/// new content; anything else goes through a sibling temp file and a rename.
fn replace_file(path: &Path, content: &str) -> io::Result<()> {
    let target = fs::canonicalize(path)?;
    let metadata = fs::metadata(&target)?;
    if metadata.permissions().readonly() {
        return Err(io::Error::new(io::ErrorKind::PermissionDenied, "file is read-only"));
    }
    if has_other_links(&metadata) {
        return fs::write(&target, content);
    }

    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;
    fs::set_permissions(tmp.path(), metadata.permissions())?;
    tmp.persist(&target).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(unix)]
fn has_other_links(metadata: &fs::Metadata) -> bool {
    use std::os::unix::fs::MetadataExt;
    metadata.nlink() > 1
}

#[cfg(not(unix))]
fn has_other_links(_metadata: &fs::Metadata) -> bool {
    false
}
