//! Rewriting record paths relative to a working tree.

use super::codec::read_changes;
use crate::domain::ChangeRecord;
use crate::utils::to_record_path;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Return `record` with its path made relative to `cwd`.
///
/// Relative paths pass through untouched, which makes the operation
/// idempotent. An absolute path outside `cwd` is kept as-is and logged; the
/// applier then resolves it on its own.
pub fn normalize_record(record: &ChangeRecord, cwd: &Path) -> ChangeRecord {
    let path = Path::new(&record.path);
    if !path.is_absolute() {
        return record.clone();
    }

    match relative_to(path, cwd) {
        Some(relative) => record.with_path(to_record_path(&relative)),
        None => {
            tracing::warn!(
                "Path {} is not inside working directory {}; leaving it unchanged",
                path.display(),
                cwd.display()
            );
            record.clone()
        }
    }
}

pub fn normalize_records(records: &[ChangeRecord], cwd: &Path) -> Vec<ChangeRecord> {
    records.iter().map(|record| normalize_record(record, cwd)).collect()
}

/// Read a change file and normalize every record against `cwd`.
pub fn format_input_file(input: &Path, cwd: &Path) -> Result<Vec<ChangeRecord>> {
    let records = read_changes(input)?;
    Ok(normalize_records(&records, cwd))
}

fn relative_to(path: &Path, cwd: &Path) -> Option<PathBuf> {
    if let Ok(rel) = path.strip_prefix(cwd) {
        return Some(rel.to_path_buf());
    }
    // cwd may be reached through a symlink (e.g. /tmp on macOS).
    let canonical = cwd.canonicalize().ok()?;
    path.strip_prefix(&canonical).ok().map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn absolute_path_under_cwd_becomes_relative() {
        let record = ChangeRecord::new("/work/repo/src/a.py", "x", "y");
        let normalized = normalize_record(&record, Path::new("/work/repo"));
        assert_eq!(normalized.path, "src/a.py");
        assert_eq!(normalized.original, record.original);
        assert_eq!(normalized.replacement, record.replacement);
    }

    #[test]
    fn relative_path_passes_through() {
        let record = ChangeRecord::new("src/a.py", "x", "y");
        assert_eq!(normalize_record(&record, Path::new("/work/repo")), record);
    }

    #[test]
    fn absolute_path_outside_cwd_is_left_alone() {
        let record = ChangeRecord::new("/elsewhere/a.py", "x", "y");
        assert_eq!(normalize_record(&record, Path::new("/work/repo")), record);
    }

    #[test]
    fn normalization_is_idempotent_and_order_preserving() {
        let cwd = Path::new("/work/repo");
        let records = vec![
            ChangeRecord::new("/work/repo/b.py", "1", "2"),
            ChangeRecord::new("a.py", "3", "4"),
            ChangeRecord { path: "/work/repo/c/d.py".into(), ..ChangeRecord::default() },
        ];
        let once = normalize_records(&records, cwd);
        let twice = normalize_records(&once, cwd);
        assert_eq!(once, twice);
        let paths: Vec<&str> = once.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["b.py", "a.py", "c/d.py"]);
    }

    #[test]
    fn format_input_file_reads_and_normalizes() {
        let tmp = TempDir::new().expect("tmp");
        let cwd = tmp.path();
        let abs = cwd.join("pkg").join("mod.py");
        let input = cwd.join("changes.jsonl");
        let line = serde_json::to_string(&ChangeRecord::new(
            abs.to_string_lossy().to_string(),
            "a\n",
            "b\n",
        ))
        .expect("encode");
        fs::write(&input, format!("{line}\n{{broken\n")).expect("write");

        let records = format_input_file(&input, cwd).expect("format");
        assert_eq!(records, vec![ChangeRecord::new("pkg/mod.py", "a\n", "b\n")]);
    }
}
