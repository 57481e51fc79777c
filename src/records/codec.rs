//! Line-delimited JSON codec for change files.

use crate::domain::ChangeRecord;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Read every decodable record from `path`, in file order.
pub fn read_changes(path: &Path) -> Result<Vec<ChangeRecord>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed reading change file: {}", path.display()))?;
    Ok(parse_changes(&path.display().to_string(), &content))
}

/// Decode one record per non-blank line.
///
/// Lines that fail to decode are logged and dropped; decoding carries on with
/// the next line. `source` only labels the warnings.
pub fn parse_changes(source: &str, content: &str) -> Vec<ChangeRecord> {
    let mut records = Vec::new();
    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<ChangeRecord>(line) {
            Ok(record) => records.push(record),
            Err(err) => {
                tracing::warn!(
                    "Error decoding JSON from {}:{}: {}. Error: {}",
                    source,
                    index + 1,
                    line,
                    err
                );
            }
        }
    }
    records
}

/// Encode records one per line, each line newline-terminated.
pub fn render_changes(records: &[ChangeRecord]) -> Result<String> {
    let mut out = String::new();
    for record in records {
        out.push_str(&serde_json::to_string(record)?);
        out.push('\n');
    }
    Ok(out)
}

/// Replace `path` with the encoded records.
///
/// The content is written to a sibling temp file and renamed into place, so a
/// reader sees either the old file or the complete new one.
pub fn write_changes(path: &Path, records: &[ChangeRecord]) -> Result<()> {
    let rendered = render_changes(records)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed creating temp file in {}", dir.display()))?;
    tmp.write_all(rendered.as_bytes())
        .with_context(|| format!("Failed writing {}", path.display()))?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed replacing {}", path.display()))?;
    Ok(())
}
