//! Discovery of formatted change files inside extracted artifacts.

use crate::records::FORMATTED_SUFFIX;
use crate::utils::normalize_path;
use anyhow::{Context, Result};
use globset::{Glob, GlobMatcher};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

fn formatted_matcher() -> Result<GlobMatcher> {
    let pattern = format!("**/*{FORMATTED_SUFFIX}");
    Ok(Glob::new(&pattern)
        .with_context(|| format!("Invalid glob pattern: {pattern}"))?
        .compile_matcher())
}

/// Every `*.formatted` file under `root`, at any depth, sorted by path.
pub fn find_formatted_files(root: &Path) -> Result<Vec<PathBuf>> {
    let matcher = formatted_matcher()?;
    let mut found = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.with_context(|| format!("Failed walking {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(root) else {
            continue;
        };
        if matcher.is_match(normalize_path(rel.to_string_lossy().as_ref())) {
            found.push(entry.into_path());
        }
    }
    found.sort();
    Ok(found)
}
