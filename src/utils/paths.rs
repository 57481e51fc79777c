//! Path normalization

use std::path::Path;

pub fn normalize_path(path: &str) -> String {
    // Convert backslashes to forward slashes and normalize
    path.replace('\\', "/")
}

/// Render a filesystem path the way change records spell paths.
///
/// Only Windows separators are rewritten; elsewhere a backslash is an
/// ordinary file name character.
pub fn to_record_path(path: &Path) -> String {
    let rendered = path.to_string_lossy();
    if cfg!(windows) {
        normalize_path(&rendered)
    } else {
        rendered.into_owned()
    }
}
