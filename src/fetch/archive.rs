//! ZIP extraction for downloaded artifacts.

use super::FetchError;
use std::fs::{self, File};
use std::io;
use std::path::Path;
use zip::ZipArchive;

/// Unpack `archive` into `dest`, returning the number of files written.
///
/// `dest` is emptied first so a re-run replaces earlier output instead of
/// mixing with it. Entries whose names would land outside `dest` abort the
/// extraction.
pub fn extract_zip(archive: &Path, dest: &Path) -> Result<usize, FetchError> {
    let file = File::open(archive).map_err(FetchError::io(archive))?;
    let mut zip = ZipArchive::new(file)
        .map_err(|source| FetchError::Archive { path: archive.to_path_buf(), source })?;

    if dest.exists() {
        fs::remove_dir_all(dest).map_err(FetchError::io(dest))?;
    }
    fs::create_dir_all(dest).map_err(FetchError::io(dest))?;

    let mut written = 0;
    for index in 0..zip.len() {
        let mut entry = zip
            .by_index(index)
            .map_err(|source| FetchError::Archive { path: archive.to_path_buf(), source })?;
        let Some(relative) = entry.enclosed_name() else {
            return Err(FetchError::UnsafeEntry {
                archive: archive.to_path_buf(),
                entry: entry.name().to_string(),
            });
        };
        let out_path = dest.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path).map_err(FetchError::io(&out_path))?;
            continue;
        }
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).map_err(FetchError::io(parent))?;
        }
        let mut out = File::create(&out_path).map_err(FetchError::io(&out_path))?;
        io::copy(&mut entry, &mut out).map_err(FetchError::io(&out_path))?;
        written += 1;
    }

    tracing::debug!("Extracted {} files from {} to {}", written, archive.display(), dest.display());
    Ok(written)
}
