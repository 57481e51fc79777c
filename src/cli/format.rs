//! format-input mode

use anyhow::Result;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::records::{format_input_file, write_changes, FORMATTED_SUFFIX};

/// Normalize `input` against `cwd` and write the result next to it.
pub fn run(input: &Path, cwd: &Path) -> Result<PathBuf> {
    let records = format_input_file(input, cwd)?;
    let output = formatted_path(input);
    write_changes(&output, &records)?;
    tracing::debug!("Wrote {} records to {}", records.len(), output.display());
    println!("Formatted changes written to {}.", output.display());
    Ok(output)
}

/// `<input>.formatted`
pub fn formatted_path(input: &Path) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(FORMATTED_SUFFIX);
    PathBuf::from(name)
}
