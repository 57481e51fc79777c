//! Change files: line-delimited JSON decoding, encoding and path normalization.

pub mod codec;
pub mod normalize;

pub use codec::{parse_changes, read_changes, render_changes, write_changes};
pub use normalize::{format_input_file, normalize_record, normalize_records};

/// Suffix marking a change file whose paths are relative to a working tree.
pub const FORMATTED_SUFFIX: &str = ".formatted";
