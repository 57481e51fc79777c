//! commit-changes: apply lint changes produced by CI to a local working tree
//!
//! Change files are line-delimited JSON, one whole-file edit per line. Each
//! edit names the content it expects to find; it is applied only when the file
//! on disk still matches, and otherwise reported with a diff for manual
//! follow-up.

pub mod apply;
pub mod cli;
pub mod config;
pub mod domain;
pub mod fetch;
pub mod records;
pub mod render;
pub mod scan;
pub mod utils;
