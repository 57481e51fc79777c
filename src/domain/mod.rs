//! Core data types shared across the crate.

pub mod artifact;
pub mod change;
pub mod config;

pub use artifact::{ArtifactLocation, WorkflowRun};
pub use change::{ChangeRecord, CompleteChange, RecordShape};
pub use config::Config;
