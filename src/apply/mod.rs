//! Verified application of change records to a working tree.

pub mod applier;
pub mod outcome;

pub use applier::{apply_change, apply_records};
pub use outcome::{ApplyError, ApplyOutcome, ApplySummary};
