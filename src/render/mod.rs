//! Terminal rendering of proposed changes.

pub mod diff;

pub use diff::{colorize, unified_diff};
