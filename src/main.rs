//! commit-changes: apply lint changes produced by CI to a local working tree

use anyhow::Result;

fn main() -> Result<()> {
    commit_changes::cli::run()
}
