//! Runtime configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_REPO: &str = "pytorch/pytorch";
pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_TOKEN_ENV: &str = "GITHUB_TOKEN";
pub const TEMP_ROOT_DIR_NAME: &str = "lintrunner_artifacts";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Repository in `owner/name` form whose workflow runs are queried.
    pub repo: String,
    pub api_base: String,
    /// Name of the environment variable holding the bearer token.
    pub token_env: String,
    /// Parent of every per-workflow extraction root.
    pub temp_root: PathBuf,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repo: DEFAULT_REPO.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            token_env: DEFAULT_TOKEN_ENV.to_string(),
            temp_root: std::env::temp_dir().join(TEMP_ROOT_DIR_NAME),
            user_agent: concat!("commit-changes/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Config {
    /// Bearer token from the configured environment variable; empty when unset.
    pub fn token(&self) -> String {
        std::env::var(&self.token_env).unwrap_or_default()
    }
}
