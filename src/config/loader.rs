//! Config file loading

use crate::domain::Config;
use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Toml, Yaml};
use figment::Figment;
use std::path::{Path, PathBuf};

/// Environment variables with this prefix override file values,
/// e.g. `COMMIT_CHANGES_REPO=owner/name`.
pub const ENV_PREFIX: &str = "COMMIT_CHANGES_";

pub fn load_config(cwd: &Path, config_path: Option<&Path>) -> Result<Config> {
    let config_path_provided = config_path.is_some();

    let discovered = match config_path {
        Some(path) => {
            if !path.is_file() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Some(path.to_path_buf())
        }
        None => discover_config(cwd),
    };

    let Some(config_file) = discovered else {
        return extract(defaults());
    };

    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
    let layered = match ext.as_str() {
        "toml" => defaults().merge(Toml::file(&config_file)),
        "yaml" | "yml" => defaults().merge(Yaml::file(&config_file)),
        other => {
            let err = anyhow::anyhow!(
                "Unsupported config extension '.{}' for file {}",
                other,
                config_file.display()
            );
            if config_path_provided {
                return Err(err);
            }
            tracing::warn!("{}", err);
            return extract(defaults());
        }
    };

    match extract(layered) {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", config_file.display());
            Ok(config)
        }
        Err(e) if !config_path_provided => {
            // Auto-discovered: warn and fall back to defaults
            tracing::warn!(
                "Failed to parse auto-discovered config {}: {:#}",
                config_file.display(),
                e
            );
            extract(defaults())
        }
        Err(e) => Err(e).with_context(|| format!("Invalid config file: {}", config_file.display())),
    }
}

fn defaults() -> Figment {
    Figment::from(Serialized::defaults(Config::default()))
}

fn extract(figment: Figment) -> Result<Config> {
    figment.merge(Env::prefixed(ENV_PREFIX)).extract().context("Invalid configuration")
}

fn discover_config(cwd: &Path) -> Option<PathBuf> {
    let candidates = [
        "commit-changes.toml",
        ".commit-changes.toml",
        "commit-changes.yml",
        ".commit-changes.yml",
        "commit-changes.yaml",
        ".commit-changes.yaml",
    ];

    candidates.iter().map(|candidate| cwd.join(candidate)).find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::{DEFAULT_API_BASE, DEFAULT_REPO};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_config_defaults_when_missing() {
        let tmp = TempDir::new().expect("tmp");
        let cfg = load_config(tmp.path(), None).expect("config");
        assert_eq!(cfg.repo, DEFAULT_REPO);
        assert_eq!(cfg.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_load_discovered_toml_config() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(
            tmp.path().join("commit-changes.toml"),
            "repo = 'octo/widgets'\ntemp_root = '/var/tmp/lint'\n",
        )
        .expect("write");

        let cfg = load_config(tmp.path(), None).expect("config");
        assert_eq!(cfg.repo, "octo/widgets");
        assert_eq!(cfg.temp_root, PathBuf::from("/var/tmp/lint"));
        assert_eq!(cfg.api_base, DEFAULT_API_BASE, "unset keys keep defaults");
    }

    #[test]
    fn test_load_explicit_yaml_config() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("settings.yml");
        fs::write(&path, "api_base: http://127.0.0.1:9000\ntoken_env: CI_TOKEN\n").expect("write");

        let cfg = load_config(tmp.path(), Some(&path)).expect("config");
        assert_eq!(cfg.api_base, "http://127.0.0.1:9000");
        assert_eq!(cfg.token_env, "CI_TOKEN");
    }

    #[test]
    fn test_explicit_config_invalid_type_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "repo = [\"a\", \"b\"]\n").expect("write");

        let result = load_config(tmp.path(), Some(&path));
        assert!(result.is_err(), "explicit config with invalid type should return Err");
    }

    #[test]
    fn test_explicit_config_missing_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let result = load_config(tmp.path(), Some(&tmp.path().join("absent.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_explicit_config_unsupported_extension_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("config.ini");
        fs::write(&path, "repo=x\n").expect("write");
        assert!(load_config(tmp.path(), Some(&path)).is_err());
    }

    #[test]
    fn test_auto_discovered_invalid_config_returns_default() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join(".commit-changes.toml"), "repo = [1, 2]\n").expect("write");

        let cfg = load_config(tmp.path(), None).expect("should not error on auto-discovery");
        assert_eq!(cfg.repo, DEFAULT_REPO);
    }
}
