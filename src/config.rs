//! Tool configuration from an optional `page-loader.toml`.
//!
//! Everything has a working default, so the file is only needed to move
//! the store root or change the fallback template:
//!
//! ```toml
//! default_template = "/templates/article"
//!
//! [store]
//! root = "/var/lib/page-loader/repo"
//! ```
//!
//! Resolution: an explicit `--config` path must exist; otherwise
//! `page-loader.toml` in the working directory is used when present, and
//! stock defaults apply when it isn't.

use crate::pipeline::DEFAULT_TEMPLATE;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "page-loader.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("config file not found: {0}")]
    NotFound(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Template used for rows that name none.
    pub default_template: String,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Repository root directory.
    pub root: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_template: DEFAULT_TEMPLATE.to_string(),
            store: StoreConfig::default(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("repo"),
        }
    }
}

impl Config {
    /// Load configuration. `explicit` is the `--config` flag value.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                Self::from_file(path)
            }
            None => {
                let default_path = Path::new(CONFIG_FILE);
                if default_path.is_file() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_a_file() {
        let config = Config::default();
        assert_eq!(config.default_template, DEFAULT_TEMPLATE);
        assert_eq!(config.store.root, PathBuf::from("repo"));
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let config: Config = toml::from_str("default_template = \"/templates/news\"").unwrap();
        assert_eq!(config.default_template, "/templates/news");
        assert_eq!(config.store.root, PathBuf::from("repo"));
    }

    #[test]
    fn full_file_overrides_everything() {
        let config: Config = toml::from_str(
            "default_template = \"/templates/news\"\n[store]\nroot = \"/srv/repo\"",
        )
        .unwrap();
        assert_eq!(config.store.root, PathBuf::from("/srv/repo"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<Config>("template = \"typo\"").is_err());
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = Config::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
