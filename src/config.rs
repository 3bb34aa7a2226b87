//! Configuration file support for tagfind.
//!
//! Loads configuration from `--config`, `.tagfind.toml` in the current directory,
//! or `<config dir>/tagfind/config.toml`, in that order. Command-line flags win over
//! anything loaded here.

use crate::error::{ConfigError, Result};
use crate::search::DEFAULT_LIMIT;
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = ".tagfind.toml";

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Settings read from a TOML config file. Every key is optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Vault root; `~` expands to the home directory.
    pub vault: Option<PathBuf>,
    /// Maximum number of search results
    pub limit: Option<usize>,
    /// Default output format (text or json)
    pub format: Option<OutputFormat>,
    /// Globs, relative to the vault root, of notes to skip
    pub exclude: Vec<String>,
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist and parse. Implicit config files that fail to parse
    /// are logged and skipped.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Ok(Self::from_path(path)?);
        }

        for path in Self::implicit_paths() {
            if !path.is_file() {
                continue;
            }
            match Self::from_path(&path) {
                Ok(config) => {
                    debug!("Loaded config from {}", path.display());
                    return Ok(config);
                }
                Err(e) => warn!("Ignoring config: {:#}", anyhow::Error::from(e)),
            }
        }

        Ok(Self::default())
    }

    pub fn from_path(path: &Path) -> std::result::Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn implicit_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("tagfind").join("config.toml"));
        }
        paths
    }

    /// Vault root: the CLI value, else the configured one, else the working directory.
    pub fn vault_root(&self, cli_value: Option<&Path>) -> Result<PathBuf> {
        match cli_value.or(self.vault.as_deref()) {
            Some(path) => Ok(expand_tilde(path)),
            None => std::env::current_dir().context("Failed to determine current directory"),
        }
    }

    /// Merge CLI limit with config (CLI wins)
    pub fn limit(&self, cli_value: Option<usize>) -> usize {
        cli_value.or(self.limit).unwrap_or(DEFAULT_LIMIT)
    }

    /// Merge CLI format with config (CLI wins)
    pub fn format(&self, cli_value: Option<OutputFormat>) -> OutputFormat {
        cli_value.or(self.format).unwrap_or_default()
    }
}

/// Expands a leading `~` component to the user's home directory.
///
/// - `~/notes` becomes `/home/user/notes`
/// - Other paths (including `~user/notes`) are returned unchanged
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}
