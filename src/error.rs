//! Error handling types and utilities.
//!
//! Matching itself never fails; a score of 0 means "no match". Errors only come
//! from reading vaults and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// A specialized Result type for tagfind operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods throughout the codebase.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when a vault cannot be scanned.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Vault root does not exist.
    #[error("Vault not found at {}", path.display())]
    NotFound { path: PathBuf },
    /// Vault root exists but is a file.
    #[error("Vault path is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },
    /// An exclude glob could not be compiled.
    #[error("Invalid exclude pattern '{pattern}'")]
    InvalidExclude {
        pattern: String,
        #[source]
        source: ignore::Error,
    },
}

/// Error returned when an explicitly requested config file is unusable.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
