//! Content digests for detecting when a vault's tags need recollecting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use xxhash_rust::xxh3::Xxh3;

/// xxh3-64 digest over every note's relative path and contents.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct VaultDigest(u64);

impl VaultDigest {
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns the digest as 16 lowercase hexadecimal characters
    pub fn as_hex(&self) -> String {
        format!("{:016x}", self.0)
    }
}

impl fmt::Display for VaultDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_hex())
    }
}

/// Streaming builder fed one note at a time, in sorted path order.
pub struct DigestBuilder {
    hasher: Xxh3,
}

impl Default for DigestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DigestBuilder {
    pub fn new() -> Self {
        Self {
            hasher: Xxh3::new(),
        }
    }

    /// Add a note. `relative` is hashed instead of the absolute path so the digest
    /// survives moving the vault.
    pub fn add_note(&mut self, relative: &Path, content: &str) {
        let path = relative.to_string_lossy();
        // Length prefixes keep ("ab", "c") distinct from ("a", "bc").
        self.hasher.update(&(path.len() as u64).to_le_bytes());
        self.hasher.update(path.as_bytes());
        self.hasher.update(&(content.len() as u64).to_le_bytes());
        self.hasher.update(content.as_bytes());
    }

    pub fn finish(&self) -> VaultDigest {
        VaultDigest(self.hasher.digest())
    }
}
