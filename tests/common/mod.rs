//! Shared test fixtures and utilities for integration tests.
//!
//! # Available Fixtures
//!
//! - `sample_vault`: a small vault of notes with hierarchical tags, both in
//!   frontmatter and inline, with uneven usage counts
//! - `empty_vault`: a vault directory with no notes
//!
//! [`TempVault`] provides the underlying temp directory abstraction for tests that
//! need to build their own notes.

use clap::Parser;
use rstest::fixture;
use std::path::{Path, PathBuf};
use tagfind::cli::{Cli, run};
use tempfile::TempDir;

/// A temporary vault directory for test isolation.
///
/// Automatically cleaned up when dropped.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempVault {
    _temp: TempDir,
    root: PathBuf,
    /// Holds an empty config so command runs ignore the user's own config files.
    _config_dir: TempDir,
    config: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempVault {
    /// Creates a new empty temporary vault.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        let config_dir = TempDir::new().expect("Failed to create temp config directory");
        let config = config_dir.path().join("config.toml");
        std::fs::write(&config, "").expect("Failed to write empty config");
        Self {
            _temp: temp,
            root,
            _config_dir: config_dir,
            config,
        }
    }

    /// Returns the root path of this vault.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Returns the config file passed to every [`TempVault::run`] by default.
    pub fn config_path(&self) -> &Path {
        &self.config
    }

    /// Creates a note (or any file) within this vault.
    ///
    /// Parent directories are created automatically if they don't exist.
    ///
    /// # Panics
    /// Panics if file creation fails.
    pub fn create_note(&self, path: &str, content: &str) {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("Failed to create parent directory for '{}': {}", path, e)
            });
        }
        std::fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Failed to write note '{}': {}", path, e));
    }

    /// Runs the command line against this vault, e.g. `["search", "trav"]`.
    ///
    /// Unless `args` names its own `--config`, an empty config file is passed so
    /// results never depend on config files of the machine running the tests.
    pub fn run(&self, args: &[&str]) -> anyhow::Result<String> {
        let vault = self.root.display().to_string();
        let config = self.config.display().to_string();
        let mut argv = vec!["tagfind", "--vault", vault.as_str()];
        if !args.contains(&"--config") {
            argv.extend(["--config", config.as_str()]);
        }
        argv.extend_from_slice(args);
        run(Cli::try_parse_from(argv)?)
    }
}

impl Default for TempVault {
    fn default() -> Self {
        Self::new()
    }
}

/// A vault with five notes and one non-markdown file.
///
/// Note counts: project 4, area/travel 3, area/finances 2, idea 1, places/travel 1,
/// travel 1.
#[fixture]
pub fn sample_vault() -> TempVault {
    let vault = TempVault::new();
    vault.create_note(
        "trips/lisbon.md",
        "---\ntags: [area/travel, project]\n---\nFlights booked. #places/travel\n",
    );
    vault.create_note(
        "trips/tokyo.md",
        "---\ntags:\n  - area/travel\n  - project\n---\n# Tokyo\n\nBudget in #area/finances\n",
    );
    vault.create_note("trips/notes.md", "Ideas for next year #travel #area/travel #idea\n");
    vault.create_note(
        "money/budget.md",
        "---\ntags: area/finances, project\n---\n```\n#not-a-tag\n```\n",
    );
    vault.create_note("inbox.md", "#project");
    vault.create_note("readme.txt", "#ignored");
    vault
}

#[fixture]
pub fn empty_vault() -> TempVault {
    TempVault::new()
}
