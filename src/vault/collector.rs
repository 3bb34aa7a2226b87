//! Vault scanning: enumerate markdown notes and gather their tags and usage counts.

use super::digest::{DigestBuilder, VaultDigest};
use super::extract::note_tags;
use crate::error::{Result, VaultError};
use crate::search::FrequencyTable;
use ignore::WalkBuilder;
use ignore::overrides::{Override, OverrideBuilder};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Everything one scan of a vault produces.
#[derive(Debug, Clone)]
pub struct VaultTags {
    /// Unique tags, sorted.
    pub tags: Vec<String>,
    /// Number of notes carrying each tag. A note counts once per tag.
    pub frequency: FrequencyTable,
    /// Notes that were read successfully.
    pub notes: usize,
    pub digest: VaultDigest,
}

/// Collects tags from every markdown note under a root directory.
///
/// Hidden files, gitignored paths and notes matching one of the exclude globs
/// (relative to the root) are skipped.
#[derive(Debug, Clone)]
pub struct TagCollector {
    root: PathBuf,
    exclude: Vec<String>,
}

impl TagCollector {
    pub fn new(root: impl Into<PathBuf>, exclude: Vec<String>) -> Self {
        Self {
            root: root.into(),
            exclude,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Markdown notes in the vault, sorted by path.
    pub fn notes(&self) -> Result<Vec<PathBuf>> {
        self.check_root()?;

        let mut notes: Vec<PathBuf> = WalkBuilder::new(&self.root)
            .overrides(self.overrides()?)
            .build()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable vault entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
            .filter(|entry| is_markdown(entry.path()))
            .map(ignore::DirEntry::into_path)
            .collect();

        notes.sort();
        debug!("Found {} notes under {}", notes.len(), self.root.display());
        Ok(notes)
    }

    /// Scan every note once, building the tag list, frequency table and digest together.
    pub fn collect(&self) -> Result<VaultTags> {
        let mut digest = DigestBuilder::new();
        let mut frequency = FrequencyTable::default();
        let mut notes = 0;

        for path in self.notes()? {
            let Some(content) = read_note(&path) else {
                continue;
            };
            digest.add_note(self.relative(&path), &content);
            for tag in note_tags(&content) {
                *frequency.entry(tag).or_insert(0) += 1;
            }
            notes += 1;
        }

        let mut tags: Vec<String> = frequency.keys().cloned().collect();
        tags.sort();

        info!(
            "Collected {} tags from {} notes in {}",
            tags.len(),
            notes,
            self.root.display()
        );

        Ok(VaultTags {
            tags,
            frequency,
            notes,
            digest: digest.finish(),
        })
    }

    /// Digest of the vault's current contents, without extracting tags.
    pub fn digest(&self) -> Result<VaultDigest> {
        let mut digest = DigestBuilder::new();
        for path in self.notes()? {
            if let Some(content) = read_note(&path) {
                digest.add_note(self.relative(&path), &content);
            }
        }
        Ok(digest.finish())
    }

    fn check_root(&self) -> std::result::Result<(), VaultError> {
        if !self.root.exists() {
            return Err(VaultError::NotFound {
                path: self.root.clone(),
            });
        }
        if !self.root.is_dir() {
            return Err(VaultError::NotADirectory {
                path: self.root.clone(),
            });
        }
        Ok(())
    }

    fn overrides(&self) -> std::result::Result<Override, VaultError> {
        let mut builder = OverrideBuilder::new(&self.root);
        for pattern in &self.exclude {
            builder
                .add(&format!("!{}", pattern))
                .map_err(|source| VaultError::InvalidExclude {
                    pattern: pattern.clone(),
                    source,
                })?;
        }
        builder.build().map_err(|source| VaultError::InvalidExclude {
            pattern: self.exclude.join(", "),
            source,
        })
    }

    fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

/// Read a note, replacing invalid UTF-8. Unreadable notes are logged and skipped.
fn read_note(path: &Path) -> Option<String> {
    match std::fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            warn!("Failed to read note {}: {}", path.display(), e);
            None
        }
    }
}
