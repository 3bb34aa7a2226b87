//! Cached view of a vault's tags and frequency table.

use super::collector::{TagCollector, VaultTags};
use super::digest::VaultDigest;
use crate::error::Result;
use crate::search::FrequencyTable;
use tracing::{debug, info};

/// Lazily collected, explicitly invalidated tag cache for one vault.
///
/// The first call to [`TagCatalog::tags`] or [`TagCatalog::frequency`] scans the
/// vault. Later calls reuse that snapshot until it is invalidated, refreshed, or
/// found stale by [`TagCatalog::refresh_if_stale`].
#[derive(Debug)]
pub struct TagCatalog {
    collector: TagCollector,
    snapshot: Option<VaultTags>,
}

impl TagCatalog {
    pub fn new(collector: TagCollector) -> Self {
        Self {
            collector,
            snapshot: None,
        }
    }

    pub fn collector(&self) -> &TagCollector {
        &self.collector
    }

    /// Whether a snapshot is currently cached.
    pub fn is_loaded(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Sorted unique tags.
    pub fn tags(&mut self) -> Result<&[String]> {
        Ok(&self.ensure_collected()?.tags)
    }

    /// Per-tag note counts.
    pub fn frequency(&mut self) -> Result<&FrequencyTable> {
        Ok(&self.ensure_collected()?.frequency)
    }

    /// The full cached snapshot, collecting it first if needed.
    pub fn snapshot(&mut self) -> Result<&VaultTags> {
        self.ensure_collected().map(|snapshot| &*snapshot)
    }

    /// Drop the cached snapshot; the next read rescans.
    pub fn invalidate(&mut self) {
        if self.snapshot.take().is_some() {
            debug!("Invalidated tag cache for {}", self.collector.root().display());
        }
    }

    /// Rescan the vault now.
    pub fn refresh(&mut self) -> Result<()> {
        self.snapshot = None;
        self.ensure_collected()?;
        Ok(())
    }

    /// Whether the vault changed since the cached snapshot was taken.
    /// An empty cache counts as stale.
    pub fn is_stale(&self) -> Result<bool> {
        match &self.snapshot {
            Some(snapshot) => Ok(self.collector.digest()? != snapshot.digest),
            None => Ok(true),
        }
    }

    /// Rescan only if the vault changed. Returns whether a rescan happened.
    pub fn refresh_if_stale(&mut self) -> Result<bool> {
        if !self.is_stale()? {
            return Ok(false);
        }
        info!("Vault changed, recollecting tags");
        self.refresh()?;
        Ok(true)
    }

    /// Digest of the cached snapshot, if any.
    pub fn digest(&self) -> Option<VaultDigest> {
        self.snapshot.as_ref().map(|snapshot| snapshot.digest)
    }

    fn ensure_collected(&mut self) -> Result<&mut VaultTags> {
        let snapshot = match self.snapshot.take() {
            Some(snapshot) => snapshot,
            None => self.collector.collect()?,
        };
        Ok(self.snapshot.insert(snapshot))
    }
}
