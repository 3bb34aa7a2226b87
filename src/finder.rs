//! A tag-finding session: a vault catalog feeding a matcher.

use crate::error::Result;
use crate::search::{Matcher, ScoredMatch};
use crate::vault::{TagCatalog, VaultDigest};
use tracing::{debug, warn};

/// Owns a [`TagCatalog`] and the [`Matcher`] ranking its tags.
///
/// The matcher's frequency table is reinstalled whenever the catalog's snapshot
/// changes, so scores always reflect the tags being searched.
#[derive(Debug)]
pub struct TagFinder {
    catalog: TagCatalog,
    matcher: Matcher,
    /// Digest of the snapshot whose frequency table the matcher holds.
    installed: Option<VaultDigest>,
}

impl TagFinder {
    pub fn new(catalog: TagCatalog) -> Self {
        Self {
            catalog,
            matcher: Matcher::new(),
            installed: None,
        }
    }

    pub fn catalog(&mut self) -> &mut TagCatalog {
        &mut self.catalog
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Rank the vault's tags against `query`.
    ///
    /// A blank query (empty or whitespace only) browses all tags, most used first.
    pub fn suggestions(&mut self, query: &str, limit: Option<usize>) -> Result<Vec<ScoredMatch>> {
        let snapshot = self.catalog.snapshot()?;

        if snapshot.tags.is_empty() {
            warn!(
                "No tags found in vault {}",
                self.catalog.collector().root().display()
            );
            return Ok(Vec::new());
        }

        if self.installed != Some(snapshot.digest) {
            self.matcher.set_frequency_map(snapshot.frequency.clone());
            self.installed = Some(snapshot.digest);
        }

        let query = if query.trim().is_empty() { "" } else { query };
        let results = self.matcher.search(query, &snapshot.tags, limit);
        debug!("Query {:?} -> {} results", query, results.len());
        Ok(results)
    }

    /// Recollect tags if the vault changed since they were loaded.
    pub fn refresh_if_stale(&mut self) -> Result<bool> {
        self.catalog.refresh_if_stale()
    }
}
