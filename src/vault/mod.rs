//! Vault integration: discovering notes, extracting their tags and caching the
//! resulting candidate set and frequency table for the matcher.

pub mod catalog;
pub mod collector;
pub mod digest;
pub mod extract;

pub use catalog::TagCatalog;
pub use collector::{TagCollector, VaultTags};
pub use digest::{DigestBuilder, VaultDigest};
pub use extract::{frontmatter_tags, inline_tags, note_tags, split_frontmatter};
