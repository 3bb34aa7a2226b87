//! Fuzzy tag matching and ranking.
//!
//! Everything lives in [`matcher`]: pairwise scoring and the batch search built on it.

pub mod matcher;

pub use matcher::{DEFAULT_LIMIT, FrequencyTable, Matcher, ScoredMatch};
