pub mod cli;
pub mod config;
pub mod error;
pub mod finder;
pub mod logging;
pub mod search;
pub mod tools;
pub mod vault;

pub use config::{Config, OutputFormat};
pub use finder::TagFinder;
pub use search::{DEFAULT_LIMIT, FrequencyTable, Matcher, ScoredMatch};
pub use vault::{TagCatalog, TagCollector};
