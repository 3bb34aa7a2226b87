//! Operations exposed by the command line, each returning printable output.

pub mod list_tags;
pub mod search;

pub use list_tags::*;
pub use search::*;
