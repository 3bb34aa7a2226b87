//! Listing every tag in a vault with its note count.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::finder::TagFinder;
use anyhow::Context;
use serde::Serialize;
use std::fmt::Write as _;

/// A tag and the number of notes carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: u64,
}

/// All tags, most used first; equal counts are ordered by name.
pub fn execute_list_tags(finder: &mut TagFinder) -> Result<Vec<TagCount>> {
    let frequency = finder.catalog().frequency()?;

    let mut tags: Vec<TagCount> = frequency
        .iter()
        .map(|(tag, count)| TagCount {
            tag: tag.clone(),
            count: *count,
        })
        .collect();
    tags.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));

    Ok(tags)
}

pub fn format_tag_list(tags: &[TagCount], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(tags).context("Failed to serialize tag list")
        }
        OutputFormat::Text => {
            if tags.is_empty() {
                return Ok("No tags found.\n".to_string());
            }

            let width = tags
                .first()
                .map_or(1, |top| top.count.to_string().len());
            let mut output = format!("{} tags:\n\n", tags.len());
            for entry in tags {
                let _ = writeln!(output, "{:>width$}  {}", entry.count, entry.tag, width = width);
            }
            Ok(output)
        }
    }
}
