//! Fuzzy tag search over a vault.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::finder::TagFinder;
use crate::search::ScoredMatch;
use anyhow::Context;
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Fuzzy query; blank browses the most used tags
    pub query: String,
    /// Maximum number of results to return (default: 50)
    pub limit: Option<usize>,
}

#[derive(Serialize)]
struct SearchResponse<'a> {
    query: &'a str,
    results: &'a [ScoredMatch],
}

/// Rank the vault's tags against the request's query.
pub fn execute_search(finder: &mut TagFinder, request: &SearchRequest) -> Result<Vec<ScoredMatch>> {
    finder.suggestions(&request.query, request.limit)
}

/// Search expression that shows every note carrying `tag`.
pub fn search_expression(tag: &str) -> String {
    format!("tag:#{}", tag)
}

/// Format search results into a readable string or a JSON document.
pub fn format_search_results(
    results: &[ScoredMatch],
    query: &str,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&SearchResponse { query, results })
            .context("Failed to serialize search results"),
        OutputFormat::Text => Ok(format_text(results, query)),
    }
}

fn format_text(results: &[ScoredMatch], query: &str) -> String {
    if results.is_empty() {
        let mut msg = if query.trim().is_empty() {
            "No tags found.\n\n".to_string()
        } else {
            format!("No tags match '{}'.\n\n", query)
        };

        msg.push_str("Search tips:\n");
        msg.push_str("• Letters must appear in order but need not be adjacent: 'atr' finds 'area/travel'\n");
        msg.push_str("• Matching ignores case\n");
        msg.push_str("• Leave the query empty to list the most used tags\n");
        return msg;
    }

    let mut output = if query.trim().is_empty() {
        format!("Most used tags ({}):\n\n", results.len())
    } else {
        format!("Tags matching '{}' ({}):\n\n", query, results.len())
    };

    let width = results.len().to_string().len();
    for (idx, result) in results.iter().enumerate() {
        let _ = writeln!(
            output,
            "{:>width$}. {}  ({:.1})",
            idx + 1,
            result.label,
            result.score,
            width = width
        );
    }

    output
}
