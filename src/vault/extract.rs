//! Tag extraction from markdown notes: YAML frontmatter `tags` and inline `#tags`.

use ahash::AHashSet;
use pulldown_cmark::{Event, Parser, Tag};
use regex::Regex;
use serde::Deserialize;
use std::ops::Range;
use std::sync::LazyLock;
use tracing::debug;

/// `#tag` at the start of the text or after whitespace. Letters, digits, `_`, `-`
/// and `/` only.
static INLINE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\s)#([\p{L}\p{N}_/\-]+)").expect("inline tag pattern is valid")
});

#[derive(Debug, Deserialize)]
struct Frontmatter {
    #[serde(default)]
    tags: Option<FrontmatterTags>,
}

/// The shapes a `tags` value takes in practice. Anything else declares no tags.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FrontmatterTags {
    Text(String),
    List(Vec<serde_yaml::Value>),
    Other(#[allow(dead_code)] serde::de::IgnoredAny),
}

/// Split a note into its frontmatter block (without the `---` fences) and body.
///
/// Frontmatter must open on the very first line. Without a closing `---` or `...`
/// line the whole note is treated as body.
pub fn split_frontmatter(content: &str) -> (Option<&str>, &str) {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');

    let Some(first) = lines.next() else {
        return (None, content);
    };
    if first.trim_end() != "---" {
        return (None, content);
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        let trimmed = line.trim_end();
        if trimmed == "---" || trimmed == "..." {
            return (
                Some(&content[start..offset]),
                &content[offset + line.len()..],
            );
        }
        offset += line.len();
    }

    (None, content)
}

/// Tags declared by the top-level `tags` key of a YAML frontmatter block.
///
/// A string value is split on commas; from a list only string items are kept.
/// Each tag is trimmed and loses one leading `#`. Frontmatter that is not valid
/// YAML declares no tags.
pub fn frontmatter_tags(frontmatter: &str) -> Vec<String> {
    if frontmatter.trim().is_empty() {
        return Vec::new();
    }

    let parsed: Frontmatter = match serde_yaml::from_str(frontmatter) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!("Skipping unparsable frontmatter: {}", e);
            return Vec::new();
        }
    };

    match parsed.tags {
        Some(FrontmatterTags::Text(text)) => text.split(',').filter_map(clean_tag).collect(),
        Some(FrontmatterTags::List(items)) => items
            .iter()
            .filter_map(serde_yaml::Value::as_str)
            .filter_map(clean_tag)
            .collect(),
        Some(FrontmatterTags::Other(_)) | None => Vec::new(),
    }
}

/// Inline `#tags` in a note body. Code blocks and inline code spans are skipped
/// and purely numeric tags such as `#2024` are ignored.
pub fn inline_tags(body: &str) -> Vec<String> {
    let code = code_ranges(body);

    INLINE_TAG
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .filter(|tag| !code.iter().any(|range| range.contains(&tag.start())))
        .map(|tag| tag.as_str())
        .filter(|tag| !tag.chars().all(char::is_numeric))
        .map(str::to_string)
        .collect()
}

/// All tags of one note, frontmatter first, each listed once.
pub fn note_tags(content: &str) -> Vec<String> {
    let (frontmatter, body) = split_frontmatter(content);

    let mut seen = AHashSet::new();
    frontmatter
        .map(frontmatter_tags)
        .unwrap_or_default()
        .into_iter()
        .chain(inline_tags(body))
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}

/// Byte ranges of code blocks (fenced or indented) and inline code spans.
fn code_ranges(body: &str) -> Vec<Range<usize>> {
    Parser::new(body)
        .into_offset_iter()
        .filter_map(|(event, range)| match event {
            Event::Start(Tag::CodeBlock(_)) | Event::Code(_) => Some(range),
            _ => None,
        })
        .collect()
}

fn clean_tag(raw: &str) -> Option<String> {
    let tag = raw.trim();
    let tag = tag.strip_prefix('#').unwrap_or(tag);
    (!tag.is_empty()).then(|| tag.to_string())
}
