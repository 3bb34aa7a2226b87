//! Subsequence matching and frequency-weighted ranking for tag labels.
//!
//! Scores come from a fixed heuristic. A query matches a label when its characters
//! appear in the label in order (case-insensitively); the match is then rewarded for
//! starting at the front, landing on word boundaries, ending in a consecutive run and
//! belonging to a short label, and penalised for starting late or leaving gaps.
//! The result is scaled by how often the label is used.

use ahash::AHashMap;
use serde::Serialize;
use tracing::debug;

/// Usage counts keyed by the exact (case-sensitive) label.
pub type FrequencyTable = AHashMap<String, u64>;

/// Result cap applied by [`Matcher::search`] when no limit is given.
pub const DEFAULT_LIMIT: usize = 50;

const EXACT_MATCH_SCORE: f64 = 1000.0;
const EXACT_MATCH_FREQUENCY_WEIGHT: f64 = 10.0;
const BASE_SCORE: f64 = 100.0;
const CONSECUTIVE_BONUS: f64 = 50.0;
const PREFIX_BONUS: f64 = 200.0;
const WORD_BOUNDARY_BONUS: f64 = 150.0;
const LATE_START_PENALTY: f64 = 2.0;
const GAP_PENALTY: f64 = 5.0;
const SHORT_LABEL_LENGTH: usize = 100;
const FREQUENCY_STEP: f64 = 0.1;

/// Characters after which a matched position counts as a word start.
const WORD_SEPARATORS: [char; 4] = ['/', '-', '_', ' '];

/// A label paired with its relevance score for one search call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredMatch {
    pub label: String,
    pub score: f64,
}

/// Fuzzy matcher over tag labels.
///
/// The frequency table is the only state. It is replaced wholesale through
/// [`Matcher::set_frequency_map`]; scoring never mutates it, so a `&Matcher` can be
/// shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    frequency: FrequencyTable,
}

/// Outcome of walking the query through the label.
struct SubsequenceScan {
    /// Label positions (in chars) where each query char was matched.
    positions: Vec<usize>,
    /// Length of the consecutive run in progress when the scan stopped.
    trailing_run: usize,
}

impl Matcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frequency_map(frequency: FrequencyTable) -> Self {
        Self { frequency }
    }

    /// Replace the frequency table. Earlier results are not affected.
    pub fn set_frequency_map(&mut self, frequency: FrequencyTable) {
        debug!("Installing frequency table with {} labels", frequency.len());
        self.frequency = frequency;
    }

    pub fn frequency_map(&self) -> &FrequencyTable {
        &self.frequency
    }

    /// Usage count of a label, 0 when absent.
    pub fn frequency_of(&self, label: &str) -> u64 {
        self.frequency.get(label).copied().unwrap_or(0)
    }

    /// Whether `query` is a case-insensitive subsequence of `label`.
    pub fn is_match(&self, query: &str, label: &str) -> bool {
        self.match_score(query, label) > 0.0
    }

    /// Score `query` against `label`.
    ///
    /// Returns 0 exactly when the query is not a subsequence of the label; any match
    /// scores at least 1. A case-insensitive exact match scores
    /// `1000 + 10 * frequency` and skips the heuristic entirely.
    pub fn match_score(&self, query: &str, label: &str) -> f64 {
        let query_lower: Vec<char> = query.to_lowercase().chars().collect();
        let label_lower: Vec<char> = label.to_lowercase().chars().collect();

        if query_lower == label_lower {
            return EXACT_MATCH_SCORE
                + self.frequency_of(label) as f64 * EXACT_MATCH_FREQUENCY_WEIGHT;
        }

        let Some(scan) = scan_subsequence(&query_lower, &label_lower) else {
            return 0.0;
        };

        let mut score = BASE_SCORE;

        // Only the run still open when the scan stops is rewarded, not the longest one.
        score += scan.trailing_run as f64 * CONSECUTIVE_BONUS;

        if let Some(&first) = scan.positions.first() {
            if first == 0 {
                score += PREFIX_BONUS;
            }
            score -= first as f64 * LATE_START_PENALTY;
        }

        let word_starts = scan
            .positions
            .iter()
            .filter(|&&pos| pos > 0 && WORD_SEPARATORS.contains(&label_lower[pos - 1]))
            .count();
        score += word_starts as f64 * WORD_BOUNDARY_BONUS;

        let skipped: usize = scan
            .positions
            .windows(2)
            .map(|pair| pair[1] - pair[0] - 1)
            .sum();
        score -= skipped as f64 * GAP_PENALTY;

        score += SHORT_LABEL_LENGTH.saturating_sub(label_lower.len()) as f64;

        score *= self.frequency_multiplier(label);

        score.max(1.0)
    }

    /// Rank `labels` against `query`, best first, at most `limit` (default 50) results.
    ///
    /// An empty query (or an empty candidate list) switches to browse mode: every
    /// label is returned, ranked by its usage count alone. Otherwise labels that do
    /// not match are dropped. Equal scores keep their input order, and duplicate
    /// labels are scored independently.
    pub fn search<S: AsRef<str>>(
        &self,
        query: &str,
        labels: &[S],
        limit: Option<usize>,
    ) -> Vec<ScoredMatch> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT);

        let mut results: Vec<ScoredMatch> = if query.is_empty() || labels.is_empty() {
            labels
                .iter()
                .map(|label| {
                    let label = label.as_ref();
                    ScoredMatch {
                        label: label.to_string(),
                        score: self.frequency_of(label) as f64,
                    }
                })
                .collect()
        } else {
            labels
                .iter()
                .filter_map(|label| {
                    let label = label.as_ref();
                    let score = self.match_score(query, label);
                    (score > 0.0).then(|| ScoredMatch {
                        label: label.to_string(),
                        score,
                    })
                })
                .collect()
        };

        // `sort_by` is stable: ties stay in candidate order.
        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(limit);

        debug!(
            "Query {:?} ranked {} of {} labels",
            query,
            results.len(),
            labels.len()
        );

        results
    }

    /// `1 + 0.1 * frequency`, unbounded above.
    fn frequency_multiplier(&self, label: &str) -> f64 {
        1.0 + self.frequency_of(label) as f64 * FREQUENCY_STEP
    }
}

/// Walk the label once, matching query chars greedily from the left.
fn scan_subsequence(query: &[char], label: &[char]) -> Option<SubsequenceScan> {
    let mut positions = Vec::with_capacity(query.len());
    let mut trailing_run = 0;
    let mut next = 0;

    for (pos, ch) in label.iter().enumerate() {
        if next == query.len() {
            break;
        }
        if *ch == query[next] {
            positions.push(pos);
            next += 1;
            trailing_run += 1;
        } else {
            trailing_run = 0;
        }
    }

    (next == query.len()).then_some(SubsequenceScan {
        positions,
        trailing_run,
    })
}
