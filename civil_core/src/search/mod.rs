//! # Quick Search
//!
//! Approximate matching of a free-text query against a small static catalog
//! of tools, used to jump to a converter or calculator by typing a loose
//! query.
//!
//! ## Similarity
//!
//! [`similarity`] lower-cases both strings, returns `1.0` when either one
//! contains the other, and otherwise scores the overlap of their character
//! bigram sets as `2·|A∩B| / |A∪B|`, capped at `1.0`.
//!
//! ## Ranking
//!
//! Each entry scores the better of its name and description. An empty query
//! returns the whole catalog in order. Otherwise entries must score strictly
//! above the threshold and are sorted by score, descending, with ties kept
//! in catalog order.
//!
//! ## Example
//!
//! ```rust
//! use civil_core::search::{catalog, search};
//!
//! let matches = search("brik", catalog());
//! assert_eq!(matches[0].entry.name, "Brick Calculator");
//! ```

mod catalog;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

pub use catalog::{catalog, CATALOG};

/// Default strict lower bound for a match score.
pub const DEFAULT_THRESHOLD: f64 = 0.2;

/// A searchable destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEntry {
    pub name: String,
    pub path: String,
    pub description: String,
}

impl SearchEntry {
    pub fn new(name: impl Into<String>, path: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            description: description.into(),
        }
    }
}

/// A catalog entry that passed the filter, with its score in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedMatch<'a> {
    pub entry: &'a SearchEntry,
    pub score: f64,
}

/// Ranking options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Scores must be strictly greater than this to be kept
    pub threshold: f64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Similarity of two strings in `[0, 1]`. Symmetric.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();

    if a.contains(b.as_str()) || b.contains(a.as_str()) {
        return 1.0;
    }

    let left = bigrams(&a);
    let right = bigrams(&b);
    let intersection = left.intersection(&right).count();
    let union = left.len() + right.len() - intersection;
    if union == 0 {
        return 0.0;
    }

    (2.0 * intersection as f64 / union as f64).min(1.0)
}

/// Set of contiguous character pairs. Strings shorter than two characters
/// have none.
fn bigrams(s: &str) -> HashSet<(char, char)> {
    let chars: Vec<char> = s.chars().collect();
    chars.windows(2).map(|pair| (pair[0], pair[1])).collect()
}

/// Best of name and description similarity.
pub fn score_entry(entry: &SearchEntry, query: &str) -> f64 {
    similarity(&entry.name, query).max(similarity(&entry.description, query))
}

/// Strict threshold test. A score equal to the threshold is rejected.
pub fn passes_threshold(score: f64, threshold: f64) -> bool {
    score > threshold
}

/// Rank `catalog` against `query` with the default threshold.
pub fn search<'a>(query: &str, catalog: &'a [SearchEntry]) -> Vec<RankedMatch<'a>> {
    search_with(query, catalog, SearchOptions::default())
}

/// Rank `catalog` against `query`.
pub fn search_with<'a>(query: &str, catalog: &'a [SearchEntry], options: SearchOptions) -> Vec<RankedMatch<'a>> {
    if query.is_empty() {
        return catalog
            .iter()
            .map(|entry| RankedMatch { entry, score: 1.0 })
            .collect();
    }

    let mut matches: Vec<RankedMatch<'a>> = catalog
        .iter()
        .map(|entry| RankedMatch {
            entry,
            score: score_entry(entry, query),
        })
        .filter(|m| passes_threshold(m.score, options.threshold))
        .collect();

    // sort_by is stable, ties keep catalog order
    matches.sort_by(|a, b| b.score.total_cmp(&a.score));

    tracing::debug!(query, kept = matches.len(), total = catalog.len(), "ranked search");
    matches
}
