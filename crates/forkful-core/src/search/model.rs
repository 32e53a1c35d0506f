//! Search domain models.

use serde::{Deserialize, Serialize};

use crate::error::ForkfulError;

/// A fully-formed search, snapshotted when the debounce timer fires.
///
/// `request_id` is a monotonically increasing sequence number used only to
/// recognize and discard responses that arrive after a newer request has
/// been issued (last request wins, not last response).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// The text as typed, kept for display.
    pub raw_text: String,
    /// Ingredient tokens extracted from `raw_text`.
    pub tokens: Vec<String>,
    pub request_id: u64,
}

/// Splits a comma-separated ingredient list into tokens.
///
/// Whitespace around each token is trimmed and empty tokens are dropped,
/// so `"chicken, , rice ,"` yields `["chicken", "rice"]`.
pub fn tokenize(raw_text: &str) -> Vec<String> {
    raw_text
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Observable state of the search pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SearchStatus {
    /// No query, or the query was cleared.
    Idle,
    /// A request is in flight and not yet superseded.
    Searching { request_id: u64 },
    /// The newest request completed and its results are in the cache.
    Loaded { request_id: u64 },
    /// The newest request failed; previous results are untouched. The
    /// error keeps its taxonomy so observers can tell a retryable
    /// `Transient` failure from an `Unauthenticated` rejection.
    Failed { error: ForkfulError },
}

impl Default for SearchStatus {
    fn default() -> Self {
        Self::Idle
    }
}
