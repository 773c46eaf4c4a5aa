//! Traversal results and error taxonomy

use crate::record::Record;
use crate::FetchError;
use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

/// Errors encountered during a traversal
///
/// Only [`CrawlError::ListPageFetch`] ends a traversal; the item-level
/// variants cause a single item to be skipped.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Failed to fetch list page {url}: {source}")]
    ListPageFetch { url: String, source: FetchError },

    #[error("Failed to fetch item {url}: {source}")]
    ItemFetch { url: String, source: FetchError },

    #[error("Malformed item {url}: {reason}")]
    MalformedItem { url: String, reason: String },
}

impl CrawlError {
    /// Whether this error ends the traversal
    pub fn is_fatal(&self) -> bool {
        matches!(self, CrawlError::ListPageFetch { .. })
    }

    /// Short label used in statistics
    pub fn kind(&self) -> &'static str {
        match self {
            CrawlError::ListPageFetch { .. } => "list_page_fetch",
            CrawlError::ItemFetch { .. } => "item_fetch",
            CrawlError::MalformedItem { .. } => "malformed_item",
        }
    }
}

/// Why a traversal ended
#[derive(Debug)]
pub enum StopReason {
    /// The last list page had no next-page link (or pointed back to a visited page)
    CursorExhausted,

    /// A list page contained no item links
    NoLinks { url: String },

    /// The configured cap was reached
    CapReached { cap: usize },

    /// A list page could not be fetched
    Aborted(CrawlError),
}

impl StopReason {
    /// Whether the traversal ended because of a failure
    pub fn is_abort(&self) -> bool {
        matches!(self, StopReason::Aborted(_))
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::CursorExhausted => write!(f, "no further pages"),
            StopReason::NoLinks { url } => write!(f, "no item links on {}", url),
            StopReason::CapReached { cap } => write!(f, "reached max items limit of {}", cap),
            StopReason::Aborted(error) => write!(f, "aborted: {}", error),
        }
    }
}

/// Everything a traversal produced
#[derive(Debug)]
pub struct CrawlOutcome {
    /// Records in discovery order
    pub records: Vec<Record>,

    /// Why the traversal ended
    pub stop_reason: StopReason,

    /// Number of list pages fetched successfully
    pub pages_visited: usize,

    /// Items skipped because of item-level errors, in discovery order
    pub skipped: Vec<CrawlError>,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlOutcome {
    /// Number of records collected
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Wall-clock duration of the traversal
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}
