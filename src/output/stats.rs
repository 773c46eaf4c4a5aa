//! Statistics generation from a crawl outcome
//!
//! This module provides functionality for summarizing and displaying what a
//! traversal produced.

use crate::crawler::CrawlOutcome;
use std::collections::BTreeMap;

/// Crawl statistics summary
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlStatistics {
    /// Number of list pages fetched
    pub pages_visited: usize,

    /// Number of records collected
    pub records_collected: usize,

    /// Skipped items by error kind
    pub skipped_by_kind: BTreeMap<&'static str, usize>,

    /// Why traversal ended
    pub stop_reason: String,

    /// Whether traversal ended on a list-page failure
    pub aborted: bool,

    /// Wall-clock duration in milliseconds
    pub duration_ms: i64,
}

impl CrawlStatistics {
    /// Builds statistics from a finished traversal
    pub fn from_outcome(outcome: &CrawlOutcome) -> Self {
        let mut skipped_by_kind = BTreeMap::new();
        for error in &outcome.skipped {
            *skipped_by_kind.entry(error.kind()).or_insert(0) += 1;
        }

        Self {
            pages_visited: outcome.pages_visited,
            records_collected: outcome.record_count(),
            skipped_by_kind,
            stop_reason: outcome.stop_reason.to_string(),
            aborted: outcome.stop_reason.is_abort(),
            duration_ms: outcome.duration().num_milliseconds(),
        }
    }

    /// Total number of skipped items
    pub fn total_skipped(&self) -> usize {
        self.skipped_by_kind.values().sum()
    }

    /// Share of attempted items that produced a record, as a percentage
    pub fn success_rate(&self) -> f64 {
        let attempted = self.records_collected + self.total_skipped();
        if attempted == 0 {
            return 0.0;
        }
        (self.records_collected as f64 / attempted as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  List pages visited: {}", stats.pages_visited);
    println!("  Records collected: {}", stats.records_collected);
    println!("  Items skipped: {}", stats.total_skipped());
    println!(
        "  Duration: {:.1}s",
        stats.duration_ms as f64 / 1000.0
    );
    println!("  Stopped: {}", stats.stop_reason);
    println!();

    if !stats.skipped_by_kind.is_empty() {
        println!("Skipped Items:");
        let mut counts: Vec<_> = stats.skipped_by_kind.iter().collect();
        counts.sort_by(|a, b| b.1.cmp(a.1));

        for (kind, count) in counts {
            println!("  {}: {}", kind, count);
        }
        println!();
    }

    println!(
        "Success Rate: {:.1}% ({} / {} items extracted)",
        stats.success_rate(),
        stats.records_collected,
        stats.records_collected + stats.total_skipped()
    );
}
