//! Crawler module for paginated content crawling
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with timeout and failure classification
//! - HTML extraction of item links, next-page cursors, and record fields
//! - Request pacing
//! - The traversal loop itself

mod coordinator;
mod fetcher;
mod outcome;
mod parser;
mod scheduler;

pub use coordinator::PaginatedCrawler;
pub use fetcher::{build_http_client, fetch_url, FetchedPage, Fetcher, HttpFetcher};
pub use outcome::{CrawlError, CrawlOutcome, StopReason};
pub use parser::{compile_selector, resolve_link, Extractor, ListPage};
pub use scheduler::RequestPacer;

use crate::config::Config;
use crate::FolioError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client and compile the extraction selectors
/// 2. Walk the list pages from the configured start URL
/// 3. Return the collected records and the reason traversal stopped
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - Traversal ran (possibly ending early on a fetch failure)
/// * `Err(FolioError)` - The crawler could not be set up
pub async fn crawl(config: &Config) -> Result<CrawlOutcome, FolioError> {
    let crawler = PaginatedCrawler::from_config(config)?;
    Ok(crawler.run().await)
}
