//! Crawler coordinator - paginated traversal logic
//!
//! This module contains the main crawl loop, which:
//! - Fetches list pages by following the next-page cursor
//! - Extracts item links and fetches each item page
//! - Accumulates records in discovery order
//! - Stops on the cap, an empty list page, a missing cursor, or a failed
//!   list-page fetch
//!
//! A failed list-page fetch ends the traversal with the records collected so
//! far. A failed or malformed item is skipped and the traversal continues.

use crate::config::{Config, CrawlerConfig};
use crate::crawler::fetcher::{Fetcher, HttpFetcher};
use crate::crawler::outcome::{CrawlError, CrawlOutcome, StopReason};
use crate::crawler::parser::Extractor;
use crate::crawler::scheduler::RequestPacer;
use crate::record::Record;
use crate::{ConfigError, FolioError};
use chrono::Utc;
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// Walks a chain of list pages and collects the records of every item page
pub struct PaginatedCrawler<F = HttpFetcher> {
    fetcher: F,
    extractor: Extractor,
    start_url: Url,
    cap: Option<usize>,
    concurrency: usize,
    pacer: RequestPacer,
}

impl PaginatedCrawler<HttpFetcher> {
    /// Creates a crawler with an HTTP fetcher built from the configuration
    ///
    /// # Example
    ///
    /// ```no_run
    /// use folio_crawl::config::load_config;
    /// use folio_crawl::crawler::PaginatedCrawler;
    /// use std::path::Path;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = load_config(Path::new("crawl.toml"))?;
    /// let crawler = PaginatedCrawler::from_config(&config)?;
    /// let outcome = crawler.run().await;
    /// println!("Collected {} records", outcome.record_count());
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_config(config: &Config) -> Result<Self, FolioError> {
        let fetcher = HttpFetcher::from_config(
            &config.user_agent,
            Duration::from_secs(config.crawler.timeout_secs),
        )?;
        let extractor = Extractor::new(&config.extraction)?;
        Self::new(fetcher, extractor, &config.crawler)
    }
}

impl<F: Fetcher> PaginatedCrawler<F> {
    /// Creates a crawler around any [`Fetcher`]
    ///
    /// # Returns
    ///
    /// * `Ok(PaginatedCrawler)` - Ready to run
    /// * `Err(FolioError)` - The start URL does not parse, or the cap is zero
    pub fn new(fetcher: F, extractor: Extractor, config: &CrawlerConfig) -> Result<Self, FolioError> {
        let start_url = Url::parse(&config.start_url)?;

        if config.max_items == Some(0) {
            return Err(ConfigError::Validation("max_items must be >= 1 when set".to_string()).into());
        }

        Ok(Self {
            fetcher,
            extractor,
            start_url,
            cap: config.max_items,
            concurrency: config.max_concurrent_items.max(1),
            pacer: RequestPacer::new(Duration::from_millis(config.request_delay_ms)),
        })
    }

    /// Runs the traversal to completion
    ///
    /// Never fails: every error is either recorded as a skipped item or ends
    /// the traversal through [`StopReason::Aborted`].
    pub async fn run(&self) -> CrawlOutcome {
        let started_at = Utc::now();
        let mut records: Vec<Record> = Vec::new();
        let mut skipped: Vec<CrawlError> = Vec::new();
        let mut visited: HashSet<Url> = HashSet::new();
        let mut pages_visited = 0;
        let mut cursor = Some(self.start_url.clone());

        tracing::info!("Starting crawl at {}", self.start_url);

        let stop_reason = loop {
            let page_url = match cursor.take() {
                Some(url) => url,
                None => break StopReason::CursorExhausted,
            };
            visited.insert(page_url.clone());

            self.pacer.wait().await;
            let page = match self.fetcher.fetch(page_url.as_str()).await {
                Ok(page) => page,
                Err(source) => {
                    let error = CrawlError::ListPageFetch {
                        url: page_url.to_string(),
                        source,
                    };
                    tracing::warn!("{}", error);
                    break StopReason::Aborted(error);
                }
            };
            pages_visited += 1;

            // Relative links resolve against the post-redirect location
            let base_url = Url::parse(&page.final_url).unwrap_or_else(|_| page_url.clone());
            let listing = self.extractor.parse_list_page(&page.body, &base_url);

            if listing.item_links.is_empty() {
                tracing::info!("No item links found on page {}. Stopping.", page_url);
                break StopReason::NoLinks {
                    url: page_url.to_string(),
                };
            }

            tracing::debug!(
                "Page {} lists {} items",
                page_url,
                listing.item_links.len()
            );

            if self
                .collect_items(&listing.item_links, &mut records, &mut skipped)
                .await
            {
                let cap = self.cap.unwrap_or(records.len());
                tracing::info!("Reached max items limit of {}. Stopping.", cap);
                break StopReason::CapReached { cap };
            }

            match listing.next_page {
                Some(next) if visited.contains(&next) => {
                    tracing::warn!("Next page {} was already visited. Stopping.", next);
                    break StopReason::CursorExhausted;
                }
                Some(next) => {
                    tracing::info!("Found next page: {}", next);
                    cursor = Some(next);
                }
                None => {
                    tracing::debug!("No next page link on {}", page_url);
                }
            }
        };

        tracing::info!(
            "Crawl complete. Total items scraped: {} ({})",
            records.len(),
            stop_reason
        );

        CrawlOutcome {
            records,
            stop_reason,
            pages_visited,
            skipped,
            started_at,
            finished_at: Utc::now(),
        }
    }

    /// Fetches and extracts the items of one list page, in order
    ///
    /// Returns `true` once the cap is reached. Item fetches run through an
    /// ordered buffer of `concurrency` slots, so results are consumed in
    /// discovery order and no fetch beyond the buffer is started after the
    /// cap is hit.
    async fn collect_items(
        &self,
        links: &[Url],
        records: &mut Vec<Record>,
        skipped: &mut Vec<CrawlError>,
    ) -> bool {
        let mut fetches = stream::iter(links.iter().cloned())
            .map(|url| async move {
                self.pacer.wait().await;
                let result = self.fetcher.fetch(url.as_str()).await;
                (url, result)
            })
            .buffered(self.concurrency);

        while let Some((url, result)) = fetches.next().await {
            let page = match result {
                Ok(page) => page,
                Err(source) => {
                    let error = CrawlError::ItemFetch {
                        url: url.to_string(),
                        source,
                    };
                    tracing::warn!("{}", error);
                    skipped.push(error);
                    continue;
                }
            };

            let extracted = match self.extractor.extract(&page.body, url.as_str()) {
                Ok(extracted) => extracted,
                Err(reason) => {
                    let error = CrawlError::MalformedItem {
                        url: url.to_string(),
                        reason,
                    };
                    tracing::warn!("{}", error);
                    skipped.push(error);
                    continue;
                }
            };

            // Table items yield one record per row, each counting toward the cap
            for record in extracted {
                tracing::info!("Scraped item {}: {}", records.len() + 1, record.title);
                records.push(record);

                if let Some(cap) = self.cap {
                    if records.len() >= cap {
                        return true;
                    }
                }
            }
        }

        false
    }
}
