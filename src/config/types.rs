use crate::config::profiles::{self, profile};
use crate::output::OutputFormat;
use crate::record::ContentMode;
use crate::ConfigError;
use serde::Deserialize;

/// Main configuration structure for Folio-Crawl
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

/// Traversal behaviour configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// First list page to fetch
    #[serde(rename = "start-url", default)]
    pub start_url: String,

    /// Maximum number of records to collect (unbounded when absent)
    #[serde(rename = "max-items", default)]
    pub max_items: Option<usize>,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Minimum time between two consecutive requests (milliseconds)
    #[serde(rename = "request-delay-ms", default)]
    pub request_delay_ms: u64,

    /// Number of item pages fetched at once
    #[serde(rename = "max-concurrent-items", default = "default_concurrency")]
    pub max_concurrent_items: usize,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_concurrency() -> usize {
    1
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            start_url: String::new(),
            max_items: None,
            timeout_secs: default_timeout_secs(),
            request_delay_ms: 0,
            max_concurrent_items: default_concurrency(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url", default)]
    pub contact_url: Option<String>,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email", default)]
    pub contact_email: Option<String>,
}

fn default_crawler_name() -> String {
    "folio-crawl".to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
            contact_url: None,
            contact_email: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the user agent header value
    ///
    /// `Name/Version`, followed by `(+ContactURL; ContactEmail)` when either
    /// contact field is set.
    pub fn header_value(&self) -> String {
        let base = format!("{}/{}", self.crawler_name, self.crawler_version);
        match (&self.contact_url, &self.contact_email) {
            (Some(url), Some(email)) => format!("{} (+{}; {})", base, url, email),
            (Some(url), None) => format!("{} (+{})", base, url),
            (None, Some(email)) => format!("{} ({})", base, email),
            (None, None) => base,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the artifact to write
    #[serde(default = "default_output_path")]
    pub path: String,

    /// Output format; inferred from the path extension when absent
    #[serde(default)]
    pub format: Option<OutputFormat>,

    /// Table written by the SQLite sink
    #[serde(rename = "table-name", default = "default_table_name")]
    pub table_name: String,
}

fn default_output_path() -> String {
    "records.html".to_string()
}

fn default_table_name() -> String {
    "records".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            format: None,
            table_name: default_table_name(),
        }
    }
}

impl OutputConfig {
    /// The explicit format, or the one implied by the output path
    pub fn effective_format(&self) -> Option<OutputFormat> {
        self.format
            .or_else(|| OutputFormat::from_path(std::path::Path::new(&self.path)))
    }
}

/// Selectors and field mapping for one site
///
/// Deserialized from an `[extraction]` table. A `profile` key selects a
/// built-in base whose fields the remaining keys override.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "ExtractionTable")]
pub struct ExtractionConfig {
    /// Selects item anchors on a list page
    pub item_links: String,

    /// Substring an item link's href must contain to be followed
    pub item_link_filter: Option<String>,

    /// Selects candidate "next page" anchors on a list page
    pub next_page: String,

    /// Exact text a next-page anchor must carry, if any
    pub next_page_text: Option<String>,

    /// Selects the title element on an item page
    pub title: String,

    /// Title used when the title element is missing; the item is skipped when absent
    pub title_fallback: Option<String>,

    /// Take the title from the last path segment of the item URL instead of
    /// the title element
    pub title_from_url: bool,

    /// Suffix removed from a title taken from the URL
    pub title_url_suffix: Option<String>,

    /// Selects content elements on an item page
    pub content: String,

    /// Number of content elements each record requires
    pub content_count: usize,

    /// Capture mode for content fragments
    ///
    /// In table mode only the first content match is used and every data row
    /// of it becomes a record.
    pub content_mode: ContentMode,

    /// Fragment used when content elements are missing; the item is skipped when absent
    pub content_fallback: Option<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        profiles::freefind()
    }
}

/// Raw `[extraction]` table as written in the TOML file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ExtractionTable {
    pub profile: Option<String>,
    pub item_links: Option<String>,
    pub item_link_filter: Option<String>,
    pub next_page: Option<String>,
    pub next_page_text: Option<String>,
    pub title: Option<String>,
    pub title_fallback: Option<String>,
    pub title_from_url: Option<bool>,
    pub title_url_suffix: Option<String>,
    pub content: Option<String>,
    pub content_count: Option<usize>,
    pub content_mode: Option<ContentMode>,
    pub content_fallback: Option<String>,
}

impl TryFrom<ExtractionTable> for ExtractionConfig {
    type Error = ConfigError;

    fn try_from(table: ExtractionTable) -> Result<Self, Self::Error> {
        let base = match &table.profile {
            Some(name) => Some(
                profile(name).ok_or_else(|| ConfigError::UnknownProfile(name.clone()))?,
            ),
            None => None,
        };

        let required = |value: Option<String>, base_value: Option<&String>, key: &str| {
            value.or_else(|| base_value.cloned()).ok_or_else(|| {
                ConfigError::Validation(format!(
                    "extraction.{} is required when no profile is given",
                    key
                ))
            })
        };

        let title_from_url = table
            .title_from_url
            .or_else(|| base.as_ref().map(|b| b.title_from_url))
            .unwrap_or(false);
        // A URL-derived title needs no title element
        let title = match table.title {
            None if title_from_url && base.is_none() => "title".to_string(),
            title => required(title, base.as_ref().map(|b| &b.title), "title")?,
        };

        Ok(ExtractionConfig {
            item_links: required(
                table.item_links,
                base.as_ref().map(|b| &b.item_links),
                "item-links",
            )?,
            item_link_filter: table
                .item_link_filter
                .or_else(|| base.as_ref().and_then(|b| b.item_link_filter.clone())),
            next_page: required(
                table.next_page,
                base.as_ref().map(|b| &b.next_page),
                "next-page",
            )?,
            next_page_text: table
                .next_page_text
                .or_else(|| base.as_ref().and_then(|b| b.next_page_text.clone())),
            title,
            title_fallback: table
                .title_fallback
                .or_else(|| base.as_ref().and_then(|b| b.title_fallback.clone())),
            title_from_url,
            title_url_suffix: table
                .title_url_suffix
                .or_else(|| base.as_ref().and_then(|b| b.title_url_suffix.clone())),
            content: required(table.content, base.as_ref().map(|b| &b.content), "content")?,
            content_count: table
                .content_count
                .or_else(|| base.as_ref().map(|b| b.content_count))
                .unwrap_or(1),
            content_mode: table
                .content_mode
                .or_else(|| base.as_ref().map(|b| b.content_mode))
                .unwrap_or(ContentMode::Html),
            content_fallback: table
                .content_fallback
                .or_else(|| base.as_ref().and_then(|b| b.content_fallback.clone())),
        })
    }
}
