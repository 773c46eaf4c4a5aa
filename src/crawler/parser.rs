//! HTML extraction for list and item pages
//!
//! This module turns fetched markup into crawl inputs:
//! - Item links and the next-page cursor from a list page
//! - Title and content fragments from an item page
//! - One record per data row of a stats table in table mode
//!
//! All selectors come from an [`ExtractionConfig`] and are compiled once.

use crate::config::{ContentMode, ExtractionConfig};
use crate::record::Record;
use crate::ConfigError;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Links extracted from a list page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPage {
    /// Item page URLs in document order (not deduplicated)
    pub item_links: Vec<Url>,

    /// URL of the next list page, if the page has one
    pub next_page: Option<Url>,
}

/// Compiled extraction strategy for one site
#[derive(Debug, Clone)]
pub struct Extractor {
    item_links: Selector,
    item_link_filter: Option<String>,
    next_page: Selector,
    next_page_text: Option<String>,
    title: Selector,
    title_fallback: Option<String>,
    title_from_url: bool,
    title_url_suffix: Option<String>,
    content: Selector,
    content_count: usize,
    content_mode: ContentMode,
    content_fallback: Option<String>,
    anchor: Selector,
    header_row: Selector,
    row: Selector,
    cell: Selector,
    data_cell: Selector,
}

/// Compiles a CSS selector, mapping failures to a configuration error
pub fn compile_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

impl Extractor {
    /// Compiles every selector of `config`
    pub fn new(config: &ExtractionConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            item_links: compile_selector(&config.item_links)?,
            item_link_filter: config.item_link_filter.clone(),
            next_page: compile_selector(&config.next_page)?,
            next_page_text: config.next_page_text.clone(),
            title: compile_selector(&config.title)?,
            title_fallback: config.title_fallback.clone(),
            title_from_url: config.title_from_url,
            title_url_suffix: config.title_url_suffix.clone(),
            content: compile_selector(&config.content)?,
            content_count: config.content_count,
            content_mode: config.content_mode,
            content_fallback: config.content_fallback.clone(),
            anchor: compile_selector("a[href]")?,
            header_row: compile_selector("thead tr")?,
            row: compile_selector("tr")?,
            cell: compile_selector("th, td")?,
            data_cell: compile_selector("td")?,
        })
    }

    /// Extracts item links and the next-page cursor from a list page
    ///
    /// An element matched by the item-link selector contributes its own
    /// `href`, or the `href` of the first anchor nested inside it when it is
    /// not an anchor itself (e.g. a post heading wrapping its link).
    ///
    /// # Example
    ///
    /// ```
    /// use folio_crawl::config::ExtractionConfig;
    /// use folio_crawl::crawler::Extractor;
    /// use url::Url;
    ///
    /// let extractor = Extractor::new(&ExtractionConfig::default()).unwrap();
    /// let html = r#"<ul><li><a href="/post/1">One</a></li></ul><a href="/list?page=2">[Next]</a>"#;
    /// let base = Url::parse("https://example.com/list").unwrap();
    /// let page = extractor.parse_list_page(html, &base);
    /// assert_eq!(page.item_links[0].as_str(), "https://example.com/post/1");
    /// assert_eq!(page.next_page.unwrap().as_str(), "https://example.com/list?page=2");
    /// ```
    pub fn parse_list_page(&self, html: &str, base_url: &Url) -> ListPage {
        let document = Html::parse_document(html);

        let item_links = document
            .select(&self.item_links)
            .filter_map(|element| self.element_href(element))
            .filter_map(|href| resolve_link(href, base_url))
            .filter(|url| match &self.item_link_filter {
                Some(needle) => url.as_str().contains(needle.as_str()),
                None => true,
            })
            .collect();

        let next_page = document
            .select(&self.next_page)
            .filter(|element| match &self.next_page_text {
                Some(text) => element_text(element) == *text,
                None => true,
            })
            .filter_map(|element| element.value().attr("href"))
            .find_map(|href| resolve_link(href, base_url));

        ListPage {
            item_links,
            next_page,
        }
    }

    /// Extracts a record from an item page
    ///
    /// # Returns
    ///
    /// * `Ok(Record)` - All required fields were found (or had fallbacks)
    /// * `Err(String)` - Reason the item is structurally malformed
    pub fn extract_record(&self, html: &str, url: &str) -> Result<Record, String> {
        let document = Html::parse_document(html);
        let title = self.title(&document, url)?;

        let matches: Vec<ElementRef> = document.select(&self.content).collect();
        let fragments = if matches.len() >= self.content_count {
            matches
                .iter()
                .take(self.content_count)
                .map(|element| self.fragment(element))
                .collect()
        } else if let Some(fallback) = &self.content_fallback {
            vec![fallback.clone()]
        } else {
            return Err(format!(
                "expected {} content elements, found {}",
                self.content_count,
                matches.len()
            ));
        };

        Ok(Record::new(title, fragments, url, self.content_mode))
    }

    /// Extracts every record an item page yields
    ///
    /// Table mode yields one record per data row of the first table matched
    /// by the content selector (possibly none); the other modes yield exactly
    /// one record.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Record>)` - Records in document order
    /// * `Err(String)` - Reason the item is structurally malformed
    pub fn extract(&self, html: &str, url: &str) -> Result<Vec<Record>, String> {
        match self.content_mode {
            ContentMode::Table => self.extract_table_rows(html, url),
            ContentMode::Html | ContentMode::Text => Ok(vec![self.extract_record(html, url)?]),
        }
    }

    /// Extracts one record per data row of the first matched table
    ///
    /// Column names come from the last header row (`thead`), or from the
    /// first row made only of `th` cells when the table has no `thead`. Rows
    /// without any `td` cell (repeated header rows) are skipped.
    pub fn extract_table_rows(&self, html: &str, url: &str) -> Result<Vec<Record>, String> {
        let document = Html::parse_document(html);
        let title = self.title(&document, url)?;

        let table = document
            .select(&self.content)
            .next()
            .ok_or_else(|| "table element not found".to_string())?;

        let header_row = table.select(&self.header_row).last().or_else(|| {
            table
                .select(&self.row)
                .find(|row| row.select(&self.data_cell).next().is_none())
        });
        let headers: Vec<String> = header_row
            .map(|row| row.select(&self.cell).map(|cell| element_text(&cell)).collect())
            .unwrap_or_default();

        let records = table
            .select(&self.row)
            .filter(|row| row.select(&self.data_cell).next().is_some())
            .map(|row| {
                let cells = row.select(&self.cell).map(|cell| element_text(&cell)).collect();
                Record::table_row(title.clone(), headers.clone(), cells, url)
            })
            .collect();

        Ok(records)
    }

    /// Title of an item page, from its URL or its title element
    fn title(&self, document: &Html, url: &str) -> Result<String, String> {
        if self.title_from_url {
            return title_from_url(url, self.title_url_suffix.as_deref())
                .ok_or_else(|| format!("no path segment to take a title from in {}", url));
        }

        document
            .select(&self.title)
            .map(|element| element_text(&element))
            .find(|text| !text.is_empty())
            .or_else(|| self.title_fallback.clone())
            .ok_or_else(|| "title element not found".to_string())
    }

    /// The `href` carried by an element or by its first nested anchor
    fn element_href<'a>(&self, element: ElementRef<'a>) -> Option<&'a str> {
        element.value().attr("href").or_else(|| {
            element
                .select(&self.anchor)
                .next()
                .and_then(|anchor| anchor.value().attr("href"))
        })
    }

    fn fragment(&self, element: &ElementRef) -> String {
        match self.content_mode {
            ContentMode::Html => element.html(),
            ContentMode::Text | ContentMode::Table => element_text(element),
        }
    }
}

/// Last non-empty path segment of `url`, without `suffix`
///
/// `https://fbref.com/en/squads/18bb7c10/Arsenal-Stats` with suffix `-Stats`
/// gives `Arsenal`.
fn title_from_url(url: &str, suffix: Option<&str>) -> Option<String> {
    let segment = url
        .split(['?', '#'])
        .next()?
        .split('/')
        .filter(|segment| !segment.is_empty())
        .last()?;
    let name = match suffix {
        Some(suffix) => segment.strip_suffix(suffix).unwrap_or(segment),
        None => segment,
    };
    if name.is_empty() || name.ends_with(':') {
        return None;
    }
    Some(name.to_string())
}

/// Text content of an element with each text node trimmed
fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - fragment-only links
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    if href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url)
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
