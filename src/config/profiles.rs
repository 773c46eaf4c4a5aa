//! Built-in extraction profiles
//!
//! Each profile captures the markup conventions of one family of sites so a
//! crawl can be configured by name instead of by listing every selector.

use crate::config::types::ExtractionConfig;
use crate::record::ContentMode;

/// Names of all built-in profiles
pub const PROFILE_NAMES: &[&str] = &["freefind", "blogger", "blogger-text", "fbref"];

/// Looks up a built-in profile by name
pub fn profile(name: &str) -> Option<ExtractionConfig> {
    match name {
        "freefind" => Some(freefind()),
        "blogger" => Some(blogger()),
        "blogger-text" => Some(blogger_text()),
        "fbref" => Some(fbref()),
        _ => None,
    }
}

/// Search-result style listing: anchors inside `<li>`, a `[Next]` link, and
/// the first two paragraphs of each item kept as HTML
pub fn freefind() -> ExtractionConfig {
    ExtractionConfig {
        item_links: "li a[href]".to_string(),
        item_link_filter: None,
        next_page: "a[href]".to_string(),
        next_page_text: Some("[Next]".to_string()),
        title: "title".to_string(),
        title_fallback: Some("No Title".to_string()),
        title_from_url: false,
        title_url_suffix: None,
        content: "p".to_string(),
        content_count: 2,
        content_mode: ContentMode::Html,
        content_fallback: None,
    }
}

/// Blogger post listing with an "Older Posts" pager, post body kept as HTML
pub fn blogger() -> ExtractionConfig {
    ExtractionConfig {
        item_links: "h3.post-title.entry-title a[href]".to_string(),
        item_link_filter: None,
        next_page: "a#Blog1_blog-pager-older-link[href]".to_string(),
        next_page_text: None,
        title: "h3.post-title.entry-title".to_string(),
        title_fallback: None,
        title_from_url: false,
        title_url_suffix: None,
        content: "div.post-body.entry-content".to_string(),
        content_count: 1,
        content_mode: ContentMode::Html,
        content_fallback: Some("<p>No content found</p>".to_string()),
    }
}

/// Same as [`blogger`] with the post body reduced to plain text
pub fn blogger_text() -> ExtractionConfig {
    ExtractionConfig {
        content_mode: ContentMode::Text,
        content_fallback: Some("No content found".to_string()),
        ..blogger()
    }
}

/// Competition page linking to one stats page per squad; the first stats
/// table of each squad page becomes one record per player, titled with the
/// squad name taken from the URL
pub fn fbref() -> ExtractionConfig {
    ExtractionConfig {
        item_links: "table.stats_table a[href]".to_string(),
        item_link_filter: Some("/squads/".to_string()),
        // Competition pages are not paginated
        next_page: "a.next[href]".to_string(),
        next_page_text: None,
        title: "h1".to_string(),
        title_fallback: None,
        title_from_url: true,
        title_url_suffix: Some("-Stats".to_string()),
        content: "table.stats_table".to_string(),
        content_count: 1,
        content_mode: ContentMode::Table,
        content_fallback: None,
    }
}
