//! Integration tests for Folio-Crawl
//!
//! These tests use wiremock to create mock HTTP servers and run complete
//! crawls end-to-end, then hand the records to the sinks.

mod crawl_tests;
mod sink_tests;
mod table_tests;

use folio_crawl::config::{Config, CrawlerConfig};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration crawling from `start_url` with the default profile
pub fn create_test_config(start_url: String, max_items: Option<usize>) -> Config {
    Config {
        crawler: CrawlerConfig {
            start_url,
            max_items,
            timeout_secs: 5,
            ..CrawlerConfig::default()
        },
        ..Config::default()
    }
}

/// A list page in the default profile's layout
pub fn list_page(items: &[&str], next: Option<&str>) -> String {
    let links: String = items
        .iter()
        .map(|item| format!("<li><a href=\"{}\">{}</a></li>", item, item))
        .collect();
    let next = next
        .map(|href| format!("<a href=\"{}\">[Next]</a>", href))
        .unwrap_or_default();
    format!(
        "<html><head><title>List</title></head><body><ul>{}</ul>{}</body></html>",
        links, next
    )
}

/// An item page in the default profile's layout
pub fn item_page(title: &str) -> String {
    format!(
        "<html><head><title>{}</title></head><body><p>{} intro</p><p>{} body</p></body></html>",
        title, title, title
    )
}

/// Mounts a GET route returning `body` as HTML
pub async fn mount_html(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}
