//! End-to-end traversal tests against a mock site

use crate::{create_test_config, item_page, list_page, mount_html};
use folio_crawl::config::profiles;
use folio_crawl::crawler::{crawl, CrawlError};
use folio_crawl::{FetchError, StopReason};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn titles(outcome: &folio_crawl::CrawlOutcome) -> Vec<&str> {
    outcome.records.iter().map(|r| r.title.as_str()).collect()
}

#[tokio::test]
async fn test_failed_item_is_skipped() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/list",
        list_page(&["/item/1", "/item/2", "/item/3"], None),
    )
    .await;
    mount_html(&mock_server, "/item/1", item_page("Item 1")).await;
    mount_html(&mock_server, "/item/3", item_page("Item 3")).await;

    Mock::given(method("GET"))
        .and(path("/item/2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(format!("{}/list", base_url), None);
    let outcome = crawl(&config).await.expect("crawl should start");

    assert_eq!(titles(&outcome), vec!["Item 1", "Item 3"]);
    assert!(matches!(outcome.stop_reason, StopReason::CursorExhausted));
    assert_eq!(outcome.pages_visited, 1);
    assert_eq!(outcome.skipped.len(), 1);
    assert!(matches!(
        &outcome.skipped[0],
        CrawlError::ItemFetch {
            source: FetchError::Status { status: 500, .. },
            ..
        }
    ));

    // Records keep the item URL and both paragraphs
    assert_eq!(outcome.records[1].url, format!("{}/item/3", base_url));
    assert_eq!(outcome.records[1].fragments.len(), 2);
}

#[tokio::test]
async fn test_cap_stops_mid_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/list",
        list_page(&["/item/1", "/item/2", "/item/3"], Some("/list/2")),
    )
    .await;
    mount_html(
        &mock_server,
        "/list/2",
        list_page(&["/item/4", "/item/5", "/item/6"], Some("/list/3")),
    )
    .await;
    for i in 1..=5 {
        mount_html(
            &mock_server,
            &format!("/item/{}", i),
            item_page(&format!("Item {}", i)),
        )
        .await;
    }

    // Neither the sixth item nor a third list page may be requested
    Mock::given(method("GET"))
        .and(path("/item/6"))
        .respond_with(ResponseTemplate::new(200).set_body_string(item_page("Item 6")))
        .expect(0)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/list/3"))
        .respond_with(ResponseTemplate::new(200).set_body_string(list_page(&[], None)))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(format!("{}/list", base_url), Some(5));
    let outcome = crawl(&config).await.expect("crawl should start");

    assert_eq!(
        titles(&outcome),
        vec!["Item 1", "Item 2", "Item 3", "Item 4", "Item 5"]
    );
    assert!(matches!(outcome.stop_reason, StopReason::CapReached { cap: 5 }));
    assert_eq!(outcome.pages_visited, 2);
}

#[tokio::test]
async fn test_list_page_failure_keeps_earlier_records() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/list",
        list_page(&["/item/1", "/item/2"], Some("/list/2")),
    )
    .await;
    mount_html(&mock_server, "/item/1", item_page("Item 1")).await;
    mount_html(&mock_server, "/item/2", item_page("Item 2")).await;

    Mock::given(method("GET"))
        .and(path("/list/2"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(format!("{}/list", base_url), None);
    let outcome = crawl(&config).await.expect("crawl should start");

    assert_eq!(titles(&outcome), vec!["Item 1", "Item 2"]);
    match &outcome.stop_reason {
        StopReason::Aborted(CrawlError::ListPageFetch { url, source }) => {
            assert_eq!(url, &format!("{}/list/2", base_url));
            assert!(matches!(source, FetchError::Status { status: 503, .. }));
        }
        other => panic!("unexpected stop reason: {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_page_ends_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/list",
        list_page(&["/item/1"], Some("/list/2")),
    )
    .await;
    mount_html(&mock_server, "/item/1", item_page("Item 1")).await;
    mount_html(&mock_server, "/list/2", list_page(&[], Some("/list/3"))).await;

    Mock::given(method("GET"))
        .and(path("/list/3"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(format!("{}/list", base_url), None);
    let outcome = crawl(&config).await.expect("crawl should start");

    assert_eq!(titles(&outcome), vec!["Item 1"]);
    assert!(matches!(outcome.stop_reason, StopReason::NoLinks { .. }));
    assert!(outcome.skipped.is_empty());
    assert_eq!(outcome.pages_visited, 2);
}

#[tokio::test]
async fn test_cursor_back_to_visited_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/list",
        list_page(&["/item/1"], Some("/list/2")),
    )
    .await;
    mount_html(&mock_server, "/list/2", list_page(&["/item/2"], Some("/list"))).await;
    mount_html(&mock_server, "/item/1", item_page("Item 1")).await;
    mount_html(&mock_server, "/item/2", item_page("Item 2")).await;

    let config = create_test_config(format!("{}/list", base_url), None);
    let outcome = crawl(&config).await.expect("crawl should start");

    assert_eq!(titles(&outcome), vec!["Item 1", "Item 2"]);
    assert!(matches!(outcome.stop_reason, StopReason::CursorExhausted));
    assert_eq!(outcome.pages_visited, 2);
}

#[tokio::test]
async fn test_blogger_profile_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let first = format!(
        r#"<html><body>
            <h3 class="post-title entry-title"><a href="{0}/2024/01/one.html">One</a></h3>
            <h3 class="post-title entry-title"><a href="{0}/2024/01/two.html">Two</a></h3>
            <a class="blog-pager-older-link" id="Blog1_blog-pager-older-link" href="/search?page=2">Older Posts</a>
        </body></html>"#,
        base_url
    );
    mount_html(&mock_server, "/", first).await;
    mount_html(
        &mock_server,
        "/search",
        format!(
            r#"<html><body>
                <h3 class="post-title entry-title"><a href="{0}/2023/12/three.html">Three</a></h3>
            </body></html>"#,
            base_url
        ),
    )
    .await;

    for (route, title, body) in [
        ("/2024/01/one.html", "One", "<div class=\"post-body entry-content\"><p>First</p></div>"),
        ("/2024/01/two.html", "Two", ""),
        ("/2023/12/three.html", "Three", "<div class=\"post-body entry-content\">Third</div>"),
    ] {
        mount_html(
            &mock_server,
            route,
            format!(
                r#"<html><body><h3 class="post-title entry-title">{}</h3>{}</body></html>"#,
                title, body
            ),
        )
        .await;
    }

    let mut config = create_test_config(format!("{}/", base_url), None);
    config.extraction = profiles::blogger();
    let outcome = crawl(&config).await.expect("crawl should start");

    assert_eq!(titles(&outcome), vec!["One", "Two", "Three"]);
    assert!(outcome.records[0].fragments[0].contains("<p>First</p>"));
    assert_eq!(outcome.records[1].fragments, vec!["<p>No content found</p>"]);
    assert!(matches!(outcome.stop_reason, StopReason::CursorExhausted));
    assert_eq!(outcome.pages_visited, 2);
}

#[tokio::test]
async fn test_concurrent_items_keep_order() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/list",
        list_page(&["/item/1", "/item/2", "/item/3", "/item/4"], None),
    )
    .await;

    // Earlier items answer more slowly than later ones
    for i in 1..=4u64 {
        Mock::given(method("GET"))
            .and(path(format!("/item/{}", i)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(item_page(&format!("Item {}", i)))
                    .set_delay(std::time::Duration::from_millis(200 - i * 40)),
            )
            .mount(&mock_server)
            .await;
    }

    let mut config = create_test_config(format!("{}/list", base_url), None);
    config.crawler.max_concurrent_items = 4;
    let outcome = crawl(&config).await.expect("crawl should start");

    assert_eq!(titles(&outcome), vec!["Item 1", "Item 2", "Item 3", "Item 4"]);
}

#[tokio::test]
async fn test_unreachable_start_page() {
    // Nothing listens on the discard port
    let config = create_test_config("http://127.0.0.1:9/list".to_string(), None);
    let outcome = crawl(&config).await.expect("crawl should start");

    assert!(outcome.records.is_empty());
    assert_eq!(outcome.pages_visited, 0);
    assert!(outcome.stop_reason.is_abort());
}
