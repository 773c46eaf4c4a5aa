//! Crawl results written through each sink and read back

use crate::{create_test_config, item_page, list_page, mount_html};
use folio_crawl::crawler::crawl;
use folio_crawl::output::{read_csv_table, write_records, CsvSink, Sink, SqliteSink};
use folio_crawl::storage::{ColumnType, SqliteStorage, TableStore};
use folio_crawl::{OutputFormat, Record};
use tempfile::tempdir;
use wiremock::MockServer;

/// Crawls a two-page mock site and returns its records
async fn crawl_fixture() -> (MockServer, Vec<Record>) {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/list",
        list_page(&["/item/1", "/item/2"], Some("/list/2")),
    )
    .await;
    mount_html(&mock_server, "/list/2", list_page(&["/item/3"], None)).await;
    mount_html(&mock_server, "/item/1", item_page("Alpha")).await;
    mount_html(&mock_server, "/item/2", item_page("Beta, with comma")).await;
    mount_html(&mock_server, "/item/3", item_page("Gamma")).await;

    let config = create_test_config(format!("{}/list", base_url), None);
    let outcome = crawl(&config).await.expect("crawl should start");
    assert_eq!(outcome.record_count(), 3);

    (mock_server, outcome.records)
}

fn expected_titles_and_urls(records: &[Record]) -> Vec<(String, String)> {
    records
        .iter()
        .map(|r| (r.title.clone(), r.url.clone()))
        .collect()
}

#[tokio::test]
async fn test_csv_round_trip() {
    let (_server, records) = crawl_fixture().await;
    let dir = tempdir().unwrap();
    let path = dir.path().join("posts.csv");

    CsvSink.write(&records, &path).unwrap();

    let table = read_csv_table(&path).unwrap();
    assert_eq!(table.columns, vec!["title", "url", "content_1", "content_2"]);
    assert_eq!(
        table.titles_and_urls().unwrap(),
        expected_titles_and_urls(&records)
    );
    assert_eq!(table.rows[0][2], "<p>Alpha intro</p>");
}

#[tokio::test]
async fn test_sqlite_round_trip() {
    let (_server, records) = crawl_fixture().await;
    let dir = tempdir().unwrap();
    let path = dir.path().join("posts.db");

    SqliteSink::new("posts").write(&records, &path).unwrap();

    let storage = SqliteStorage::new(&path).unwrap();
    let table = storage.read_table("posts").unwrap();
    assert_eq!(
        table.titles_and_urls().unwrap(),
        expected_titles_and_urls(&records)
    );

    let types = storage.column_types("posts").unwrap();
    assert_eq!(types[0].0, "title");
    assert_eq!(types[0].1, ColumnType::Varchar("Beta, with comma".len()));
}

#[tokio::test]
async fn test_document_sinks_by_extension() {
    let (_server, records) = crawl_fixture().await;
    let dir = tempdir().unwrap();

    let mut output = create_test_config(String::new(), None).output;

    output.path = dir.path().join("posts.html").to_string_lossy().into_owned();
    assert_eq!(write_records(&records, &output).unwrap(), OutputFormat::Html);
    let html = std::fs::read_to_string(&output.path).unwrap();
    assert_eq!(html.matches("<h1>").count(), 3);
    assert!(html.contains("<h1>Beta, with comma</h1>"));

    output.path = dir.path().join("posts.md").to_string_lossy().into_owned();
    assert_eq!(
        write_records(&records, &output).unwrap(),
        OutputFormat::Markdown
    );
    let markdown = std::fs::read_to_string(&output.path).unwrap();
    let alpha = markdown.find("# Alpha").unwrap();
    let gamma = markdown.find("# Gamma").unwrap();
    assert!(alpha < gamma);
}
