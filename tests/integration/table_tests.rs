//! Table-mode crawls: one record per stats-table row

use crate::{create_test_config, mount_html};
use folio_crawl::config::profiles;
use folio_crawl::output::{read_csv_table, CsvSink, Sink, SqliteSink};
use folio_crawl::storage::{ColumnType, SqliteStorage, TableStore};
use folio_crawl::{CrawlOutcome, StopReason};
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COMPETITION: &str = r#"<html><body>
    <table class="stats_table" id="results_overall">
        <thead><tr><th>Rk</th><th>Squad</th><th>Top Scorer</th></tr></thead>
        <tbody>
            <tr><th>1</th><td><a href="/en/squads/18bb7c10/Arsenal-Stats">Arsenal</a></td>
                <td><a href="/en/players/bc7dc64d/Bukayo-Saka">Bukayo Saka</a></td></tr>
            <tr><th>2</th><td><a href="/en/squads/cff3d9bb/Chelsea-Stats">Chelsea</a></td>
                <td><a href="/en/players/1/Cole-Palmer">Cole Palmer</a></td></tr>
        </tbody>
    </table>
</body></html>"#;

fn squad_page(rows: &[(&str, &str, &str)]) -> String {
    let body: String = rows
        .iter()
        .map(|(player, minutes, goals)| {
            format!(
                "<tr><th><a href=\"/en/players/x\">{}</a></th><td>{}</td><td>{}</td></tr>",
                player, minutes, goals
            )
        })
        .collect();
    format!(
        r#"<html><body><h1>2023-2024 Stats</h1>
        <table class="stats_table" id="stats_standard">
            <thead>
                <tr><th></th><th colspan="2">Playing Time</th></tr>
                <tr><th>Player</th><th>Min</th><th>Gls</th></tr>
            </thead>
            <tbody>{}</tbody>
        </table>
        <table class="stats_table" id="matchlogs_for"><tbody><tr><td>skip</td></tr></tbody></table>
        </body></html>"#,
        body
    )
}

/// Crawls a competition page linking two squads
async fn crawl_competition() -> (MockServer, CrawlOutcome) {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(&mock_server, "/en/comps/9/Premier-League-Stats", COMPETITION.to_string()).await;
    mount_html(
        &mock_server,
        "/en/squads/18bb7c10/Arsenal-Stats",
        squad_page(&[("Bukayo Saka", "2,890", "16"), ("Declan Rice", "3,373", "7")]),
    )
    .await;
    mount_html(
        &mock_server,
        "/en/squads/cff3d9bb/Chelsea-Stats",
        squad_page(&[("Cole Palmer", "2,615", "22")]),
    )
    .await;

    // Player links are filtered out before any fetch
    Mock::given(method("GET"))
        .and(path("/en/players/bc7dc64d/Bukayo-Saka"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(
        format!("{}/en/comps/9/Premier-League-Stats", base_url),
        None,
    );
    config.extraction = profiles::fbref();
    let outcome = folio_crawl::crawler::crawl(&config)
        .await
        .expect("crawl should start");

    (mock_server, outcome)
}

#[tokio::test]
async fn test_fbref_profile_crawl() {
    let (server, outcome) = crawl_competition().await;

    let rows: Vec<(&str, &str)> = outcome
        .records
        .iter()
        .map(|r| (r.title.as_str(), r.fragments[0].as_str()))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("Arsenal", "Bukayo Saka"),
            ("Arsenal", "Declan Rice"),
            ("Chelsea", "Cole Palmer"),
        ]
    );
    assert_eq!(outcome.records[0].headers, vec!["Player", "Min", "Gls"]);
    assert_eq!(
        outcome.records[2].url,
        format!("{}/en/squads/cff3d9bb/Chelsea-Stats", server.uri())
    );
    assert!(matches!(outcome.stop_reason, StopReason::CursorExhausted));
    assert_eq!(outcome.pages_visited, 1);
    assert!(outcome.skipped.is_empty());
}

#[tokio::test]
async fn test_fbref_rows_to_csv_and_sqlite() {
    let (_server, outcome) = crawl_competition().await;
    let dir = tempdir().unwrap();

    let csv_path = dir.path().join("squads.csv");
    CsvSink.write(&outcome.records, &csv_path).unwrap();
    let table = read_csv_table(&csv_path).unwrap();
    assert_eq!(table.columns, vec!["title", "url", "Player", "Min", "Gls"]);
    assert_eq!(table.column("Min"), Some(vec!["2,890", "3,373", "2,615"]));

    let db_path = dir.path().join("squads.db");
    SqliteSink::new("squads").write(&outcome.records, &db_path).unwrap();
    let storage = SqliteStorage::new(&db_path).unwrap();
    let table = storage.read_table("squads").unwrap();
    assert_eq!(table.column("Gls"), Some(vec!["16", "7", "22"]));
    assert_eq!(table.column("title"), Some(vec!["Arsenal", "Arsenal", "Chelsea"]));

    let types = storage.column_types("squads").unwrap();
    assert_eq!(types[4], ("Gls".to_string(), ColumnType::Integer));
    assert_eq!(types[3].1, ColumnType::Varchar(5));
}
