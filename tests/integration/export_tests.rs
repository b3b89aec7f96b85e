use crate::scrape_tests::{create_test_config, html_page};
use hashtag_lens::config::OutputFormat;
use hashtag_lens::output::{DataExporter, RunSummary};
use hashtag_lens::HashtagScraper;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_scrape_and_export_all_formats() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/explore/tags/coffee/"))
        .respond_with(html_page(
            r#"<script>window.__additionalDataLoaded('/explore/tags/coffee/', {"graphql": {"hashtag": {
                "name": "coffee",
                "edge_hashtag_to_media": {"count": 1234},
                "edge_hashtag_to_related_tags": {"edges": [
                    {"node": {"name": "latte", "edge_hashtag_to_media": {"count": 10}}}
                ]}
            }}});</script>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/explore/tags/blocked/"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let scraper = HashtagScraper::new(&create_test_config(&base_url, 1))
        .expect("Failed to create scraper");
    let records = vec![scraper.scrape("coffee").await, scraper.scrape("blocked").await];

    let summary = RunSummary::from_records(&records);
    assert_eq!(summary.tags_with_data, 1);
    assert_eq!(summary.minimal_tags, vec!["blocked"]);

    let dir = TempDir::new().expect("Failed to create temp dir");
    let exporter = DataExporter::new(dir.path()).expect("Failed to create exporter");
    let paths = exporter
        .export(
            &records,
            &[
                OutputFormat::Json,
                OutputFormat::Csv,
                OutputFormat::Html,
                OutputFormat::Xlsx,
            ],
        )
        .expect("Export failed");
    assert_eq!(paths.len(), 4);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&paths[0]).unwrap()).unwrap();
    assert_eq!(json[0]["posts"], "1.23 K");
    assert_eq!(json[0]["frequent"][0]["hash"], "#latte");
    assert_eq!(json[1]["postsCount"], 0);
    assert_eq!(json[1]["posts"], "0");

    let mut reader = csv::Reader::from_path(&paths[1]).unwrap();
    assert_eq!(reader.records().count(), 2);

    let html = std::fs::read_to_string(&paths[2]).unwrap();
    assert!(html.contains("<td>coffee</td>"));
    assert!(html.contains("<td>blocked</td>"));

    let workbook = std::fs::read(&paths[3]).unwrap();
    assert!(paths[3].ends_with("hashtags.xlsx"));
    assert!(workbook.starts_with(b"PK"));
}
