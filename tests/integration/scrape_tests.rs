use hashtag_lens::config::ScraperConfig;
use hashtag_lens::extractors::BucketEntry;
use hashtag_lens::{HashtagScraper, RelatedBucketSet, TagStats};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a scraper configuration pointed at the mock server
pub fn create_test_config(base_url: &str, max_retries: u32) -> ScraperConfig {
    ScraperConfig {
        base_url: base_url.to_string(),
        request_timeout: 5,
        max_retries,
        sleep_between_requests: 0.0, // No waiting in tests
        user_agent: "TestBot/1.0".to_string(),
    }
}

pub fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body.to_string())
        .insert_header("content-type", "text/html")
}

fn hashes(entries: &[BucketEntry]) -> Vec<String> {
    entries.iter().map(|e| e.hash.clone()).collect()
}

const LEGACY_PAGE: &str = r#"<html><head><title>#sunset</title></head><body>
<script type="text/javascript">window._sharedData = {"entry_data": {"TagPage": [{"graphql": {"hashtag": {
    "name": "sunset",
    "edge_hashtag_to_media": {"count": 5600000},
    "edge_hashtag_to_top_posts": {"edges": [
        {"node": {"id": "9001", "__typename": "GraphImage", "shortcode": "SUN1",
                  "edge_media_to_caption": {"edges": [{"node": {"text": "Golden hour #sunset #beach with @ana"}}]}}},
        {"node": {"id": "9002", "__typename": "GraphVideo", "shortcode": "SUN2"}}
    ]},
    "edge_hashtag_to_related_tags": {"edges": [
        {"node": {"name": "beach", "edge_hashtag_to_media": {"count": 900}}},
        {"node": {"name": "sky", "edge_hashtag_to_media": {"count": 1000}}},
        {"node": {"name": "dusk", "edge_hashtag_to_media": {"count": 400}}},
        {"node": {"name": "orange", "edge_hashtag_to_media": {"count": 50}}}
    ]}
}}}]}};</script>
</body></html>"#;

#[tokio::test]
async fn test_stats_from_json_ld_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/explore/tags/travel/"))
        .and(header("user-agent", "TestBot/1.0"))
        .respond_with(html_page(
            r#"<html><head><script type="application/ld+json">
            {"graphql": {"hashtag": {"name": "travel", "edge_hashtag_to_media": {"count": 2500}}}}
            </script></head><body></body></html>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let scraper = HashtagScraper::new(&create_test_config(&base_url, 3))
        .expect("Failed to create scraper");
    let stats = scraper.fetch_stats("#travel").await;

    assert_eq!(
        stats,
        TagStats {
            name: "travel".to_string(),
            posts_count: 2500,
            url: format!("{}/explore/tags/travel/", base_url),
            posts: "2.5 K".to_string(),
            posts_per_day: 1.37,
        }
    );
}

#[tokio::test]
async fn test_full_record_from_legacy_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/explore/tags/sunset/"))
        .respond_with(html_page(LEGACY_PAGE))
        .expect(1)
        .mount(&mock_server)
        .await;

    let scraper = HashtagScraper::new(&create_test_config(&base_url, 3))
        .expect("Failed to create scraper");
    let record = scraper.scrape("sunset").await;

    assert_eq!(record.stats.posts_count, 5_600_000);
    assert_eq!(record.stats.posts, "5.6 M");
    assert_eq!(record.stats.posts_per_day, 3068.49);

    assert_eq!(record.top_posts.len(), 2);
    assert_eq!(record.top_posts[0].kind, "GraphImage");
    assert_eq!(record.top_posts[0].hashtags, vec!["sunset", "beach"]);
    assert_eq!(record.top_posts[0].mentions, vec!["ana"]);
    assert_eq!(record.top_posts[0].url, format!("{}/p/SUN1/", base_url));
    assert_eq!(record.top_posts[1].caption, "");

    assert_eq!(
        hashes(&record.relations.related),
        vec!["#sky", "#beach", "#dusk", "#orange"]
    );
    assert_eq!(hashes(&record.relations.frequent), vec!["#sky", "#beach"]);
    assert_eq!(hashes(&record.relations.average), vec!["#dusk"]);
    assert_eq!(hashes(&record.relations.rare), vec!["#orange"]);
}

#[tokio::test]
async fn test_retries_after_server_errors() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/explore/tags/sunset/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/explore/tags/sunset/"))
        .respond_with(html_page(LEGACY_PAGE))
        .expect(1)
        .mount(&mock_server)
        .await;

    let scraper = HashtagScraper::new(&create_test_config(&base_url, 3))
        .expect("Failed to create scraper");
    let stats = scraper.fetch_stats("sunset").await;

    assert_eq!(stats.posts_count, 5_600_000);
}

#[tokio::test]
async fn test_exhausted_retries_yield_fallbacks() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(2)
        .mount(&mock_server)
        .await;

    let scraper = HashtagScraper::new(&create_test_config(&base_url, 2))
        .expect("Failed to create scraper");
    let record = scraper.scrape("#missing").await;

    assert_eq!(
        record.stats,
        TagStats::minimal("missing", &format!("{}/explore/tags/missing/", base_url))
    );
    assert!(record.top_posts.is_empty());
    assert_eq!(record.relations, RelatedBucketSet::empty());
}

#[tokio::test]
async fn test_anchor_fallback_without_payload() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let anchors: String = (0..15)
        .map(|i| format!(r##"<a href="/p/code{i}/" aria-label="Shot {i} #film">post</a>"##))
        .collect();
    let page = format!(
        r#"<html><body><a href="/explore/tags/film/">tag</a>{}</body></html>"#,
        anchors
    );

    Mock::given(method("GET"))
        .and(path("/explore/tags/film/"))
        .respond_with(html_page(&page))
        .mount(&mock_server)
        .await;

    let scraper = HashtagScraper::new(&create_test_config(&base_url, 1))
        .expect("Failed to create scraper");

    let posts = scraper.collect_top_posts("film").await;
    assert_eq!(posts.len(), 12);
    assert_eq!(posts[0].id, "code0");
    assert_eq!(posts[0].url, format!("{}/p/code0/", base_url));
    assert_eq!(posts[0].hashtags, vec!["film"]);

    let stats = scraper.fetch_stats("film").await;
    assert!(stats.is_minimal());

    let relations = scraper.map_relations("film").await;
    assert_eq!(relations, RelatedBucketSet::empty());
}
