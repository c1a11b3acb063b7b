//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end, from listing page to CSV file.

use clickbait_scraper::config::Config;
use clickbait_scraper::crawler::{parse_seed, run_crawl};
use clickbait_scraper::output::WriteMode;
use std::path::Path;
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.crawler.base_url = base_url.to_string();
    config.crawler.delay_secs = 0.0;
    config.crawler.timeout_secs = 5.0;
    config
}

fn listing_page(paths: &[&str]) -> String {
    let links: String = paths
        .iter()
        .map(|p| format!(r#"<h2><a href="{}">Story</a></h2>"#, p))
        .collect();
    format!(
        r#"<html><head><title>News</title></head><body>
        {}
        <h2><a href="/video/index">Video</a></h2>
        <h2><a href="https://elsewhere.example.org/news/foreign.html">Foreign</a></h2>
        </body></html>"#,
        links
    )
}

fn article_page(headline: &str, body: &str) -> String {
    format!(
        r#"<html><head><title>{headline} | Site</title></head><body>
        <h2 class="linkro-darkred">{headline}</h2>
        <div id="js-article-text"><p>{body}</p><p>Second paragraph.</p></div>
        <p>Follow Daily Mail on Twitter</p>
        </body></html>"#
    )
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
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

/// Mounts a listing page at `/news/index.html` plus one article per path
async fn mount_site(server: &MockServer, articles: &[&str]) {
    mount_page(server, "/news/index.html", listing_page(articles)).await;
    for (i, route) in articles.iter().enumerate() {
        let n = i + 1;
        mount_page(
            server,
            route,
            article_page(&format!("Headline {}", n), &format!("Body {}, with a comma.", n)),
        )
        .await;
    }
}

fn seeds(base_url: &str) -> Vec<Url> {
    vec![parse_seed(&format!("{}/news/index.html", base_url)).expect("Failed to parse seed")]
}

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .expect("Failed to open CSV");
    reader
        .records()
        .map(|r| {
            r.expect("Failed to read row")
                .iter()
                .map(str::to_string)
                .collect()
        })
        .collect()
}

#[tokio::test]
async fn test_full_crawl_writes_csv() {
    // Start a mock server
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let articles = ["/news/article-1/first.html", "/news/article-2/second.html"];
    mount_site(&mock_server, &articles).await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let out = dir.path().join("data").join("raw").join("out.csv");

    let summary = run_crawl(
        create_test_config(&base_url),
        &seeds(&base_url),
        &out,
        WriteMode::Overwrite,
    )
    .await
    .expect("Crawl failed");

    assert_eq!(summary.candidates_discovered, 2);
    assert_eq!(summary.articles_saved, 2);

    let rows = read_rows(&out);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], vec!["headline", "article", "url"]);
    assert_eq!(rows[1][0], "Headline 1");
    assert_eq!(rows[1][1], "Body 1, with a comma. Second paragraph.");
    assert_eq!(rows[1][2], format!("{}/news/article-1/first.html", base_url));
    assert_eq!(rows[2][0], "Headline 2");
}

#[tokio::test]
async fn test_server_error_isolated() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let articles = [
        "/news/article-1/a.html",
        "/news/article-2/b.html",
        "/news/article-3/c.html",
        "/news/article-4/d.html",
        "/news/article-5/e.html",
    ];

    // The third article fails; mounted first so it takes precedence
    Mock::given(method("GET"))
        .and(path(articles[2]))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_site(&mock_server, &articles).await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let out = dir.path().join("out.csv");

    let summary = run_crawl(
        create_test_config(&base_url),
        &seeds(&base_url),
        &out,
        WriteMode::Overwrite,
    )
    .await
    .expect("Crawl failed");

    assert_eq!(summary.candidates_attempted, 5);
    assert_eq!(summary.articles_saved, 4);
    assert_eq!(summary.fetch_failures, 1);

    let headlines: Vec<String> = read_rows(&out)[1..].iter().map(|r| r[0].clone()).collect();
    assert_eq!(
        headlines,
        vec!["Headline 1", "Headline 2", "Headline 4", "Headline 5"]
    );
}

#[tokio::test]
async fn test_append_after_overwrite() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_site(
        &mock_server,
        &["/news/article-1/a.html", "/news/article-2/b.html"],
    )
    .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let out = dir.path().join("out.csv");

    run_crawl(
        create_test_config(&base_url),
        &seeds(&base_url),
        &out,
        WriteMode::Overwrite,
    )
    .await
    .expect("First crawl failed");

    let mut config = create_test_config(&base_url);
    config.crawler.max_articles = Some(1);
    run_crawl(config, &seeds(&base_url), &out, WriteMode::Append)
        .await
        .expect("Second crawl failed");

    let rows = read_rows(&out);
    let header_rows = rows.iter().filter(|r| r[0] == "headline").count();
    assert_eq!(header_rows, 1);
    assert_eq!(rows.len(), 1 + 2 + 1);
    assert_eq!(rows[3][0], "Headline 1");
}

#[tokio::test]
async fn test_overwrite_replaces_previous_run() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_site(&mock_server, &["/news/article-1/a.html"]).await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let out = dir.path().join("out.csv");
    std::fs::write(&out, "headline,article,url\nold,row,here\n").expect("Failed to seed file");

    run_crawl(
        create_test_config(&base_url),
        &seeds(&base_url),
        &out,
        WriteMode::Overwrite,
    )
    .await
    .expect("Crawl failed");

    let rows = read_rows(&out);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1][0], "Headline 1");
}

#[tokio::test]
async fn test_no_candidates_leaves_header_only() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_page(
        &mock_server,
        "/news/index.html",
        "<html><body><p>Nothing to see</p></body></html>".to_string(),
    )
    .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let out = dir.path().join("out.csv");

    let summary = run_crawl(
        create_test_config(&base_url),
        &seeds(&base_url),
        &out,
        WriteMode::Overwrite,
    )
    .await
    .expect("Crawl failed");

    assert!(summary.no_candidates_found());
    assert_eq!(read_rows(&out), vec![vec!["headline", "article", "url"]]);
}

#[tokio::test]
async fn test_robots_txt_respect() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Mock robots.txt that disallows one article
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /news/private"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    // Should never be called
    Mock::given(method("GET"))
        .and(path("/news/private/secret.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(article_page("Secret", "Hidden")))
        .expect(0)
        .mount(&mock_server)
        .await;

    mount_page(
        &mock_server,
        "/news/index.html",
        listing_page(&["/news/article-1/a.html", "/news/private/secret.html"]),
    )
    .await;
    mount_page(
        &mock_server,
        "/news/article-1/a.html",
        article_page("Public", "Open text"),
    )
    .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let out = dir.path().join("out.csv");

    let mut config = create_test_config(&base_url);
    config.crawler.respect_robots_txt = true;

    let summary = run_crawl(config, &seeds(&base_url), &out, WriteMode::Overwrite)
        .await
        .expect("Crawl failed");

    // Wiremock verifies expect(0) when mock_server drops
    assert_eq!(summary.robots_disallowed, 1);
    assert_eq!(summary.articles_saved, 1);
}

#[tokio::test]
async fn test_unwritable_output_is_fatal() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let dir = TempDir::new().expect("Failed to create temp dir");

    // A directory cannot be opened as the output file
    let result = run_crawl(
        create_test_config(&base_url),
        &seeds(&base_url),
        dir.path(),
        WriteMode::Overwrite,
    )
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_out_of_range_timeout_is_rejected() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let dir = TempDir::new().expect("Failed to create temp dir");
    let out = dir.path().join("out.csv");

    let mut config = create_test_config(&base_url);
    config.crawler.timeout_secs = 1e20;

    let result = run_crawl(config, &seeds(&base_url), &out, WriteMode::Overwrite).await;

    assert!(result.is_err());
    assert!(!out.exists());
}
