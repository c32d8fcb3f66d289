//! HTTP integration tests for the document search server.
//!
//! The server is started on an ephemeral port and driven with `reqwest`.
//! Most tests use an in-process stub search client; the end-to-end test
//! points the real Metaphor client at a `wiremock` server.

use std::collections::HashMap;
use std::sync::Arc;

use docrank::server::{EMPTY_EXTRACTION_MESSAGE, INPUT_ERROR_MESSAGE, INTERNAL_ERROR_MESSAGE};
use docrank::{AppConfig, DocumentSearchServer, ServerConfig};
use docrank_search::{
    CandidateDocument, DocumentSearch, MetaphorClient, PhraseExtractor, SearchClient,
    SearchConfig, SearchError, SearchQueryOptions, StopwordFilter,
};
use reqwest::StatusCode;
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// One phrase per comma-separated chunk.
struct CommaExtractor;

impl PhraseExtractor for CommaExtractor {
    fn extract(&self, text: &str) -> Vec<String> {
        text.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

/// Canned documents per keyword; the keyword `boom` fails.
#[derive(Default)]
struct StubClient {
    responses: HashMap<String, Vec<CandidateDocument>>,
}

impl StubClient {
    fn respond(mut self, keyword: &str, titles: &[&str]) -> Self {
        let documents = titles
            .iter()
            .enumerate()
            .map(|(i, title)| CandidateDocument {
                title: (*title).to_owned(),
                url: format!("https://docs.example/{keyword}/{i}"),
                id: format!("{keyword}-{i}"),
                author: Some("Ada Lovelace".to_owned()),
                published_date: Some("2021-03-04T05:06:07.000Z".to_owned()),
            })
            .collect();
        self.responses.insert(keyword.to_owned(), documents);
        self
    }
}

impl SearchClient for StubClient {
    async fn search(
        &self,
        keyword: &str,
        _options: &SearchQueryOptions,
    ) -> Result<Vec<CandidateDocument>, SearchError> {
        if keyword == "boom" {
            return Err(SearchError::Provider {
                status: 503,
                body: "upstream unavailable".into(),
            });
        }
        Ok(self.responses.get(keyword).cloned().unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

fn ephemeral() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".into(),
        port: 0,
    }
}

async fn start_stub_server() -> DocumentSearchServer {
    let client = StubClient::default()
        .respond(
            "machine learning",
            &["Machine learning in practice", "Cooking with kids"],
        )
        .respond(
            "artificial intelligence",
            &["Artificial intelligence primer", "Gardening basics"],
        );
    let search = DocumentSearch::new(client, CommaExtractor, &SearchConfig::default())
        .expect("valid config")
        .with_stopwords(StopwordFilter::from_words(["the", "a", "an", "and"]));
    DocumentSearchServer::start(Arc::new(search), &ephemeral())
        .await
        .expect("server should start")
}

fn url(server: &DocumentSearchServer, route: &str) -> String {
    format!("http://{}{route}", server.addr())
}

async fn post_raw(server: &DocumentSearchServer, body: &str) -> reqwest::Response {
    reqwest::Client::new()
        .post(url(server, "/document_search"))
        .header("content-type", "application/json")
        .body(body.to_owned())
        .send()
        .await
        .expect("request should reach the server")
}

async fn error_body(response: reqwest::Response) -> String {
    let body: Value = response.json().await.expect("JSON error body");
    body["error"].as_str().expect("error field").to_owned()
}

// ────────────────────────────────────────────────────────────────────────────
// Input validation
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_object_is_bad_request() {
    let server = start_stub_server().await;
    let response = post_raw(&server, "{}").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_body(response).await, INPUT_ERROR_MESSAGE);
}

#[tokio::test]
async fn malformed_bodies_are_bad_requests() {
    let server = start_stub_server().await;
    for body in ["", "not json", r#"{"text": 7}"#, r#"["text"]"#] {
        let response = post_raw(&server, body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {body:?}");
        assert_eq!(error_body(response).await, INPUT_ERROR_MESSAGE);
    }
}

#[tokio::test]
async fn non_integer_num_results_is_bad_request() {
    let server = start_stub_server().await;
    let response = post_raw(&server, r#"{"text": "machine learning", "num_results": "three"}"#).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_body(response).await, INPUT_ERROR_MESSAGE);
}

#[tokio::test]
async fn stopword_only_text_is_unprocessable() {
    let server = start_stub_server().await;
    let response = post_raw(&server, r#"{"text": "the a an"}"#).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_body(response).await, EMPTY_EXTRACTION_MESSAGE);
}

#[tokio::test]
async fn client_failure_is_internal_error() {
    let server = start_stub_server().await;
    let response = post_raw(&server, r#"{"text": "machine learning, boom"}"#).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_body(response).await, INTERNAL_ERROR_MESSAGE);
}

// ────────────────────────────────────────────────────────────────────────────
// Success paths
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn ranked_results_are_plain_text() {
    let server = start_stub_server().await;
    let response = post_raw(
        &server,
        r#"{"text": "machine learning, artificial intelligence"}"#,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    assert!(content_type.starts_with("text/plain"), "got {content_type}");

    let body = response.text().await.expect("text body");
    assert_eq!(body.matches("Title: ").count(), 4);
    assert!(body.starts_with("Title: Machine learning in practice\n"));
    assert!(body.contains("Author: Ada Lovelace\n"));
    assert!(body.contains("Published Date: 2021-03-04\n"));
    assert!(body.ends_with("\n\n"));
}

#[tokio::test]
async fn num_results_caps_the_list() {
    let server = start_stub_server().await;
    let response = post_raw(
        &server,
        r#"{"text": "machine learning, artificial intelligence", "num_results": 2}"#,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.expect("text body");
    assert_eq!(body.matches("Title: ").count(), 2);
    assert!(!body.contains("Cooking with kids"));
    assert!(!body.contains("Gardening basics"));
}

#[tokio::test]
async fn health_reports_ok() {
    let server = start_stub_server().await;
    let response = reqwest::get(url(&server, "/health"))
        .await
        .expect("request should reach the server");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("JSON body");
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn server_reports_bound_port() {
    let server = start_stub_server().await;
    assert_ne!(server.port(), 0);
    assert_eq!(server.addr().port(), server.port());
    server.shutdown();
}

// ────────────────────────────────────────────────────────────────────────────
// End to end against a mock search API
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn request_fields_reach_the_search_api() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(header("x-api-key", "e2e-key"))
        .and(body_partial_json(json!({
            "query": "quantum computing",
            "type": "keyword",
            "numResults": 1,
            "includeDomains": ["arxiv.org"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {
                    "title": "<em>Quantum</em> computing for everyone",
                    "url": "https://arxiv.org/abs/1",
                    "id": "q1",
                    "publishedDate": "2020-01-02T00:00:00.000Z"
                },
                {
                    "title": "Classical music",
                    "url": "https://example.org/music",
                    "id": "m1"
                }
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = SearchConfig {
        base_url: mock_server.uri(),
        ..Default::default()
    };
    let client = MetaphorClient::new("e2e-key", &config).expect("client should build");
    let search = DocumentSearch::new(client, CommaExtractor, &config)
        .expect("valid config")
        .with_stopwords(StopwordFilter::from_words(["the"]));
    let server = DocumentSearchServer::start(Arc::new(search), &ephemeral())
        .await
        .expect("server should start");

    let response = post_raw(
        &server,
        r#"{"text": "quantum computing", "num_results": 1, "include_domains": ["arxiv.org"]}"#,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.expect("text body");
    assert_eq!(
        body,
        "Title: Quantum computing for everyone\nURL: https://arxiv.org/abs/1\nid: q1\nPublished Date: 2020-01-02\n\n"
    );
}

#[tokio::test]
async fn search_api_rejection_is_internal_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&mock_server)
        .await;

    let config = SearchConfig {
        base_url: mock_server.uri(),
        ..Default::default()
    };
    let client = MetaphorClient::new("wrong-key", &config).expect("client should build");
    let search = DocumentSearch::new(client, CommaExtractor, &config).expect("valid config");
    let server = DocumentSearchServer::start(Arc::new(search), &ephemeral())
        .await
        .expect("server should start");

    let response = post_raw(&server, r#"{"text": "quantum computing"}"#).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.text().await.expect("body");
    assert!(!body.contains("bad key"));
}

// ────────────────────────────────────────────────────────────────────────────
// Configuration
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn config_survives_save_and_load() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("nested").join("config.toml");

    let mut config = AppConfig::default();
    config.server.port = 6060;
    config.search.search_type = "neural".into();
    config.search.max_concurrent_queries = 2;
    config.search.stopwords_path = Some(dir.path().join("stopwords.txt"));
    config.save_to_file(&path).expect("save");

    let loaded = AppConfig::from_file(&path).expect("load");
    assert_eq!(loaded, config);
}
