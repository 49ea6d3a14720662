//! Configuration and client tests.
//!
//! Tests actual behavior, not constants.

use std::time::{Duration, Instant};

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use arxiv_mistral_mcp::client::{
    ArxivClient, CompletionTarget, LanguageModel, MistralClient, PaperCatalog,
};
use arxiv_mistral_mcp::config::Config;
use arxiv_mistral_mcp::error::ClientError;
use arxiv_mistral_mcp::models::{ChatTurn, SortBy};

const DETAILED_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title type="html">ArXiv Query: id_list=1706.03762</title>
  <entry>
    <id>http://arxiv.org/abs/1706.03762v7</id>
    <updated>2023-08-02T00:41:18Z</updated>
    <published>2017-06-12T17:57:34Z</published>
    <title>Attention Is All
      You Need</title>
    <summary>  The dominant sequence transduction models are based on complex recurrent
      or convolutional neural networks.</summary>
    <author><name>Ashish Vaswani</name></author>
    <author><name>Noam Shazeer</name></author>
    <arxiv:doi xmlns:arxiv="http://arxiv.org/schemas/atom">10.48550/arXiv.1706.03762</arxiv:doi>
    <arxiv:comment xmlns:arxiv="http://arxiv.org/schemas/atom">15 pages, 5 figures</arxiv:comment>
    <arxiv:journal_ref xmlns:arxiv="http://arxiv.org/schemas/atom">NeurIPS 2017</arxiv:journal_ref>
    <link href="http://arxiv.org/abs/1706.03762v7" rel="alternate" type="text/html"/>
    <link title="pdf" href="http://arxiv.org/pdf/1706.03762v7" rel="related" type="application/pdf"/>
    <arxiv:primary_category xmlns:arxiv="http://arxiv.org/schemas/atom" term="cs.CL" scheme="http://arxiv.org/schemas/atom"/>
    <category term="cs.CL" scheme="http://arxiv.org/schemas/atom"/>
    <category term="cs.LG" scheme="http://arxiv.org/schemas/atom"/>
  </entry>
</feed>"#;

const EMPTY_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom"><title>ArXiv Query</title></feed>"#;

// =============================================================================
// Config Behavior Tests
// =============================================================================

#[test]
fn test_config_default_has_no_api_key() {
    let config = Config::default();
    assert!(!config.has_api_key());
    assert!(config.agent_id.is_none());
}

#[test]
fn test_config_for_testing_points_at_mock() {
    let config = Config::for_testing("http://127.0.0.1:1234");
    assert_eq!(config.arxiv_api_url, "http://127.0.0.1:1234/api/query");
    assert_eq!(config.mistral_api_url, "http://127.0.0.1:1234");
    assert_eq!(config.arxiv_request_spacing, Duration::ZERO);
    assert!(config.has_api_key());
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_rejects_empty_model() {
    let mut config = Config::default();
    config.model = "  ".to_string();
    assert!(config.validate().is_err());
}

// =============================================================================
// ArxivClient Behavior Tests
// =============================================================================

#[tokio::test]
async fn test_fetch_extracts_detail_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/query"))
        .and(query_param("id_list", "1706.03762"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DETAILED_FEED))
        .mount(&mock_server)
        .await;

    let client = ArxivClient::new(&Config::for_testing(&mock_server.uri())).unwrap();
    let paper = client.fetch_by_id("1706.03762").await.unwrap();

    assert_eq!(paper.arxiv_id, "1706.03762");
    assert_eq!(paper.title, "Attention Is All You Need");
    assert!(paper.r#abstract.starts_with("The dominant sequence"));
    assert_eq!(paper.authors, vec!["Ashish Vaswani", "Noam Shazeer"]);
    assert_eq!(paper.published, "2017-06-12T17:57:34+00:00");
    assert_eq!(paper.updated.as_deref(), Some("2023-08-02T00:41:18+00:00"));
    assert_eq!(paper.categories, vec!["cs.CL", "cs.LG"]);
    assert_eq!(paper.primary_category.as_deref(), Some("cs.CL"));
    assert_eq!(paper.pdf_url, "http://arxiv.org/pdf/1706.03762v7");
    assert_eq!(paper.doi.as_deref(), Some("10.48550/arXiv.1706.03762"));
    assert_eq!(paper.comment.as_deref(), Some("15 pages, 5 figures"));
    assert_eq!(paper.journal_ref.as_deref(), Some("NeurIPS 2017"));
}

#[tokio::test]
async fn test_fetch_empty_feed_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/query"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EMPTY_FEED))
        .mount(&mock_server)
        .await;

    let client = ArxivClient::new(&Config::for_testing(&mock_server.uri())).unwrap();
    let err = client.fetch_by_id("9999.99999").await.unwrap_err();

    assert!(matches!(err, ClientError::NotFound { .. }));
}

#[tokio::test]
async fn test_search_sends_sort_parameters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/query"))
        .and(query_param("search_query", "ti:attention"))
        .and(query_param("sortBy", "lastUpdatedDate"))
        .and(query_param("sortOrder", "descending"))
        .and(query_param("max_results", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DETAILED_FEED))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ArxivClient::new(&Config::for_testing(&mock_server.uri())).unwrap();
    let papers = client.search("ti:attention", 5, SortBy::LastUpdatedDate).await.unwrap();

    assert_eq!(papers.len(), 1);
    assert_eq!(papers[0].arxiv_id, "1706.03762v7");
}

#[tokio::test]
async fn test_server_error_maps_to_server_variant() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/query"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;

    let client = ArxivClient::new(&Config::for_testing(&mock_server.uri())).unwrap();
    let err = client.search("x", 10, SortBy::Relevance).await.unwrap_err();

    assert!(matches!(err, ClientError::Server { status: 502, .. }));
}

#[tokio::test]
async fn test_slow_upstream_is_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/query"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(EMPTY_FEED)
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let config = Config {
        request_timeout: Duration::from_millis(200),
        ..Config::for_testing(&mock_server.uri())
    };
    let client = ArxivClient::new(&config).unwrap();
    let err = client.search("slow", 1, SortBy::Relevance).await.unwrap_err();

    assert!(matches!(err, ClientError::Timeout(t) if t == Duration::from_millis(200)));
}

#[tokio::test]
async fn test_requests_are_spaced() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/query"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EMPTY_FEED))
        .expect(2)
        .mount(&mock_server)
        .await;

    let config = Config {
        arxiv_request_spacing: Duration::from_millis(200),
        ..Config::for_testing(&mock_server.uri())
    };
    let client = ArxivClient::new(&config).unwrap();

    let start = Instant::now();
    client.search("a", 1, SortBy::Relevance).await.unwrap();
    client.search("b", 1, SortBy::Relevance).await.unwrap();

    assert!(start.elapsed() >= Duration::from_millis(200));
}

// =============================================================================
// MistralClient Behavior Tests
// =============================================================================

#[tokio::test]
async fn test_model_completion() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({
            "model": "mistral-large-latest",
            "messages": [{"role": "user", "content": "Summarize"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "Summary."}}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = MistralClient::new(&Config::for_testing(&mock_server.uri())).unwrap();
    let target = CompletionTarget::Model { model: "mistral-large-latest".into() };
    let text = client.complete(&[ChatTurn::user("Summarize")], &target).await.unwrap();

    assert_eq!(text, "Summary.");
}

#[tokio::test]
async fn test_unauthorized_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/agents/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&mock_server)
        .await;

    let client = MistralClient::new(&Config::for_testing(&mock_server.uri())).unwrap();
    let target = CompletionTarget::Agent { agent_id: "ag:x".into() };
    let err = client.complete(&[ChatTurn::user("hi")], &target).await.unwrap_err();

    assert!(matches!(err, ClientError::Unauthorized { .. }));
}

#[tokio::test]
async fn test_rate_limit_reads_retry_after() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .mount(&mock_server)
        .await;

    let client = MistralClient::new(&Config::for_testing(&mock_server.uri())).unwrap();
    let target = CompletionTarget::Model { model: "m".into() };
    let err = client.complete(&[ChatTurn::user("hi")], &target).await.unwrap_err();

    assert!(matches!(
        err,
        ClientError::RateLimited { retry_after } if retry_after == Duration::from_secs(7)
    ));
}
