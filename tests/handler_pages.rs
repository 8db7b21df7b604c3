mod common;

use axum::{Router, http::StatusCode, routing::get};
use axum_test::TestServer;
use instrumented_cache::api::handlers::{page_count_handler, page_handler};
use instrumented_cache::state::AppState;

fn server_for(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/pages", get(page_handler))
        .route("/pages/count", get(page_count_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_page_is_fetched_once_within_ttl() {
    let (state, fetcher) = common::create_test_state();
    let server = server_for(state);

    for _ in 0..3 {
        let response = server
            .get("/pages")
            .add_query_param("url", "http://example.com")
            .await;

        response.assert_status_ok();
        response.assert_text("<html>http://example.com</html>");
    }

    assert_eq!(fetcher.calls(), 1);

    let response = server
        .get("/pages/count")
        .add_query_param("url", "http://example.com")
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["url"], "http://example.com");
    assert_eq!(json["count"], 3);
}

#[tokio::test]
async fn test_count_of_unrequested_url_is_zero() {
    let (state, _fetcher) = common::create_test_state();
    let server = server_for(state);

    let response = server
        .get("/pages/count")
        .add_query_param("url", "http://never.example")
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["count"], 0);
}

#[tokio::test]
async fn test_invalid_url_is_rejected_without_counting() {
    let (state, fetcher) = common::create_test_state();
    let server = server_for(state);

    let response = server
        .get("/pages")
        .add_query_param("url", "ftp://example.com")
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "validation_error"
    );
    assert_eq!(fetcher.calls(), 0);

    let count = server
        .get("/pages/count")
        .add_query_param("url", "ftp://example.com")
        .await
        .json::<serde_json::Value>();
    assert_eq!(count["count"], 0);
}

#[tokio::test]
async fn test_fetch_failure_is_bad_gateway_and_not_cached() {
    let (state, fetcher) = common::create_test_state();
    let server = server_for(state);

    for _ in 0..2 {
        let response = server
            .get("/pages")
            .add_query_param("url", "http://down.example")
            .await;

        response.assert_status(StatusCode::BAD_GATEWAY);

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["error"]["code"], "fetch_error");
        assert_eq!(json["error"]["details"]["upstream_status"], 503);
    }

    assert_eq!(fetcher.calls(), 2);

    let count = server
        .get("/pages/count")
        .add_query_param("url", "http://down.example")
        .await
        .json::<serde_json::Value>();
    assert_eq!(count["count"], 2);
}

#[tokio::test]
async fn test_missing_url_parameter_is_rejected() {
    let (state, _fetcher) = common::create_test_state();
    let server = server_for(state);

    let response = server.get("/pages").await;

    response.assert_status_bad_request();
}
