mod common;

use axum::{
    Router,
    routing::{get, put},
};
use axum_test::TestServer;
use instrumented_cache::api::handlers::{history_handler, store_object_handler};
use serde_json::json;

#[tokio::test]
async fn test_history_lists_store_calls_in_order() {
    let (state, _fetcher) = common::create_test_state();
    let app = Router::new()
        .route("/objects", put(store_object_handler))
        .route("/history/{operation}", get(history_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let first = server.put("/objects").json(&json!({ "data": "first" })).await;
    let second = server.put("/objects").json(&json!({ "data": 42 })).await;

    let first_key = first.json::<serde_json::Value>()["key"].clone();
    let second_key = second.json::<serde_json::Value>()["key"].clone();

    let response = server.get("/history/Cache.store").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["operation"], "Cache.store");
    assert_eq!(json["count"], 2);

    let calls = json["calls"].as_array().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0]["input"], "(\"first\",)");
    assert_eq!(calls[0]["output"], first_key);
    assert_eq!(calls[1]["input"], "(42,)");
    assert_eq!(calls[1]["output"], second_key);
}

#[tokio::test]
async fn test_history_of_unknown_operation_is_empty() {
    let (state, _fetcher) = common::create_test_state();
    let app = Router::new()
        .route("/history/{operation}", get(history_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/history/Cache.nothing").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["count"], 0);
    assert!(json["calls"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_store_is_not_recorded() {
    let (state, _fetcher) = common::create_test_state();
    let app = Router::new()
        .route("/objects", put(store_object_handler))
        .route("/history/{operation}", get(history_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    server
        .put("/objects")
        .json(&json!({ "data": { "bytes": "%%%" } }))
        .await
        .assert_status_bad_request();

    let json = server
        .get("/history/Cache.store")
        .await
        .json::<serde_json::Value>();

    assert_eq!(json["count"], 0);
}
