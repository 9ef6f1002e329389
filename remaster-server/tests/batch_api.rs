//! Route-level walks of the pass lifecycle against in-memory backends.

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};

use remaster_core::batch::{BatchCursor, FixedSaveDelay};
use remaster_core::links::EditLinkBuilder;
use remaster_core::selection::{IndexedItem, MemoryItemIndex};
use remaster_core::settings::MemorySettingsStore;
use remaster_model::ItemKind;
use remaster_server::{config::Config, routes::create_v1_router, state::AppState};

const BASE_URL: &str = "http://localhost:3000";

fn test_config() -> Config {
    Config {
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        database_url: None,
        redis_url: None,
        public_base_url: BASE_URL.to_string(),
        save_delay_ms: 1500,
        dev_mode: true,
    }
}

fn test_server(ids: &[u64]) -> TestServer {
    let store = Arc::new(MemorySettingsStore::new());
    let index = Arc::new(MemoryItemIndex::new(
        ids.iter()
            .map(|&id| IndexedItem::published(id, ItemKind::Movie))
            .collect(),
    ));
    let links = EditLinkBuilder::new(BASE_URL).unwrap();

    let state = AppState {
        cursor: Arc::new(BatchCursor::new(store, index, links)),
        save_delay: Arc::new(FixedSaveDelay(1500)),
        config: Arc::new(test_config()),
    };

    TestServer::new(create_v1_router(state)).unwrap()
}

#[tokio::test]
async fn test_pass_lifecycle_over_http() {
    let server = test_server(&[5, 9, 14]);

    let idle: Value = server.get("/api/v1/batch/status").await.json();
    assert_eq!(idle["running"], json!(false));
    assert_eq!(idle["total"], json!(0));
    assert_eq!(idle["progress"], json!(0));

    let started: Value = server
        .post("/api/v1/batch/start")
        .json(&json!({ "only": "5,9,14" }))
        .await
        .json();
    assert_eq!(started["started"], json!(true));
    let first = started["next"].as_str().unwrap();
    assert!(first.contains("/admin/media/5/edit"));

    let status: Value = server.get("/api/v1/batch/status").await.json();
    assert_eq!(status["running"], json!(true));
    assert_eq!(status["cursor"], json!(0));
    assert_eq!(status["total"], json!(3));
    assert_eq!(status["progress"], json!(33));
    assert_eq!(status["active"].as_str().unwrap(), first);

    let second: Value = server.post("/api/v1/batch/next").await.json();
    assert!(second["next"].as_str().unwrap().contains("/admin/media/9/edit"));

    let third: Value = server.post("/api/v1/batch/next").await.json();
    assert!(third["next"].as_str().unwrap().contains("/admin/media/14/edit"));

    let done: Value = server.post("/api/v1/batch/next").await.json();
    assert_eq!(done["next"], Value::Null);

    let finished: Value = server.get("/api/v1/batch/status").await.json();
    assert_eq!(finished["running"], json!(false));
    assert_eq!(finished["progress"], json!(100));
}

#[tokio::test]
async fn test_start_with_empty_selection_reports_not_started() {
    let server = test_server(&[1, 2]);

    let response: Value = server
        .post("/api/v1/batch/start")
        .json(&json!({ "only": "99" }))
        .await
        .json();

    assert_eq!(response["started"], json!(false));
    assert_eq!(response["next"], Value::Null);
}

#[tokio::test]
async fn test_stop_resets_pass() {
    let server = test_server(&[1, 2, 3]);

    server
        .post("/api/v1/batch/start")
        .json(&json!({}))
        .await
        .assert_status_ok();

    let stop = server.post("/api/v1/batch/stop").await;
    stop.assert_status(StatusCode::NO_CONTENT);

    let status: Value = server.get("/api/v1/batch/status").await.json();
    assert_eq!(status["running"], json!(false));
    assert_eq!(status["total"], json!(0));
    assert_eq!(status["cursor"], json!(-1));
}

#[tokio::test]
async fn test_bridge_requires_marker_and_running_pass() {
    let server = test_server(&[5, 9]);

    // No marker.
    let response = server.get("/api/v1/batch/bridge").await;
    response.assert_status(StatusCode::NO_CONTENT);

    // Zero marker is sanitized away.
    let response = server
        .get("/api/v1/batch/bridge")
        .add_query_param("remaster_item", "0")
        .await;
    response.assert_status(StatusCode::NO_CONTENT);

    // Marker present but no pass running.
    let response = server
        .get("/api/v1/batch/bridge")
        .add_query_param("remaster_item", "5")
        .await;
    response.assert_status(StatusCode::NO_CONTENT);

    server
        .post("/api/v1/batch/start")
        .json(&json!({}))
        .await
        .assert_status_ok();

    // Running pass: payload carries the next link and the save delay.
    let payload: Value = server
        .get("/api/v1/batch/bridge")
        .add_query_param("remaster_item", "5")
        .await
        .json();
    assert!(payload["next"].as_str().unwrap().contains("/admin/media/9/edit"));
    assert_eq!(payload["save_delay"], json!(1500));
}
