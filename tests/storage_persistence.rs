//! Storage Persistence Tests
//!
//! A `file://` store survives a close and reopen, and its writes are on
//! disk before the HTTP response is sent.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use executive_registry::http_server::{Environment, HttpServer, ServerConfig};
use executive_registry::storage::{DatabaseUri, ExecutiveStore, FindQuery, StoreError};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

#[tokio::test]
async fn test_records_survive_reopen() {
    let tmp = TempDir::new().unwrap();
    let uri: DatabaseUri = format!("file://{}", tmp.path().join("db/executives.json").display())
        .parse()
        .unwrap();

    let store = uri.open().await.unwrap();
    let config = ServerConfig {
        environment: Environment::Production,
        database_uri: uri.clone(),
        ..Default::default()
    };
    let router = HttpServer::new(config, store.clone()).router();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/executives")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({"title": "Prince", "name": "Kwame", "portfolio": "Energy"}).to_string(),
        ))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let created: Value = serde_json::from_slice(&bytes).unwrap();

    // Visible on disk before close
    let on_disk: Value =
        serde_json::from_slice(&std::fs::read(tmp.path().join("db/executives.json")).unwrap())
            .unwrap();
    assert_eq!(on_disk[0]["name"], "Kwame");

    store.close().await.unwrap();
    assert!(matches!(
        store.find(&FindQuery::all()).await,
        Err(StoreError::Closed)
    ));

    let reopened = uri.open().await.unwrap();
    let records = reopened.find(&FindQuery::all()).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(
        serde_json::to_value(&records[0]).unwrap(),
        created["data"]
    );
}

#[tokio::test]
async fn test_unsupported_uri_is_rejected() {
    assert!(matches!(
        "postgres://localhost/executives".parse::<DatabaseUri>(),
        Err(StoreError::UnsupportedUri(_))
    ));
}

#[tokio::test]
async fn test_memory_uri_starts_empty() {
    let store = DatabaseUri::Memory.open().await.unwrap();
    assert_eq!(store.backend(), "memory");
    assert!(store.find(&FindQuery::all()).await.unwrap().is_empty());
}
