//! Integration tests for the upload and manual-sync endpoints.
//!
//! The test engine's upstream clients are unconfigured, so imports that
//! reach the store seam fail deterministically without network I/O,
//! while parse-level outcomes are fully exercised.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json};
use serde_json::json;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upload_without_content_is_rejected() {
    let app = common::build_test_app(None);

    let response = post_json(
        app,
        "/upload/csv",
        &json!({ "fileContent": "", "fileName": "empty.csv" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Bad request");
    assert_eq!(json["message"], "File content is required");
}

// ---------------------------------------------------------------------------
// Parse failures abort before any run is started
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_xml_upload_fails_with_import_error() {
    let app = common::build_test_app(None);

    let response = post_json(
        app,
        "/upload/xml",
        &json!({ "fileContent": "<products><product>", "fileName": "truncated.xml" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Import failed");
    assert!(json["message"].as_str().unwrap().contains("XML"));
}

// ---------------------------------------------------------------------------
// Empty feeds complete successfully even with an unreachable store
// ---------------------------------------------------------------------------

#[tokio::test]
async fn header_only_csv_upload_completes_with_zero_records() {
    let app = common::build_test_app(None);
    let header = "codice;descrizione;categoria;giacenza;prezzo";

    let response = post_json(
        app,
        "/upload/csv",
        &json!({ "fileContent": header, "fileName": "empty-feed.csv" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "CSV file processed successfully");
    assert_eq!(json["result"]["processed"], 0);
    assert_eq!(json["result"]["success"], true);
}

// ---------------------------------------------------------------------------
// Store-seam failures surface as run-level errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn csv_upload_with_rows_fails_when_store_is_unconfigured() {
    let app = common::build_test_app(None);
    let content = "codice;descrizione;categoria;giacenza;prezzo\nA100;Case;Covers;15;9.99";

    let response = post_json(
        app,
        "/upload/csv",
        &json!({ "fileContent": content, "fileName": "feed.csv" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Sync failed");
    assert!(json["message"].as_str().unwrap().contains("A100"));
}

#[tokio::test]
async fn manual_sync_fails_when_denea_is_unconfigured() {
    let app = common::build_test_app(None);

    let response = post_json(app, "/sync/manual", &json!({})).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Sync failed");
    assert!(json["message"]
        .as_str()
        .unwrap()
        .contains("credentials are not configured"));
}
