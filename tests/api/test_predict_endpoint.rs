// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Predict endpoint tests for POST /predict
//!
//! These tests verify that the predict route:
//! - Short-circuits with the stored load error when the model never loaded
//! - Rejects malformed uploads before preprocessing
//! - Leaves no upload file on disk after a request completes
//!
//! Tests that need real model weights are #[ignore]d and expect the weights
//! at the default search path.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use lungscan_node::api::{build_router, AppState};
use lungscan_node::classifier::{load_classifier, ClassifierHandle};
use lungscan_node::uploads::UploadStore;
use std::sync::Arc;
use tower::ServiceExt;

// 1x1 red PNG - minimal valid image
const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0xDA, 0x63, 0xFC,
    0xCF, 0xC0, 0xF0, 0x1F, 0x00, 0x05, 0x05, 0x02, 0x00, 0x5F, 0xC8, 0xF1, 0xD2, 0x00, 0x00,
    0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

const BOUNDARY: &str = "lungscan-test-boundary";

/// Helper: Build a multipart POST /predict request with a single `file` field
fn predict_request(filename: &str, content_type: &str, bytes: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
             filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/predict")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Helper: AppState with no model and a fresh temp upload dir
fn setup_degraded_state(upload_dir: &std::path::Path) -> AppState {
    let uploads = UploadStore::new(upload_dir).expect("Failed to create upload dir");
    AppState::new(
        Arc::new(ClassifierHandle::failed(
            "Weights file not found. Checked paths: [\"models/lung_classifier.onnx\"]",
        )),
        Arc::new(uploads),
    )
}

async fn body_json(body: Body) -> serde_json::Value {
    let bytes = to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_predict_without_model_returns_load_failure() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_router(setup_degraded_state(dir.path()));

    let response = app
        .oneshot(predict_request("scan.png", "image/png", TINY_PNG))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response.into_body()).await;
    let error = json["error"].as_str().unwrap();
    assert!(
        error.starts_with("Model load failed:"),
        "unexpected error: {error}"
    );
}

#[tokio::test]
async fn test_predict_without_model_short_circuits_validation() {
    // Even a disallowed extension yields the load-failure error: nothing
    // downstream of the model check runs
    let dir = tempfile::tempdir().unwrap();
    let app = build_router(setup_degraded_state(dir.path()));

    let response = app
        .oneshot(predict_request("notes.txt", "text/plain", b"not an image"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response.into_body()).await;
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("Model load failed:"));
}

#[tokio::test]
async fn test_predict_without_model_writes_no_files() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_router(setup_degraded_state(dir.path()));

    let _ = app
        .oneshot(predict_request("scan.png", "image/png", TINY_PNG))
        .await
        .unwrap();

    let leftover: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert!(leftover.is_empty(), "upload dir not empty: {leftover:?}");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_router(setup_degraded_state(dir.path()));

    let request = Request::builder()
        .uri("/nope")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Tests below require real model weights at the default search path
// =============================================================================

/// Helper: AppState with the real model loaded
fn setup_loaded_state(upload_dir: &std::path::Path) -> AppState {
    let handle = load_classifier(None);
    assert!(handle.is_loaded(), "model weights not available");
    let uploads = UploadStore::new(upload_dir).expect("Failed to create upload dir");
    AppState::new(Arc::new(handle), Arc::new(uploads))
}

#[tokio::test]
#[ignore] // Only run if model weights are downloaded
async fn test_predict_success_response_shape() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_router(setup_loaded_state(dir.path()));

    let response = app
        .oneshot(predict_request("scan.png", "image/png", TINY_PNG))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response.into_body()).await;
    assert_eq!(json["success"], true);
    assert!(json["prediction"].is_string());

    let confidence = json["confidence"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&confidence));

    let all = json["all_predictions"].as_object().unwrap();
    assert_eq!(all.len(), 4);
    for (_, value) in all {
        let v = value.as_f64().unwrap();
        assert!((0.0..=100.0).contains(&v));
    }
}

#[tokio::test]
#[ignore] // Only run if model weights are downloaded
async fn test_predict_removes_upload_after_success() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_router(setup_loaded_state(dir.path()));

    let response = app
        .oneshot(predict_request("scan.png", "image/png", TINY_PNG))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let leftover: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert!(leftover.is_empty(), "upload dir not empty: {leftover:?}");
}

#[tokio::test]
#[ignore] // Only run if model weights are downloaded
async fn test_predict_rejects_disallowed_extension() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_router(setup_loaded_state(dir.path()));

    let response = app
        .oneshot(predict_request("notes.txt", "text/plain", b"not an image"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("not allowed"));

    // Rejected before anything touched disk
    let leftover: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert!(leftover.is_empty());
}

#[tokio::test]
#[ignore] // Only run if model weights are downloaded
async fn test_predict_removes_upload_after_decode_failure() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_router(setup_loaded_state(dir.path()));

    // Allowed extension but garbage bytes: fails during preprocessing
    let response = app
        .oneshot(predict_request("scan.png", "image/png", b"garbage bytes"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response.into_body()).await;
    assert_eq!(json["error"], "Error processing image");

    let leftover: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert!(leftover.is_empty(), "upload dir not empty: {leftover:?}");
}

#[tokio::test]
async fn test_predict_missing_file_field() {
    // The model check runs first, so without weights even an empty body
    // yields the load failure; the 400 branch is covered below with weights
    let dir = tempfile::tempdir().unwrap();
    let app = build_router(setup_degraded_state(dir.path()));

    let request = Request::builder()
        .method("POST")
        .uri("/predict")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(format!("--{BOUNDARY}--\r\n")))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
#[ignore] // Only run if model weights are downloaded
async fn test_predict_missing_file_field_with_model() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_router(setup_loaded_state(dir.path()));

    let request = Request::builder()
        .method("POST")
        .uri("/predict")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(format!("--{BOUNDARY}--\r\n")))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response.into_body()).await;
    assert_eq!(json["error"], "No file uploaded");
}
