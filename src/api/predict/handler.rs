// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Predict endpoint handler

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::{debug, info, warn};

use super::response::PredictionResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::classifier::load_image;
use crate::uploads::{allowed_extension, UploadError};

/// POST /predict - Classify an uploaded lung scan image
///
/// Accepts a `multipart/form-data` body with a `file` field and returns the
/// predicted diagnostic category with per-class confidence scores.
///
/// # Response
/// - `success`: true
/// - `prediction`: display name of the predicted class
/// - `confidence`: confidence of the prediction (0-100, 2 decimals)
/// - `all_predictions`: every class display name mapped to its confidence
///
/// # Errors
/// - 400 Bad Request: missing file field, empty upload, disallowed extension
/// - 500 Internal Server Error: model not loaded, preprocessing or inference failure
///
/// The upload is written under the configured directory for the duration of
/// the request and removed before the response is returned, on every path.
pub async fn predict_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<PredictionResponse>, ApiError> {
    // 1. Short-circuit when the model never loaded; no file is read or written
    let Some(classifier) = state.classifier.get() else {
        warn!("Predict request while model not loaded");
        return Err(ApiError::ModelNotLoaded(
            state.classifier.load_error().to_string(),
        ));
    };

    // 2. Pull the `file` field out of the multipart body
    let mut filename: Option<String> = None;
    let mut bytes: Vec<u8> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidRequest(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() == Some("file") {
            filename = field.file_name().map(|s| s.to_string());
            bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::InvalidRequest(format!("Failed to read upload: {}", e)))?
                .to_vec();
            break;
        }
    }

    let filename = filename.ok_or_else(|| ApiError::ValidationError {
        field: "file".to_string(),
        message: "No file uploaded".to_string(),
    })?;

    if bytes.is_empty() {
        return Err(ApiError::ValidationError {
            field: "file".to_string(),
            message: "No file uploaded".to_string(),
        });
    }

    // 3. Reject disallowed extensions before anything touches disk
    if !allowed_extension(&filename) {
        warn!("Rejected upload with disallowed extension: {}", filename);
        return Err(ApiError::ValidationError {
            field: "file".to_string(),
            message: UploadError::DisallowedExtension.to_string(),
        });
    }

    // 4. Persist the upload; the guard removes it when this function returns
    let guard = state
        .uploads
        .save(&filename, &bytes)
        .map_err(|e| match e {
            UploadError::Io(io_err) => {
                warn!("Failed to persist upload: {}", io_err);
                ApiError::InternalError("Error processing image".to_string())
            }
            other => ApiError::ValidationError {
                field: "file".to_string(),
                message: other.to_string(),
            },
        })?;

    debug!("Processing upload at {}", guard.path().display());

    // 5. Decode and preprocess
    let img = load_image(guard.path()).map_err(|e| {
        warn!("Image preprocessing failed: {}", e);
        ApiError::InternalError("Error processing image".to_string())
    })?;

    // 6. Run inference
    let prediction = classifier.predict(&img).map_err(|e| {
        warn!("Inference failed: {}", e);
        ApiError::InternalError(format!("Prediction error: {}", e))
    })?;

    let response = PredictionResponse::from_prediction(&prediction);
    info!(
        "Prediction: {} ({:.2}%)",
        response.prediction, response.confidence
    );

    // 7. Remove the upload before responding
    drop(guard);

    Ok(Json(response))
}
