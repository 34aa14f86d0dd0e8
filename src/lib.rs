// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod classifier;
pub mod config;
pub mod uploads;
pub mod version;

// Re-export main types
pub use api::{build_router, start_server, ApiError, AppState, HealthResponse, PredictionResponse};
pub use classifier::{
    load_classifier, ClassifierHandle, OnnxClassifier, Prediction, CLASS_LABELS, NUM_CLASSES,
};
pub use config::ServerConfig;
pub use uploads::{UploadGuard, UploadStore};
