// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::health::health_handler;
use crate::api::predict::predict_handler;
use crate::classifier::ClassifierHandle;
use crate::config::ServerConfig;
use crate::uploads::UploadStore;

/// Maximum request body size (16MB)
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    /// Classifier handle, shared read-only across requests
    pub classifier: Arc<ClassifierHandle>,
    /// Upload directory manager
    pub uploads: Arc<UploadStore>,
}

impl AppState {
    pub fn new(classifier: Arc<ClassifierHandle>, uploads: Arc<UploadStore>) -> Self {
        Self {
            classifier,
            uploads,
        }
    }

    /// State with no model loaded and a temp-dir upload store, for tests
    pub fn new_for_test() -> Self {
        let dir = std::env::temp_dir().join("lungscan-node-test-uploads");
        let uploads = UploadStore::new(&dir).expect("Failed to create test upload dir");
        Self {
            classifier: Arc::new(ClassifierHandle::failed(
                "Model initialization not attempted",
            )),
            uploads: Arc::new(uploads),
        }
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Prediction endpoint
        .route("/predict", post(predict_handler))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        // Health check
        .route("/health", get(health_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(config: &ServerConfig, state: AppState) -> anyhow::Result<()> {
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
