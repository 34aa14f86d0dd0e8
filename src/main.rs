// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use lungscan_node::{
    api::{start_server, AppState},
    classifier::load_classifier,
    config::ServerConfig,
    uploads::UploadStore,
};
use std::{env, sync::Arc};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    println!("🚀 Starting Lungscan Node...\n");
    println!("📦 BUILD VERSION: {}", lungscan_node::version::VERSION);
    println!("📅 Build Date: {}", lungscan_node::version::BUILD_DATE);
    println!();

    let config = ServerConfig::from_env();

    // Upload directory must exist before the first request
    let uploads = UploadStore::new(&config.upload_dir)?;
    tracing::info!("Upload directory: {}", uploads.dir().display());

    // Load the classifier once; a failure leaves the service in degraded mode
    println!("🧠 Loading lung scan classifier...");
    let classifier = load_classifier(config.model_path.as_deref());
    if classifier.is_loaded() {
        println!("✅ Model loaded successfully");
    } else {
        println!("⚠️  Model not loaded: {}", classifier.load_error());
        println!("   Prediction requests will return the load failure until restart");
    }

    let state = AppState::new(Arc::new(classifier), Arc::new(uploads));
    start_server(&config, state).await
}
