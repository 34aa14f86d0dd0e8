// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Deployment-readiness self-check
//!
//! Reports which weights search path (if any) resolves and whether the
//! upload directory is writable. Exit code 0 when everything is ready.

use lungscan_node::classifier::{resolve_weights_path, WEIGHTS_SEARCH_PATHS};
use lungscan_node::config::ServerConfig;
use lungscan_node::uploads::UploadStore;

fn main() {
    println!("============================================================");
    println!("Lungscan Node - Deployment Verification");
    println!("============================================================");
    println!();

    let config = ServerConfig::from_env();
    let mut ready = true;

    // Weights file
    println!("📊 Checking model weights...");
    match resolve_weights_path(config.model_path.as_deref()) {
        Some(path) => {
            println!("✅ Model file (CRITICAL): {}", path.display());
            if let Ok(metadata) = std::fs::metadata(&path) {
                let size_mb = metadata.len() as f64 / (1024.0 * 1024.0);
                println!("   Model file size: {:.2} MB", size_mb);
            }
        }
        None => {
            match &config.model_path {
                Some(path) => println!("❌ Model file: {} - NOT FOUND", path.display()),
                None => {
                    println!("❌ Model file - NOT FOUND. Checked paths:");
                    for path in WEIGHTS_SEARCH_PATHS {
                        println!("   - {}", path);
                    }
                }
            }
            ready = false;
        }
    }
    println!();

    // Upload directory
    println!("📂 Checking upload directory...");
    match UploadStore::new(&config.upload_dir) {
        Ok(store) => {
            let probe = store.dir().join(".write-probe");
            match std::fs::write(&probe, b"ok") {
                Ok(()) => {
                    let _ = std::fs::remove_file(&probe);
                    println!("✅ Upload directory writable: {}", store.dir().display());
                }
                Err(e) => {
                    println!(
                        "❌ Upload directory not writable: {} ({})",
                        store.dir().display(),
                        e
                    );
                    ready = false;
                }
            }
        }
        Err(e) => {
            println!(
                "❌ Upload directory: {} - {}",
                config.upload_dir.display(),
                e
            );
            ready = false;
        }
    }
    println!();

    println!("============================================================");
    if ready {
        println!("✅ ALL CHECKS PASSED!");
    } else {
        println!("❌ Some checks failed. Fix the issues above before deploying.");
        std::process::exit(1);
    }
}
