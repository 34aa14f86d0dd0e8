// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Environment-driven server configuration

use std::env;
use std::path::PathBuf;

/// Runtime configuration, read from environment variables with defaults
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port (`PORT`, default 5000)
    pub port: u16,
    /// Upload directory (`UPLOAD_DIR`, default "uploads")
    pub upload_dir: PathBuf,
    /// Explicit weights file path (`MODEL_PATH`); overrides the search list
    pub model_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            upload_dir: PathBuf::from("uploads"),
            model_path: None,
        }
    }
}

impl ServerConfig {
    /// Read configuration from the environment
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(5000);

        let upload_dir = env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("uploads"));

        let model_path = env::var("MODEL_PATH").ok().map(PathBuf::from);

        Self {
            port,
            upload_dir,
            model_path,
        }
    }
}
