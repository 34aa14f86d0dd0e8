// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Weights file resolution and degraded-mode classifier handle
//!
//! The weights file is searched across a fixed ordered path list (with an
//! optional explicit override). A load failure does not abort startup: the
//! service stays up with the error stored, and every prediction request
//! reports it.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use super::model::OnnxClassifier;

/// Ordered search paths for the classifier weights, relative to the working directory
pub const WEIGHTS_SEARCH_PATHS: [&str; 4] = [
    "models/lung_classifier.onnx",
    "lung_classifier.onnx",
    "models/best_model.onnx",
    "best_model.onnx",
];

/// Process-wide classifier handle
///
/// Holds either the loaded model or the error string from the failed load
/// attempt. Read-only after startup.
pub struct ClassifierHandle {
    model: Option<Arc<OnnxClassifier>>,
    load_error: Option<String>,
}

impl ClassifierHandle {
    /// Handle for a successfully loaded model
    pub fn loaded(model: OnnxClassifier) -> Self {
        Self {
            model: Some(Arc::new(model)),
            load_error: None,
        }
    }

    /// Degraded handle carrying the load failure description
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            model: None,
            load_error: Some(error.into()),
        }
    }

    /// Get the model if available
    pub fn get(&self) -> Option<Arc<OnnxClassifier>> {
        self.model.clone()
    }

    /// Whether the model loaded successfully
    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    /// The stored load error, if any
    pub fn load_error(&self) -> &str {
        self.load_error
            .as_deref()
            .unwrap_or("Model initialization not attempted")
    }
}

impl std::fmt::Debug for ClassifierHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassifierHandle")
            .field("loaded", &self.is_loaded())
            .field("load_error", &self.load_error)
            .finish()
    }
}

/// Resolve the weights file: explicit override first, then the search list
pub fn resolve_weights_path(override_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
        return None;
    }

    WEIGHTS_SEARCH_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
}

/// Load the classifier, falling back to a degraded handle on any failure
pub fn load_classifier(override_path: Option<&Path>) -> ClassifierHandle {
    let Some(weights_path) = resolve_weights_path(override_path) else {
        let error = match override_path {
            Some(path) => format!("Weights file not found at {}", path.display()),
            None => format!(
                "Weights file not found. Checked paths: {:?}",
                WEIGHTS_SEARCH_PATHS
            ),
        };
        warn!("{}", error);
        return ClassifierHandle::failed(error);
    };

    match OnnxClassifier::new(&weights_path) {
        Ok(model) => {
            info!("Model loaded successfully from {}", weights_path.display());
            ClassifierHandle::loaded(model)
        }
        Err(e) => {
            let error = format!("Exception loading model: {:#}", e);
            warn!("{}", error);
            ClassifierHandle::failed(error)
        }
    }
}
