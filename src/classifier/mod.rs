// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Lung scan classification: labels, preprocessing, ONNX inference, loading

pub mod labels;
pub mod loader;
pub mod model;
pub mod preprocess;

pub use labels::{argmax, display_name, display_names, CLASS_LABELS, NUM_CLASSES};
pub use loader::{load_classifier, resolve_weights_path, ClassifierHandle, WEIGHTS_SEARCH_PATHS};
pub use model::{OnnxClassifier, Prediction};
pub use preprocess::{
    decode_image_bytes, detect_format, image_to_tensor, load_image, PreprocessError, IMAGE_SIZE,
};
