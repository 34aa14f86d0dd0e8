// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ONNX classifier wrapper for the lung scan model
//!
//! Wraps ONNX Runtime around the exported transfer-learning classifier
//! (Xception backbone, 4-way softmax head). The session is loaded once at
//! startup and shared read-only across requests.

use anyhow::{Context, Result};
use image::DynamicImage;
use ndarray::Array4;
use ort::execution_providers::CPUExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::info;

use super::labels::{argmax, display_name, CLASS_LABELS, NUM_CLASSES};
use super::preprocess::{image_to_tensor, IMAGE_SIZE};

/// A single classification result: softmax probabilities in class order
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Per-class probabilities in `[0, 1]`, in [`CLASS_LABELS`] order
    pub probabilities: [f32; NUM_CLASSES],
}

impl Prediction {
    /// Index and probability of the predicted class
    pub fn top(&self) -> (usize, f32) {
        let idx = argmax(&self.probabilities);
        (idx, self.probabilities[idx])
    }

    /// Display name of the predicted class
    pub fn top_name(&self) -> &str {
        let (idx, _) = self.top();
        display_name(CLASS_LABELS[idx])
    }
}

/// ONNX-based lung scan classifier
///
/// # Thread Safety
/// The session is wrapped in `Arc<Mutex>` because `Session::run` requires
/// mutable access; the handle itself is cheap to clone and share.
#[derive(Clone)]
pub struct OnnxClassifier {
    /// ONNX Runtime session (wrapped in Arc<Mutex> for thread-safe shared access)
    session: Arc<Mutex<Session>>,

    /// First input name reported by the session (export-dependent)
    input_name: String,

    /// Path the weights were loaded from
    model_path: PathBuf,
}

impl std::fmt::Debug for OnnxClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxClassifier")
            .field("model_path", &self.model_path)
            .field("input_name", &self.input_name)
            .finish_non_exhaustive()
    }
}

impl OnnxClassifier {
    /// Load the classifier from an ONNX weights file
    ///
    /// Builds a CPU session and runs one validation forward pass on a zero
    /// tensor to confirm the model accepts `[1, 350, 350, 3]` input and
    /// produces a 4-way output.
    ///
    /// # Errors
    /// Returns error if the file is missing, the session cannot be built, or
    /// the validation pass produces an unexpected output shape.
    pub fn new<P: AsRef<Path>>(model_path: P) -> Result<Self> {
        let model_path = model_path.as_ref();

        if !model_path.exists() {
            anyhow::bail!("ONNX model file not found: {}", model_path.display());
        }

        let mut session = Session::builder()
            .context("Failed to create session builder")?
            .with_execution_providers([CPUExecutionProvider::default().build()])
            .context("Failed to set CPU execution provider")?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .context("Failed to set optimization level")?
            .with_intra_threads(4)
            .context("Failed to set intra threads")?
            .commit_from_file(model_path)
            .context(format!(
                "Failed to load ONNX model from {}",
                model_path.display()
            ))?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .context("Model has no inputs")?;

        // Validate the output head by running a forward pass on a zero tensor.
        // Wrap in a block so outputs are dropped before moving the session.
        {
            let (width, height) = IMAGE_SIZE;
            let zeros = Array4::<f32>::zeros((1, height as usize, width as usize, 3));
            let outputs = session
                .run(ort::inputs![input_name.as_str() => Value::from_array(zeros)?])
                .context("Validation inference failed")?;

            let output_tensor = outputs[0]
                .try_extract_array::<f32>()
                .context("Failed to extract output tensor")?;
            let output_len = output_tensor.len();

            if output_len != NUM_CLASSES {
                anyhow::bail!(
                    "Model outputs unexpected dimensions: {:?} (expected [1, {}])",
                    output_tensor.shape(),
                    NUM_CLASSES
                );
            }
        } // outputs dropped here

        info!("Classifier loaded from {}", model_path.display());

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            input_name,
            model_path: model_path.to_path_buf(),
        })
    }

    /// Classify a decoded image
    ///
    /// Resizes/normalizes the image and runs one forward pass. The exported
    /// model applies softmax internally, so the output is already a
    /// probability vector.
    pub fn predict(&self, img: &DynamicImage) -> Result<Prediction> {
        let tensor = image_to_tensor(img);

        let mut session_guard = self
            .session
            .lock()
            .map_err(|_| anyhow::anyhow!("Classifier session lock poisoned"))?;
        let outputs = session_guard
            .run(ort::inputs![self.input_name.as_str() => Value::from_array(tensor)?])
            .context("Inference failed")?;

        let output_array = outputs[0]
            .try_extract_array::<f32>()
            .context("Failed to extract output tensor")?;

        if output_array.len() != NUM_CLASSES {
            anyhow::bail!(
                "Unexpected output length: {} (expected {})",
                output_array.len(),
                NUM_CLASSES
            );
        }

        let mut probabilities = [0.0f32; NUM_CLASSES];
        for (slot, &value) in probabilities.iter_mut().zip(output_array.iter()) {
            *slot = value;
        }

        Ok(Prediction { probabilities })
    }

    /// Path the weights were loaded from
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}
