// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prediction response types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::classifier::{display_name, Prediction, CLASS_LABELS};

/// Response from a successful prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// Always true on the success path
    pub success: bool,
    /// Display name of the predicted class
    pub prediction: String,
    /// Confidence of the predicted class (0-100, rounded to 2 decimals)
    pub confidence: f64,
    /// Every class display name mapped to its confidence (0-100)
    pub all_predictions: BTreeMap<String, f64>,
}

impl PredictionResponse {
    /// Build a response from raw softmax probabilities
    pub fn from_prediction(prediction: &Prediction) -> Self {
        let (top_idx, top_prob) = prediction.top();

        let all_predictions = CLASS_LABELS
            .iter()
            .zip(prediction.probabilities.iter())
            .map(|(label, &prob)| (display_name(label).to_string(), round2(prob as f64 * 100.0)))
            .collect();

        Self {
            success: true,
            prediction: display_name(CLASS_LABELS[top_idx]).to_string(),
            confidence: round2(top_prob as f64 * 100.0),
            all_predictions,
        }
    }
}

/// Round to 2 decimal places
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
