// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Diagnostic class labels for the lung scan classifier
//!
//! The raw labels are the training-set directory names (TNM staging included);
//! responses use the human-readable display names. Order matches the output
//! vector of the exported model and must not change.

/// Number of diagnostic categories the classifier predicts
pub const NUM_CLASSES: usize = 4;

/// Raw class labels, in model output order
pub const CLASS_LABELS: [&str; NUM_CLASSES] = [
    "adenocarcinoma_left.lower.lobe_T2_N0_M0_Ib",
    "large.cell.carcinoma_left.hilum_T2_N2_M0_IIIa",
    "normal",
    "squamous.cell.carcinoma_left.hilum_T1_N2_M0_IIIa",
];

/// Map a raw class label to its display name
///
/// Unknown labels fall back to the raw label itself, matching the behavior
/// of a lookup with a raw-label default.
pub fn display_name(raw_label: &str) -> &str {
    match raw_label {
        "adenocarcinoma_left.lower.lobe_T2_N0_M0_Ib" => "Adenocarcinoma",
        "large.cell.carcinoma_left.hilum_T2_N2_M0_IIIa" => "Large Cell Carcinoma",
        "normal" => "Normal",
        "squamous.cell.carcinoma_left.hilum_T1_N2_M0_IIIa" => "Squamous Cell Carcinoma",
        other => other,
    }
}

/// Display names in model output order
pub fn display_names() -> [&'static str; NUM_CLASSES] {
    [
        "Adenocarcinoma",
        "Large Cell Carcinoma",
        "Normal",
        "Squamous Cell Carcinoma",
    ]
}

/// Index of the largest probability (first index wins ties)
pub fn argmax(probabilities: &[f32]) -> usize {
    let mut best = 0;
    for (i, &p) in probabilities.iter().enumerate() {
        if p > probabilities[best] {
            best = i;
        }
    }
    best
}
