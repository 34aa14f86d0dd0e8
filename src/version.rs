// Version information for the Lungscan Node

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-onnx-serving-2026-08-30";

/// Semantic version number
pub const VERSION_NUMBER: &str = "0.1.0";

/// Build date
pub const BUILD_DATE: &str = "2026-08-30";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "multipart-upload",
    "onnx-inference",
    "degraded-mode",
    "health-check",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Lungscan Node {} ({})", VERSION_NUMBER, BUILD_DATE)
}
