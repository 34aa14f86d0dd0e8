// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP API: router, endpoint handlers, and error surface

pub mod errors;
pub mod health;
pub mod http_server;
pub mod predict;

pub use errors::{ApiError, ErrorBody};
pub use health::{health_handler, HealthResponse};
pub use http_server::{build_router, start_server, AppState, MAX_UPLOAD_BYTES};
pub use predict::{predict_handler, PredictionResponse};
