// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Predict endpoint (POST /predict)

pub mod handler;
pub mod response;

pub use handler::predict_handler;
pub use response::PredictionResponse;
