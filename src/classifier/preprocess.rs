// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image decoding and tensor conversion for the lung scan classifier

use image::{imageops::FilterType, DynamicImage, ImageFormat};
use ndarray::Array4;
use std::path::Path;
use thiserror::Error;

/// Classifier input size (width, height)
pub const IMAGE_SIZE: (u32, u32) = (350, 350);

/// Custom error types for image preprocessing
#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("Image data is empty")]
    EmptyData,

    #[error("Unsupported image format")]
    UnsupportedFormat,

    #[error("Failed to decode image: {0}")]
    DecodeFailed(String),

    #[error("Failed to read image file: {0}")]
    ReadFailed(String),
}

/// Decode raw image bytes into a [`DynamicImage`]
///
/// The format is detected from magic bytes rather than trusting the
/// client-supplied filename extension.
pub fn decode_image_bytes(bytes: &[u8]) -> Result<DynamicImage, PreprocessError> {
    if bytes.is_empty() {
        return Err(PreprocessError::EmptyData);
    }

    let format = detect_format(bytes)?;

    image::load_from_memory_with_format(bytes, format)
        .map_err(|e| PreprocessError::DecodeFailed(e.to_string()))
}

/// Load and decode an image from disk
pub fn load_image(path: &Path) -> Result<DynamicImage, PreprocessError> {
    let bytes = std::fs::read(path).map_err(|e| PreprocessError::ReadFailed(e.to_string()))?;
    decode_image_bytes(&bytes)
}

/// Detect image format from magic bytes
pub fn detect_format(bytes: &[u8]) -> Result<ImageFormat, PreprocessError> {
    if bytes.len() < 4 {
        return Err(PreprocessError::UnsupportedFormat);
    }

    match bytes {
        // PNG: 89 50 4E 47 (0x89 P N G)
        [0x89, 0x50, 0x4E, 0x47, ..] => Ok(ImageFormat::Png),

        // JPEG: FF D8 FF
        [0xFF, 0xD8, 0xFF, ..] => Ok(ImageFormat::Jpeg),

        // GIF: GIF87a or GIF89a
        [0x47, 0x49, 0x46, 0x38, x, ..] if *x == 0x37 || *x == 0x39 => Ok(ImageFormat::Gif),

        _ => Err(PreprocessError::UnsupportedFormat),
    }
}

/// Convert a decoded image into the classifier's input tensor
///
/// Resizes to 350x350 (bilinear), converts to RGB, and scales pixel values
/// to `[0, 1]` f32 in NHWC layout: `[1, 350, 350, 3]`.
pub fn image_to_tensor(img: &DynamicImage) -> Array4<f32> {
    let (width, height) = IMAGE_SIZE;
    let resized = img
        .resize_exact(width, height, FilterType::Triangle)
        .to_rgb8();

    let mut tensor = Array4::<f32>::zeros((1, height as usize, width as usize, 3));
    for (x, y, pixel) in resized.enumerate_pixels() {
        for c in 0..3 {
            tensor[[0, y as usize, x as usize, c]] = pixel[c] as f32 / 255.0;
        }
    }

    tensor
}
