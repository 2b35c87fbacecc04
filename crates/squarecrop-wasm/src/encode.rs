//! Image encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_jpeg`] - Encode RGB pixel data to JPEG bytes
//! - [`encode_png`] - Encode RGB pixel data to PNG bytes
//! - [`encode_png_from_image`] - Encode a JsDecodedImage to PNG bytes

use crate::types::JsDecodedImage;
use squarecrop_core::encode;
use wasm_bindgen::prelude::*;

/// Encode RGB pixel data to JPEG bytes.
///
/// `quality` is clamped to 1-100.
#[wasm_bindgen]
pub fn encode_jpeg(pixels: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(pixels, width, height, quality).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode RGB pixel data to lossless PNG bytes.
#[wasm_bindgen]
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(pixels, width, height).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a JsDecodedImage to PNG bytes.
///
/// # Example
///
/// ```typescript
/// const square = crop_to_square(image);
/// if (square) {
///   const png = encode_png_from_image(square);
///   avatar.src = URL.createObjectURL(new Blob([png], { type: 'image/png' }));
/// }
/// ```
#[wasm_bindgen]
pub fn encode_png_from_image(image: &JsDecodedImage) -> Result<Vec<u8>, JsValue> {
    let pixels = image.pixels();
    encode_png(&pixels, image.width(), image.height())
}
