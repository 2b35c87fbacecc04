//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_source`] - Decode picked bytes, keeping the EXIF orientation
//! - [`decode_image`] - Decode and return upright pixels for display
//! - [`get_orientation`] - Read only the EXIF orientation value
//!
//! # Example
//!
//! ```typescript
//! import { decode_source } from '@squarecrop/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const source = decode_source(bytes);
//! console.log(`Upright ${source.upright_width}x${source.upright_height}`);
//! ```

use crate::types::{JsDecodedImage, JsSourceImage};
use squarecrop_core::decode;
use wasm_bindgen::prelude::*;

/// Decode JPEG or PNG bytes without applying orientation.
///
/// The returned source is what the crop session and application state
/// consume; they correct orientation themselves.
#[wasm_bindgen]
pub fn decode_source(bytes: &[u8]) -> Result<JsSourceImage, JsValue> {
    decode::decode_source(bytes)
        .map(JsSourceImage::from_source)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Decode JPEG or PNG bytes into upright RGB pixels.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// EXIF orientation value (1-8) of the given bytes; 1 when absent.
#[wasm_bindgen]
pub fn get_orientation(bytes: &[u8]) -> u32 {
    decode::get_orientation(bytes) as u32
}
