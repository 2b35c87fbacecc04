//! WASM bindings for square auto-crop and crop mapping.

use crate::types::{JsDecodedImage, JsSourceImage};
use squarecrop_core::geometry::{Rect, Size};
use squarecrop_core::{square, transform};
use wasm_bindgen::prelude::*;

/// Crop an image to its centered square.
///
/// Returns `undefined` if the image has no usable pixel buffer.
#[wasm_bindgen]
pub fn crop_to_square(image: &JsDecodedImage) -> Option<JsDecodedImage> {
    square::crop_to_square(&image.to_decoded()).map(JsDecodedImage::from_decoded)
}

/// Crop a picked photo's raw pixels to their centered square, keeping its orientation.
#[wasm_bindgen]
pub fn crop_source_to_square(source: &JsSourceImage) -> Option<JsSourceImage> {
    square::crop_source_to_square(source.inner()).map(JsSourceImage::from_source)
}

/// Map a view rectangle onto source pixels.
///
/// Returns `[x, y, width, height]` in source pixels, or `undefined` when the
/// clamped rectangle is empty.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const rect = map_to_source(75, 37.5, 150, 150, 300, 225, 4000, 3000);
/// // [1000, 500, 2000, 2000]
/// ```
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn map_to_source(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    render_width: f64,
    render_height: f64,
    source_width: u32,
    source_height: u32,
) -> Option<Vec<u32>> {
    transform::map_to_source(
        Rect::new(x, y, width, height),
        Size::new(render_width, render_height),
        source_width,
        source_height,
    )
    .map(|rect| vec![rect.x, rect.y, rect.width, rect.height])
}
