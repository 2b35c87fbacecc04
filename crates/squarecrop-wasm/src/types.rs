//! WASM-compatible wrapper types for image data.
//!
//! These wrap the core types and handle the conversion between Rust and
//! JavaScript data representations.

use squarecrop_core::decode::{DecodedImage, Orientation, SourceImage};
use wasm_bindgen::prelude::*;

/// A decoded image wrapper for JavaScript.
///
/// The pixel data is stored in WASM memory. `pixels()` copies it out as a
/// `Uint8Array`.
#[wasm_bindgen]
pub struct JsDecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Create a new JsDecodedImage from dimensions and RGB pixel data.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsDecodedImage {
        JsDecodedImage {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 3 for RGB)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsDecodedImage {
    pub(crate) fn from_decoded(img: DecodedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    /// Convert back to a core DecodedImage (clones the pixel data).
    pub(crate) fn to_decoded(&self) -> DecodedImage {
        DecodedImage::new(self.width, self.height, self.pixels.clone())
    }
}

/// A picked photo: raw pixels plus EXIF orientation.
#[wasm_bindgen]
pub struct JsSourceImage {
    inner: SourceImage,
}

#[wasm_bindgen]
impl JsSourceImage {
    /// Wrap raw RGB pixels with an EXIF orientation value (1-8; anything else is upright).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>, orientation: u32) -> JsSourceImage {
        JsSourceImage {
            inner: SourceImage::new(
                DecodedImage::new(width, height, pixels),
                Orientation::from(orientation),
            ),
        }
    }

    /// EXIF orientation value (1-8).
    #[wasm_bindgen(getter)]
    pub fn orientation(&self) -> u32 {
        self.inner.orientation as u32
    }

    /// Width after orientation correction.
    #[wasm_bindgen(getter)]
    pub fn upright_width(&self) -> u32 {
        self.inner.upright_dimensions().0
    }

    /// Height after orientation correction.
    #[wasm_bindgen(getter)]
    pub fn upright_height(&self) -> u32 {
        self.inner.upright_dimensions().1
    }

    /// Upright pixels for display, or `undefined` if the buffer is unusable.
    pub fn upright(&self) -> Option<JsDecodedImage> {
        self.inner.upright().map(JsDecodedImage::from_decoded)
    }
}

impl JsSourceImage {
    pub(crate) fn from_source(inner: SourceImage) -> Self {
        Self { inner }
    }

    pub(crate) fn inner(&self) -> &SourceImage {
        &self.inner
    }
}
