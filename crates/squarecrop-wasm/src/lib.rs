//! Squarecrop WASM - WebAssembly bindings for squarecrop-core
//!
//! The host page owns the picker and the drawing surface. It decodes the
//! picked file here, drives a [`JsCropSession`] from pointer and pinch
//! events, and reads the results back out of a [`JsAppState`].
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Decoding with EXIF orientation
//! - `encode` - JPEG and PNG encoding
//! - `transform` - Square auto-crop and view-to-pixel mapping
//! - `session` - The interactive crop session
//! - `state` - Original and cropped image slots
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_source, JsAppState, JsCropSession } from '@squarecrop/wasm';
//!
//! await init();
//!
//! const state = new JsAppState();
//! state.subscribe((event) => console.log(event));
//!
//! const source = decode_source(new Uint8Array(await file.arrayBuffer()));
//! state.accept_source(source);
//!
//! const session = new JsCropSession();
//! session.open_fit(source.upright_width, source.upright_height, 390, 600);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod logger;
mod session;
mod state;
mod transform;
mod types;

// Re-export public types
pub use decode::{decode_image, decode_source, get_orientation};
pub use encode::{encode_jpeg, encode_png, encode_png_from_image};
pub use logger::set_log_level;
pub use session::JsCropSession;
pub use state::JsAppState;
pub use transform::{crop_source_to_square, crop_to_square, map_to_source};
pub use types::{JsDecodedImage, JsSourceImage};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::install(log::LevelFilter::Info);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
