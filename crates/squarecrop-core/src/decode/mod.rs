//! Image decoding for picked or captured photos.
//!
//! This module provides functionality for:
//! - Decoding JPEG and PNG bytes into RGB bitmaps
//! - Reading the EXIF orientation tag
//! - Correcting orientation so pixels are upright before cropping
//!
//! A [`SourceImage`] keeps the raw pixels and their orientation together.
//! Orientation is only applied when the crop engine measures the image,
//! which mirrors how cameras store their output.

mod reader;
mod types;

pub use reader::{decode_image, decode_source, get_orientation};
pub(crate) use reader::apply_orientation;
pub use types::{DecodeError, DecodedImage, Orientation, SourceImage};
