//! Crop geometry and pixel extraction.
//!
//! # Coordinate System
//!
//! - View rectangles are in render-rectangle units, origin top-left
//! - Pixel rectangles index the upright source bitmap
//!
//! # Pipeline
//!
//! When a crop is confirmed:
//! 1. Orientation is corrected ([`SourceImage::upright`](crate::decode::SourceImage::upright))
//! 2. The crop box is mapped and clamped ([`map_to_source`])
//! 3. Pixels are extracted ([`crop_pixels`])

mod crop;
mod mapping;

pub use crop::crop_pixels;
pub use mapping::map_to_source;
