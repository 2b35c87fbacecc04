//! Core types for decoded images.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The byte stream is not a recognized image format.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Already upright.
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl Orientation {
    /// Returns true if correcting this orientation swaps width and height.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Orientation::Transpose
                | Orientation::Rotate90CW
                | Orientation::Transverse
                | Orientation::Rotate270CW
        )
    }

    /// Whether the stored x and y axes run backwards once corrected.
    ///
    /// Stored x maps to upright y (and stored y to upright x) when
    /// [`swaps_dimensions`](Self::swaps_dimensions) is true.
    pub fn reverses_axes(self) -> (bool, bool) {
        match self {
            Orientation::Normal | Orientation::Transpose => (false, false),
            Orientation::FlipHorizontal => (true, false),
            Orientation::FlipVertical => (false, true),
            Orientation::Rotate180 | Orientation::Transverse => (true, true),
            Orientation::Rotate90CW => (false, true),
            Orientation::Rotate270CW => (true, false),
        }
    }
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// A decoded bitmap with RGB pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length should be width * height * 3.
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Create a new DecodedImage with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a DecodedImage from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Convert to an image::RgbImage, or `None` if the buffer is not extractable.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        if !self.has_pixel_buffer() {
            return None;
        }
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// True when the pixel buffer is non-empty and matches the dimensions.
    ///
    /// Every crop and encode path refuses images for which this is false.
    pub fn has_pixel_buffer(&self) -> bool {
        !self.is_empty() && self.pixels.len() == self.expected_len()
    }

    /// Expected buffer length for the stated dimensions.
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * 3
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

/// A bitmap as captured or selected, before orientation correction.
///
/// The pixels are stored exactly as encoded in the file; `orientation`
/// records how they must be transformed to appear upright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    pub image: DecodedImage,
    pub orientation: Orientation,
}

impl SourceImage {
    pub fn new(image: DecodedImage, orientation: Orientation) -> Self {
        Self { image, orientation }
    }

    /// An already-upright source.
    pub fn upright_from(image: DecodedImage) -> Self {
        Self::new(image, Orientation::Normal)
    }

    /// Dimensions after orientation correction.
    pub fn upright_dimensions(&self) -> (u32, u32) {
        if self.orientation.swaps_dimensions() {
            (self.image.height, self.image.width)
        } else {
            (self.image.width, self.image.height)
        }
    }

    /// Pixel buffer rotated/flipped into upright orientation.
    ///
    /// Returns a clone when the orientation is already `Normal`, and `None`
    /// when the pixel buffer cannot be extracted.
    pub fn upright(&self) -> Option<DecodedImage> {
        if !self.image.has_pixel_buffer() {
            return None;
        }
        if self.orientation == Orientation::Normal {
            return Some(self.image.clone());
        }
        let rgb = self.image.to_rgb_image()?;
        let corrected = super::apply_orientation(image::DynamicImage::ImageRgb8(rgb), self.orientation);
        Some(DecodedImage::from_rgb_image(corrected.into_rgb8()))
    }
}
