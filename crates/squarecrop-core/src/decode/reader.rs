//! Bitmap decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, DecodedImage, Orientation, SourceImage};

/// Decode image bytes into a [`SourceImage`] without touching the pixels.
///
/// The format is guessed from the content (JPEG and PNG are supported).
/// The EXIF orientation is read and kept alongside the raw pixels so the
/// crop engine can correct it right before measuring.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be identified.
/// Returns `DecodeError::CorruptedFile` if decoding fails.
pub fn decode_source(bytes: &[u8]) -> Result<SourceImage, DecodeError> {
    let orientation = extract_orientation(bytes);
    let img = decode_dynamic(bytes)?;
    Ok(SourceImage::new(
        DecodedImage::from_rgb_image(img.into_rgb8()),
        orientation,
    ))
}

/// Decode image bytes and return upright RGB pixels.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let orientation = extract_orientation(bytes);
    let img = apply_orientation(decode_dynamic(bytes)?, orientation);
    Ok(DecodedImage::from_rgb_image(img.into_rgb8()))
}

/// Extract the EXIF orientation from image bytes (for external use).
///
/// Returns `Orientation::Normal` when no EXIF data is present.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn decode_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    let Ok(exif) = Reader::new().read_from_container(&mut cursor) else {
        return Orientation::Normal;
    };

    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from)
        .unwrap_or_default()
}

/// Apply an EXIF orientation transformation to an image.
pub(crate) fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
