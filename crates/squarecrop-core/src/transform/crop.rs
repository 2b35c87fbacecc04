//! Pixel-exact cropping.
//!
//! Unlike the view-space crop box, rectangles here are integer pixel
//! coordinates on the upright bitmap. No clamping happens at this level:
//! callers map and clamp first (see [`map_to_source`](super::map_to_source)).

use crate::decode::DecodedImage;
use crate::geometry::PixelRect;

/// Extract the subregion `rect` from `image`.
///
/// # Returns
///
/// A new `DecodedImage` holding exactly `rect.width` x `rect.height` pixels,
/// or `None` when:
/// - the image has no extractable pixel buffer
/// - `rect` has zero area
/// - `rect` extends past the image edges
///
/// # Example
///
/// ```
/// use squarecrop_core::decode::DecodedImage;
/// use squarecrop_core::geometry::PixelRect;
/// use squarecrop_core::transform::crop_pixels;
///
/// let image = DecodedImage::new(100, 100, vec![128u8; 100 * 100 * 3]);
/// let cropped = crop_pixels(&image, PixelRect::new(25, 25, 50, 50)).unwrap();
/// assert_eq!((cropped.width, cropped.height), (50, 50));
/// ```
pub fn crop_pixels(image: &DecodedImage, rect: PixelRect) -> Option<DecodedImage> {
    if !image.has_pixel_buffer() || rect.is_empty() || !rect.fits_within(image.width, image.height) {
        return None;
    }

    if rect.is_full(image.width, image.height) {
        return Some(image.clone());
    }

    let src_stride = image.width as usize * 3;
    let row_len = rect.width as usize * 3;
    let mut output = Vec::with_capacity(row_len * rect.height as usize);

    // Copy pixel data row by row
    for y in rect.y..rect.y + rect.height {
        let start = y as usize * src_stride + rect.x as usize * 3;
        output.extend_from_slice(&image.pixels[start..start + row_len]);
    }

    Some(DecodedImage::new(rect.width, rect.height, output))
}
