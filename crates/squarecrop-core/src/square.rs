//! Centered square auto-crop.
//!
//! Used when a photo is first picked: the cropped slot gets a sensible
//! square before the user ever opens the interactive crop view.

use crate::decode::{DecodedImage, Orientation, SourceImage};
use crate::geometry::PixelRect;
use crate::transform::crop_pixels;

/// The centered square of side `min(width, height)`.
pub fn square_rect(width: u32, height: u32) -> PixelRect {
    let side = width.min(height);
    PixelRect::new((width - side) / 2, (height - side) / 2, side, side)
}

/// Crop `image` to its centered square.
///
/// Returns `None` if the image has no extractable pixel buffer.
pub fn crop_to_square(image: &DecodedImage) -> Option<DecodedImage> {
    crop_pixels(image, square_rect(image.width, image.height))
}

/// Crop the raw pixels of `source` to the square that is centered once the
/// photo is upright, keeping the orientation tag.
pub fn crop_source_to_square(source: &SourceImage) -> Option<SourceImage> {
    let rect = stored_square_rect(source.image.width, source.image.height, source.orientation);
    crop_pixels(&source.image, rect).map(|image| SourceImage::new(image, source.orientation))
}

/// Stored-pixel rectangle that becomes the centered square after `orientation`.
///
/// With an odd leftover the upright square sits one pixel left (or up) of
/// center, so a reversed stored axis takes the larger offset.
fn stored_square_rect(width: u32, height: u32, orientation: Orientation) -> PixelRect {
    let rect = square_rect(width, height);
    let (rev_x, rev_y) = orientation.reverses_axes();
    let x = if rev_x { width - rect.width - rect.x } else { rect.x };
    let y = if rev_y { height - rect.height - rect.y } else { rect.y };
    PixelRect::new(x, y, rect.width, rect.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[x as u8, y as u8, 0]);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_square_rect_landscape() {
        assert_eq!(square_rect(4000, 3000), PixelRect::new(500, 0, 3000, 3000));
    }

    #[test]
    fn test_square_rect_portrait() {
        assert_eq!(square_rect(30, 50), PixelRect::new(0, 10, 30, 30));
    }

    #[test]
    fn test_square_rect_odd_difference_rounds_down() {
        assert_eq!(square_rect(11, 8), PixelRect::new(1, 0, 8, 8));
    }

    #[test]
    fn test_square_rect_already_square() {
        assert_eq!(square_rect(64, 64), PixelRect::new(0, 0, 64, 64));
    }

    #[test]
    fn test_crop_to_square_pixels() {
        let img = gradient(40, 20);
        let square = crop_to_square(&img).unwrap();

        assert_eq!((square.width, square.height), (20, 20));
        // First pixel comes from (10, 0)
        assert_eq!(&square.pixels[0..3], &[10, 0, 0]);
    }

    #[test]
    fn test_crop_to_square_unextractable() {
        let img = DecodedImage::new(40, 20, Vec::new());
        assert!(crop_to_square(&img).is_none());
    }

    #[test]
    fn test_crop_source_keeps_orientation() {
        let source = SourceImage::new(gradient(30, 20), Orientation::Rotate90CW);
        let square = crop_source_to_square(&source).unwrap();

        assert_eq!(square.orientation, Orientation::Rotate90CW);
        assert_eq!((square.image.width, square.image.height), (20, 20));
    }

    #[test]
    fn test_crop_source_rotated_180_odd_leftover_is_centered_upright() {
        let source = SourceImage::new(gradient(11, 8), Orientation::Rotate180);
        let square = crop_source_to_square(&source).unwrap();

        let expected = crop_to_square(&source.upright().unwrap()).unwrap();
        assert_eq!(square.upright().unwrap(), expected);
        // Stored columns 2..=9 become upright columns 8..=1
        assert_eq!(&square.image.pixels[0..3], &[2, 0, 0]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Output is square, side min(W, H), centered.
        #[test]
        fn prop_square_is_centered(width in 1u32..=10_000, height in 1u32..=10_000) {
            let rect = square_rect(width, height);
            let side = width.min(height);

            prop_assert_eq!(rect.width, side);
            prop_assert_eq!(rect.height, side);
            prop_assert_eq!(rect.x, (width - side) / 2);
            prop_assert_eq!(rect.y, (height - side) / 2);
            prop_assert!(rect.fits_within(width, height));
        }

        /// Property: The cropped bitmap really is square.
        #[test]
        fn prop_cropped_image_is_square(width in 1u32..=60, height in 1u32..=60) {
            let img = DecodedImage::new(width, height, vec![7u8; (width * height * 3) as usize]);
            let square = crop_to_square(&img).unwrap();

            prop_assert_eq!(square.width, square.height);
            prop_assert_eq!(square.width, width.min(height));
        }

        /// Property: Squaring the stored pixels and then correcting matches
        /// squaring the upright photo, for every orientation.
        #[test]
        fn prop_source_square_matches_upright_square(
            width in 1u32..=24,
            height in 1u32..=24,
            orientation in 1u32..=8,
        ) {
            let mut pixels = Vec::with_capacity((width * height * 3) as usize);
            for y in 0..height {
                for x in 0..width {
                    pixels.extend_from_slice(&[x as u8, y as u8, 0]);
                }
            }
            let source = SourceImage::new(
                DecodedImage::new(width, height, pixels),
                Orientation::from(orientation),
            );

            let via_stored = crop_source_to_square(&source).unwrap().upright().unwrap();
            let via_upright = crop_to_square(&source.upright().unwrap()).unwrap();
            prop_assert_eq!(via_stored, via_upright);
        }
    }
}
