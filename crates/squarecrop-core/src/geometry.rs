//! View-space and pixel-space geometry.
//!
//! View coordinates are `f64` display units with the origin at the top-left
//! corner of the render rectangle. Pixel coordinates are `u32` and index the
//! upright source bitmap.

use serde::{Deserialize, Serialize};

/// A position in view units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width × height in view units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both sides strictly positive and finite.
    pub fn is_positive(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// The shorter side.
    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Axis-aligned rectangle in view units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of `size` centered on `center`.
    pub fn from_center(center: Point, size: Size) -> Self {
        Self::new(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// True if this rectangle lies inside `(0, 0, bounds.width, bounds.height)`.
    pub fn is_within(&self, bounds: Size) -> bool {
        self.x >= 0.0 && self.y >= 0.0 && self.right() <= bounds.width && self.bottom() <= bounds.height
    }
}

/// Axis-aligned rectangle in source pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether this rect lies within a `source_w` x `source_h` bitmap.
    pub fn fits_within(&self, source_w: u32, source_h: u32) -> bool {
        u64::from(self.x) + u64::from(self.width) <= u64::from(source_w)
            && u64::from(self.y) + u64::from(self.height) <= u64::from(source_h)
    }

    /// Whether this rect covers the full source (no actual crop).
    pub fn is_full(&self, source_w: u32, source_h: u32) -> bool {
        self.x == 0 && self.y == 0 && self.width == source_w && self.height == source_h
    }
}

/// Largest rectangle with the aspect ratio of `source` that fits inside
/// `container`, centered.
///
/// Returns an empty rectangle when either size is not positive.
pub fn aspect_fit(source: Size, container: Size) -> Rect {
    if !source.is_positive() || !container.is_positive() {
        return Rect::default();
    }

    let scale = (container.width / source.width).min(container.height / source.height);
    let width = source.width * scale;
    let height = source.height * scale;

    Rect::new(
        (container.width - width) / 2.0,
        (container.height - height) / 2.0,
        width,
        height,
    )
}

/// The bitmap as shown on screen.
///
/// `source` is the upright pixel size of the bitmap, `render` the size of the
/// aspect-fit rectangle it occupies in the view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayedImage {
    pub source: Size,
    pub render: Size,
}

impl DisplayedImage {
    pub fn new(source: Size, render: Size) -> Self {
        Self { source, render }
    }

    /// Aspect-fit `source_w` x `source_h` into `container`.
    pub fn fit(source_w: u32, source_h: u32, container: Size) -> Self {
        let source = Size::new(f64::from(source_w), f64::from(source_h));
        Self {
            source,
            render: aspect_fit(source, container).size(),
        }
    }

    /// Ratio between source pixels and render units, `max(scaleX, scaleY)`.
    pub fn scale(&self) -> f64 {
        source_scale(self.source, self.render)
    }
}

/// `max(source.width / render.width, source.height / render.height)`.
///
/// For an aspect-fit render both ratios agree up to rounding; taking the max
/// keeps the mapped rectangle from undershooting on the tighter axis.
pub(crate) fn source_scale(source: Size, render: Size) -> f64 {
    (source.width / render.width).max(source.height / render.height)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: The fitted rectangle keeps the source aspect ratio and
        /// stays inside the container.
        #[test]
        fn prop_aspect_fit_preserves_ratio(
            sw in 1.0f64..5000.0,
            sh in 1.0f64..5000.0,
            cw in 10.0f64..2000.0,
            ch in 10.0f64..2000.0,
        ) {
            let rect = aspect_fit(Size::new(sw, sh), Size::new(cw, ch));

            let source_ratio = sw / sh;
            let fit_ratio = rect.width / rect.height;
            prop_assert!((source_ratio - fit_ratio).abs() / source_ratio < 1e-9);

            prop_assert!(rect.x >= -1e-9 && rect.y >= -1e-9);
            prop_assert!(rect.right() <= cw + 1e-9 && rect.bottom() <= ch + 1e-9);
            // One side always touches the container.
            prop_assert!((rect.width - cw).abs() < 1e-6 || (rect.height - ch).abs() < 1e-6);
        }
    }
}
