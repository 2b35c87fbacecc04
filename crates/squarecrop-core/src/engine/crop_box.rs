//! The square crop box overlay.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect, Size};

/// A square box in view units, described by its center and side length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropBox {
    pub center: Point,
    pub size: f64,
}

impl CropBox {
    pub fn new(center: Point, size: f64) -> Self {
        Self { center, size }
    }

    /// The box as a view rectangle.
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.center, Size::new(self.size, self.size))
    }

    /// Move the center so the whole box lies within `(0, 0, bounds)`.
    ///
    /// On an axis shorter than the box, the box is centered on that axis.
    /// Clamping an already clamped box returns it unchanged.
    pub fn clamped_within(self, bounds: Size) -> Self {
        let half = self.size / 2.0;
        Self {
            center: Point::new(
                clamp_axis(self.center.x, half, bounds.width),
                clamp_axis(self.center.y, half, bounds.height),
            ),
            size: self.size,
        }
    }

    pub fn is_within(&self, bounds: Size) -> bool {
        self.rect().is_within(bounds)
    }
}

fn clamp_axis(value: f64, half: f64, extent: f64) -> f64 {
    if 2.0 * half >= extent {
        extent / 2.0
    } else {
        value.clamp(half, extent - half)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect() {
        let crop_box = CropBox::new(Point::new(100.0, 100.0), 200.0);
        assert_eq!(crop_box.rect(), Rect::new(0.0, 0.0, 200.0, 200.0));
    }

    #[test]
    fn test_clamp_inside_is_noop() {
        let crop_box = CropBox::new(Point::new(150.0, 112.5), 150.0);
        assert_eq!(crop_box.clamped_within(Size::new(300.0, 225.0)), crop_box);
    }

    #[test]
    fn test_clamp_near_edges() {
        let bounds = Size::new(300.0, 225.0);

        let top_left = CropBox::new(Point::new(-40.0, 10.0), 100.0).clamped_within(bounds);
        assert_eq!(top_left.center, Point::new(50.0, 50.0));

        let bottom_right = CropBox::new(Point::new(1000.0, 220.0), 100.0).clamped_within(bounds);
        assert_eq!(bottom_right.center, Point::new(250.0, 175.0));
        assert!(bottom_right.is_within(bounds));
    }

    #[test]
    fn test_clamp_box_larger_than_axis() {
        let clamped = CropBox::new(Point::new(10.0, 10.0), 200.0).clamped_within(Size::new(300.0, 150.0));
        assert_eq!(clamped.center, Point::new(100.0, 75.0));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: After clamping, the box lies fully within the bounds.
        #[test]
        fn prop_clamped_box_within_bounds(
            x in -1000.0f64..1000.0,
            y in -1000.0f64..1000.0,
            bw in 10.0f64..800.0,
            bh in 10.0f64..800.0,
            fraction in 0.01f64..=1.0,
        ) {
            let size = bw.min(bh) * fraction;
            let clamped = CropBox::new(Point::new(x, y), size).clamped_within(Size::new(bw, bh));
            let rect = clamped.rect();

            prop_assert!(rect.x >= -1e-9 && rect.y >= -1e-9);
            prop_assert!(rect.right() <= bw + 1e-9);
            prop_assert!(rect.bottom() <= bh + 1e-9);
        }

        /// Property: Clamping is idempotent.
        #[test]
        fn prop_clamp_idempotent(
            x in -1000.0f64..1000.0,
            y in -1000.0f64..1000.0,
            size in 1.0f64..1000.0,
            bw in 10.0f64..800.0,
            bh in 10.0f64..800.0,
        ) {
            let bounds = Size::new(bw, bh);
            let once = CropBox::new(Point::new(x, y), size).clamped_within(bounds);
            let twice = once.clamped_within(bounds);
            prop_assert_eq!(once, twice);
        }
    }
}
