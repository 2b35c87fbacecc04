//! Mapping a view-space rectangle onto source pixels.

use log::debug;

use crate::geometry::{source_scale, PixelRect, Rect, Size};

/// Map `view_rect` (in render-rectangle units) onto a `source_w` x `source_h`
/// bitmap.
///
/// The rectangle is scaled by `max(source_w / render.width,
/// source_h / render.height)`, its edges rounded to the nearest pixel and
/// then intersected with the bitmap bounds, so a box hanging over an edge
/// keeps its far edge and loses the overhang.
///
/// Returns `None` when the render size is not positive or the clamped
/// rectangle has no area.
pub fn map_to_source(
    view_rect: Rect,
    render: Size,
    source_w: u32,
    source_h: u32,
) -> Option<PixelRect> {
    if !render.is_positive() || source_w == 0 || source_h == 0 {
        return None;
    }

    let source = Size::new(f64::from(source_w), f64::from(source_h));
    let scale = source_scale(source, render);

    let left = view_rect.x * scale;
    let top = view_rect.y * scale;
    let right = left + view_rect.width * scale;
    let bottom = top + view_rect.height * scale;

    debug!(
        "mapping view rect {:?} at scale {:.4}: origin ({:.2}, {:.2}) size ({:.2}, {:.2})",
        view_rect,
        scale,
        left,
        top,
        right - left,
        bottom - top
    );

    let left = left.round().clamp(0.0, source.width);
    let top = top.round().clamp(0.0, source.height);
    let right = right.round().clamp(0.0, source.width);
    let bottom = bottom.round().clamp(0.0, source.height);

    // NaN input fails these comparisons too.
    if !(right > left && bottom > top) {
        return None;
    }

    Some(PixelRect::new(
        left as u32,
        top as u32,
        (right - left) as u32,
        (bottom - top) as u32,
    ))
}
