//! Interactive crop engine.
//!
//! A [`CropSession`] owns the crop box while the crop view is open, applies
//! drag and pinch gestures to it, and on confirmation maps it onto the
//! source bitmap to produce a [`CropResult`].

mod crop_box;
mod session;

pub use crop_box::CropBox;
pub use session::{CropError, CropResult, CropSession, CropState, GestureEvent};
