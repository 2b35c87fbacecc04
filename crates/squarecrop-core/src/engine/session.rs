//! Interactive crop session state machine.
//!
//! ```text
//! Idle --open--> Editing --confirm--> Committed --close--> Closed
//!                   |                                        ^
//!                   +-------------cancel / close-------------+
//! ```
//!
//! While editing, the session consumes two independent gesture streams:
//! drags move the box center to the pointer, pinches scale the box relative
//! to the size it had when the pinch began.

use log::{debug, warn};
use thiserror::Error;

use super::CropBox;
use crate::decode::{DecodedImage, SourceImage};
use crate::encode::{encode_png, EncodeError};
use crate::geometry::{DisplayedImage, PixelRect, Point, Size};
use crate::state::AppState;
use crate::transform::{crop_pixels, map_to_source};
use crate::{ConfigError, CropConfig};

/// Lifecycle of a crop view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum CropState {
    #[default]
    Idle,
    Editing,
    Committed,
    Closed,
}

/// A discrete input event from the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum GestureEvent {
    /// Pointer moved while dragging, in render-rectangle units
    DragChanged(Point),
    DragEnded,
    /// Pinch scale relative to the start of the current pinch
    PinchChanged(f64),
    PinchEnded,
}

/// Reasons a session operation produced nothing.
#[derive(Debug, Error)]
pub enum CropError {
    #[error("Operation requires an editing session, current state is {0:?}")]
    NotEditing(CropState),

    #[error("Crop session is already editing")]
    AlreadyEditing,

    #[error("Render rectangle has no area")]
    EmptyRender,

    #[error("Source image has no extractable pixel buffer")]
    UnextractablePixels,

    #[error("Crop rectangle has no area after clamping")]
    DegenerateRect,
}

/// The confirmed crop, in upright source pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropResult {
    pub rect: PixelRect,
    pub image: DecodedImage,
}

impl CropResult {
    /// Lossless encoding for storage.
    pub fn encode_png(&self) -> Result<Vec<u8>, EncodeError> {
        encode_png(&self.image.pixels, self.image.width, self.image.height)
    }
}

/// One crop view, from open to close.
#[derive(Debug, Clone)]
pub struct CropSession {
    config: CropConfig,
    state: CropState,
    displayed: Option<DisplayedImage>,
    crop_box: Option<CropBox>,
    /// Box size when the current (or next) pinch began.
    base_size: f64,
}

impl CropSession {
    /// An idle session for `config`; rejects configs that fail
    /// [`CropConfig::validate`].
    pub fn new(config: CropConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: CropConfig) -> Self {
        let base_size = config.default_size;
        Self {
            config,
            state: CropState::Idle,
            displayed: None,
            crop_box: None,
            base_size,
        }
    }

    pub fn state(&self) -> CropState {
        self.state
    }

    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    /// The box while editing; `None` in every other state.
    pub fn crop_box(&self) -> Option<CropBox> {
        self.crop_box
    }

    pub fn displayed(&self) -> Option<DisplayedImage> {
        self.displayed
    }

    /// Show the crop box over `displayed`, centered at the default size.
    pub fn open(&mut self, displayed: DisplayedImage) -> Result<CropBox, CropError> {
        if self.state == CropState::Editing {
            return Err(CropError::AlreadyEditing);
        }
        if !displayed.render.is_positive() {
            return Err(CropError::EmptyRender);
        }

        self.displayed = Some(displayed);
        let (min, max) = self.size_limits();
        let size = self.config.default_size.clamp(min, max);
        let crop_box = CropBox::new(displayed.render.center(), size);

        self.base_size = size;
        self.crop_box = Some(crop_box);
        self.state = CropState::Editing;

        debug!(
            "crop view opened: render {:?}, box {:?}",
            displayed.render, crop_box
        );
        Ok(crop_box)
    }

    /// Move the box center to `location`, clamped to the render rectangle.
    ///
    /// Ignored (returns `None`) outside editing or for non-finite input.
    pub fn drag_to(&mut self, location: Point) -> Option<CropBox> {
        if !(location.x.is_finite() && location.y.is_finite()) {
            return None;
        }
        let (render, current) = self.editing()?;

        let moved = CropBox::new(location, current.size).clamped_within(render);
        self.crop_box = Some(moved);
        debug!("drag to ({:.1}, {:.1}): box center {:?}", location.x, location.y, moved.center);
        Some(moved)
    }

    pub fn drag_ended(&mut self) {
        if let Some(crop_box) = self.crop_box {
            debug!("drag ended at {:?}", crop_box.center);
        }
    }

    /// Resize to `base_size * scale`, clamped to the size limits.
    ///
    /// `scale` is relative to the start of the current pinch, so repeated
    /// updates within one pinch replace rather than compound each other.
    pub fn pinch_changed(&mut self, scale: f64) -> Option<CropBox> {
        if !self.config.resizable || !(scale.is_finite() && scale > 0.0) {
            return None;
        }
        let (render, current) = self.editing()?;

        let (min, max) = self.size_limits();
        let size = (self.base_size * scale).clamp(min, max);
        let resized = CropBox::new(current.center, size).clamped_within(render);
        self.crop_box = Some(resized);
        debug!("pinch scale {:.3}: box size {:.1}", scale, size);
        Some(resized)
    }

    /// End the current pinch; its final size becomes the base for the next.
    pub fn pinch_ended(&mut self) {
        if self.state != CropState::Editing {
            return;
        }
        if let Some(crop_box) = self.crop_box {
            self.base_size = crop_box.size;
        }
    }

    /// Dispatch a gesture event; returns the updated box if it changed.
    pub fn handle(&mut self, event: GestureEvent) -> Option<CropBox> {
        match event {
            GestureEvent::DragChanged(location) => self.drag_to(location),
            GestureEvent::DragEnded => {
                self.drag_ended();
                None
            }
            GestureEvent::PinchChanged(scale) => self.pinch_changed(scale),
            GestureEvent::PinchEnded => {
                self.pinch_ended();
                None
            }
        }
    }

    /// Compute the crop of `source` selected by the current box.
    ///
    /// `source` is orientation-corrected first, then the box is mapped onto
    /// its upright pixels. On success the session moves to `Committed`; on
    /// failure it stays in `Editing`.
    pub fn confirm(&mut self, source: &SourceImage) -> Result<CropResult, CropError> {
        let (render, crop_box) = self.editing().ok_or(CropError::NotEditing(self.state))?;

        let upright = source.upright().ok_or(CropError::UnextractablePixels)?;
        let rect = map_to_source(crop_box.rect(), render, upright.width, upright.height)
            .ok_or(CropError::DegenerateRect)?;
        let image = crop_pixels(&upright, rect).ok_or(CropError::DegenerateRect)?;

        debug!(
            "confirmed crop {:?} of {}x{} source",
            rect, upright.width, upright.height
        );

        self.state = CropState::Committed;
        Ok(CropResult { rect, image })
    }

    /// Confirm, store the result in `state`, then close.
    ///
    /// Failures are logged and leave the cropped slot untouched. An editing
    /// session closes either way; outside editing nothing happens. Returns
    /// whether a new crop was stored.
    pub fn commit_to(&mut self, source: &SourceImage, state: &mut AppState) -> bool {
        if self.state != CropState::Editing {
            debug!("commit ignored in {:?} state", self.state);
            return false;
        }
        let stored = match self.confirm(source) {
            Ok(result) => match state.store_crop(&result) {
                Ok(()) => true,
                Err(e) => {
                    warn!("cropped image could not be stored: {e}");
                    false
                }
            },
            Err(e) => {
                warn!("crop produced no result: {e}");
                false
            }
        };
        self.close();
        stored
    }

    /// Close without confirming; the in-progress box is discarded.
    pub fn cancel(&mut self) {
        if self.state == CropState::Editing {
            debug!("crop cancelled");
        }
        self.close();
    }

    pub fn close(&mut self) {
        self.state = CropState::Closed;
        self.crop_box = None;
        self.displayed = None;
        self.base_size = self.config.default_size;
    }

    fn editing(&self) -> Option<(Size, CropBox)> {
        if self.state != CropState::Editing {
            return None;
        }
        Some((self.displayed?.render, self.crop_box?))
    }

    /// Size limits for the current render rectangle.
    ///
    /// Neither limit exceeds the render's shorter side, so a clamped box
    /// always fits.
    fn size_limits(&self) -> (f64, f64) {
        let limit = self
            .displayed
            .map(|d| d.render.min_side())
            .unwrap_or(f64::INFINITY);
        (self.config.min_size.min(limit), self.config.max_size.min(limit))
    }
}

impl Default for CropSession {
    fn default() -> Self {
        Self::with_valid_config(CropConfig::default())
    }
}
