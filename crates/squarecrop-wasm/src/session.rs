//! Crop session WASM bindings.
//!
//! The host renders the image and the crop box overlay; it forwards pointer
//! and pinch events here and redraws from [`JsCropSession::box_rect`].
//!
//! # Example
//!
//! ```typescript
//! const session = new JsCropSession({ min_size: 80 });
//! session.open_fit(source.upright_width, source.upright_height, view.width, view.height);
//!
//! overlay.onpointermove = (e) => session.drag_to(e.offsetX, e.offsetY);
//! pinch.onchange = (scale) => session.pinch_changed(scale);
//! pinch.onend = () => session.pinch_ended();
//!
//! saveButton.onclick = () => session.commit_to(source, appState);
//! ```

use squarecrop_core::engine::{CropBox, CropSession, CropState};
use squarecrop_core::geometry::{DisplayedImage, Point, Size};
use squarecrop_core::CropConfig;
use wasm_bindgen::prelude::*;

use crate::state::JsAppState;
use crate::types::JsSourceImage;

/// Interactive crop session for JavaScript.
#[wasm_bindgen]
pub struct JsCropSession {
    inner: CropSession,
}

#[wasm_bindgen]
impl JsCropSession {
    /// Create a session from a partial `CropConfig` object; `undefined` uses defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsCropSession, JsValue> {
        let config: CropConfig = if config.is_undefined() || config.is_null() {
            CropConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        let inner = CropSession::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }

    /// Create a session with the default 200-unit box and 100-400 pinch limits.
    pub fn with_defaults() -> JsCropSession {
        Self {
            inner: CropSession::default(),
        }
    }

    /// Open over an image whose render rectangle is already known.
    pub fn open(
        &mut self,
        source_width: u32,
        source_height: u32,
        render_width: f64,
        render_height: f64,
    ) -> Result<(), JsValue> {
        let displayed = DisplayedImage::new(
            Size::new(f64::from(source_width), f64::from(source_height)),
            Size::new(render_width, render_height),
        );
        self.inner
            .open(displayed)
            .map(|_| ())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Open over an image aspect-fit into a `container_width` x `container_height` view.
    pub fn open_fit(
        &mut self,
        source_width: u32,
        source_height: u32,
        container_width: f64,
        container_height: f64,
    ) -> Result<(), JsValue> {
        let displayed = DisplayedImage::fit(
            source_width,
            source_height,
            Size::new(container_width, container_height),
        );
        self.inner
            .open(displayed)
            .map(|_| ())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// One of "idle", "editing", "committed", "closed".
    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        state_name(self.inner.state()).to_string()
    }

    /// `[center_x, center_y, size]`, or `undefined` when not editing.
    pub fn crop_box(&self) -> Option<Vec<f64>> {
        self.inner
            .crop_box()
            .map(|b| vec![b.center.x, b.center.y, b.size])
    }

    /// `[x, y, width, height]` of the box for drawing, or `undefined`.
    pub fn box_rect(&self) -> Option<Vec<f64>> {
        self.inner.crop_box().map(|b| {
            let rect = b.rect();
            vec![rect.x, rect.y, rect.width, rect.height]
        })
    }

    /// `[width, height]` of the render rectangle, or `undefined`.
    pub fn render_size(&self) -> Option<Vec<f64>> {
        self.inner
            .displayed()
            .map(|d| vec![d.render.width, d.render.height])
    }

    /// Returns true if the box moved.
    pub fn drag_to(&mut self, x: f64, y: f64) -> bool {
        changed(self.inner.drag_to(Point::new(x, y)))
    }

    pub fn drag_ended(&mut self) {
        self.inner.drag_ended();
    }

    /// Returns true if the box was resized.
    pub fn pinch_changed(&mut self, scale: f64) -> bool {
        changed(self.inner.pinch_changed(scale))
    }

    pub fn pinch_ended(&mut self) {
        self.inner.pinch_ended();
    }

    /// Compute the crop and return it as PNG bytes.
    ///
    /// The session stays open on failure.
    pub fn confirm(&mut self, source: &JsSourceImage) -> Result<Vec<u8>, JsValue> {
        let result = self
            .inner
            .confirm(source.inner())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        result
            .encode_png()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Confirm, store into `state`, and close. Returns whether a crop was stored.
    pub fn commit_to(&mut self, source: &JsSourceImage, state: &mut JsAppState) -> bool {
        self.inner.commit_to(source.inner(), state.inner_mut())
    }

    pub fn cancel(&mut self) {
        self.inner.cancel();
    }
}

fn changed(crop_box: Option<CropBox>) -> bool {
    crop_box.is_some()
}

fn state_name(state: CropState) -> &'static str {
    match state {
        CropState::Idle => "idle",
        CropState::Editing => "editing",
        CropState::Committed => "committed",
        CropState::Closed => "closed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editing(width: u32, height: u32, view: f64) -> JsCropSession {
        let mut session = JsCropSession::with_defaults();
        session
            .inner
            .open(DisplayedImage::fit(width, height, Size::new(view, view)))
            .unwrap();
        session
    }

    #[test]
    fn test_initial_state() {
        let session = JsCropSession::with_defaults();
        assert_eq!(session.state(), "idle");
        assert!(session.crop_box().is_none());
        assert!(session.box_rect().is_none());
    }

    #[test]
    fn test_gestures_update_box() {
        let mut session = editing(1000, 1000, 600.0);
        assert_eq!(session.state(), "editing");
        assert_eq!(session.crop_box(), Some(vec![300.0, 300.0, 200.0]));

        assert!(session.drag_to(150.0, 450.0));
        assert!(session.pinch_changed(1.5));
        session.pinch_ended();

        assert_eq!(session.crop_box(), Some(vec![150.0, 450.0, 300.0]));
        assert_eq!(session.box_rect(), Some(vec![0.0, 300.0, 300.0, 300.0]));
    }

    #[test]
    fn test_commit_to_state() {
        let mut session = editing(400, 300, 400.0);
        let mut state = JsAppState::with_defaults();
        let source = JsSourceImage::new(400, 300, vec![50u8; 400 * 300 * 3], 1);

        assert!(session.commit_to(&source, &mut state));
        assert_eq!(session.state(), "closed");
        assert!(state.cropped().is_some());
        assert!(!session.drag_to(1.0, 1.0));
    }

    #[test]
    fn test_cancel() {
        let mut session = editing(400, 300, 400.0);
        session.cancel();
        assert_eq!(session.state(), "closed");
        assert!(session.render_size().is_none());
    }
}
