//! Application state: the original and cropped image slots.
//!
//! Slots hold encoded bytes (JPEG for the original, PNG for the crop).
//! Every mutation notifies subscribers synchronously, in subscription order,
//! and hands them the slot contents as of that event.

use std::fmt;

use log::{debug, warn};
use thiserror::Error;

use crate::decode::SourceImage;
use crate::encode::{encode_jpeg, encode_png, EncodeError};
use crate::engine::CropResult;
use crate::square::crop_to_square;
use crate::AppConfig;

/// A change to the application state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum StateEvent {
    OriginalChanged,
    CroppedChanged,
    Cleared,
}

impl StateEvent {
    pub fn name(&self) -> &'static str {
        match self {
            StateEvent::OriginalChanged => "original_changed",
            StateEvent::CroppedChanged => "cropped_changed",
            StateEvent::Cleared => "cleared",
        }
    }
}

/// Slot contents handed to listeners along with each event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slots<'a> {
    pub original: Option<&'a [u8]>,
    pub cropped: Option<&'a [u8]>,
}

impl<'a> Slots<'a> {
    /// The slot `event` changed; `None` after a clear.
    pub fn changed(&self, event: StateEvent) -> Option<&'a [u8]> {
        match event {
            StateEvent::OriginalChanged => self.original,
            StateEvent::CroppedChanged => self.cropped,
            StateEvent::Cleared => None,
        }
    }
}

/// Handle returned by [`AppState::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Errors from storing a picked photo.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("Source image has no extractable pixel buffer")]
    UnextractablePixels,

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

type Listener = Box<dyn FnMut(&StateEvent, Slots<'_>)>;

pub struct AppState {
    original: Option<Vec<u8>>,
    cropped: Option<Vec<u8>>,
    original_quality: u8,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl AppState {
    /// Empty state storing originals at `original_quality`.
    pub fn new(original_quality: u8) -> Self {
        Self {
            original: None,
            cropped: None,
            original_quality,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.original_quality)
    }

    /// Encoded original photo (JPEG).
    pub fn original(&self) -> Option<&[u8]> {
        self.original.as_deref()
    }

    /// Encoded cropped photo (PNG).
    pub fn cropped(&self) -> Option<&[u8]> {
        self.cropped.as_deref()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StateEvent, Slots<'_>) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn set_original(&mut self, bytes: Option<Vec<u8>>) {
        self.original = bytes;
        self.emit(StateEvent::OriginalChanged);
    }

    pub fn set_cropped(&mut self, bytes: Option<Vec<u8>>) {
        self.cropped = bytes;
        self.emit(StateEvent::CroppedChanged);
    }

    /// Store a freshly picked photo.
    ///
    /// The original slot gets the upright photo as JPEG. The cropped slot is
    /// replaced by its centered square as PNG, or emptied when no square can
    /// be extracted. Nothing changes if the photo itself has no pixels.
    pub fn accept_source(&mut self, source: &SourceImage) -> Result<(), StateError> {
        let upright = source.upright().ok_or(StateError::UnextractablePixels)?;
        let original = encode_jpeg(
            &upright.pixels,
            upright.width,
            upright.height,
            self.original_quality,
        )?;

        let cropped = match crop_to_square(&upright) {
            Some(square) => Some(encode_png(&square.pixels, square.width, square.height)?),
            None => {
                warn!("picked photo has no square region, clearing cropped image");
                None
            }
        };

        debug!(
            "accepted {}x{} photo ({} bytes)",
            upright.width,
            upright.height,
            original.len()
        );
        self.set_original(Some(original));
        self.set_cropped(cropped);
        Ok(())
    }

    /// Overwrite the cropped slot with `result`, encoded losslessly.
    pub fn store_crop(&mut self, result: &CropResult) -> Result<(), EncodeError> {
        let bytes = result.encode_png()?;
        debug!("storing {:?} crop ({} bytes)", result.rect, bytes.len());
        self.set_cropped(Some(bytes));
        Ok(())
    }

    /// Empty both slots.
    pub fn clear(&mut self) {
        self.original = None;
        self.cropped = None;
        self.emit(StateEvent::Cleared);
    }

    fn emit(&mut self, event: StateEvent) {
        let slots = Slots {
            original: self.original.as_deref(),
            cropped: self.cropped.as_deref(),
        };
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event, slots);
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("original_len", &self.original.as_ref().map(Vec::len))
            .field("cropped_len", &self.cropped.as_ref().map(Vec::len))
            .field("original_quality", &self.original_quality)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{DecodedImage, Orientation};
    use crate::geometry::PixelRect;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder(state: &mut AppState) -> (SubscriptionId, Rc<RefCell<Vec<StateEvent>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let id = state.subscribe(move |event, _| sink.borrow_mut().push(*event));
        (id, events)
    }

    fn source(width: u32, height: u32, orientation: Orientation) -> SourceImage {
        let pixels = vec![100u8; (width * height * 3) as usize];
        SourceImage::new(DecodedImage::new(width, height, pixels), orientation)
    }

    fn dimensions(bytes: &[u8]) -> (u32, u32) {
        let img = image::load_from_memory(bytes).unwrap();
        (img.width(), img.height())
    }

    #[test]
    fn test_new_state_is_empty() {
        let state = AppState::default();
        assert!(state.original().is_none());
        assert!(state.cropped().is_none());
    }

    #[test]
    fn test_accept_source_fills_both_slots() {
        let mut state = AppState::default();
        let (_, events) = recorder(&mut state);

        state.accept_source(&source(60, 40, Orientation::Normal)).unwrap();

        let original = state.original().unwrap();
        assert_eq!(&original[0..2], &[0xFF, 0xD8]);
        assert_eq!(dimensions(original), (60, 40));
        assert_eq!(dimensions(state.cropped().unwrap()), (40, 40));
        assert_eq!(
            *events.borrow(),
            vec![StateEvent::OriginalChanged, StateEvent::CroppedChanged]
        );
    }

    #[test]
    fn test_accept_source_stores_upright_original() {
        let mut state = AppState::default();
        state.accept_source(&source(60, 40, Orientation::Rotate90CW)).unwrap();

        assert_eq!(dimensions(state.original().unwrap()), (40, 60));
        assert_eq!(dimensions(state.cropped().unwrap()), (40, 40));
    }

    #[test]
    fn test_accept_source_square_centered_on_upright_photo() {
        let mut pixels = Vec::new();
        for y in 0..8u8 {
            for x in 0..11u8 {
                pixels.extend_from_slice(&[x * 20, y * 20, 0]);
            }
        }
        let source = SourceImage::new(DecodedImage::new(11, 8, pixels), Orientation::Rotate180);
        let mut state = AppState::default();
        state.accept_source(&source).unwrap();

        let stored = image::load_from_memory(state.cropped().unwrap())
            .unwrap()
            .into_rgb8();
        let expected = crop_to_square(&source.upright().unwrap()).unwrap();
        assert_eq!(stored.into_raw(), expected.pixels);
    }

    #[test]
    fn test_listeners_see_new_slot_contents() {
        let mut state = AppState::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        state.subscribe(move |event, slots| {
            sink.borrow_mut()
                .push((*event, slots.changed(*event).map(<[u8]>::len)));
        });

        state.set_cropped(Some(vec![1, 2, 3]));
        state.set_original(Some(vec![9]));
        state.clear();

        assert_eq!(
            *seen.borrow(),
            vec![
                (StateEvent::CroppedChanged, Some(3)),
                (StateEvent::OriginalChanged, Some(1)),
                (StateEvent::Cleared, None),
            ]
        );
    }

    #[test]
    fn test_accept_unextractable_source_changes_nothing() {
        let mut state = AppState::default();
        state.set_original(Some(vec![1]));
        let (_, events) = recorder(&mut state);

        let broken = SourceImage::upright_from(DecodedImage::new(10, 10, vec![]));
        let result = state.accept_source(&broken);

        assert!(matches!(result, Err(StateError::UnextractablePixels)));
        assert_eq!(state.original(), Some(&[1u8][..]));
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_store_crop_overwrites() {
        let mut state = AppState::default();
        state.set_cropped(Some(vec![0xAB]));

        let result = CropResult {
            rect: PixelRect::new(0, 0, 3, 3),
            image: DecodedImage::new(3, 3, vec![50u8; 27]),
        };
        state.store_crop(&result).unwrap();

        assert_eq!(dimensions(state.cropped().unwrap()), (3, 3));
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut state = AppState::default();
        let (id, events) = recorder(&mut state);

        state.set_cropped(None);
        assert!(state.unsubscribe(id));
        assert!(!state.unsubscribe(id));
        state.set_cropped(None);

        assert_eq!(*events.borrow(), vec![StateEvent::CroppedChanged]);
    }

    #[test]
    fn test_clear() {
        let mut state = AppState::default();
        let (_, events) = recorder(&mut state);
        state.accept_source(&source(8, 8, Orientation::Normal)).unwrap();
        state.clear();

        assert!(state.original().is_none());
        assert!(state.cropped().is_none());
        assert_eq!(events.borrow().last(), Some(&StateEvent::Cleared));
    }

    #[test]
    fn test_event_names() {
        assert_eq!(StateEvent::OriginalChanged.name(), "original_changed");
        assert_eq!(StateEvent::CroppedChanged.name(), "cropped_changed");
        assert_eq!(StateEvent::Cleared.name(), "cleared");
    }

    #[test]
    fn test_debug_hides_bytes() {
        let mut state = AppState::new(80);
        state.set_original(Some(vec![0; 16]));
        let text = format!("{state:?}");
        assert!(text.contains("original_len: Some(16)"));
        assert!(text.contains("original_quality: 80"));
    }
}
