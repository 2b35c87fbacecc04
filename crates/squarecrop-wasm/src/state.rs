//! Application state WASM bindings.
//!
//! Listeners are plain JavaScript functions called with the event name
//! (`"original_changed"`, `"cropped_changed"`, `"cleared"`) and the new
//! bytes of the changed slot as a `Uint8Array` (`undefined` when the slot
//! is empty or after `"cleared"`).
//!
//! Listeners run while the state is still borrowed by the call that
//! changed it, so they must read the bytes from the callback rather than
//! calling back into the state.
//!
//! ```typescript
//! state.subscribe((event, bytes) => {
//!   if (event === 'cropped_changed' && bytes) {
//!     preview.src = URL.createObjectURL(new Blob([bytes], { type: 'image/png' }));
//!   }
//! });
//! ```

use std::collections::HashMap;

use log::warn;
use squarecrop_core::state::{AppState, SubscriptionId};
use squarecrop_core::AppConfig;
use wasm_bindgen::prelude::*;

use crate::types::JsSourceImage;

/// Original and cropped image slots for JavaScript.
#[wasm_bindgen]
pub struct JsAppState {
    inner: AppState,
    subscriptions: HashMap<u32, SubscriptionId>,
    next_handle: u32,
}

#[wasm_bindgen]
impl JsAppState {
    /// Create state from a partial `AppConfig` object; `undefined` uses defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsAppState, JsValue> {
        let config: AppConfig = if config.is_undefined() || config.is_null() {
            AppConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        config
            .validate()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::wrap(AppState::from_config(&config)))
    }

    pub fn with_defaults() -> JsAppState {
        Self::wrap(AppState::default())
    }

    /// Original photo as JPEG bytes.
    pub fn original(&self) -> Option<Vec<u8>> {
        self.inner.original().map(<[u8]>::to_vec)
    }

    /// Cropped photo as PNG bytes.
    pub fn cropped(&self) -> Option<Vec<u8>> {
        self.inner.cropped().map(<[u8]>::to_vec)
    }

    #[wasm_bindgen(getter)]
    pub fn has_original(&self) -> bool {
        self.inner.original().is_some()
    }

    #[wasm_bindgen(getter)]
    pub fn has_cropped(&self) -> bool {
        self.inner.cropped().is_some()
    }

    /// Register `callback(event, bytes)` for every state change. Returns a
    /// handle for `unsubscribe`.
    pub fn subscribe(&mut self, callback: js_sys::Function) -> u32 {
        let id = self.inner.subscribe(move |event, slots| {
            let name = JsValue::from_str(event.name());
            let bytes = slots
                .changed(*event)
                .map(|bytes| JsValue::from(js_sys::Uint8Array::from(bytes)))
                .unwrap_or(JsValue::UNDEFINED);
            if let Err(err) = callback.call2(&JsValue::NULL, &name, &bytes) {
                warn!("state listener threw on {}: {:?}", event.name(), err);
            }
        });
        let handle = self.next_handle;
        self.next_handle = self.next_handle.wrapping_add(1);
        self.subscriptions.insert(handle, id);
        handle
    }

    /// Returns false if `handle` was not subscribed.
    pub fn unsubscribe(&mut self, handle: u32) -> bool {
        match self.subscriptions.remove(&handle) {
            Some(id) => self.inner.unsubscribe(id),
            None => false,
        }
    }

    /// Store a freshly picked photo and its centered square crop.
    pub fn accept_source(&mut self, source: &JsSourceImage) -> Result<(), JsValue> {
        self.inner
            .accept_source(source.inner())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

impl JsAppState {
    fn wrap(inner: AppState) -> Self {
        Self {
            inner,
            subscriptions: HashMap::new(),
            next_handle: 0,
        }
    }

    pub(crate) fn inner_mut(&mut self) -> &mut AppState {
        &mut self.inner
    }
}
