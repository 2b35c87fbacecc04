//! Squarecrop Core - square photo cropping library
//!
//! This crate provides the crop engine behind a "take or pick a photo, then
//! crop it square" flow: decoding with orientation correction, the centered
//! square auto-crop, the interactive crop box with its view-to-pixel
//! mapping, encoding, and the application's image slots.
//!
//! Everything runs synchronously on the caller's thread except picking a
//! photo, which is modelled as a future (see [`source`]).

pub mod decode;
pub mod encode;
pub mod engine;
pub mod geometry;
pub mod source;
pub mod square;
pub mod state;
pub mod transform;

pub use engine::{CropBox, CropError, CropResult, CropSession, CropState, GestureEvent};
pub use geometry::{DisplayedImage, PixelRect, Point, Rect, Size};
pub use square::{crop_to_square, square_rect};
pub use state::{AppState, Slots, StateEvent};
pub use transform::{crop_pixels, map_to_source};

use thiserror::Error;

/// Invalid configuration values.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a positive, finite number (got {value})")]
    NotPositive { name: &'static str, value: f64 },

    #[error("min_size ({min}) must not exceed max_size ({max})")]
    InvertedLimits { min: f64, max: f64 },

    #[error("original_quality must be between 1 and 100 (got {0})")]
    QualityOutOfRange(u8),
}

/// Crop box sizing, in display units.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CropConfig {
    /// Side of the box when the crop view opens
    pub default_size: f64,
    /// Smallest side a pinch can produce
    pub min_size: f64,
    /// Largest side a pinch can produce
    pub max_size: f64,
    /// Whether pinch gestures resize the box
    pub resizable: bool,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            default_size: 200.0,
            min_size: 100.0,
            max_size: 400.0,
            resizable: true,
        }
    }
}

impl CropConfig {
    /// Create a new CropConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Check sizes are positive and the limits are ordered.
    ///
    /// `default_size` may lie outside the limits; it is clamped on open.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("default_size", self.default_size),
            ("min_size", self.min_size),
            ("max_size", self.max_size),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { name, value });
            }
        }
        if self.min_size > self.max_size {
            return Err(ConfigError::InvertedLimits {
                min: self.min_size,
                max: self.max_size,
            });
        }
        Ok(())
    }
}

/// Application-level settings.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Crop box sizing
    pub crop: CropConfig,
    /// JPEG quality (1-100) for the stored original photo
    pub original_quality: u8,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            crop: CropConfig::default(),
            original_quality: 90,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.original_quality) {
            return Err(ConfigError::QualityOutOfRange(self.original_quality));
        }
        self.crop.validate()
    }
}
