//! Widget construction options.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_DPR, DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Options recognised when mounting a signature pad.
///
/// Field names follow the host's camelCase convention on the wire
/// (`width`, `height`, `initialValue`, `disabled`, `devicePixelRatio`).
/// Every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetConfig {
    /// Logical width of the drawing area in CSS pixels.
    pub width: f64,
    /// Logical height of the drawing area in CSS pixels.
    pub height: f64,
    /// Previously stored encoding to show on mount. Empty means start blank.
    pub initial_value: String,
    /// Ignore all drawing input. Preload, clear and export keep working.
    pub disabled: bool,
    /// Device pixel ratio, sampled once by the host at mount.
    pub device_pixel_ratio: f64,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            initial_value: String::new(),
            disabled: false,
            device_pixel_ratio: DEFAULT_DPR,
        }
    }
}

fn usable(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

impl WidgetConfig {
    /// Parse options from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed JSON or mistyped fields.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_initial_value(mut self, encoded: impl Into<String>) -> Self {
        self.initial_value = encoded.into();
        self
    }

    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn with_dpr(mut self, dpr: f64) -> Self {
        self.device_pixel_ratio = dpr;
        self
    }

    /// Replace unusable sizes and ratios (non-finite, zero, negative) with defaults.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if !usable(self.width) {
            log::warn!("width {} is unusable, using {DEFAULT_WIDTH}", self.width);
            self.width = DEFAULT_WIDTH;
        }
        if !usable(self.height) {
            log::warn!("height {} is unusable, using {DEFAULT_HEIGHT}", self.height);
            self.height = DEFAULT_HEIGHT;
        }
        if !usable(self.device_pixel_ratio) {
            log::warn!("device pixel ratio {} is unusable, using {DEFAULT_DPR}", self.device_pixel_ratio);
            self.device_pixel_ratio = DEFAULT_DPR;
        }
        self
    }
}
