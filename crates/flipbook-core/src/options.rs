use crate::constants::*;
use crate::fidelity::FidelityPolicy;
use crate::types::*;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Engine tuning. Missing fields in a config file take their defaults.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineOptions {
    // Page window
    pub lookahead_pages: usize,
    pub reset_radius: usize,
    pub initial_window_span: usize,
    /// Flips wider than this reset the window instead of growing it
    pub jump_reset_span: Option<usize>,

    // Debounce windows
    pub zoom_debounce_ms: u64,
    pub layout_settle_ms: u64,
    pub reset_window_on_resize: bool,

    // Render fidelity
    pub zoom_boost_threshold: f32,
    pub max_device_pixel_ratio: f32,

    // Zoom widget limits
    pub min_zoom: f32,
    pub max_zoom: f32,

    pub narrow_screen_width: f32,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            lookahead_pages: LOOKAHEAD_PAGES,
            reset_radius: RESET_RADIUS,
            initial_window_span: INITIAL_WINDOW_SPAN,
            jump_reset_span: None,
            zoom_debounce_ms: ZOOM_DEBOUNCE_MS,
            layout_settle_ms: LAYOUT_SETTLE_MS,
            reset_window_on_resize: true,
            zoom_boost_threshold: ZOOM_BOOST_THRESHOLD,
            max_device_pixel_ratio: MAX_DEVICE_PIXEL_RATIO,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            narrow_screen_width: NARROW_SCREEN_WIDTH,
        }
    }
}

impl EngineOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options: Self = serde_json::from_slice(&bytes)
            .map_err(|e| EngineError::Config(format!("Failed to parse config: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = self.to_json()?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| EngineError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.lookahead_pages == 0 {
            return Err(EngineError::Config(
                "Look-ahead must be at least one page".to_string(),
            ));
        }

        if self.zoom_debounce_ms == 0 || self.layout_settle_ms == 0 {
            return Err(EngineError::Config(
                "Debounce windows must be longer than zero".to_string(),
            ));
        }

        if !(self.min_zoom.is_finite() && self.min_zoom >= 1.0) {
            return Err(EngineError::Config(format!(
                "Minimum zoom must be at least 1, got {}",
                self.min_zoom
            )));
        }

        if !(self.max_zoom.is_finite() && self.max_zoom >= self.min_zoom) {
            return Err(EngineError::Config(format!(
                "Maximum zoom {} is below minimum zoom {}",
                self.max_zoom, self.min_zoom
            )));
        }

        if !(self.max_device_pixel_ratio.is_finite() && self.max_device_pixel_ratio > 0.0) {
            return Err(EngineError::Config(
                "Device pixel ratio cap must be positive".to_string(),
            ));
        }

        if !self.zoom_boost_threshold.is_finite() {
            return Err(EngineError::Config(
                "Zoom boost threshold must be finite".to_string(),
            ));
        }

        if !(self.narrow_screen_width.is_finite() && self.narrow_screen_width >= 0.0) {
            return Err(EngineError::Config(format!(
                "Narrow screen width must be a non-negative number, got {}",
                self.narrow_screen_width
            )));
        }

        Ok(())
    }

    pub fn zoom_debounce(&self) -> Duration {
        Duration::from_millis(self.zoom_debounce_ms)
    }

    pub fn layout_settle(&self) -> Duration {
        Duration::from_millis(self.layout_settle_ms)
    }

    pub fn fidelity(&self) -> FidelityPolicy {
        FidelityPolicy {
            boost_threshold: self.zoom_boost_threshold,
            max_device_pixel_ratio: self.max_device_pixel_ratio,
        }
    }

    pub fn zoom_limits(&self) -> ZoomLimits {
        ZoomLimits {
            min_scale: self.min_zoom,
            max_scale: self.max_zoom,
            ..ZoomLimits::default()
        }
    }
}

/// Configuration handed to the pan/zoom widget
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ZoomLimits {
    pub min_scale: f32,
    pub max_scale: f32,
    pub pinch_step: f32,
    pub double_click_enabled: bool,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min_scale: MIN_ZOOM,
            max_scale: MAX_ZOOM,
            pinch_step: PINCH_STEP,
            double_click_enabled: false,
        }
    }
}

impl ZoomLimits {
    /// Clamp a transform scale into range; non-finite values are rejected.
    ///
    /// A non-finite bound falls back to its default and an inverted range
    /// collapses onto `min_scale`.
    pub fn clamp(&self, scale: f32) -> Option<f32> {
        if !scale.is_finite() {
            return None;
        }
        let min = if self.min_scale.is_finite() {
            self.min_scale
        } else {
            MIN_ZOOM
        };
        let max = if self.max_scale.is_finite() {
            self.max_scale.max(min)
        } else {
            MAX_ZOOM.max(min)
        };
        Some(scale.max(min).min(max))
    }

    /// Panning padding is only allowed once zoomed in
    pub fn padding_disabled(&self, zoom_scale: f32) -> bool {
        zoom_scale <= 1.0
    }
}
