//! Shared constants for the flipbook engine
//!
//! Defaults for every tunable in [`EngineOptions`](crate::EngineOptions)
//! live here so the options, the pure helpers and the tests agree.

// =============================================================================
// Page Window
// =============================================================================

/// Pages materialized beyond the farthest page reached in the flip direction
pub const LOOKAHEAD_PAGES: usize = 4;

/// Half-width of the tight window used after a layout reset
pub const RESET_RADIUS: usize = 2;

/// Highest page index in the window when a document is first shown
pub const INITIAL_WINDOW_SPAN: usize = 4;

// =============================================================================
// Zoom
// =============================================================================

/// Quiescence required before a zoom value affects render fidelity
pub const ZOOM_DEBOUNCE_MS: u64 = 500;

/// Zoom above which the visible spread is rendered at boosted resolution
pub const ZOOM_BOOST_THRESHOLD: f32 = 1.7;

/// Upper bound on the device pixel ratio handed to the renderer
pub const MAX_DEVICE_PIXEL_RATIO: f32 = 5.0;

pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 5.0;

/// Scale increment applied per pinch step by the zoom widget
pub const PINCH_STEP: f32 = 2.0;

// =============================================================================
// Layout
// =============================================================================

/// Quiescence after a container resize before the page window is tightened
pub const LAYOUT_SETTLE_MS: u64 = 500;

/// Screens narrower than this disable click-to-flip and animated prev/next
pub const NARROW_SCREEN_WIDTH: f32 = 768.0;

/// Pages side by side in a spread
pub const PAGES_PER_SPREAD: usize = 2;

/// The flip widget is sized at this multiple of the fitted page and stretched
/// down to the container
pub const FLIP_WIDGET_OVERSIZE: f32 = 5.0;
