//! Page-window and viewport synchronization engine for a two-page flipbook
//! viewer.
//!
//! The engine decides which pages of a document are materialized, at what
//! resolution, and what the authoritative navigation position is. Decoding,
//! page-turn animation and gesture recognition belong to the collaborators
//! that feed it [`Event`]s and act on its [`Effect`]s.

pub mod constants;
mod debounce;
mod engine;
mod fidelity;
mod navigation;
mod options;
mod scale;
mod slides;
mod state;
mod types;
mod viewport;
mod window;

pub use debounce::Debounce;
pub use engine::{Effect, EngineSnapshot, Event, FlipbookEngine};
pub use fidelity::{FidelityPolicy, is_in_active_spread, select_device_pixel_ratio};
pub use navigation::{
    FlipCommand, NavigationControls, NavigationRequest, flip_by_click_disabled, resolve_navigation,
};
pub use options::*;
pub use scale::{SpreadGeometry, compute_scale};
pub use slides::{page_index_to_slide, slide_to_page_index, spread_label, spread_of, total_slides};
pub use state::{FlipOutcome, ViewerStateStore};
pub use types::*;
pub use viewport::{LayoutOutcome, ViewportOrchestrator};
pub use window::{PageWindowManager, grow_window};
