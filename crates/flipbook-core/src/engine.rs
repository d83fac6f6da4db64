//! The flipbook engine: every collaborator event goes through
//! [`FlipbookEngine::apply`], and the engine answers with the effects the
//! collaborators must act on.
//!
//! The engine is synchronous and owns no timers. Debounced work is released by
//! [`FlipbookEngine::tick`]; [`FlipbookEngine::next_deadline`] says when that
//! is next due.

use crate::fidelity::FidelityPolicy;
use crate::navigation::{
    FlipCommand, NavigationControls, NavigationRequest, flip_by_click_disabled, resolve_navigation,
};
use crate::options::EngineOptions;
use crate::scale::SpreadGeometry;
use crate::state::ViewerStateStore;
use crate::types::*;
use crate::viewport::ViewportOrchestrator;
use std::time::Instant;

/// Events reported by the collaborators around the engine
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Event {
    DocumentLoaded { metadata: DocumentMetadata },
    DocumentFailed { reason: String },
    /// The flip widget completed a turn
    Flipped { page_index: usize },
    /// The pan/zoom widget produced a transform frame
    Zoomed { scale: f32 },
    Resized { width: f32, height: f32 },
    FullscreenChanged { fullscreen: bool, width: f32, height: f32 },
    FullscreenFailed { reason: String },
    ScreenChanged { width: f32, device_pixel_ratio: f32 },
    Navigate { request: NavigationRequest },
}

/// Instructions for the collaborators
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Effect {
    LoadState { state: LoadState },
    Geometry { geometry: SpreadGeometry },
    /// Per-page render decisions for the page renderer
    Render { plan: RenderPlan },
    /// Command for the flip widget
    Turn { command: FlipCommand },
    FlipByClick { disabled: bool },
    /// Pointer input to the flip widget is blocked while zoomed in
    FlipInteraction { locked: bool },
    /// Non-fatal message for the user
    Notice { message: String },
}

/// Point-in-time copy of the engine state
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineSnapshot {
    pub load_state: LoadState,
    pub metadata: Option<DocumentMetadata>,
    pub viewer: ViewerState,
    pub settled_zoom: f32,
    pub window: Option<PageWindow>,
    pub geometry: Option<SpreadGeometry>,
    pub fullscreen: bool,
    pub flip_interaction_locked: bool,
}

#[derive(Debug, Clone)]
struct Screen {
    width: Option<f32>,
    device_pixel_ratio: f32,
}

pub struct FlipbookEngine {
    options: EngineOptions,
    fidelity: FidelityPolicy,
    load_state: LoadState,
    metadata: Option<DocumentMetadata>,
    store: Option<ViewerStateStore>,
    viewport: ViewportOrchestrator,
    screen: Screen,
    flip_locked: bool,
}

impl FlipbookEngine {
    pub fn new(options: EngineOptions) -> Self {
        if let Err(e) = options.validate() {
            log::warn!("Engine started with invalid options: {}", e);
        }
        Self {
            fidelity: options.fidelity(),
            viewport: ViewportOrchestrator::new(options.layout_settle()),
            options,
            load_state: LoadState::Loading,
            metadata: None,
            store: None,
            screen: Screen {
                width: None,
                device_pixel_ratio: 1.0,
            },
            flip_locked: false,
        }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn metadata(&self) -> Option<&DocumentMetadata> {
        self.metadata.as_ref()
    }

    /// Viewer state, or the reset state when no document is loaded
    pub fn viewer_state(&self) -> ViewerState {
        self.store
            .as_ref()
            .map(ViewerStateStore::state)
            .unwrap_or_default()
    }

    pub fn window(&self) -> Option<PageWindow> {
        self.store.as_ref().map(ViewerStateStore::window)
    }

    pub fn geometry(&self) -> Option<SpreadGeometry> {
        self.viewport.geometry()
    }

    pub fn base_device_pixel_ratio(&self) -> f32 {
        self.screen.device_pixel_ratio
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            load_state: self.load_state.clone(),
            metadata: self.metadata,
            viewer: self.viewer_state(),
            settled_zoom: self
                .store
                .as_ref()
                .map(ViewerStateStore::settled_zoom)
                .unwrap_or(1.0),
            window: self.window(),
            geometry: self.geometry(),
            fullscreen: self.viewport.is_fullscreen(),
            flip_interaction_locked: self.flip_locked,
        }
    }

    /// Render decisions for every page. `None` until a document is loaded and
    /// a valid container size has been measured.
    pub fn render_plan(&self) -> Option<RenderPlan> {
        let store = self.store.as_ref()?;
        let geometry = self.viewport.geometry()?;
        Some(self.fidelity.plan(
            store.total_pages(),
            store.window(),
            store.current_page_index(),
            store.settled_zoom(),
            self.screen.device_pixel_ratio,
            geometry.page_height,
        ))
    }

    pub fn navigation_controls(&self) -> Option<NavigationControls> {
        let store = self.store.as_ref()?;
        Some(NavigationControls::new(
            store.current_page_index(),
            store.total_pages(),
        ))
    }

    /// Earliest pending debounce deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        let zoom = self.store.as_ref().and_then(ViewerStateStore::zoom_deadline);
        match (zoom, self.viewport.settle_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Apply one collaborator event
    pub fn apply(&mut self, event: Event, now: Instant) -> Vec<Effect> {
        log::debug!("Applying {:?}", event);

        match event {
            Event::DocumentLoaded { metadata } => self.load_document(metadata),
            Event::DocumentFailed { reason } => self.fail_document(reason),
            Event::Flipped { page_index } => self.flip(page_index),
            Event::Zoomed { scale } => self.zoom(scale, now),
            Event::Resized { width, height } => self.resize(ContainerSize::new(width, height), now),
            Event::FullscreenChanged {
                fullscreen,
                width,
                height,
            } => self.fullscreen_changed(fullscreen, ContainerSize::new(width, height)),
            Event::FullscreenFailed { reason } => {
                log::warn!("Fullscreen request failed: {}", reason);
                vec![Effect::Notice {
                    message: format!("Failed to enable fullscreen: {}", reason),
                }]
            }
            Event::ScreenChanged {
                width,
                device_pixel_ratio,
            } => self.screen_changed(width, device_pixel_ratio),
            Event::Navigate { request } => self.navigate(request),
        }
    }

    /// Release debounced work whose quiet period has passed
    pub fn tick(&mut self, now: Instant) -> Vec<Effect> {
        let mut rerender = false;

        if let Some(store) = self.store.as_mut() {
            if let Some(zoom) = store.poll_zoom(now) {
                log::debug!("Zoom settled at {:.3}", zoom);
                rerender = true;
            }
        }

        if self.viewport.poll_settle(now, self.store.as_mut()) {
            log::debug!("Layout settled, page window reset to {:?}", self.window());
            rerender = true;
        }

        let mut effects = Vec::new();
        if rerender {
            self.push_render(&mut effects);
        }
        effects
    }

    fn push_render(&self, effects: &mut Vec<Effect>) {
        if let Some(plan) = self.render_plan() {
            effects.push(Effect::Render { plan });
        }
    }

    fn set_flip_lock(&mut self, locked: bool, effects: &mut Vec<Effect>) {
        if self.flip_locked != locked {
            self.flip_locked = locked;
            effects.push(Effect::FlipInteraction { locked });
        }
    }

    fn load_document(&mut self, metadata: DocumentMetadata) -> Vec<Effect> {
        if self.metadata.is_some() {
            log::info!("Replacing loaded document");
        }
        log::info!(
            "Document loaded: {} pages, {}x{}",
            metadata.total_pages(),
            metadata.page_width(),
            metadata.page_height()
        );

        self.metadata = Some(metadata);
        self.store = Some(ViewerStateStore::new(metadata.total_pages(), &self.options));
        self.load_state = LoadState::Ready;
        self.viewport.clear_geometry();

        let mut effects = vec![Effect::LoadState {
            state: LoadState::Ready,
        }];
        self.set_flip_lock(false, &mut effects);
        if let Some(geometry) = self.viewport.recompute(&metadata) {
            effects.push(Effect::Geometry { geometry });
        }
        self.push_render(&mut effects);
        effects
    }

    fn fail_document(&mut self, reason: String) -> Vec<Effect> {
        log::warn!("Document failed to load: {}", reason);

        self.metadata = None;
        self.store = None;
        self.viewport.clear_geometry();
        self.load_state = LoadState::Unavailable { reason };

        let mut effects = vec![Effect::LoadState {
            state: self.load_state.clone(),
        }];
        self.set_flip_lock(false, &mut effects);
        effects
    }

    fn flip(&mut self, page_index: usize) -> Vec<Effect> {
        let Some(store) = self.store.as_mut() else {
            log::warn!("Ignoring flip to {} with no document loaded", page_index);
            return Vec::new();
        };

        let outcome = store.record_flip(page_index);
        let mut effects = Vec::new();
        if outcome.page_changed || outcome.window_changed {
            self.push_render(&mut effects);
        }
        effects
    }

    fn zoom(&mut self, scale: f32, now: Instant) -> Vec<Effect> {
        let Some(store) = self.store.as_mut() else {
            log::debug!("Ignoring zoom with no document loaded");
            return Vec::new();
        };

        let mut effects = Vec::new();
        if let Some(zoom) = store.record_zoom(scale, now) {
            self.set_flip_lock(zoom > 1.0, &mut effects);
        }
        effects
    }

    fn resize(&mut self, size: ContainerSize, now: Instant) -> Vec<Effect> {
        let reset_window = self.options.reset_window_on_resize && self.store.is_some();
        let geometry = self
            .viewport
            .on_resize(size, self.metadata.as_ref(), now, reset_window);

        let mut effects = Vec::new();
        if let Some(geometry) = geometry {
            effects.push(Effect::Geometry { geometry });
            self.push_render(&mut effects);
        }
        effects
    }

    fn fullscreen_changed(&mut self, fullscreen: bool, size: ContainerSize) -> Vec<Effect> {
        log::info!(
            "{} fullscreen",
            if fullscreen { "Entered" } else { "Left" }
        );

        let outcome = self.viewport.on_fullscreen_change(
            fullscreen,
            size,
            self.metadata.as_ref(),
            self.store.as_mut(),
        );

        let mut effects = Vec::new();
        if let Some(geometry) = outcome.geometry {
            effects.push(Effect::Geometry { geometry });
        }
        if outcome.geometry.is_some() || outcome.window_changed {
            self.push_render(&mut effects);
        }
        effects
    }

    fn screen_changed(&mut self, width: f32, device_pixel_ratio: f32) -> Vec<Effect> {
        let mut effects = Vec::new();

        let was_disabled = self
            .screen
            .width
            .map(|w| flip_by_click_disabled(w, self.options.narrow_screen_width));
        let disabled = flip_by_click_disabled(width, self.options.narrow_screen_width);
        self.screen.width = Some(width);
        if was_disabled != Some(disabled) {
            effects.push(Effect::FlipByClick { disabled });
        }

        if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            if (device_pixel_ratio - self.screen.device_pixel_ratio).abs() > f32::EPSILON {
                self.screen.device_pixel_ratio = device_pixel_ratio;
                self.push_render(&mut effects);
            }
        } else {
            log::warn!("Ignoring invalid device pixel ratio {}", device_pixel_ratio);
        }

        effects
    }

    fn is_narrow_screen(&self) -> bool {
        self.screen
            .width
            .is_some_and(|w| flip_by_click_disabled(w, self.options.narrow_screen_width))
    }

    fn navigate(&mut self, request: NavigationRequest) -> Vec<Effect> {
        let Some(store) = self.store.as_ref() else {
            log::warn!("Ignoring {:?} with no document loaded", request);
            return Vec::new();
        };

        match resolve_navigation(
            request,
            store.current_page_index(),
            store.total_pages(),
            self.is_narrow_screen(),
        ) {
            Some(command) => vec![Effect::Turn { command }],
            None => {
                log::debug!("{:?} has nowhere to go", request);
                Vec::new()
            }
        }
    }
}

impl Default for FlipbookEngine {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}
