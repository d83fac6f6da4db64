//! Viewer state store: current page and zoom.
//!
//! Two writers only. The flip widget reports completed turns through
//! [`ViewerStateStore::record_flip`], which moves the page and the page window
//! in one step. The pan/zoom widget reports every transform frame through
//! [`ViewerStateStore::record_zoom`]; that value is live immediately but only
//! becomes the *settled* zoom used for render fidelity after a quiet period.

use crate::debounce::Debounce;
use crate::options::{EngineOptions, ZoomLimits};
use crate::types::{PageWindow, ViewerState};
use crate::window::PageWindowManager;
use std::time::Instant;

/// What a flip changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlipOutcome {
    pub page_changed: bool,
    pub window_changed: bool,
}

#[derive(Debug, Clone)]
pub struct ViewerStateStore {
    state: ViewerState,
    windows: PageWindowManager,
    limits: ZoomLimits,
    zoom_debounce: Debounce<f32>,
    settled_zoom: f32,
}

impl ViewerStateStore {
    /// Fresh state for a document of `total_pages`: page 0, zoom 1
    pub fn new(total_pages: usize, options: &EngineOptions) -> Self {
        let windows = PageWindowManager::new(total_pages, options.initial_window_span)
            .with_lookahead(options.lookahead_pages)
            .with_reset_radius(options.reset_radius)
            .with_jump_reset_span(options.jump_reset_span);

        Self {
            state: ViewerState::default(),
            windows,
            limits: options.zoom_limits(),
            zoom_debounce: Debounce::new(options.zoom_debounce()),
            settled_zoom: ViewerState::default().zoom_scale,
        }
    }

    pub fn state(&self) -> ViewerState {
        self.state
    }

    pub fn current_page_index(&self) -> usize {
        self.state.current_page_index
    }

    /// Latest zoom reported by the zoom widget
    pub fn zoom_scale(&self) -> f32 {
        self.state.zoom_scale
    }

    /// Zoom after the debounce window; drives render fidelity
    pub fn settled_zoom(&self) -> f32 {
        self.settled_zoom
    }

    pub fn window(&self) -> PageWindow {
        self.windows.window()
    }

    pub fn total_pages(&self) -> usize {
        self.windows.total_pages()
    }

    /// Record a completed page turn. Out-of-range indices are clamped.
    pub fn record_flip(&mut self, new_index: usize) -> FlipOutcome {
        let last = self.total_pages().saturating_sub(1);
        let clamped = new_index.min(last);
        if clamped != new_index {
            log::warn!(
                "Flip to page {} is outside the document, clamping to {}",
                new_index,
                clamped
            );
        }

        let old_index = self.state.current_page_index;
        let window_changed = self.windows.on_flip(old_index, clamped);
        self.state.current_page_index = clamped;

        FlipOutcome {
            page_changed: old_index != clamped,
            window_changed,
        }
    }

    /// Record a zoom transform frame and restart the debounce period.
    ///
    /// Returns the stored (clamped) scale, or `None` if the value was rejected.
    pub fn record_zoom(&mut self, scale: f32, now: Instant) -> Option<f32> {
        let Some(clamped) = self.limits.clamp(scale) else {
            log::warn!("Ignoring non-finite zoom scale {}", scale);
            return None;
        };
        self.state.zoom_scale = clamped;
        self.zoom_debounce.schedule(clamped, now);
        Some(clamped)
    }

    pub fn zoom_deadline(&self) -> Option<Instant> {
        self.zoom_debounce.deadline()
    }

    /// Settle the pending zoom once quiet. Returns the new settled zoom if it
    /// differs from the previous one.
    pub fn poll_zoom(&mut self, now: Instant) -> Option<f32> {
        let zoom = self.zoom_debounce.poll(now)?;
        if (zoom - self.settled_zoom).abs() > f32::EPSILON {
            self.settled_zoom = zoom;
            Some(zoom)
        } else {
            None
        }
    }

    /// Tighten the window around the current page
    pub fn layout_reset(&mut self) -> bool {
        self.windows.on_layout_reset(self.state.current_page_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn store(total_pages: usize) -> ViewerStateStore {
        ViewerStateStore::new(total_pages, &EngineOptions::default())
    }

    #[test]
    fn flip_moves_page_and_window_together() {
        let mut store = store(10);
        let outcome = store.record_flip(6);

        assert_eq!(
            outcome,
            FlipOutcome {
                page_changed: true,
                window_changed: true
            }
        );
        assert_eq!(store.current_page_index(), 6);
        assert_eq!(store.window(), PageWindow { low: 0, high: 9 });
    }

    #[test]
    fn flip_past_end_is_clamped() {
        let mut store = store(5);
        store.record_flip(42);
        assert_eq!(store.current_page_index(), 4);
        assert!(store.window().contains(4));
    }

    #[test]
    fn zoom_is_live_but_settles_later() {
        let start = Instant::now();
        let mut store = store(10);

        assert_eq!(store.record_zoom(2.0, start), Some(2.0));
        assert_eq!(store.zoom_scale(), 2.0);
        assert_eq!(store.settled_zoom(), 1.0);

        assert_eq!(store.poll_zoom(start + Duration::from_millis(499)), None);
        assert_eq!(store.poll_zoom(start + Duration::from_millis(500)), Some(2.0));
        assert_eq!(store.settled_zoom(), 2.0);
    }

    #[test]
    fn zoom_is_clamped_to_limits() {
        let now = Instant::now();
        let mut store = store(10);
        assert_eq!(store.record_zoom(0.5, now), Some(1.0));
        assert_eq!(store.record_zoom(9.0, now), Some(5.0));
        assert_eq!(store.record_zoom(f32::NAN, now), None);
        assert_eq!(store.zoom_scale(), 5.0);
    }
}
