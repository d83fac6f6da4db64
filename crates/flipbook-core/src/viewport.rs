//! Viewport orchestration: container size, scale and layout resets.

use crate::debounce::Debounce;
use crate::scale::SpreadGeometry;
use crate::state::ViewerStateStore;
use crate::types::{ContainerSize, DocumentMetadata};
use std::time::{Duration, Instant};

/// What a layout change produced
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutOutcome {
    /// New geometry if the scale changed
    pub geometry: Option<SpreadGeometry>,
    pub window_changed: bool,
}

#[derive(Debug, Clone)]
pub struct ViewportOrchestrator {
    container: Option<ContainerSize>,
    geometry: Option<SpreadGeometry>,
    fullscreen: bool,
    layout_settle: Debounce<()>,
}

impl ViewportOrchestrator {
    pub fn new(layout_settle: Duration) -> Self {
        Self {
            container: None,
            geometry: None,
            fullscreen: false,
            layout_settle: Debounce::new(layout_settle),
        }
    }

    /// Last valid geometry. Survives degenerate measurements.
    pub fn geometry(&self) -> Option<SpreadGeometry> {
        self.geometry
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn settle_deadline(&self) -> Option<Instant> {
        self.layout_settle.deadline()
    }

    /// Forget the geometry of a previous document
    pub fn clear_geometry(&mut self) {
        self.geometry = None;
        self.layout_settle.cancel();
    }

    fn measure(&mut self, size: ContainerSize) {
        if size.is_valid() {
            self.container = Some(size);
        } else {
            log::debug!(
                "Ignoring degenerate container size {}x{}",
                size.width,
                size.height
            );
        }
    }

    /// Recompute geometry for `metadata`. Returns the geometry if it changed.
    pub fn recompute(&mut self, metadata: &DocumentMetadata) -> Option<SpreadGeometry> {
        let fitted = SpreadGeometry::fit(metadata, self.container?)?;
        if self.geometry == Some(fitted) {
            return None;
        }
        log::info!(
            "Scale {:.4}, spread {:.1}x{:.1}",
            fitted.scale,
            fitted.spread_width,
            fitted.spread_height
        );
        self.geometry = Some(fitted);
        Some(fitted)
    }

    /// Container resized: rescale now, and optionally schedule a window reset
    /// once the size stops changing.
    pub fn on_resize(
        &mut self,
        size: ContainerSize,
        metadata: Option<&DocumentMetadata>,
        now: Instant,
        reset_window: bool,
    ) -> Option<SpreadGeometry> {
        self.measure(size);
        if reset_window && size.is_valid() {
            self.layout_settle.schedule((), now);
        }
        metadata.and_then(|metadata| self.recompute(metadata))
    }

    /// Fullscreen entered or left.
    ///
    /// Measurement, then scale, then window reset. Any pending settle timer is
    /// superseded by the immediate reset.
    pub fn on_fullscreen_change(
        &mut self,
        fullscreen: bool,
        size: ContainerSize,
        metadata: Option<&DocumentMetadata>,
        store: Option<&mut ViewerStateStore>,
    ) -> LayoutOutcome {
        self.fullscreen = fullscreen;
        self.layout_settle.cancel();

        self.measure(size);
        let geometry = metadata.and_then(|metadata| self.recompute(metadata));
        let window_changed = store.is_some_and(|store| store.layout_reset());

        LayoutOutcome {
            geometry,
            window_changed,
        }
    }

    /// Fire the layout-settle reset if its quiet period has passed
    pub fn poll_settle(&mut self, now: Instant, store: Option<&mut ViewerStateStore>) -> bool {
        if self.layout_settle.poll(now).is_none() {
            return false;
        }
        store.is_some_and(|store| store.layout_reset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::EngineOptions;

    fn metadata() -> DocumentMetadata {
        DocumentMetadata::new(20, 600.0, 800.0).unwrap()
    }

    #[test]
    fn degenerate_resize_keeps_previous_scale() {
        let now = Instant::now();
        let mut viewport = ViewportOrchestrator::new(Duration::from_millis(500));
        let meta = metadata();

        let first = viewport
            .on_resize(ContainerSize::new(1200.0, 800.0), Some(&meta), now, false)
            .unwrap();
        assert_eq!(first.scale, 1.0);

        assert!(
            viewport
                .on_resize(ContainerSize::new(0.0, 800.0), Some(&meta), now, false)
                .is_none()
        );
        assert_eq!(viewport.geometry(), Some(first));
    }

    #[test]
    fn fullscreen_rescales_then_resets_window() {
        let now = Instant::now();
        let options = EngineOptions::default();
        let meta = metadata();
        let mut store = ViewerStateStore::new(meta.total_pages(), &options);
        let mut viewport = ViewportOrchestrator::new(options.layout_settle());

        viewport.on_resize(ContainerSize::new(1200.0, 800.0), Some(&meta), now, true);
        store.record_flip(10);
        assert_eq!(store.window().high, 14);

        let outcome = viewport.on_fullscreen_change(
            true,
            ContainerSize::new(2400.0, 1600.0),
            Some(&meta),
            Some(&mut store),
        );

        assert_eq!(outcome.geometry.map(|g| g.scale), Some(2.0));
        assert!(outcome.window_changed);
        assert_eq!(store.window().low, 8);
        assert_eq!(store.window().high, 12);
        assert!(viewport.is_fullscreen());
        // Pending settle from the resize was cancelled
        assert_eq!(viewport.settle_deadline(), None);
    }
}
