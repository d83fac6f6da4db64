//! Per-page render resolution.

use crate::constants::{MAX_DEVICE_PIXEL_RATIO, ZOOM_BOOST_THRESHOLD};
use crate::types::{PageWindow, RenderDecision, RenderPlan};

/// The two pages of the spread starting at `current_page_index`
pub fn is_in_active_spread(page_index: usize, current_page_index: usize) -> bool {
    page_index == current_page_index || current_page_index.checked_add(1) == Some(page_index)
}

/// Device pixel ratio for one page, using the default boost threshold and cap
pub fn select_device_pixel_ratio(
    page_index: usize,
    current_page_index: usize,
    zoom_scale: f32,
    base_dpr: f32,
) -> f32 {
    FidelityPolicy::default().device_pixel_ratio(
        page_index,
        current_page_index,
        zoom_scale,
        base_dpr,
    )
}

/// Threshold and cap for the zoom resolution boost
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FidelityPolicy {
    pub boost_threshold: f32,
    pub max_device_pixel_ratio: f32,
}

impl Default for FidelityPolicy {
    fn default() -> Self {
        Self {
            boost_threshold: ZOOM_BOOST_THRESHOLD,
            max_device_pixel_ratio: MAX_DEVICE_PIXEL_RATIO,
        }
    }
}

impl FidelityPolicy {
    /// Boosted ratio for the visible spread under heavy zoom, otherwise `base_dpr`
    pub fn device_pixel_ratio(
        &self,
        page_index: usize,
        current_page_index: usize,
        zoom_scale: f32,
        base_dpr: f32,
    ) -> f32 {
        if is_in_active_spread(page_index, current_page_index) && zoom_scale > self.boost_threshold
        {
            (zoom_scale * base_dpr).min(self.max_device_pixel_ratio)
        } else {
            base_dpr
        }
    }

    pub fn decide(
        &self,
        page_index: usize,
        window: PageWindow,
        current_page_index: usize,
        zoom_scale: f32,
        base_dpr: f32,
    ) -> RenderDecision {
        RenderDecision {
            page_index,
            in_window: window.contains(page_index),
            is_visible_spread_member: is_in_active_spread(page_index, current_page_index),
            device_pixel_ratio: self.device_pixel_ratio(
                page_index,
                current_page_index,
                zoom_scale,
                base_dpr,
            ),
        }
    }

    /// Decisions for every page of the document. Never cached; call again on
    /// each flip or settled zoom.
    pub fn plan(
        &self,
        total_pages: usize,
        window: PageWindow,
        current_page_index: usize,
        zoom_scale: f32,
        base_dpr: f32,
        page_height: f32,
    ) -> RenderPlan {
        RenderPlan {
            window,
            page_height,
            decisions: (0..total_pages)
                .map(|page| self.decide(page, window, current_page_index, zoom_scale, base_dpr))
                .collect(),
        }
    }
}
