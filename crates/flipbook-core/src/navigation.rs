//! Direct navigation: keyboard arrows, prev/next buttons and the slider.
//!
//! None of these touch the viewer state. They resolve to a [`FlipCommand`]
//! for the flip widget, and the state changes when that widget reports the
//! completed turn.

use crate::slides::{page_index_to_slide, slide_to_page_index, spread_label, total_slides};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NavigationRequest {
    Previous,
    Next,
    /// 1-based slide from the slider
    Slide(usize),
    /// 0-based page index
    Page(usize),
}

/// Imperative commands accepted by the flip widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlipCommand {
    /// Animated turn backwards
    FlipPrev,
    /// Animated turn forwards
    FlipNext,
    /// Instant turn backwards
    TurnToPrevPage,
    /// Instant turn forwards
    TurnToNextPage,
    TurnToPage(usize),
}

/// Toolbar state derived from the current page
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavigationControls {
    pub can_go_previous: bool,
    pub can_go_next: bool,
    pub current_slide: usize,
    pub total_slides: usize,
    /// e.g. "4 - 5 of 12"
    pub label: String,
}

impl NavigationControls {
    pub fn new(current_page_index: usize, total_pages: usize) -> Self {
        Self {
            can_go_previous: current_page_index > 0,
            // The last spread starts at either of the final two pages
            can_go_next: current_page_index.saturating_add(2) < total_pages,
            current_slide: page_index_to_slide(current_page_index, total_pages),
            total_slides: total_slides(total_pages),
            label: format!(
                "{} of {}",
                spread_label(current_page_index, total_pages),
                total_pages
            ),
        }
    }
}

/// Turn a navigation request into a flip command, or `None` when the request
/// is disabled or would not move.
///
/// Narrow screens use the instant turns instead of the animated flips.
pub fn resolve_navigation(
    request: NavigationRequest,
    current_page_index: usize,
    total_pages: usize,
    narrow_screen: bool,
) -> Option<FlipCommand> {
    let controls = NavigationControls::new(current_page_index, total_pages);
    let last = total_pages.saturating_sub(1);

    match request {
        NavigationRequest::Previous if controls.can_go_previous => Some(if narrow_screen {
            FlipCommand::TurnToPrevPage
        } else {
            FlipCommand::FlipPrev
        }),
        NavigationRequest::Next if controls.can_go_next => Some(if narrow_screen {
            FlipCommand::TurnToNextPage
        } else {
            FlipCommand::FlipNext
        }),
        NavigationRequest::Previous | NavigationRequest::Next => None,
        NavigationRequest::Slide(slide) => {
            let slide = slide.clamp(1, controls.total_slides);
            let target = slide_to_page_index(slide).min(last);
            (target != current_page_index).then_some(FlipCommand::TurnToPage(target))
        }
        NavigationRequest::Page(page) => {
            let target = page.min(last);
            (target != current_page_index).then_some(FlipCommand::TurnToPage(target))
        }
    }
}

/// Click-to-flip is disabled on narrow screens
pub fn flip_by_click_disabled(screen_width: f32, narrow_screen_width: f32) -> bool {
    screen_width < narrow_screen_width
}
