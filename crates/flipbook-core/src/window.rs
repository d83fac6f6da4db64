//! Page window: which pages may be materialized by the renderer.
//!
//! The window grows monotonically with look-ahead as the reader flips and is
//! only shrunk by an explicit layout reset. Growth is a pure function of
//! `(old window, old index, new index, page count)` so it can be tested
//! without any viewer around it.

use crate::constants::{LOOKAHEAD_PAGES, RESET_RADIUS};
use crate::types::PageWindow;

impl PageWindow {
    /// Window shown when a document is first displayed: `[0, span]`
    pub fn initial(span: usize, total_pages: usize) -> Self {
        Self::clamped(0, span, total_pages)
    }

    /// Tight window of `radius` pages either side of `index`
    pub fn around(index: usize, radius: usize, total_pages: usize) -> Self {
        Self::clamped(
            index.saturating_sub(radius),
            index.saturating_add(radius),
            total_pages,
        )
    }

    /// Build a window with both bounds clamped to the document.
    ///
    /// A zero-page document degenerates to `[0, 0]`.
    pub fn clamped(low: usize, high: usize, total_pages: usize) -> Self {
        let last = total_pages.saturating_sub(1);
        let high = high.min(last);
        Self {
            low: low.min(high),
            high,
        }
    }

    pub fn contains(&self, page_index: usize) -> bool {
        page_index >= self.low && page_index <= self.high
    }

    /// Number of pages in the window
    pub fn len(&self) -> usize {
        self.high - self.low + 1
    }
}

/// Grow `window` for a flip from `old_index` to `new_index`.
///
/// Forward flips extend `high` to `new_index + lookahead`, backward flips
/// extend `low` to `new_index - lookahead`. The opposite bound is kept as is,
/// so the window never shrinks here.
pub fn grow_window(
    window: PageWindow,
    old_index: usize,
    new_index: usize,
    total_pages: usize,
    lookahead: usize,
) -> PageWindow {
    let last = total_pages.saturating_sub(1);
    let grown = if new_index > old_index {
        PageWindow {
            low: window.low,
            high: window.high.max(new_index.saturating_add(lookahead).min(last)),
        }
    } else if new_index < old_index {
        PageWindow {
            low: window.low.min(new_index.saturating_sub(lookahead)),
            high: window.high,
        }
    } else {
        window
    };
    PageWindow::clamped(grown.low, grown.high, total_pages)
}

/// Owns the page window for one loaded document.
///
/// `on_flip` and `on_layout_reset` are the only mutations.
#[derive(Debug, Clone)]
pub struct PageWindowManager {
    window: PageWindow,
    total_pages: usize,
    lookahead: usize,
    reset_radius: usize,
    jump_reset_span: Option<usize>,
}

impl PageWindowManager {
    pub fn new(total_pages: usize, initial_span: usize) -> Self {
        Self {
            window: PageWindow::initial(initial_span, total_pages),
            total_pages,
            lookahead: LOOKAHEAD_PAGES,
            reset_radius: RESET_RADIUS,
            jump_reset_span: None,
        }
    }

    pub fn with_lookahead(mut self, lookahead: usize) -> Self {
        self.lookahead = lookahead;
        self
    }

    pub fn with_reset_radius(mut self, radius: usize) -> Self {
        self.reset_radius = radius;
        self
    }

    /// Replace the window with a tight reset window on jumps wider than `span`
    pub fn with_jump_reset_span(mut self, span: Option<usize>) -> Self {
        self.jump_reset_span = span;
        self
    }

    pub fn window(&self) -> PageWindow {
        self.window
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Apply a completed flip. Returns true if the window changed.
    pub fn on_flip(&mut self, old_index: usize, new_index: usize) -> bool {
        let previous = self.window;
        let jump = old_index.abs_diff(new_index);

        self.window = match self.jump_reset_span {
            Some(span) if jump > span => {
                log::debug!(
                    "Jump of {} pages exceeds {}, resetting window around {}",
                    jump,
                    span,
                    new_index
                );
                PageWindow::around(new_index, self.reset_radius, self.total_pages)
            }
            _ => grow_window(
                self.window,
                old_index,
                new_index,
                self.total_pages,
                self.lookahead,
            ),
        };

        previous != self.window
    }

    /// Collapse the window around `current_index` after disruptive layout
    /// changes. Returns true if the window changed.
    pub fn on_layout_reset(&mut self, current_index: usize) -> bool {
        let previous = self.window;
        self.window = PageWindow::around(current_index, self.reset_radius, self.total_pages);
        previous != self.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_handles_degenerate_documents() {
        assert_eq!(PageWindow::clamped(0, 4, 0), PageWindow { low: 0, high: 0 });
        assert_eq!(PageWindow::clamped(3, 9, 1), PageWindow { low: 0, high: 0 });
    }

    #[test]
    fn initial_window_is_clamped() {
        assert_eq!(PageWindow::initial(4, 3), PageWindow { low: 0, high: 2 });
        assert_eq!(PageWindow::initial(4, 10), PageWindow { low: 0, high: 4 });
    }

    #[test]
    fn same_index_leaves_window_alone() {
        let window = PageWindow { low: 2, high: 7 };
        assert_eq!(grow_window(window, 5, 5, 10, 4), window);
    }

    #[test]
    fn jump_reset_only_applies_past_span() {
        let mut manager = PageWindowManager::new(100, 4).with_jump_reset_span(Some(10));

        assert!(manager.on_flip(0, 8));
        assert_eq!(manager.window(), PageWindow { low: 0, high: 12 });

        assert!(manager.on_flip(8, 50));
        assert_eq!(manager.window(), PageWindow { low: 48, high: 52 });
    }
}
