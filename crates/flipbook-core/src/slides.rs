//! Mapping between 0-based page indices and 1-based slides.
//!
//! The first page is a lone cover; every later pair of pages forms one
//! spread. A trailing odd page is a lone back cover.

/// Number of slides for a document of `total_pages`
pub fn total_slides(total_pages: usize) -> usize {
    if total_pages % 2 == 0 {
        total_pages / 2 + 1
    } else {
        (total_pages - 1) / 2 + 1
    }
}

/// Slide showing `page_index`, clamped to `[1, total_slides]`
pub fn page_index_to_slide(page_index: usize, total_pages: usize) -> usize {
    let slide = page_index.saturating_add(3) / 2;
    slide.clamp(1, total_slides(total_pages).max(1))
}

/// First page index shown by `slide`
pub fn slide_to_page_index(slide: usize) -> usize {
    slide.saturating_mul(2).saturating_sub(3)
}

/// Spread containing `page_index`: the cover is spread 0, pages 1-2 spread 1
pub fn spread_of(page_index: usize) -> usize {
    page_index.div_ceil(2)
}

/// Pages visible for a spread starting at `current_page_index`, as shown in
/// the toolbar: `"4 - 5"` for a full spread, `"1"` for a cover.
pub fn spread_label(current_page_index: usize, total_pages: usize) -> String {
    let page_number = current_page_index.saturating_add(1);
    if page_number % 2 == 0 && page_number != total_pages {
        format!("{} - {}", page_number, page_number.saturating_add(1))
    } else {
        page_number.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spreads_pair_after_cover() {
        assert_eq!(spread_of(0), 0);
        assert_eq!(spread_of(1), 1);
        assert_eq!(spread_of(2), 1);
        assert_eq!(spread_of(3), 2);
    }

    #[test]
    fn label_shows_both_pages_of_a_spread() {
        assert_eq!(spread_label(0, 10), "1");
        assert_eq!(spread_label(1, 10), "2 - 3");
        assert_eq!(spread_label(9, 10), "10");
        // Even last page stands alone
        assert_eq!(spread_label(7, 8), "8");
    }
}
