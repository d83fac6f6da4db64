use flipbook_core::*;
use proptest::prelude::*;

#[test]
fn test_forward_then_backward_flip_scenario() {
    let mut manager = PageWindowManager::new(10, constants::INITIAL_WINDOW_SPAN);
    assert_eq!(manager.window(), PageWindow { low: 0, high: 4 });

    // min(6 + 4, 9) = 9
    manager.on_flip(0, 6);
    assert_eq!(manager.window(), PageWindow { low: 0, high: 9 });

    manager.on_flip(6, 2);
    assert_eq!(manager.window(), PageWindow { low: 0, high: 9 });
}

#[test]
fn test_backward_flip_grows_low_bound() {
    let window = PageWindow { low: 18, high: 24 };
    let grown = grow_window(window, 20, 12, 40, 4);
    assert_eq!(grown, PageWindow { low: 8, high: 24 });
}

#[test]
fn test_forward_flip_keeps_wider_high_bound() {
    let window = PageWindow { low: 0, high: 30 };
    let grown = grow_window(window, 10, 12, 40, 4);
    assert_eq!(grown, PageWindow { low: 0, high: 30 });
}

#[test]
fn test_layout_reset_collapses_window() {
    let mut manager = PageWindowManager::new(50, 4);
    manager.on_flip(0, 30);
    assert_eq!(manager.window(), PageWindow { low: 0, high: 34 });

    assert!(manager.on_layout_reset(30));
    assert_eq!(manager.window(), PageWindow { low: 28, high: 32 });

    // Idempotent
    assert!(!manager.on_layout_reset(30));
}

#[test]
fn test_layout_reset_near_edges() {
    let mut manager = PageWindowManager::new(6, 4);
    manager.on_layout_reset(0);
    assert_eq!(manager.window(), PageWindow { low: 0, high: 2 });

    manager.on_layout_reset(5);
    assert_eq!(manager.window(), PageWindow { low: 3, high: 5 });
}

#[test]
fn test_single_page_document() {
    let mut manager = PageWindowManager::new(1, 4);
    assert_eq!(manager.window(), PageWindow { low: 0, high: 0 });
    manager.on_flip(0, 3);
    assert_eq!(manager.window(), PageWindow { low: 0, high: 0 });
    manager.on_layout_reset(0);
    assert_eq!(manager.window(), PageWindow { low: 0, high: 0 });
}

#[test]
fn test_large_jump_grows_incrementally_by_default() {
    let mut manager = PageWindowManager::new(100, 4);
    manager.on_flip(0, 60);
    assert_eq!(manager.window(), PageWindow { low: 0, high: 64 });
    assert_eq!(manager.window().len(), 65);
}

/// Reachable page indices for a sequence of raw flip targets
fn flip_sequence() -> impl Strategy<Value = (usize, Vec<usize>)> {
    (1usize..60).prop_flat_map(|total| (Just(total), prop::collection::vec(0..total + 5, 1..40)))
}

proptest! {
    #[test]
    fn prop_window_contains_current_page((total, flips) in flip_sequence()) {
        let options = EngineOptions::default();
        let mut store = ViewerStateStore::new(total, &options);

        for target in flips {
            store.record_flip(target);
            let window = store.window();
            let current = store.current_page_index();
            prop_assert!(window.low <= current);
            prop_assert!(current <= window.high);
            prop_assert!(window.high <= total - 1);
        }
    }

    #[test]
    fn prop_forward_flips_never_shrink_low(total in 2usize..80, steps in prop::collection::vec(1usize..6, 1..30)) {
        let mut manager = PageWindowManager::new(total, 4);
        let mut current = 0;
        for step in steps {
            let next = (current + step).min(total - 1);
            let before = manager.window();
            manager.on_flip(current, next);
            prop_assert!(manager.window().low <= before.low);
            prop_assert!(manager.window().high >= before.high);
            current = next;
        }
    }

    #[test]
    fn prop_backward_flips_never_shrink_high(total in 2usize..80, steps in prop::collection::vec(1usize..6, 1..30)) {
        let mut manager = PageWindowManager::new(total, 4);
        let mut current = total - 1;
        manager.on_flip(0, current);
        for step in steps {
            let next = current.saturating_sub(step);
            let before = manager.window();
            manager.on_flip(current, next);
            prop_assert!(manager.window().high >= before.high);
            prop_assert!(manager.window().low <= before.low);
            current = next;
        }
    }

    #[test]
    fn prop_layout_reset_is_tight(total in 1usize..200, current_seed in 0usize..200) {
        let current = current_seed % total;
        let mut manager = PageWindowManager::new(total, 4);
        manager.on_flip(0, current);
        manager.on_layout_reset(current);
        let window = manager.window();
        prop_assert!(window.len() <= 5);
        prop_assert!(window.contains(current));
        prop_assert!(current - window.low <= 2);
        prop_assert!(window.high - current <= 2);
    }
}
