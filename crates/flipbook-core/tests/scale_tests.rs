use flipbook_core::*;

#[test]
fn test_width_bound_scale() {
    // Two 600pt pages in 1000px: width is the tighter bound
    let scale = compute_scale(1000.0, 2000.0, 600.0, 800.0).unwrap();
    assert!((scale - 1000.0 / 1200.0).abs() < 1e-6);
}

#[test]
fn test_height_bound_scale() {
    let scale = compute_scale(3000.0, 400.0, 600.0, 800.0).unwrap();
    assert_eq!(scale, 0.5);
}

#[test]
fn test_degenerate_container() {
    assert_eq!(compute_scale(0.0, 400.0, 600.0, 800.0), None);
    assert_eq!(compute_scale(800.0, -1.0, 600.0, 800.0), None);
    assert_eq!(compute_scale(f32::NAN, 400.0, 600.0, 800.0), None);
}

#[test]
fn test_geometry_fits_container() {
    let metadata = DocumentMetadata::new(12, 612.0, 792.0).unwrap();
    let container = ContainerSize::new(1280.0, 720.0);
    let geometry = SpreadGeometry::fit(&metadata, container).unwrap();

    assert!(geometry.spread_width <= container.width + 1e-3);
    assert!(geometry.spread_height <= container.height + 1e-3);
    assert_eq!(geometry.page_height, geometry.spread_height);

    let (widget_width, widget_height) = geometry.flip_widget_size();
    assert!((widget_width - 612.0 * geometry.scale * 5.0).abs() < 1e-3);
    assert!((widget_height - 792.0 * geometry.scale * 5.0).abs() < 1e-3);
}

#[test]
fn test_invalid_metadata() {
    assert!(matches!(
        DocumentMetadata::new(0, 612.0, 792.0),
        Err(EngineError::InvalidMetadata(_))
    ));
    assert!(DocumentMetadata::new(3, 0.0, 792.0).is_err());
    assert!(DocumentMetadata::new(3, 612.0, f32::INFINITY).is_err());
}
