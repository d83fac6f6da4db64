use crate::constants::{FLIP_WIDGET_OVERSIZE, PAGES_PER_SPREAD};
use crate::types::{ContainerSize, DocumentMetadata};

/// Scale that fits two page widths and one page height in the container.
///
/// Returns `None` for degenerate geometry (non-positive or non-finite sizes);
/// callers keep their last valid scale.
pub fn compute_scale(
    container_width: f32,
    container_height: f32,
    page_width: f32,
    page_height: f32,
) -> Option<f32> {
    let container = ContainerSize::new(container_width, container_height);
    if !container.is_valid() {
        return None;
    }
    if !(page_width.is_finite() && page_width > 0.0 && page_height.is_finite() && page_height > 0.0)
    {
        return None;
    }

    let scale = (container_width / (PAGES_PER_SPREAD as f32 * page_width))
        .min(container_height / page_height);
    (scale.is_finite() && scale > 0.0).then_some(scale)
}

/// Pixel sizes derived from one scale
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpreadGeometry {
    pub scale: f32,
    /// Width of the two-page spread
    pub spread_width: f32,
    pub spread_height: f32,
    /// Height each page is rendered at
    pub page_height: f32,
}

impl SpreadGeometry {
    pub fn new(metadata: &DocumentMetadata, scale: f32) -> Self {
        let page_height = metadata.page_height() * scale;
        Self {
            scale,
            spread_width: metadata.page_width() * scale * PAGES_PER_SPREAD as f32,
            spread_height: page_height,
            page_height,
        }
    }

    /// Fit `metadata` into `container`, or `None` for degenerate geometry
    pub fn fit(metadata: &DocumentMetadata, container: ContainerSize) -> Option<Self> {
        compute_scale(
            container.width,
            container.height,
            metadata.page_width(),
            metadata.page_height(),
        )
        .map(|scale| Self::new(metadata, scale))
    }

    /// Nominal single-page size handed to the flip widget, which stretches it
    /// down to the spread
    pub fn flip_widget_size(&self) -> (f32, f32) {
        (
            self.spread_width / PAGES_PER_SPREAD as f32 * FLIP_WIDGET_OVERSIZE,
            self.page_height * FLIP_WIDGET_OVERSIZE,
        )
    }
}
