use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid document metadata: {0}")]
    InvalidMetadata(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Page count and physical page size of a loaded document.
///
/// Produced once by the document loader and never mutated; loading another
/// document replaces it wholesale.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "MetadataFields"))]
pub struct DocumentMetadata {
    total_pages: usize,
    page_width: f32,
    page_height: f32,
}

impl DocumentMetadata {
    pub fn new(total_pages: usize, page_width: f32, page_height: f32) -> Result<Self> {
        if total_pages == 0 {
            return Err(EngineError::InvalidMetadata(
                "Document has no pages".to_string(),
            ));
        }
        if !(page_width.is_finite() && page_width > 0.0) {
            return Err(EngineError::InvalidMetadata(format!(
                "Page width must be positive, got {}",
                page_width
            )));
        }
        if !(page_height.is_finite() && page_height > 0.0) {
            return Err(EngineError::InvalidMetadata(format!(
                "Page height must be positive, got {}",
                page_height
            )));
        }
        Ok(Self {
            total_pages,
            page_width,
            page_height,
        })
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn page_width(&self) -> f32 {
        self.page_width
    }

    pub fn page_height(&self) -> f32 {
        self.page_height
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct MetadataFields {
    total_pages: usize,
    page_width: f32,
    page_height: f32,
}

#[cfg(feature = "serde")]
impl TryFrom<MetadataFields> for DocumentMetadata {
    type Error = EngineError;

    fn try_from(fields: MetadataFields) -> Result<Self> {
        Self::new(fields.total_pages, fields.page_width, fields.page_height)
    }
}

/// Whether a document is available to the engine
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoadState {
    /// Waiting on the document loader
    #[default]
    Loading,
    /// Metadata is present
    Ready,
    /// The loader failed; nothing will be rendered
    Unavailable { reason: String },
}

/// Navigation position and zoom, the single source of truth for the viewer.
///
/// `current_page_index` is always the left page of the displayed spread.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewerState {
    pub current_page_index: usize,
    pub zoom_scale: f32,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            current_page_index: 0,
            zoom_scale: 1.0,
        }
    }
}

/// Contiguous inclusive range of pages allowed to be materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageWindow {
    pub low: usize,
    pub high: usize,
}

/// Per-page render decision handed to the page renderer
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderDecision {
    pub page_index: usize,
    /// Page may be rasterized; otherwise only an empty placeholder is laid out
    pub in_window: bool,
    /// Page is part of the spread currently on screen
    pub is_visible_spread_member: bool,
    pub device_pixel_ratio: f32,
}

/// Decisions for every page of the document at one point in time
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderPlan {
    pub window: PageWindow,
    /// Height each page is rendered at, in container pixels
    pub page_height: f32,
    pub decisions: Vec<RenderDecision>,
}

impl RenderPlan {
    /// Indices of pages the renderer should materialize
    pub fn rendered_pages(&self) -> impl Iterator<Item = usize> + '_ {
        self.decisions
            .iter()
            .filter(|d| d.in_window)
            .map(|d| d.page_index)
    }

    pub fn decision(&self, page_index: usize) -> Option<&RenderDecision> {
        self.decisions.get(page_index)
    }
}

/// Measured size of the flipbook container
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContainerSize {
    pub width: f32,
    pub height: f32,
}

impl ContainerSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Both dimensions are finite and positive
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}
