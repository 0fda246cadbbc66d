use std::fmt;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TileError {
    #[error("Failed to decode source document: {0}")]
    Decode(String),
    #[error("Failed to render page {}: {message}", page_index + 1)]
    PageRender { page_index: usize, message: String },
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF renderer unavailable: {0}")]
    RendererUnavailable(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, TileError>;

/// A rasterized page, encoded as a baseline RGB JPEG.
///
/// The encoded bytes are shared, so cloning a record (or placing the same
/// image many times) never copies the pixel data.
#[derive(Clone, PartialEq, Eq)]
pub struct PageImage {
    /// Encoded JPEG stream
    pub jpeg: Arc<[u8]>,
    /// Pixel width of the bitmap
    pub width_px: u32,
    /// Pixel height of the bitmap
    pub height_px: u32,
}

impl PageImage {
    pub fn new(jpeg: Vec<u8>, width_px: u32, height_px: u32) -> Self {
        Self {
            jpeg: jpeg.into(),
            width_px,
            height_px,
        }
    }
}

impl fmt::Debug for PageImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageImage")
            .field("jpeg_len", &self.jpeg.len())
            .field("width_px", &self.width_px)
            .field("height_px", &self.height_px)
            .finish()
    }
}

/// One rasterized source page.
///
/// Width and height come from the source page box, not from the bitmap.
/// A box without area is kept as-is; layout skips it with a warning.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRecord {
    pub image: PageImage,
    pub width_pt: f32,
    pub height_pt: f32,
}

impl PageRecord {
    pub fn new(image: PageImage, width_pt: f32, height_pt: f32) -> Self {
        Self {
            image,
            width_pt,
            height_pt,
        }
    }

    /// Page box size (width, height) in points
    pub fn size(&self) -> (f32, f32) {
        (self.width_pt, self.height_pt)
    }
}

/// Rasterization progress, reported after each page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

impl Progress {
    pub fn new(current: usize, total: usize) -> Self {
        Self { current, total }
    }

    /// True once every page has been rendered
    pub fn is_complete(&self) -> bool {
        self.current == self.total
    }
}

/// What an output artifact holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Every source page, across however many sheets the mode needs
    Merged,
    /// A single sheet for one source page (0-based index)
    PerPage(usize),
}

/// A serialized output document
#[derive(Clone, PartialEq, Eq)]
pub struct OutputArtifact {
    pub bytes: Vec<u8>,
    pub kind: ArtifactKind,
}

impl fmt::Debug for OutputArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputArtifact")
            .field("kind", &self.kind)
            .field("len", &self.bytes.len())
            .finish()
    }
}
