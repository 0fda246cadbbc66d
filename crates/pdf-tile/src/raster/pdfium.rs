//! Pdfium-backed page rendering

use std::path::PathBuf;

use crate::options::TileOptions;
use crate::types::*;
use image::RgbaImage;
use pdfium_render::prelude::*;
use tokio::sync::mpsc;

use super::{PageSource, encode_page_image, rasterize};

/// Environment variable naming a directory that holds the pdfium library
pub const PDFIUM_LIB_DIR_ENV: &str = "PDFIUM_DYNAMIC_LIB_PATH";

/// Initialize Pdfium: explicit directory from the environment, then the
/// vendored library, then the system library.
pub fn init_pdfium() -> Result<Pdfium> {
    let candidates = std::env::var_os(PDFIUM_LIB_DIR_ENV)
        .map(PathBuf::from)
        .into_iter()
        .chain(std::env::current_dir().ok().map(|mut p| {
            p.push("vendor/pdfium/lib");
            p
        }));

    for dir in candidates.filter(|dir| dir.exists()) {
        if let Ok(binding) =
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&dir))
        {
            log::debug!("Bound pdfium from {}", dir.display());
            return Ok(Pdfium::new(binding));
        }
    }

    Pdfium::bind_to_system_library()
        .map(Pdfium::new)
        .map_err(|e| TileError::RendererUnavailable(e.to_string()))
}

/// A loaded PDF rendered through pdfium
pub struct PdfiumSource<'a> {
    document: PdfDocument<'a>,
    render_scale: f32,
    jpeg_quality: u8,
}

impl<'a> PdfiumSource<'a> {
    /// Parse `bytes` as a PDF; failure is a decode error
    pub fn open(
        pdfium: &'a Pdfium,
        bytes: &'a [u8],
        render_scale: f32,
        jpeg_quality: u8,
    ) -> Result<Self> {
        let document = pdfium
            .load_pdf_from_byte_slice(bytes, None)
            .map_err(|e| TileError::Decode(e.to_string()))?;
        Ok(Self {
            document,
            render_scale,
            jpeg_quality,
        })
    }
}

impl PageSource for PdfiumSource<'_> {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn render_page(&mut self, page_index: usize) -> Result<PageRecord> {
        let render_error = |message: String| TileError::PageRender {
            page_index,
            message,
        };

        let page = self
            .document
            .pages()
            .get(page_index as u16)
            .map_err(|e| render_error(e.to_string()))?;

        let width_pt = page.width().value;
        let height_pt = page.height().value;

        let config = PdfRenderConfig::new().scale_page_by_factor(self.render_scale);
        let bitmap = page
            .render_with_config(&config)
            .map_err(|e| render_error(e.to_string()))?;

        let width_px = bitmap.width() as u32;
        let height_px = bitmap.height() as u32;
        let rgba = RgbaImage::from_raw(width_px, height_px, bitmap.as_rgba_bytes().to_vec())
            .ok_or_else(|| render_error("bitmap size does not match its pixel data".to_string()))?;

        let image = encode_page_image(&rgba, self.jpeg_quality)?;
        Ok(PageRecord::new(image, width_pt, height_pt))
    }
}

/// Decode and rasterize a whole PDF on a blocking thread.
///
/// Progress is forwarded through `progress_tx` as each page completes.
/// Pdfium is bound, used and dropped entirely inside the blocking task.
pub async fn rasterize_pdf(
    bytes: Vec<u8>,
    options: &TileOptions,
    progress_tx: Option<mpsc::UnboundedSender<Progress>>,
) -> Result<Vec<PageRecord>> {
    let render_scale = options.render_scale;
    let jpeg_quality = options.jpeg_quality;

    tokio::task::spawn_blocking(move || {
        let pdfium = init_pdfium()?;
        let mut source = PdfiumSource::open(&pdfium, &bytes, render_scale, jpeg_quality)?;
        rasterize(&mut source, |progress| {
            if let Some(tx) = &progress_tx {
                let _ = tx.send(progress);
            }
        })
    })
    .await?
}
