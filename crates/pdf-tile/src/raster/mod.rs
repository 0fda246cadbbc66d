//! Rasterization of source documents
//!
//! Pages are rendered one at a time, strictly in document order, through a
//! [`PageSource`]. Any page failing aborts the whole run; no partial page
//! set is ever returned.

mod encode;
#[cfg(feature = "pdfium")]
mod pdfium;

pub use encode::encode_page_image;
#[cfg(feature = "pdfium")]
pub use pdfium::{PdfiumSource, init_pdfium, rasterize_pdf};

use crate::types::*;

/// A decoded document that can render its pages
pub trait PageSource {
    /// Number of pages in the document
    fn page_count(&self) -> usize;

    /// Render one page (0-based) into a record
    fn render_page(&mut self, page_index: usize) -> Result<PageRecord>;
}

/// Render every page of `source` in order.
///
/// `on_progress` is called once with `{0, total}` before the first page and
/// then after each page completes, so the last call is `{total, total}`.
pub fn rasterize<S: PageSource + ?Sized>(
    source: &mut S,
    mut on_progress: impl FnMut(Progress),
) -> Result<Vec<PageRecord>> {
    let total = source.page_count();
    on_progress(Progress::new(0, total));

    let mut pages = Vec::with_capacity(total);
    for page_index in 0..total {
        let record = source
            .render_page(page_index)
            .map_err(|e| match e {
                TileError::PageRender { .. } => e,
                other => TileError::PageRender {
                    page_index,
                    message: other.to_string(),
                },
            })?;
        log::debug!(
            "Rendered page {}/{} ({}x{}pt, {}x{}px)",
            page_index + 1,
            total,
            record.width_pt,
            record.height_pt,
            record.image.width_px,
            record.image.height_px
        );
        pages.push(record);
        on_progress(Progress::new(page_index + 1, total));
    }

    Ok(pages)
}
