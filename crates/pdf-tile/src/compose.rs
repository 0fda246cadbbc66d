//! Sheet composition
//!
//! Turns rasterized pages into serialized output documents:
//! 1. Plan sheets with the strategy for the chosen layout mode
//! 2. Replay the plans through a [`SheetWriter`]
//! 3. Collect the merged document and any per-page documents

use crate::artifacts::ArtifactSet;
use crate::layout::{LayoutWarning, SheetGeometry, SheetPlan, strategy_for};
use crate::options::TileOptions;
use crate::render::{LopdfSheetWriter, SheetWriter};
use crate::types::*;

/// Result of one composition
#[derive(Debug, Default)]
pub struct ComposeOutput {
    pub artifacts: ArtifactSet,
    /// Pages that produced no tiles
    pub warnings: Vec<LayoutWarning>,
}

/// Compose pages onto A4 sheets with the lopdf writer
pub fn compose(pages: &[PageRecord], options: &TileOptions) -> Result<ComposeOutput> {
    compose_with(pages, options, &SheetGeometry::A4, LopdfSheetWriter::new)
}

/// Compose pages with a custom sheet geometry and writer backend.
///
/// `new_document` is called once for the merged output and once per
/// per-page output.
pub fn compose_with<W, F>(
    pages: &[PageRecord],
    options: &TileOptions,
    geometry: &SheetGeometry,
    new_document: F,
) -> Result<ComposeOutput>
where
    W: SheetWriter,
    F: Fn(&SheetGeometry) -> W,
{
    options.validate()?;

    if pages.is_empty() {
        return Ok(ComposeOutput::default());
    }

    let page_sizes: Vec<(f32, f32)> = pages.iter().map(PageRecord::size).collect();
    let strategy = strategy_for(options.mode, options.max_rows);
    let outcome = strategy.plan(&page_sizes, geometry);

    for warning in &outcome.warnings {
        log::warn!("No tiles placed for {}", warning);
    }

    let mut merged_doc = new_document(geometry);
    write_sheets(&mut merged_doc, &outcome.merged, pages)?;
    let merged_sheets = merged_doc.sheet_count();
    let merged = OutputArtifact {
        bytes: merged_doc.serialize()?,
        kind: ArtifactKind::Merged,
    };

    let per_page = outcome
        .per_page
        .iter()
        .enumerate()
        .map(|(page_index, sheet)| {
            let mut doc = new_document(geometry);
            write_sheets(&mut doc, std::slice::from_ref(sheet), pages)?;
            Ok(OutputArtifact {
                bytes: doc.serialize()?,
                kind: ArtifactKind::PerPage(page_index),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    log::info!(
        "Composed {} page(s) with {} layout: {} merged sheet(s), {} per-page output(s)",
        pages.len(),
        strategy.name(),
        merged_sheets,
        per_page.len()
    );

    Ok(ComposeOutput {
        artifacts: ArtifactSet {
            merged: Some(merged),
            per_page,
        },
        warnings: outcome.warnings,
    })
}

/// Replay sheet plans through a writer, one sheet per plan
fn write_sheets<W: SheetWriter>(
    writer: &mut W,
    sheets: &[SheetPlan],
    pages: &[PageRecord],
) -> Result<()> {
    for (sheet_index, sheet) in sheets.iter().enumerate() {
        writer.add_sheet();
        for placement in &sheet.placements {
            let page = pages.get(placement.page_index).ok_or_else(|| {
                TileError::Config(format!(
                    "Sheet {} references missing page {}",
                    sheet_index + 1,
                    placement.page_index + 1
                ))
            })?;
            writer.place_image(&page.image, &placement.rect)?;
        }
        log::debug!(
            "Sheet {}: {} tile(s)",
            sheet_index + 1,
            sheet.placements.len()
        );
    }
    Ok(())
}
