use crate::layout::{SheetGeometry, strategy_for};
use crate::options::TileOptions;
use crate::types::*;

/// What a run would produce, computed from page sizes alone
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TileStatistics {
    pub source_pages: usize,
    /// Sheets in the merged output
    pub merged_sheets: usize,
    /// Single-sheet outputs (one per page, or none in pack-all mode)
    pub per_page_outputs: usize,
    /// Tiles each source page contributes to the merged output
    pub tiles_per_page: Vec<usize>,
    pub total_tiles: usize,
    /// Pages that would produce no tiles
    pub skipped_pages: usize,
}

/// Calculate statistics for tiling pages of the given sizes
pub fn calculate_statistics(
    page_sizes: &[(f32, f32)],
    options: &TileOptions,
    geometry: &SheetGeometry,
) -> Result<TileStatistics> {
    options.validate()?;

    if page_sizes.is_empty() {
        return Ok(TileStatistics::default());
    }

    let outcome = strategy_for(options.mode, options.max_rows).plan(page_sizes, geometry);

    let mut tiles_per_page = vec![0; page_sizes.len()];
    for placement in outcome.merged.iter().flat_map(|s| &s.placements) {
        tiles_per_page[placement.page_index] += 1;
    }

    Ok(TileStatistics {
        source_pages: page_sizes.len(),
        merged_sheets: outcome.merged.len(),
        per_page_outputs: outcome.per_page.len(),
        total_tiles: tiles_per_page.iter().sum(),
        tiles_per_page,
        skipped_pages: outcome.warnings.len(),
    })
}
