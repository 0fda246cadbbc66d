//! Layout strategies
//!
//! Each [`LayoutMode`] maps to one strategy. A strategy turns the ordered
//! page sizes into the sheets of the merged output and, for modes that
//! have them, one single-sheet plan per page.

use crate::options::LayoutMode;

use super::{LayoutWarning, SheetGeometry, SheetPlan, pack_pages, plan_page_grid, stack_pages};

/// Sheets planned for one run
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutOutcome {
    /// Sheets of the merged output, in order
    pub merged: Vec<SheetPlan>,
    /// One sheet per source page (empty when the mode has none)
    pub per_page: Vec<SheetPlan>,
    pub warnings: Vec<LayoutWarning>,
}

/// A way of arranging source pages on output sheets
pub trait LayoutStrategy {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Plan every sheet for the given page sizes (width, height) in points
    fn plan(&self, page_sizes: &[(f32, f32)], geometry: &SheetGeometry) -> LayoutOutcome;
}

/// Pick the strategy for a mode
pub fn strategy_for(mode: LayoutMode, max_rows: Option<usize>) -> Box<dyn LayoutStrategy> {
    match mode {
        LayoutMode::Replicate => Box::new(ReplicateStrategy { max_rows }),
        LayoutMode::PackAll => Box::new(PackAllStrategy),
        LayoutMode::Stacked => Box::new(StackedStrategy { max_rows }),
    }
}

/// One grid sheet per page. Degenerate pages yield an empty sheet.
fn replicated_sheets(
    page_sizes: &[(f32, f32)],
    geometry: &SheetGeometry,
    max_rows: Option<usize>,
) -> (Vec<SheetPlan>, Vec<LayoutWarning>) {
    let mut sheets = Vec::with_capacity(page_sizes.len());
    let mut warnings = Vec::new();

    for (page_index, &(width, height)) in page_sizes.iter().enumerate() {
        let mut sheet = SheetPlan::new();
        match plan_page_grid(width, height, geometry, max_rows) {
            Ok(grid) => {
                log::debug!(
                    "Page {}: {}x{} grid, {} tile(s)",
                    page_index + 1,
                    grid.cols,
                    grid.rows,
                    grid.tile_count()
                );
                sheet.extend_tiles(page_index, &grid.positions);
            }
            Err(e) => warnings.push(LayoutWarning {
                page_index,
                message: e.to_string(),
            }),
        }
        sheets.push(sheet);
    }

    (sheets, warnings)
}

// =============================================================================
// Strategies
// =============================================================================

/// Sheet `i` of the merged output holds only copies of page `i`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplicateStrategy {
    pub max_rows: Option<usize>,
}

impl LayoutStrategy for ReplicateStrategy {
    fn name(&self) -> &'static str {
        "replicate"
    }

    fn plan(&self, page_sizes: &[(f32, f32)], geometry: &SheetGeometry) -> LayoutOutcome {
        let (sheets, warnings) = replicated_sheets(page_sizes, geometry, self.max_rows);
        LayoutOutcome {
            merged: sheets.clone(),
            per_page: sheets,
            warnings,
        }
    }
}

/// One copy of every page, shelf-packed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PackAllStrategy;

impl LayoutStrategy for PackAllStrategy {
    fn name(&self) -> &'static str {
        "pack-all"
    }

    fn plan(&self, page_sizes: &[(f32, f32)], geometry: &SheetGeometry) -> LayoutOutcome {
        let packed = pack_pages(page_sizes, geometry);
        LayoutOutcome {
            merged: packed.sheets,
            per_page: Vec::new(),
            warnings: packed.warnings,
        }
    }
}

/// Row blocks of consecutive pages share merged sheets; per-page sheets
/// match [`ReplicateStrategy`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StackedStrategy {
    pub max_rows: Option<usize>,
}

impl LayoutStrategy for StackedStrategy {
    fn name(&self) -> &'static str {
        "stacked"
    }

    fn plan(&self, page_sizes: &[(f32, f32)], geometry: &SheetGeometry) -> LayoutOutcome {
        let stacked = stack_pages(page_sizes, geometry, self.max_rows);
        let (per_page, _) = replicated_sheets(page_sizes, geometry, self.max_rows);
        LayoutOutcome {
            merged: stacked.sheets,
            per_page,
            warnings: stacked.warnings,
        }
    }
}
