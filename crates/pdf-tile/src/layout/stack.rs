//! Stacked replicated grids
//!
//! Each page contributes a block of rows of centered copies, like its own
//! replicated grid, but blocks from consecutive pages share sheets. A new
//! sheet starts only when the next row would cross the bottom margin.

use super::{LAYOUT_EPSILON_PT, LayoutWarning, SheetGeometry, SheetPlan, plan_page_grid};

/// Result of stacking a run of pages
#[derive(Debug, Clone, PartialEq)]
pub struct StackResult {
    /// Sheets in order; never empty
    pub sheets: Vec<SheetPlan>,
    pub warnings: Vec<LayoutWarning>,
}

/// Stack every page's row block onto shared sheets.
///
/// # Arguments
/// * `page_sizes` - Source page sizes (width, height) in points, in order
/// * `geometry` - Output sheet
/// * `max_rows` - Optional cap on rows per page
pub fn stack_pages(
    page_sizes: &[(f32, f32)],
    geometry: &SheetGeometry,
    max_rows: Option<usize>,
) -> StackResult {
    let mut sheets = vec![SheetPlan::new()];
    let mut warnings = Vec::new();
    let mut cursor_y = geometry.margin_pt;

    for (page_index, &(width, height)) in page_sizes.iter().enumerate() {
        let grid = match plan_page_grid(width, height, geometry, max_rows) {
            Ok(grid) => grid,
            Err(e) => {
                warnings.push(LayoutWarning {
                    page_index,
                    message: e.to_string(),
                });
                continue;
            }
        };

        for _ in 0..grid.rows {
            if cursor_y + grid.tile.h > geometry.bottom_limit() + LAYOUT_EPSILON_PT {
                sheets.push(SheetPlan::new());
                cursor_y = geometry.margin_pt;
            }

            let row = grid.row_at(cursor_y);
            if let Some(sheet) = sheets.last_mut() {
                sheet.extend_tiles(page_index, &row);
            }
            cursor_y += grid.tile.h + geometry.margin_pt;
        }
    }

    StackResult { sheets, warnings }
}
