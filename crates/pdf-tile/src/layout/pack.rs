//! Greedy shelf packing
//!
//! Places one copy of each page strictly in input order, left to right and
//! top to bottom. A tile that would cross the right margin wraps to a new
//! row; a row that would cross the bottom margin starts a new sheet. There
//! is no backtracking or reordering, so the same input always packs the
//! same way.

use super::{
    FittedSize, LAYOUT_EPSILON_PT, LayoutWarning, SheetGeometry, SheetPlan, TilePosition,
    fit_to_sheet,
};

// =============================================================================
// Cursor
// =============================================================================

/// Packing state threaded from one placement to the next
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackCursor {
    /// Next tile's left edge
    pub x: f32,
    /// Current row's top edge
    pub y: f32,
    /// Tallest tile placed in the current row
    pub row_height: f32,
    /// Sheet the next tile lands on (0-based)
    pub sheet: usize,
}

/// Where one tile went
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackedTile {
    pub sheet: usize,
    pub rect: TilePosition,
}

impl PackCursor {
    /// Cursor at the top-left margin of the first sheet
    pub fn start(geometry: &SheetGeometry) -> Self {
        Self {
            x: geometry.margin_pt,
            y: geometry.margin_pt,
            row_height: 0.0,
            sheet: 0,
        }
    }

    /// Place one fitted tile, returning the advanced cursor and the tile.
    pub fn place(self, fitted: FittedSize, geometry: &SheetGeometry) -> (PackCursor, PackedTile) {
        let margin = geometry.margin_pt;
        let mut cursor = self;

        if cursor.x + fitted.w > geometry.right_limit() + LAYOUT_EPSILON_PT {
            cursor.x = margin;
            cursor.y += cursor.row_height + margin;
            cursor.row_height = 0.0;
        }

        if cursor.y + fitted.h > geometry.bottom_limit() + LAYOUT_EPSILON_PT {
            cursor.sheet += 1;
            cursor.x = margin;
            cursor.y = margin;
            cursor.row_height = 0.0;
        }

        let tile = PackedTile {
            sheet: cursor.sheet,
            rect: TilePosition::new(cursor.x, cursor.y, fitted.w, fitted.h),
        };

        cursor.x += fitted.w + margin;
        cursor.row_height = cursor.row_height.max(fitted.h);

        (cursor, tile)
    }
}

// =============================================================================
// Packing
// =============================================================================

/// Result of packing a run of pages
#[derive(Debug, Clone, PartialEq)]
pub struct PackResult {
    /// Sheets in order; never empty
    pub sheets: Vec<SheetPlan>,
    /// Pages skipped because they could not be fitted
    pub warnings: Vec<LayoutWarning>,
}

/// Pack one copy of every page onto as few sheets as the greedy rule allows.
///
/// # Arguments
/// * `page_sizes` - Source page sizes (width, height) in points, in order
/// * `geometry` - Output sheet
///
/// Pages whose geometry is degenerate are skipped with a warning; the
/// remaining pages still pack.
pub fn pack_pages(page_sizes: &[(f32, f32)], geometry: &SheetGeometry) -> PackResult {
    let mut sheets = vec![SheetPlan::new()];
    let mut warnings = Vec::new();
    let mut cursor = PackCursor::start(geometry);

    for (page_index, &(width, height)) in page_sizes.iter().enumerate() {
        let fitted = match fit_to_sheet(width, height, geometry) {
            Ok(fitted) => fitted,
            Err(e) => {
                warnings.push(LayoutWarning {
                    page_index,
                    message: e.to_string(),
                });
                continue;
            }
        };

        let (next, tile) = cursor.place(fitted, geometry);
        cursor = next;

        while sheets.len() <= tile.sheet {
            sheets.push(SheetPlan::new());
        }
        sheets[tile.sheet].extend_tiles(page_index, &[tile.rect]);
    }

    PackResult { sheets, warnings }
}

// =============================================================================
// Tests
// =============================================================================
