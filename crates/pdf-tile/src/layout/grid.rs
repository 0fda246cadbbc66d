//! Replicated grid layout
//!
//! Fills one sheet with copies of a single artwork: columns centered
//! horizontally with equal gaps, rows stacked down from the top margin.

use crate::types::{Result, TileError};

use super::{FittedSize, SheetGeometry, TilePosition, fit_to_sheet};

// =============================================================================
// Grid Plan
// =============================================================================

/// Copies of one artwork laid out on one sheet
#[derive(Debug, Clone, PartialEq)]
pub struct GridPlan {
    /// Size of every tile
    pub tile: FittedSize,
    /// Columns per row
    pub cols: usize,
    /// Rows that physically fit on the sheet
    pub rows_available: usize,
    /// Rows actually emitted (after any row cap)
    pub rows: usize,
    /// Horizontal gap before, between and after columns
    pub x_gap: f32,
    /// Vertical gap above and between rows
    pub y_gap: f32,
    /// Tile positions in row-major order
    pub positions: Vec<TilePosition>,
}

impl GridPlan {
    /// A plan with no tiles
    pub fn empty() -> Self {
        Self {
            tile: FittedSize::new(0.0, 0.0),
            cols: 0,
            rows_available: 0,
            rows: 0,
            x_gap: 0.0,
            y_gap: 0.0,
            positions: Vec::new(),
        }
    }

    pub fn tile_count(&self) -> usize {
        self.positions.len()
    }

    /// X coordinate of a column's left edge
    pub fn column_x(&self, col: usize) -> f32 {
        self.x_gap + col as f32 * (self.tile.w + self.x_gap)
    }

    /// Positions of one row placed at an arbitrary `y`
    pub fn row_at(&self, y: f32) -> Vec<TilePosition> {
        (0..self.cols)
            .map(|col| TilePosition::new(self.column_x(col), y, self.tile.w, self.tile.h))
            .collect()
    }
}

// =============================================================================
// Grid Creation
// =============================================================================

/// How many tiles of `tile` fit along `space` with `margin` between them.
///
/// The margin is added to both sides of the division because adjacent tiles
/// share one gap rather than each carrying its own. Always at least 1.
pub fn tiles_along(space: f32, tile: f32, margin: f32) -> usize {
    let count = ((space + margin) / (tile + margin)).floor();
    if count.is_finite() && count >= 1.0 {
        count as usize
    } else {
        1
    }
}

/// Plan a replicated grid for an already-fitted tile.
///
/// # Arguments
/// * `fitted` - Tile size, normally from [`fit_to_sheet`]
/// * `geometry` - Output sheet
/// * `max_rows` - Optional cap; never raises the row count past what fits
///
/// A non-positive tile yields an empty plan.
pub fn plan_grid(fitted: FittedSize, geometry: &SheetGeometry, max_rows: Option<usize>) -> GridPlan {
    if !fitted.is_positive() {
        return GridPlan::empty();
    }

    let margin = geometry.margin_pt;
    let cols = tiles_along(geometry.width_pt, fitted.w, margin);
    let rows_available = tiles_along(geometry.height_pt, fitted.h, margin);
    let rows = match max_rows {
        Some(cap) => cap.min(rows_available),
        None => rows_available,
    };

    let x_gap = (geometry.width_pt - cols as f32 * fitted.w) / (cols + 1) as f32;
    let y_gap = margin;

    let mut positions = Vec::with_capacity(cols * rows);
    for row in 0..rows {
        let y = y_gap + row as f32 * (fitted.h + y_gap);
        for col in 0..cols {
            let x = x_gap + col as f32 * (fitted.w + x_gap);
            positions.push(TilePosition::new(x, y, fitted.w, fitted.h));
        }
    }

    GridPlan {
        tile: fitted,
        cols,
        rows_available,
        rows,
        x_gap,
        y_gap,
        positions,
    }
}

/// Fit a source page to the sheet and plan its replicated grid
pub fn plan_page_grid(
    width_pt: f32,
    height_pt: f32,
    geometry: &SheetGeometry,
    max_rows: Option<usize>,
) -> Result<GridPlan> {
    let fitted = fit_to_sheet(width_pt, height_pt, geometry)?;
    let plan = plan_grid(fitted, geometry, max_rows);
    if plan.tile_count() == 0 {
        return Err(TileError::DegenerateGeometry(format!(
            "page {}x{}pt yields no tiles",
            width_pt, height_pt
        )));
    }
    Ok(plan)
}

// =============================================================================
// Tests
// =============================================================================
