//! Layout data types for sheet tiling
//!
//! All positions use a top-left origin: `x` grows to the right and `y`
//! grows downward from the top edge of the sheet. The sheet writer flips
//! `y` into PDF space when it emits content.

use std::fmt;

use crate::constants::{SHEET_HEIGHT_PT, SHEET_MARGIN_PT, SHEET_WIDTH_PT};

/// Tolerance for overflow comparisons, absorbs float error from scaling
pub const LAYOUT_EPSILON_PT: f32 = 1e-3;

/// Fixed output medium
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetGeometry {
    pub width_pt: f32,
    pub height_pt: f32,
    /// Outer margin, also used as the gap between tiles
    pub margin_pt: f32,
}

impl SheetGeometry {
    /// ISO A4 portrait with a 10pt margin
    pub const A4: SheetGeometry = SheetGeometry {
        width_pt: SHEET_WIDTH_PT,
        height_pt: SHEET_HEIGHT_PT,
        margin_pt: SHEET_MARGIN_PT,
    };

    pub fn new(width_pt: f32, height_pt: f32, margin_pt: f32) -> Self {
        Self {
            width_pt,
            height_pt,
            margin_pt,
        }
    }

    /// Width left after both side margins
    pub fn usable_width(&self) -> f32 {
        self.width_pt - 2.0 * self.margin_pt
    }

    /// Height left after top and bottom margins
    pub fn usable_height(&self) -> f32 {
        self.height_pt - 2.0 * self.margin_pt
    }

    /// Rightmost x a tile may reach
    pub fn right_limit(&self) -> f32 {
        self.width_pt - self.margin_pt
    }

    /// Lowest y a tile may reach
    pub fn bottom_limit(&self) -> f32 {
        self.height_pt - self.margin_pt
    }
}

impl Default for SheetGeometry {
    fn default() -> Self {
        Self::A4
    }
}

/// An artwork's size after scale-to-fit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedSize {
    pub w: f32,
    pub h: f32,
}

impl FittedSize {
    pub fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }

    /// False for zero, negative or non-finite sizes
    pub fn is_positive(&self) -> bool {
        self.w.is_finite() && self.h.is_finite() && self.w > 0.0 && self.h > 0.0
    }
}

/// One placed tile in sheet points, top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TilePosition {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl TilePosition {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge y coordinate (distance from the top of the sheet)
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// True when the interiors of the two tiles share any area
    pub fn overlaps(&self, other: &TilePosition) -> bool {
        self.x < other.right() - LAYOUT_EPSILON_PT
            && other.x < self.right() - LAYOUT_EPSILON_PT
            && self.y < other.bottom() - LAYOUT_EPSILON_PT
            && other.y < self.bottom() - LAYOUT_EPSILON_PT
    }
}

/// A tile tied to the source page it shows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Source page index (0-based)
    pub page_index: usize,
    pub rect: TilePosition,
}

/// Everything drawn on one output sheet, in drawing order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetPlan {
    pub placements: Vec<Placement>,
}

impl SheetPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Add every tile of a plan for one page
    pub fn extend_tiles(&mut self, page_index: usize, tiles: &[TilePosition]) {
        self.placements.extend(
            tiles
                .iter()
                .map(|&rect| Placement { page_index, rect }),
        );
    }
}

/// A page that produced no tiles because its geometry is unusable
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutWarning {
    pub page_index: usize,
    pub message: String,
}

impl fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page {}: {}", self.page_index + 1, self.message)
    }
}
