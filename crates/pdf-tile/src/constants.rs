//! Shared constants for sheet tiling
//!
//! This module centralizes the fixed output medium and the rasterization
//! defaults used throughout the pipeline.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / POINTS_PER_MM
}

// =============================================================================
// Output Sheet
// =============================================================================

/// Output sheet width in points (ISO A4)
pub const SHEET_WIDTH_PT: f32 = 595.28;

/// Output sheet height in points (ISO A4)
pub const SHEET_HEIGHT_PT: f32 = 841.89;

/// Outer margin and gap between tiles (points)
pub const SHEET_MARGIN_PT: f32 = 10.0;

// =============================================================================
// Source Pages
// =============================================================================

/// Default page width in points (US Letter: 8.5" × 11")
pub const DEFAULT_PAGE_WIDTH_PT: f32 = 612.0;

/// Default page height in points (US Letter)
pub const DEFAULT_PAGE_HEIGHT_PT: f32 = 792.0;

/// Default page dimensions as tuple (width, height)
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (DEFAULT_PAGE_WIDTH_PT, DEFAULT_PAGE_HEIGHT_PT);

// =============================================================================
// Rasterization
// =============================================================================

/// Pixels rendered per source point. 6.0 gives roughly 432 DPI.
pub const DEFAULT_RENDER_SCALE: f32 = 6.0;

/// JPEG quality used when flattening rendered pages
pub const DEFAULT_JPEG_QUALITY: u8 = 100;

// =============================================================================
// Geometry Tolerances
// =============================================================================

/// Smallest usable extent (points) before geometry is treated as degenerate
pub const MIN_USABLE_EXTENT_PT: f32 = 1e-3;
