//! Scale-to-fit calculation

use crate::constants::MIN_USABLE_EXTENT_PT;
use crate::types::{Result, TileError};

use super::{FittedSize, SheetGeometry};

/// Largest size no bigger than the artwork that fits the usable area.
///
/// The usable area is `bound - 2 * margin` on each axis. The scale is
/// clamped at 1.0, so small artwork is never enlarged.
///
/// Returns `DegenerateGeometry` when the artwork has no area, the
/// margins leave no usable space, or the scaled size collapses to zero
/// (extreme aspect ratios underflow `f32`).
pub fn fit_to_bounds(
    art_w: f32,
    art_h: f32,
    bound_w: f32,
    bound_h: f32,
    margin: f32,
) -> Result<FittedSize> {
    fit_to_sheet(art_w, art_h, &SheetGeometry::new(bound_w, bound_h, margin))
}

/// Fit an artwork against a sheet's usable area
pub fn fit_to_sheet(art_w: f32, art_h: f32, geometry: &SheetGeometry) -> Result<FittedSize> {
    if !(art_w.is_finite() && art_h.is_finite() && art_w > 0.0 && art_h > 0.0) {
        return Err(TileError::DegenerateGeometry(format!(
            "artwork {}x{}pt has no area",
            art_w, art_h
        )));
    }

    let usable_w = geometry.usable_width();
    let usable_h = geometry.usable_height();
    if !(usable_w >= MIN_USABLE_EXTENT_PT && usable_h >= MIN_USABLE_EXTENT_PT) {
        return Err(TileError::DegenerateGeometry(format!(
            "bounds {}x{}pt leave no usable area inside a {}pt margin",
            geometry.width_pt, geometry.height_pt, geometry.margin_pt
        )));
    }

    let scale = 1.0_f32.min(usable_w / art_w).min(usable_h / art_h);
    let fitted = FittedSize::new(art_w * scale, art_h * scale);
    if !fitted.is_positive() {
        return Err(TileError::DegenerateGeometry(format!(
            "artwork {}x{}pt scales to {}x{}pt",
            art_w, art_h, fitted.w, fitted.h
        )));
    }
    Ok(fitted)
}
