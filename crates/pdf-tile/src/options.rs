use crate::constants::{DEFAULT_JPEG_QUALITY, DEFAULT_RENDER_SCALE};
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How source pages are arranged on output sheets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LayoutMode {
    /// One sheet per source page, filled with copies of that page
    #[default]
    Replicate,
    /// One copy of every page, shelf-packed onto as few sheets as possible
    PackAll,
    /// Each page's block of copies stacked onto shared sheets
    Stacked,
}

impl LayoutMode {
    /// Map a "pack every page once" toggle onto a mode
    pub fn from_pack_all(pack_all: bool) -> Self {
        if pack_all {
            LayoutMode::PackAll
        } else {
            LayoutMode::Replicate
        }
    }

    /// Whether this mode also produces one single-sheet output per page
    pub fn has_per_page_outputs(self) -> bool {
        !matches!(self, LayoutMode::PackAll)
    }
}

/// Tiling configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TileOptions {
    /// Cap on rows of copies per artwork (None = as many as fit)
    pub max_rows: Option<usize>,
    pub mode: LayoutMode,
    /// Rasterization scale (pixels per point)
    pub render_scale: f32,
    /// JPEG quality for flattened pages (1-100)
    pub jpeg_quality: u8,
}

impl Default for TileOptions {
    fn default() -> Self {
        Self {
            max_rows: None,
            mode: LayoutMode::Replicate,
            render_scale: DEFAULT_RENDER_SCALE,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl TileOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options: Self = serde_json::from_slice(&bytes)
            .map_err(|e| TileError::Config(format!("Failed to parse config: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| TileError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.max_rows == Some(0) {
            return Err(TileError::Config(
                "Max rows must be at least 1 (leave unset for no cap)".to_string(),
            ));
        }

        if !(self.render_scale.is_finite() && self.render_scale > 0.0) {
            return Err(TileError::Config(format!(
                "Render scale must be positive, got {}",
                self.render_scale
            )));
        }

        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(TileError::Config(format!(
                "JPEG quality must be between 1 and 100, got {}",
                self.jpeg_quality
            )));
        }

        Ok(())
    }
}
