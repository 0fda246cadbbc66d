//! PDF writing modules for sheet tiling
//!
//! This module handles everything that touches the output document:
//! - The sheet-writing interface the composer drives
//! - A lopdf implementation of it
//! - Embedding flattened page images as image XObjects

mod image;
mod writer;

pub use image::create_image_xobject;
pub use writer::*;
