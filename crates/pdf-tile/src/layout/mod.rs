//! Layout calculation modules for sheet tiling
//!
//! This module handles all the geometric calculations for placing
//! rasterized pages on output sheets:
//! - Scale-to-fit without enlarging
//! - Replicated grids (many copies of one page per sheet)
//! - Shelf packing (one copy of every page, as few sheets as possible)
//! - Stacked grids (row blocks of several pages sharing sheets)

mod fit;
mod grid;
mod pack;
mod stack;
mod strategy;
mod types;

pub use fit::*;
pub use grid::*;
pub use pack::*;
pub use stack::*;
pub use strategy::*;
pub use types::*;
