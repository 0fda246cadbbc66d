pub mod artifacts;
pub mod compose;
pub mod constants;
pub mod io;
pub mod layout;
mod options;
pub mod raster;
pub mod render;
mod session;
mod stats;
mod types;

pub use artifacts::{ArtifactSet, ArtifactStore};
pub use compose::{ComposeOutput, compose, compose_with};
pub use io::{read_document, read_page_sizes, save_artifact};
pub use layout::SheetGeometry;
pub use options::*;
pub use session::TileSession;
pub use stats::{TileStatistics, calculate_statistics};
pub use types::*;
