//! Output artifact ownership
//!
//! Only one artifact set is current at a time. The previous set is retired
//! explicitly before a replacement is stored and when the owner is done
//! with it, so nothing keeps referring to stale output.

use crate::types::{ArtifactKind, OutputArtifact};

/// The outputs of one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactSet {
    /// All pages in one document (None only when there were no pages)
    pub merged: Option<OutputArtifact>,
    /// One single-sheet document per source page, in page order
    pub per_page: Vec<OutputArtifact>,
}

impl ArtifactSet {
    pub fn is_empty(&self) -> bool {
        self.merged.is_none() && self.per_page.is_empty()
    }

    /// Number of artifacts held
    pub fn len(&self) -> usize {
        self.merged.iter().count() + self.per_page.len()
    }

    /// Merged artifact first, then per-page artifacts in order
    pub fn iter(&self) -> impl Iterator<Item = &OutputArtifact> {
        self.merged.iter().chain(self.per_page.iter())
    }

    /// Per-page artifact for a source page
    pub fn page(&self, page_index: usize) -> Option<&OutputArtifact> {
        self.per_page
            .iter()
            .find(|a| a.kind == ArtifactKind::PerPage(page_index))
    }
}

/// Holds the current artifact set
#[derive(Debug, Default)]
pub struct ArtifactStore {
    current: ArtifactSet,
    generation: u64,
}

impl ArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &ArtifactSet {
        &self.current
    }

    /// Bumped every time a set is stored
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Release the current set. Returns how many artifacts were released.
    pub fn retire(&mut self) -> usize {
        let released = std::mem::take(&mut self.current);
        let count = released.len();
        if count > 0 {
            log::info!(
                "Released {} artifact(s) from generation {}",
                count,
                self.generation
            );
        }
        count
    }

    /// Retire the current set, then make `set` current
    pub fn replace(&mut self, set: ArtifactSet) -> &ArtifactSet {
        self.retire();
        self.current = set;
        self.generation += 1;
        &self.current
    }
}
