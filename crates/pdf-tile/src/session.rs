//! One extraction run at a time
//!
//! A [`TileSession`] owns the rasterized pages, the progress of the run in
//! flight and the current artifact set. Every run starts by retiring the
//! previous artifacts and resetting progress. A failed run leaves no pages
//! and no artifacts behind.
//!
//! Runs take `&mut self`, so a session cannot drive two runs at once.

use crate::artifacts::{ArtifactSet, ArtifactStore};
use crate::compose::compose;
use crate::layout::LayoutWarning;
use crate::options::TileOptions;
use crate::raster::{PageSource, rasterize};
use crate::types::*;

#[derive(Debug, Default)]
pub struct TileSession {
    pages: Vec<PageRecord>,
    progress: Progress,
    artifacts: ArtifactStore,
    source_name: Option<String>,
    warnings: Vec<LayoutWarning>,
}

impl TileSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pages of the last successful extraction
    pub fn pages(&self) -> &[PageRecord] {
        &self.pages
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn artifacts(&self) -> &ArtifactSet {
        self.artifacts.current()
    }

    /// Name of the document being (or last) extracted
    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    /// Layout warnings from the last composition
    pub fn warnings(&self) -> &[LayoutWarning] {
        &self.warnings
    }

    /// Rasterize every page of `source` and compose the outputs.
    pub fn extract_from_source<S: PageSource + ?Sized>(
        &mut self,
        name: impl Into<String>,
        source: &mut S,
        options: &TileOptions,
        mut on_progress: impl FnMut(Progress),
    ) -> Result<&ArtifactSet> {
        options.validate()?;
        self.begin_run(name.into());

        let progress = &mut self.progress;
        let rasterized = rasterize(source, |p| {
            *progress = p;
            on_progress(p);
        });

        match rasterized {
            Ok(pages) => self.commit_pages(pages, options),
            Err(e) => {
                self.fail_run(&e);
                Err(e)
            }
        }
    }

    /// Decode and rasterize a PDF with pdfium, then compose the outputs.
    #[cfg(feature = "pdfium")]
    pub async fn extract(
        &mut self,
        name: impl Into<String>,
        bytes: Vec<u8>,
        options: &TileOptions,
        mut on_progress: impl FnMut(Progress),
    ) -> Result<&ArtifactSet> {
        options.validate()?;
        self.begin_run(name.into());

        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let rasterizing = crate::raster::rasterize_pdf(bytes, options, Some(tx));
        tokio::pin!(rasterizing);

        // Forward progress until the render task finishes and drops its sender
        let rasterized = loop {
            tokio::select! {
                Some(p) = rx.recv() => {
                    self.progress = p;
                    on_progress(p);
                }
                result = &mut rasterizing => break result,
            }
        };
        while let Ok(p) = rx.try_recv() {
            self.progress = p;
            on_progress(p);
        }

        match rasterized {
            Ok(pages) => self.commit_pages(pages, options),
            Err(e) => {
                self.fail_run(&e);
                Err(e)
            }
        }
    }

    /// Compose the already-rasterized pages again with new options.
    pub fn recompose(&mut self, options: &TileOptions) -> Result<&ArtifactSet> {
        options.validate()?;
        self.artifacts.retire();
        let pages = std::mem::take(&mut self.pages);
        self.commit_pages(pages, options)
    }

    /// Release everything this session holds
    pub fn clear(&mut self) {
        self.artifacts.retire();
        self.pages.clear();
        self.warnings.clear();
        self.progress = Progress::default();
        self.source_name = None;
    }

    fn begin_run(&mut self, name: String) {
        self.artifacts.retire();
        self.pages.clear();
        self.warnings.clear();
        self.progress = Progress::default();
        log::info!("Extracting pages from {}", name);
        self.source_name = Some(name);
    }

    fn commit_pages(&mut self, pages: Vec<PageRecord>, options: &TileOptions) -> Result<&ArtifactSet> {
        match compose(&pages, options) {
            Ok(output) => {
                self.pages = pages;
                self.warnings = output.warnings;
                Ok(self.artifacts.replace(output.artifacts))
            }
            Err(e) => {
                self.fail_run(&e);
                Err(e)
            }
        }
    }

    fn fail_run(&mut self, error: &TileError) {
        log::warn!(
            "Extraction of {} failed: {}",
            self.source_name.as_deref().unwrap_or("document"),
            error
        );
        self.artifacts.retire();
        self.pages.clear();
        self.warnings.clear();
        self.progress = Progress::default();
    }
}
