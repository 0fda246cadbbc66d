use pdf_tile::raster::PageSource;
use pdf_tile::*;

/// Page source that renders tagged placeholder images and can be told to
/// fail on a given page
struct ScriptedSource {
    sizes: Vec<(f32, f32)>,
    fail_at: Option<usize>,
}

impl ScriptedSource {
    fn new(sizes: &[(f32, f32)]) -> Self {
        Self {
            sizes: sizes.to_vec(),
            fail_at: None,
        }
    }

    fn failing_at(mut self, page_index: usize) -> Self {
        self.fail_at = Some(page_index);
        self
    }
}

impl PageSource for ScriptedSource {
    fn page_count(&self) -> usize {
        self.sizes.len()
    }

    fn render_page(&mut self, page_index: usize) -> Result<PageRecord> {
        if self.fail_at == Some(page_index) {
            return Err(TileError::Decode("corrupt content stream".to_string()));
        }
        let (w, h) = self.sizes[page_index];
        Ok(PageRecord::new(PageImage::new(vec![page_index as u8], 8, 8), w, h))
    }
}

#[test]
fn test_extract_reports_progress_and_artifacts() {
    let mut session = TileSession::new();
    let mut source = ScriptedSource::new(&[(200.0, 100.0), (300.0, 300.0)]);
    let mut seen = Vec::new();

    let artifacts = session
        .extract_from_source("cards.pdf", &mut source, &TileOptions::default(), |p| {
            seen.push(p)
        })
        .unwrap();

    assert!(artifacts.merged.is_some());
    assert_eq!(artifacts.per_page.len(), 2);
    assert_eq!(
        seen,
        vec![Progress::new(0, 2), Progress::new(1, 2), Progress::new(2, 2)]
    );
    assert_eq!(session.progress(), Progress::new(2, 2));
    assert!(session.progress().is_complete());
    assert_eq!(session.pages().len(), 2);
    assert_eq!(session.source_name(), Some("cards.pdf"));
}

#[test]
fn test_new_extraction_replaces_previous_artifacts() {
    let mut session = TileSession::new();
    let options = TileOptions::default();

    let mut first = ScriptedSource::new(&[(200.0, 100.0), (200.0, 100.0), (200.0, 100.0)]);
    session
        .extract_from_source("first.pdf", &mut first, &options, |_| {})
        .unwrap();
    assert_eq!(session.artifacts().per_page.len(), 3);

    let mut second = ScriptedSource::new(&[(100.0, 100.0)]);
    session
        .extract_from_source("second.pdf", &mut second, &options, |_| {})
        .unwrap();

    assert_eq!(session.artifacts().per_page.len(), 1);
    assert_eq!(session.pages().len(), 1);
    assert_eq!(session.source_name(), Some("second.pdf"));
}

#[test]
fn test_failed_extraction_leaves_nothing_behind() {
    let mut session = TileSession::new();
    let options = TileOptions::default();

    let mut good = ScriptedSource::new(&[(200.0, 100.0)]);
    session
        .extract_from_source("good.pdf", &mut good, &options, |_| {})
        .unwrap();
    assert!(!session.artifacts().is_empty());

    let mut bad =
        ScriptedSource::new(&[(200.0, 100.0), (200.0, 100.0), (200.0, 100.0)]).failing_at(1);
    let mut seen = Vec::new();
    let result = session.extract_from_source("bad.pdf", &mut bad, &options, |p| seen.push(p));

    match result {
        Err(TileError::PageRender { page_index, .. }) => assert_eq!(page_index, 1),
        other => panic!("expected a page render error, got {:?}", other.map(|_| ())),
    }
    // Progress stopped at the failing page
    assert_eq!(seen.last(), Some(&Progress::new(1, 3)));

    assert!(session.artifacts().is_empty());
    assert!(session.pages().is_empty());
    assert_eq!(session.progress(), Progress::default());
}

#[test]
fn test_empty_document_yields_no_outputs() {
    let mut session = TileSession::new();
    let mut previous = ScriptedSource::new(&[(200.0, 100.0)]);
    session
        .extract_from_source("cards.pdf", &mut previous, &TileOptions::default(), |_| {})
        .unwrap();

    let mut source = ScriptedSource::new(&[]);
    let mut seen = Vec::new();

    let artifacts = session
        .extract_from_source("empty.pdf", &mut source, &TileOptions::default(), |p| {
            seen.push(p)
        })
        .unwrap();

    assert!(artifacts.merged.is_none());
    assert!(artifacts.per_page.is_empty());
    assert_eq!(seen, vec![Progress::new(0, 0)]);
    assert!(session.pages().is_empty());
}

#[test]
fn test_invalid_options_fail_before_rendering() {
    let mut session = TileSession::new();
    let mut source = ScriptedSource::new(&[(200.0, 100.0)]);
    let options = TileOptions {
        jpeg_quality: 0,
        ..Default::default()
    };
    let mut calls = 0;

    let result = session.extract_from_source("x.pdf", &mut source, &options, |_| calls += 1);

    assert!(matches!(result, Err(TileError::Config(_))));
    assert_eq!(calls, 0);
}

#[test]
fn test_recompose_switches_mode_without_rendering() {
    let mut session = TileSession::new();
    let mut source = ScriptedSource::new(&[(700.0, 400.0), (700.0, 400.0), (700.0, 400.0)]);
    session
        .extract_from_source("poster.pdf", &mut source, &TileOptions::default(), |_| {})
        .unwrap();
    assert_eq!(session.artifacts().per_page.len(), 3);

    let pack_all = TileOptions {
        mode: LayoutMode::PackAll,
        ..Default::default()
    };
    let artifacts = session.recompose(&pack_all).unwrap();
    assert!(artifacts.merged.is_some());
    assert!(artifacts.per_page.is_empty());
    assert_eq!(session.pages().len(), 3);
}

#[test]
fn test_clear_releases_everything() {
    let mut session = TileSession::new();
    let mut source = ScriptedSource::new(&[(200.0, 100.0)]);
    session
        .extract_from_source("cards.pdf", &mut source, &TileOptions::default(), |_| {})
        .unwrap();

    session.clear();

    assert!(session.artifacts().is_empty());
    assert!(session.pages().is_empty());
    assert!(session.warnings().is_empty());
    assert_eq!(session.source_name(), None);
    assert_eq!(session.progress(), Progress::default());
}

#[test]
fn test_page_without_area_is_skipped_not_fatal() {
    let mut session = TileSession::new();
    let mut source = ScriptedSource::new(&[(200.0, 100.0), (0.0, 100.0), (200.0, 100.0)]);
    let options = TileOptions {
        mode: LayoutMode::PackAll,
        ..Default::default()
    };

    let artifacts = session
        .extract_from_source("mixed.pdf", &mut source, &options, |_| {})
        .unwrap();
    assert!(artifacts.merged.is_some());

    assert_eq!(session.pages().len(), 3);
    assert_eq!(session.progress(), Progress::new(3, 3));
    let warned: Vec<usize> = session.warnings().iter().map(|w| w.page_index).collect();
    assert_eq!(warned, vec![1]);

    let stats = calculate_statistics(
        &session.pages().iter().map(PageRecord::size).collect::<Vec<_>>(),
        &options,
        &SheetGeometry::A4,
    )
    .unwrap();
    assert_eq!(stats.tiles_per_page, vec![1, 0, 1]);
}

#[test]
fn test_failure_before_first_page_resets_session() {
    let mut session = TileSession::new();
    let mut good = ScriptedSource::new(&[(200.0, 100.0)]);
    session
        .extract_from_source("good.pdf", &mut good, &TileOptions::default(), |_| {})
        .unwrap();

    let mut bad = ScriptedSource::new(&[(200.0, 100.0), (200.0, 100.0)]).failing_at(0);
    let mut seen = Vec::new();
    let result =
        session.extract_from_source("bad.pdf", &mut bad, &TileOptions::default(), |p| seen.push(p));

    assert!(matches!(result, Err(TileError::PageRender { page_index: 0, .. })));
    assert_eq!(seen, vec![Progress::new(0, 2)]);
    assert_eq!(session.progress(), Progress::default());
    assert!(session.artifacts().is_empty());
    assert!(session.pages().is_empty());
}

#[cfg(feature = "pdfium")]
#[tokio::test]
async fn test_undecodable_document_resets_session() {
    let mut session = TileSession::new();
    let mut good = ScriptedSource::new(&[(200.0, 100.0)]);
    session
        .extract_from_source("good.pdf", &mut good, &TileOptions::default(), |_| {})
        .unwrap();
    assert!(!session.artifacts().is_empty());

    let mut seen = Vec::new();
    let result = session
        .extract(
            "broken.pdf",
            b"definitely not a pdf".to_vec(),
            &TileOptions::default(),
            |p| seen.push(p),
        )
        .await;

    // Without a pdfium library on the host the run fails one step earlier
    assert!(matches!(
        result,
        Err(TileError::Decode(_)) | Err(TileError::RendererUnavailable(_))
    ));
    assert!(seen.is_empty());
    assert_eq!(session.progress(), Progress::default());
    assert!(session.artifacts().is_empty());
    assert!(session.pages().is_empty());
}
