//! Document I/O for tiling

use crate::constants::DEFAULT_PAGE_DIMENSIONS;
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::path::Path;

/// Read a source document from disk
pub async fn read_document(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    Ok(tokio::fs::read(path).await?)
}

/// Write one artifact to disk
pub async fn save_artifact(artifact: &OutputArtifact, path: impl AsRef<Path>) -> Result<()> {
    tokio::fs::write(path, &artifact.bytes).await?;
    Ok(())
}

/// Page sizes (width, height) in points, without rendering anything.
///
/// Uses each page's crop box, falling back to its media box (both may be
/// inherited from the page tree) and then to US Letter.
pub fn read_page_sizes(bytes: &[u8]) -> Result<Vec<(f32, f32)>> {
    let doc = Document::load_mem(bytes).map_err(|e| TileError::Decode(e.to_string()))?;
    Ok(doc
        .get_pages()
        .values()
        .map(|&page_id| page_box_size(&doc, page_id).unwrap_or(DEFAULT_PAGE_DIMENSIONS))
        .collect())
}

/// Size of the visible page box, if one can be found
fn page_box_size(doc: &Document, page_id: ObjectId) -> Option<(f32, f32)> {
    let page = doc.get_dictionary(page_id).ok()?;
    let rect = inherited_box(doc, page, b"CropBox").or_else(|| inherited_box(doc, page, b"MediaBox"))?;

    let width = (rect[2] - rect[0]).abs();
    let height = (rect[3] - rect[1]).abs();
    (width > 0.0 && height > 0.0).then_some((width, height))
}

/// Look up a box on the page, walking up the page tree
fn inherited_box(doc: &Document, page: &Dictionary, key: &[u8]) -> Option<[f32; 4]> {
    let mut dict = page;
    // Bounded walk so a cyclic /Parent chain cannot loop forever
    for _ in 0..32 {
        if let Ok(obj) = dict.get(key) {
            return parse_rect(doc, obj);
        }
        let parent_id = dict.get(b"Parent").and_then(Object::as_reference).ok()?;
        dict = doc.get_dictionary(parent_id).ok()?;
    }
    None
}

fn parse_rect(doc: &Document, obj: &Object) -> Option<[f32; 4]> {
    let obj = match obj {
        Object::Reference(id) => doc.get_object(*id).ok()?,
        other => other,
    };
    let arr = obj.as_array().ok()?;
    if arr.len() != 4 {
        return None;
    }
    let mut rect = [0.0; 4];
    for (slot, value) in rect.iter_mut().zip(arr) {
        *slot = extract_number(value)?;
    }
    Some(rect)
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}
