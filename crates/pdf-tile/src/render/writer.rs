//! Sheet writing
//!
//! The composer only speaks [`SheetWriter`]: open a document, add sheets,
//! place images, serialize. [`LopdfSheetWriter`] is the real backend.

use std::sync::Arc;

use crate::layout::{SheetGeometry, TilePosition};
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use super::create_image_xobject;

/// Backend that turns placement commands into a serialized document
pub trait SheetWriter {
    /// Append a new, empty sheet and make it current
    fn add_sheet(&mut self);

    /// Draw an image on the current sheet at `rect` (top-left origin).
    ///
    /// Opens the first sheet if none has been added yet.
    fn place_image(&mut self, image: &PageImage, rect: &TilePosition) -> Result<()>;

    /// Number of sheets added so far
    fn sheet_count(&self) -> usize;

    /// Finish the document and return its bytes
    fn serialize(self) -> Result<Vec<u8>>;
}

/// Content collected for one sheet before the page object is built
#[derive(Default)]
struct PendingSheet {
    content_ops: Vec<String>,
    xobjects: Dictionary,
}

/// Writes sheets into a lopdf document.
///
/// Each distinct image is embedded once per document and referenced from
/// every sheet that places it.
pub struct LopdfSheetWriter {
    doc: Document,
    pages_tree_id: ObjectId,
    geometry: SheetGeometry,
    sheets: Vec<PendingSheet>,
    image_cache: Vec<(Arc<[u8]>, ObjectId)>,
}

impl LopdfSheetWriter {
    pub fn new(geometry: &SheetGeometry) -> Self {
        let mut doc = Document::with_version("1.7");
        let pages_tree_id = doc.new_object_id();
        Self {
            doc,
            pages_tree_id,
            geometry: *geometry,
            sheets: Vec::new(),
            image_cache: Vec::new(),
        }
    }

    /// Embed an image once, returning its object id
    fn image_object(&mut self, image: &PageImage) -> ObjectId {
        if let Some((_, id)) = self
            .image_cache
            .iter()
            .find(|(data, _)| Arc::ptr_eq(data, &image.jpeg))
        {
            return *id;
        }

        let id = self.doc.add_object(create_image_xobject(image));
        self.image_cache.push((image.jpeg.clone(), id));
        id
    }

    /// Build the page object for one finished sheet
    fn build_page(&mut self, sheet: PendingSheet) -> ObjectId {
        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(self.pages_tree_id));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(self.geometry.width_pt),
                Object::Real(self.geometry.height_pt),
            ]),
        );

        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(sheet.xobjects));

        let content = sheet.content_ops.join("");
        let content_id = self
            .doc
            .add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        page_dict.set("Contents", Object::Reference(content_id));
        page_dict.set("Resources", Object::Dictionary(resources));

        self.doc.add_object(page_dict)
    }
}

impl SheetWriter for LopdfSheetWriter {
    fn add_sheet(&mut self) {
        self.sheets.push(PendingSheet::default());
    }

    fn place_image(&mut self, image: &PageImage, rect: &TilePosition) -> Result<()> {
        if self.sheets.is_empty() {
            self.add_sheet();
        }

        let image_id = self.image_object(image);
        let sheet_height = self.geometry.height_pt;
        let Some(sheet) = self.sheets.last_mut() else {
            return Err(TileError::Config("No sheet to place an image on".to_string()));
        };

        let name = format!("Im{}", image_id.0);
        sheet
            .xobjects
            .set(name.as_bytes(), Object::Reference(image_id));

        // Image space is the unit square; flip y into PDF's bottom-left origin
        let pdf_y = sheet_height - rect.y - rect.h;
        sheet.content_ops.push(format!(
            "q {} 0 0 {} {} {} cm /{} Do Q\n",
            rect.w, rect.h, rect.x, pdf_y, name
        ));

        Ok(())
    }

    fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    fn serialize(mut self) -> Result<Vec<u8>> {
        // A document always has at least one sheet
        if self.sheets.is_empty() {
            self.add_sheet();
        }

        let sheets = std::mem::take(&mut self.sheets);
        let page_refs: Vec<Object> = sheets
            .into_iter()
            .map(|sheet| Object::Reference(self.build_page(sheet)))
            .collect();

        // Create pages tree
        let count = page_refs.len() as i64;
        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(page_refs)),
            ("Count", Object::Integer(count)),
        ]);
        self.doc
            .objects
            .insert(self.pages_tree_id, Object::Dictionary(pages_dict));

        // Create catalog
        let catalog_id = self.doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_tree_id)),
        ]));
        self.doc.trailer.set("Root", catalog_id);

        let mut writer = Vec::new();
        self.doc.save_to(&mut writer)?;
        Ok(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_image() -> PageImage {
        PageImage::new(vec![0xFF, 0xD8, 0xFF, 0xD9], 2, 2)
    }

    #[test]
    fn test_serialize_counts_sheets() {
        let mut writer = LopdfSheetWriter::new(&SheetGeometry::A4);
        writer.add_sheet();
        writer.add_sheet();
        assert_eq!(writer.sheet_count(), 2);

        let bytes = writer.serialize().unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn test_empty_document_has_one_sheet() {
        let bytes = LopdfSheetWriter::new(&SheetGeometry::A4).serialize().unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_image_embedded_once() {
        let image = tiny_image();
        let mut writer = LopdfSheetWriter::new(&SheetGeometry::A4);
        writer.add_sheet();
        writer
            .place_image(&image, &TilePosition::new(10.0, 10.0, 50.0, 50.0))
            .unwrap();
        writer.add_sheet();
        writer
            .place_image(&image, &TilePosition::new(70.0, 10.0, 50.0, 50.0))
            .unwrap();
        assert_eq!(writer.image_cache.len(), 1);
    }

    #[test]
    fn test_place_image_flips_y() {
        let mut writer = LopdfSheetWriter::new(&SheetGeometry::new(100.0, 200.0, 10.0));
        writer
            .place_image(&tiny_image(), &TilePosition::new(10.0, 10.0, 30.0, 40.0))
            .unwrap();
        assert_eq!(writer.sheet_count(), 1);
        let op = &writer.sheets[0].content_ops[0];
        // 200 - 10 - 40 = 150
        assert!(op.starts_with("q 30 0 0 40 10 150 cm /Im"));
    }
}
