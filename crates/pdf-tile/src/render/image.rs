//! Image XObject creation
//!
//! Rasterized pages are already JPEG encoded, so they are embedded as-is
//! with the DCTDecode filter.

use crate::types::PageImage;
use lopdf::{Dictionary, Object, Stream};

/// Build an image XObject stream for a flattened page.
pub fn create_image_xobject(image: &PageImage) -> Stream {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", Object::Integer(image.width_px as i64));
    dict.set("Height", Object::Integer(image.height_px as i64));
    dict.set("ColorSpace", Object::Name(b"DeviceRGB".to_vec()));
    dict.set("BitsPerComponent", Object::Integer(8));
    dict.set("Filter", Object::Name(b"DCTDecode".to_vec()));

    // DCT data must not be deflated again
    Stream::new(dict, image.jpeg.to_vec()).with_compression(false)
}
