//! Flattening rendered bitmaps to JPEG

use crate::types::*;
use image::codecs::jpeg::JpegEncoder;
use image::{RgbImage, RgbaImage};

/// Encode an RGBA bitmap as an RGB JPEG, blending alpha over white.
pub fn encode_page_image(bitmap: &RgbaImage, quality: u8) -> Result<PageImage> {
    let (width, height) = bitmap.dimensions();

    let rgb = RgbImage::from_fn(width, height, |x, y| {
        let pixel = bitmap.get_pixel(x, y);
        let alpha = pixel[3] as f32 / 255.0;
        let blend = |c: u8| (c as f32 * alpha + 255.0 * (1.0 - alpha)).round() as u8;
        image::Rgb([blend(pixel[0]), blend(pixel[1]), blend(pixel[2])])
    });

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, quality).encode_image(&rgb)?;

    Ok(PageImage::new(jpeg, width, height))
}
