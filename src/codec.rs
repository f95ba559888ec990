//! Image decode/encode boundary.

use crate::error::ImageError;
use image::RgbaImage;
use std::io::Cursor;
use std::path::Path;

/// Decode any supported format to RGBA8
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage, ImageError> {
    let image = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .decode()?;
    Ok(image.to_rgba8())
}

/// Read and decode an image file
pub fn load_image(path: &Path) -> Result<RgbaImage, ImageError> {
    let bytes = std::fs::read(path)?;
    decode_image(&bytes)
}

/// Encode an RGBA8 image as PNG
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ImageError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, image.width(), image.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Default);
        let mut writer = encoder
            .write_header()
            .map_err(|e| ImageError::Encode(e.to_string()))?;
        writer
            .write_image_data(image.as_raw())
            .map_err(|e| ImageError::Encode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}
