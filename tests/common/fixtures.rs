//! Synthetic artwork fixtures.

use image::{Rgba, RgbaImage};

/// Colors used across the fixtures
pub mod colors {
    pub const WHITE: [u8; 4] = [255, 255, 255, 255];
    pub const BLACK: [u8; 4] = [0, 0, 0, 255];
    pub const BOOK_RED: [u8; 4] = [0xC8, 0x10, 0x2E, 255];
    pub const BOOK_BLUE: [u8; 4] = [0x00, 0x33, 0xA0, 255];
    pub const CLEAR: [u8; 4] = [0, 0, 0, 0];
}

/// A `width × height` canvas of one color
pub fn canvas(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(color))
}

/// Fill the rectangle `[x0, x1) × [y0, y1)` with `color`
pub fn fill(image: &mut RgbaImage, x0: u32, y0: u32, x1: u32, y1: u32, color: [u8; 4]) {
    for y in y0..y1.min(image.height()) {
        for x in x0..x1.min(image.width()) {
            image.put_pixel(x, y, Rgba(color));
        }
    }
}

/// A logo: red block and blue block on `background`
pub fn two_color_logo(background: [u8; 4]) -> RgbaImage {
    let mut img = canvas(64, 64, background);
    fill(&mut img, 8, 8, 32, 56, colors::BOOK_RED);
    fill(&mut img, 36, 8, 56, 40, colors::BOOK_BLUE);
    img
}

/// Smallest PNG-encoded fixture for download tests
pub fn tiny_png() -> Vec<u8> {
    imprint::codec::encode_png(&canvas(2, 2, colors::BOOK_RED)).expect("encode fixture")
}
