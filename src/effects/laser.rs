//! Laser-engraving preview: the product material texture clipped to the
//! artwork.

use super::background::{process_background, BackgroundActions};
use image::imageops::{self, FilterType};
use image::RgbaImage;

/// Scale `texture`, keeping its aspect ratio, so it covers `width × height`.
///
/// A texture that already covers the area is returned unchanged.
fn cover(texture: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let (tw, th) = texture.dimensions();
    if tw >= width && th >= height {
        return texture.clone();
    }

    let scale = (width as f64 / tw as f64).max(height as f64 / th as f64);
    let new_w = ((tw as f64 * scale).ceil() as u32).max(width);
    let new_h = ((th as f64 * scale).ceil() as u32).max(height);
    tracing::debug!(from = ?(tw, th), to = ?(new_w, new_h), "texture resized");
    imageops::resize(texture, new_w, new_h, FilterType::Triangle)
}

/// Composite `texture` atop `image`.
///
/// The result keeps the artwork's alpha; its color is the texture blended
/// over the artwork by the texture's own alpha.
fn atop(image: &RgbaImage, texture: &RgbaImage) -> RgbaImage {
    let mut out = image.clone();
    for (x, y, px) in out.enumerate_pixels_mut() {
        let [tr, tg, tb, ta] = texture.get_pixel(x, y).0;
        let alpha = ta as f32 / 255.0;
        for (c, t) in px.0.iter_mut().take(3).zip([tr, tg, tb]) {
            *c = (t as f32 * alpha + *c as f32 * (1.0 - alpha)).round() as u8;
        }
    }
    out
}

/// Laser-engraving preview.
///
/// With `remove_white_bg`, a white background is made transparent first.
/// An empty texture leaves the artwork unchanged.
pub fn laser_engrave(image: &RgbaImage, texture: &RgbaImage, remove_white_bg: bool) -> RgbaImage {
    let base = if remove_white_bg {
        let actions = BackgroundActions {
            remove: true,
            ..Default::default()
        };
        process_background(image, "White", actions).image
    } else {
        image.clone()
    };

    let (width, height) = base.dimensions();
    if width == 0 || height == 0 || texture.width() == 0 || texture.height() == 0 {
        return base;
    }

    atop(&base, &cover(texture, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const WOOD: [u8; 4] = [150, 100, 50, 255];

    #[test]
    fn test_cover_keeps_large_texture() {
        let texture = RgbaImage::from_pixel(20, 20, Rgba(WOOD));
        assert_eq!(cover(&texture, 10, 15).dimensions(), (20, 20));
    }

    #[test]
    fn test_cover_scales_with_aspect() {
        let texture = RgbaImage::from_pixel(4, 2, Rgba(WOOD));
        let scaled = cover(&texture, 10, 10);
        assert_eq!(scaled.dimensions(), (20, 10));
        let px = scaled.get_pixel(19, 9).0;
        assert!(px.iter().zip(WOOD).all(|(a, b)| a.abs_diff(b) <= 1), "{px:?}");
    }

    #[test]
    fn test_atop_keeps_artwork_alpha() {
        let mut art = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 0]));
        art.put_pixel(1, 0, Rgba([10, 20, 30, 200]));
        let texture = RgbaImage::from_pixel(2, 1, Rgba(WOOD));

        let out = atop(&art, &texture);
        assert_eq!(out.get_pixel(0, 0).0[3], 0);
        assert_eq!(out.get_pixel(1, 0).0, [150, 100, 50, 200]);
    }

    #[test]
    fn test_half_transparent_texture_blends() {
        let art = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]));
        let texture = RgbaImage::from_pixel(1, 1, Rgba([200, 200, 200, 128]));
        let out = atop(&art, &texture);
        assert_eq!(out.get_pixel(0, 0).0, [100, 100, 100, 255]);
    }

    #[test]
    fn test_remove_white_background_first() {
        let mut art = RgbaImage::from_pixel(12, 12, Rgba([255, 255, 255, 255]));
        for y in 4..8 {
            for x in 4..8 {
                art.put_pixel(x, y, Rgba([0, 0, 0, 255]));
            }
        }
        let texture = RgbaImage::from_pixel(12, 12, Rgba(WOOD));

        let out = laser_engrave(&art, &texture, true);
        assert_eq!(out.get_pixel(0, 0).0[3], 0);
        assert_eq!(out.get_pixel(5, 5).0, WOOD);

        let kept = laser_engrave(&art, &texture, false);
        assert_eq!(kept.get_pixel(0, 0).0, WOOD);
    }

    #[test]
    fn test_empty_texture_is_noop() {
        let art = RgbaImage::from_pixel(3, 3, Rgba([1, 2, 3, 255]));
        let out = laser_engrave(&art, &RgbaImage::new(0, 0), false);
        assert_eq!(out, art);
    }
}
