use image::{imageops, RgbaImage};

/// Split `image` into tiles of `tile_width` × `tile_height`.
///
/// Tiles are produced left to right, top to bottom. Tiles on the right and
/// bottom edges are truncated to the image bounds. Zero sizes are treated
/// as 1.
pub fn tiles(image: &RgbaImage, tile_width: u32, tile_height: u32) -> Vec<RgbaImage> {
    let tw = tile_width.max(1);
    let th = tile_height.max(1);
    let (width, height) = image.dimensions();

    let mut out = Vec::new();
    let mut y = 0;
    while y < height {
        let h = th.min(height - y);
        let mut x = 0;
        while x < width {
            let w = tw.min(width - x);
            out.push(imageops::crop_imm(image, x, y, w, h).to_image());
            x += tw;
        }
        y += th;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_even_grid() {
        let img = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255]));
        let t = tiles(&img, 4, 4);
        assert_eq!(t.len(), 4);
        assert!(t.iter().all(|tile| tile.dimensions() == (4, 4)));
    }

    #[test]
    fn test_edge_tiles_truncated() {
        let img = RgbaImage::from_pixel(5, 3, Rgba([0, 0, 0, 255]));
        let t = tiles(&img, 2, 2);
        // 3 columns × 2 rows
        assert_eq!(t.len(), 6);
        assert_eq!(t[2].dimensions(), (1, 2));
        assert_eq!(t[5].dimensions(), (1, 1));
    }

    #[test]
    fn test_order_is_row_major() {
        let mut img = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(0, 1, Rgba([0, 255, 0, 255]));
        let t = tiles(&img, 1, 1);
        assert_eq!(t[1].get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(t[2].get_pixel(0, 0).0, [0, 255, 0, 255]);
    }

    #[test]
    fn test_zero_size_is_one() {
        let img = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 255]));
        assert_eq!(tiles(&img, 0, 0).len(), 2);
    }
}
