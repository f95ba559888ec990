//! Artwork effects: recoloring, background crop/removal, debossing,
//! embroidery and laser engraving.
//!
//! All effects take an RGBA8 image by reference and return a new image.

pub mod background;
pub mod deboss;
pub mod embroidery;
pub mod laser;
pub mod one_color;
pub mod replace;

pub use background::{
    crop_bounds, process_background, remove_background, BackgroundActions, BackgroundTone, ProcessedBackground, Rect,
};
pub use deboss::deboss;
pub use embroidery::{do_embroidery, embroider, EmbroideryPattern, EmbroiderySettings};
pub use laser::laser_engrave;
pub use one_color::one_color;
pub use replace::{remove_colors, replace_color};

use std::collections::VecDeque;

/// Rec. 601 luma of an RGB triple.
#[inline]
pub(crate) fn luma(r: u8, g: u8, b: u8) -> f32 {
    0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
}

/// 4-connected flood fill over a `width × height` grid.
///
/// Starts from every seed for which `inside` holds and returns the visited
/// mask, row-major.
pub(crate) fn flood<F>(width: u32, height: u32, seeds: &[(u32, u32)], inside: F) -> Vec<bool>
where
    F: Fn(u32, u32) -> bool,
{
    let w = width as usize;
    let mut visited = vec![false; w * height as usize];
    let mut queue = VecDeque::new();

    for &(x, y) in seeds {
        if x < width && y < height && inside(x, y) && !visited[y as usize * w + x as usize] {
            visited[y as usize * w + x as usize] = true;
            queue.push_back((x, y));
        }
    }

    while let Some((x, y)) = queue.pop_front() {
        let mut visit = |nx: u32, ny: u32| {
            let idx = ny as usize * w + nx as usize;
            if !visited[idx] && inside(nx, ny) {
                visited[idx] = true;
                queue.push_back((nx, ny));
            }
        };
        if x > 0 {
            visit(x - 1, y);
        }
        if x + 1 < width {
            visit(x + 1, y);
        }
        if y > 0 {
            visit(x, y - 1);
        }
        if y + 1 < height {
            visit(x, y + 1);
        }
    }

    visited
}

/// All pixels on the image border.
pub(crate) fn border_pixels(width: u32, height: u32) -> Vec<(u32, u32)> {
    if width == 0 || height == 0 {
        return Vec::new();
    }
    let mut seeds = Vec::with_capacity(2 * (width + height) as usize);
    for x in 0..width {
        seeds.push((x, 0));
        seeds.push((x, height - 1));
    }
    for y in 1..height.saturating_sub(1) {
        seeds.push((0, y));
        seeds.push((width - 1, y));
    }
    seeds
}
