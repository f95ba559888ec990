//! Background crop and removal.
//!
//! The foreground is every pixel whose luma clears a threshold against the
//! background tone: brighter than `lower` on a dark background, darker than
//! `255 - lower` on a light one. Fully transparent pixels are always
//! background.

use super::{border_pixels, flood, luma};
use image::{imageops, RgbaImage};
use serde::Serialize;

/// Dark background: threshold for the crop mask
const DARK_CROP_LOWER: u8 = 100;
/// Dark background: threshold for the removal mask
const DARK_REMOVE_LOWER: u8 = 50;
/// Light background: threshold for both masks
const LIGHT_LOWER: u8 = 35;
/// Padding added around the crop box
const CROP_PADDING: u32 = 5;

/// Brightness class of a background
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BackgroundTone {
    Dark,
    Light,
    Unknown,
}

/// Axis-aligned pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    fn full(image: &RgbaImage) -> Self {
        Self {
            x: 0,
            y: 0,
            width: image.width(),
            height: image.height(),
        }
    }
}

/// Which background operations to run
#[derive(Debug, Clone, Copy, Default)]
pub struct BackgroundActions {
    pub crop: bool,
    pub remove: bool,
    /// Treat a transparent background as light
    pub remove_on_transparent: bool,
}

/// Result of [`process_background`]
#[derive(Debug, Clone)]
pub struct ProcessedBackground {
    pub image: RgbaImage,
    /// Crop box in source coordinates, if cropping ran
    pub cropped: Option<Rect>,
    /// Whether the background was made transparent
    pub removed: bool,
}

fn foreground_mask(image: &RgbaImage, tone: BackgroundTone, lower: u8) -> Vec<bool> {
    let lower = lower as f32;
    image
        .pixels()
        .map(|px| {
            let [r, g, b, a] = px.0;
            if a == 0 {
                return false;
            }
            match tone {
                BackgroundTone::Dark => luma(r, g, b) > lower,
                BackgroundTone::Light => luma(255 - r, 255 - g, 255 - b) > lower,
                BackgroundTone::Unknown => true,
            }
        })
        .collect()
}

/// Pad one axis of the box when there is room on both sides.
fn pad_axis(start: u32, extent: u32, padding: u32, limit: u32) -> (u32, u32) {
    let half = padding / 2;
    if start > half && start - half + extent + padding <= limit {
        (start - half, extent + padding)
    } else {
        (start, extent)
    }
}

/// Bounding box of the foreground, padded by `padding` where it fits.
///
/// An empty foreground, or an `Unknown` tone, yields the full canvas.
pub fn crop_bounds(image: &RgbaImage, tone: BackgroundTone, lower: u8, padding: u32) -> Rect {
    if tone == BackgroundTone::Unknown {
        return Rect::full(image);
    }

    let (width, height) = image.dimensions();
    let mask = foreground_mask(image, tone, lower);

    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0;
    let mut max_y = 0;
    for (idx, _) in mask.iter().enumerate().filter(|(_, fg)| **fg) {
        let x = (idx % width as usize) as u32;
        let y = (idx / width as usize) as u32;
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }

    if min_x == u32::MAX {
        return Rect::full(image);
    }

    let (x, w) = pad_axis(min_x, max_x - min_x + 1, padding, width);
    let (y, h) = pad_axis(min_y, max_y - min_y + 1, padding, height);
    Rect {
        x,
        y,
        width: w,
        height: h,
    }
}

/// Make everything outside the foreground transparent.
///
/// Background regions not connected to the image border count as
/// foreground, so enclosed holes survive.
pub fn remove_background(image: &RgbaImage, tone: BackgroundTone, lower: u8) -> RgbaImage {
    if tone == BackgroundTone::Unknown {
        return image.clone();
    }

    let (width, height) = image.dimensions();
    let mask = foreground_mask(image, tone, lower);
    let outside = flood(width, height, &border_pixels(width, height), |x, y| {
        !mask[y as usize * width as usize + x as usize]
    });

    let mut out = image.clone();
    for (idx, px) in out.pixels_mut().enumerate() {
        if outside[idx] {
            px.0[3] = 0;
        }
    }
    out
}

/// Crop and/or remove the background named `bg_name`.
///
/// Black backgrounds get dark handling, white ones light handling;
/// transparent ones get light handling only with
/// `actions.remove_on_transparent`. Any other background leaves the image
/// unchanged.
pub fn process_background(image: &RgbaImage, bg_name: &str, actions: BackgroundActions) -> ProcessedBackground {
    let name = bg_name.to_lowercase();
    let params = match name.as_str() {
        "000000" | "ff000000" | "black" => Some((BackgroundTone::Dark, DARK_CROP_LOWER, DARK_REMOVE_LOWER)),
        "white" | "ffffffff" | "ffffff" => Some((BackgroundTone::Light, LIGHT_LOWER, LIGHT_LOWER)),
        "transparent" if actions.remove_on_transparent => {
            Some((BackgroundTone::Light, LIGHT_LOWER, LIGHT_LOWER))
        }
        _ => None,
    };

    let Some((tone, crop_lower, remove_lower)) = params else {
        tracing::debug!(background = bg_name, "no background handling");
        return ProcessedBackground {
            image: image.clone(),
            cropped: None,
            removed: false,
        };
    };

    let mut current = image.clone();
    let mut cropped = None;
    if actions.crop {
        let rect = crop_bounds(&current, tone, crop_lower, CROP_PADDING);
        current = imageops::crop_imm(&current, rect.x, rect.y, rect.width, rect.height).to_image();
        cropped = Some(rect);
    }

    if actions.remove {
        current = remove_background(&current, tone, remove_lower);
    }

    tracing::debug!(
        background = bg_name,
        ?tone,
        cropped = ?cropped,
        removed = actions.remove,
        "background processed"
    );

    ProcessedBackground {
        image: current,
        cropped,
        removed: actions.remove,
    }
}
