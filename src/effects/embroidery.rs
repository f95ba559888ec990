//! Embroidery preview.
//!
//! Every retained color becomes one stitched layer: the artwork is reduced
//! to its most frequent colors, and each color's pixels are textured with a
//! stitch pattern rotated to a per-color angle, optionally bevelled and
//! given a drop shadow. The layers are then flattened in color order.
//!
//! Layers are independent, so they are built in parallel with rayon and
//! collected back in color order.

use crate::error::EffectError;
use image::{imageops, GrayImage, Luma, Rgba, RgbaImage};
use imprint_colors::histogram::histogram;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Deserialize;

/// Colors used by [`do_embroidery`]
const DO_EMBROIDERY_COLORS: u32 = 16;

/// Seed for the pattern spread, so previews are reproducible
const SPREAD_SEED: u64 = 0x5eed;

/// Stitch pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmbroideryPattern {
    #[default]
    Linear,
    Crosshatch,
}

/// Embroidery effect settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EmbroiderySettings {
    /// Initial pattern angle in degrees
    pub angle: i32,
    /// Bevel light azimuth in degrees
    pub azimuth: f64,
    /// Bevel blur amount; 0 disables the bevel
    pub bevel: u32,
    /// Percent fuzz for the near black/white clamp
    pub color_fuzz: f64,
    /// Bevel sigmoidal contrast
    pub contrast: f64,
    /// Bevel light elevation in degrees
    pub elevation: f64,
    /// Shadow extent
    pub extent: f64,
    /// Gray level (percent) that near black/white is limited to
    pub gray_limit: i32,
    /// Shadow intensity in percent
    pub intensity: f64,
    /// Percent of the spread pattern mixed into the plain one
    pub mix: i32,
    /// Most frequent colors kept
    pub number_of_colors: u32,
    pub pattern: EmbroideryPattern,
    /// Angle range spread over all colors
    pub range: i32,
    /// Pattern diffusion radius
    pub spread: f64,
    /// Stitch thickness in pixels
    pub thickness: u32,
}

impl Default for EmbroiderySettings {
    fn default() -> Self {
        Self {
            angle: 0,
            azimuth: 130.0,
            bevel: 4,
            color_fuzz: 5.0,
            contrast: 0.0,
            elevation: 30.0,
            extent: 2.0,
            gray_limit: 20,
            intensity: 25.0,
            mix: 100,
            number_of_colors: 8,
            pattern: EmbroideryPattern::Linear,
            range: 90,
            spread: 1.0,
            thickness: 2,
        }
    }
}

/// Upper bound for the stitch thickness; the linear texture is four times
/// this size.
const MAX_THICKNESS: u32 = 256;

fn invalid(name: &'static str, range: &'static str) -> EffectError {
    EffectError::InvalidSetting { name, range }
}

impl EmbroiderySettings {
    /// Check every setting against its valid range
    pub fn validate(&self) -> Result<(), EffectError> {
        const ANGLE: &str = "between -360 and 360";
        const PERCENT: &str = "between 0 and 100";
        const NON_NEGATIVE: &str = "zero or higher";
        const POSITIVE: &str = "higher than zero";

        if !(-360..=360).contains(&self.angle) {
            return Err(invalid("angle", ANGLE));
        }
        if !(-360.0..=360.0).contains(&self.azimuth) {
            return Err(invalid("azimuth", ANGLE));
        }
        if !(0.0..=100.0).contains(&self.color_fuzz) {
            return Err(invalid("color fuzz", PERCENT));
        }
        if self.contrast < 0.0 {
            return Err(invalid("contrast", NON_NEGATIVE));
        }
        if !(0.0..=90.0).contains(&self.elevation) {
            return Err(invalid("elevation", "between 0 and 90"));
        }
        if self.extent < 0.0 {
            return Err(invalid("extent", NON_NEGATIVE));
        }
        if !(0..=100).contains(&self.gray_limit) {
            return Err(invalid("gray limit", PERCENT));
        }
        if !(0.0..=100.0).contains(&self.intensity) {
            return Err(invalid("intensity", PERCENT));
        }
        if !(0..=100).contains(&self.mix) {
            return Err(invalid("mix", PERCENT));
        }
        if self.number_of_colors == 0 {
            return Err(invalid("number of colors", POSITIVE));
        }
        if !(0..=360).contains(&self.range) {
            return Err(invalid("range", "between 0 and 360"));
        }
        if self.spread < 0.0 {
            return Err(invalid("spread", NON_NEGATIVE));
        }
        if !(1..=MAX_THICKNESS).contains(&self.thickness) {
            return Err(invalid("thickness", "between 1 and 256"));
        }
        Ok(())
    }
}

/// Embroidery preview with the default color count of 16.
pub fn do_embroidery(image: &RgbaImage, settings: &EmbroiderySettings) -> Result<RgbaImage, EffectError> {
    let settings = EmbroiderySettings {
        number_of_colors: DO_EMBROIDERY_COLORS,
        ..settings.clone()
    };
    embroider(image, &settings)
}

/// Apply the embroidery effect.
///
/// # Errors
///
/// [`EffectError::InvalidSetting`] naming the first out-of-range setting.
pub fn embroider(image: &RgbaImage, settings: &EmbroiderySettings) -> Result<RgbaImage, EffectError> {
    settings.validate()?;

    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Ok(image.clone());
    }

    let colors: Vec<[u8; 3]> = histogram(image)
        .into_iter()
        .filter(|e| e.color.a != 0)
        .take(settings.number_of_colors as usize)
        .map(|e| [e.color.r, e.color.g, e.color.b])
        .collect();
    if colors.is_empty() {
        return Ok(image.clone());
    }

    let remapped = remap(image, &colors);
    let texture = match settings.pattern {
        EmbroideryPattern::Linear => linear_texture(settings.thickness),
        EmbroideryPattern::Crosshatch => crosshatch_texture(settings.thickness),
    };
    let pattern = build_pattern(&texture, width.max(height) * 2, settings);
    let toned = near_black_white(&remapped, settings);

    let base = match settings.pattern {
        EmbroideryPattern::Linear => -45.0,
        EmbroideryPattern::Crosshatch => -90.0,
    } + settings.angle as f64;
    let step = settings.range as f64 / colors.len() as f64;

    tracing::debug!(
        colors = colors.len(),
        pattern = ?settings.pattern,
        base_angle = base,
        "building embroidery layers"
    );

    let layers: Vec<RgbaImage> = colors
        .par_iter()
        .enumerate()
        .map(|(i, color)| {
            let angle = base + i as f64 * step;
            let mask: Vec<bool> = remapped
                .pixels()
                .map(|p| p.0[3] != 0 && p.0[..3] == color[..])
                .collect();
            let stitched = rotated_crop(&pattern, width, height, angle);
            let mut layer = stitch_layer(&toned, &stitched, &mask);
            if settings.bevel != 0 && i != 0 {
                add_bevel(&mut layer, settings);
            }
            with_shadow(&layer, settings)
        })
        .collect();

    let mut canvas = RgbaImage::new(width, height);
    for layer in &layers {
        for (dst, src) in canvas.pixels_mut().zip(layer.pixels()) {
            *dst = over(*src, *dst);
        }
    }
    Ok(canvas)
}

/// Map every opaque pixel to the nearest kept color, without dithering.
fn remap(image: &RgbaImage, colors: &[[u8; 3]]) -> RgbaImage {
    let mut out = image.clone();
    for px in out.pixels_mut() {
        if px.0[3] == 0 {
            continue;
        }
        let nearest = colors
            .iter()
            .min_by_key(|c| {
                (0..3)
                    .map(|k| {
                        let d = px.0[k] as i32 - c[k] as i32;
                        d * d
                    })
                    .sum::<i32>()
            })
            .copied();
        if let Some([r, g, b]) = nearest {
            px.0 = [r, g, b, px.0[3]];
        }
    }
    out
}

/// Horizontal gradient, white on the left to black on the right.
#[inline]
fn gradient(x: u32, width: u32) -> u8 {
    if width <= 1 {
        return 255;
    }
    (255.0 - x as f64 * 255.0 / (width - 1) as f64).round() as u8
}

/// Four gradient bands, each rolled right by one more `thickness`.
fn linear_texture(thickness: u32) -> GrayImage {
    let size = thickness * 4;
    GrayImage::from_fn(size, size, |x, y| {
        let band = y / thickness;
        let shifted = (x + size - band * thickness) % size;
        Luma([gradient(shifted, size)])
    })
}

/// A gradient stacked over its mirror image.
fn crosshatch_texture(thickness: u32) -> GrayImage {
    let size = thickness + 3;
    GrayImage::from_fn(size, size * 2, |x, y| {
        let x = if y < size { x } else { size - 1 - x };
        Luma([gradient(x, size)])
    })
}

/// Tile the texture over a `size × size` square and diffuse it.
fn build_pattern(texture: &GrayImage, size: u32, settings: &EmbroiderySettings) -> GrayImage {
    let (tw, th) = texture.dimensions();
    let tiled = GrayImage::from_fn(size, size, |x, y| *texture.get_pixel(x % tw, y % th));

    let radius = settings.spread.round() as i64;
    if radius == 0 {
        return tiled;
    }

    let mut rng = StdRng::seed_from_u64(SPREAD_SEED);
    let max = size as i64 - 1;
    let spread = GrayImage::from_fn(size, size, |x, y| {
        let sx = (x as i64 + rng.gen_range(-radius..=radius)).clamp(0, max);
        let sy = (y as i64 + rng.gen_range(-radius..=radius)).clamp(0, max);
        *tiled.get_pixel(sx as u32, sy as u32)
    });

    let mix = settings.mix as f64 / 100.0;
    GrayImage::from_fn(size, size, |x, y| {
        let plain = tiled.get_pixel(x, y).0[0] as f64;
        let spread = spread.get_pixel(x, y).0[0] as f64;
        Luma([(plain * (1.0 - mix) + spread * mix).round() as u8])
    })
}

/// Rotate the pattern by `angle` degrees and crop `width × height` from its
/// center.
fn rotated_crop(pattern: &GrayImage, width: u32, height: u32, angle: f64) -> GrayImage {
    let (pw, ph) = pattern.dimensions();
    let (sin, cos) = angle.to_radians().sin_cos();
    let pcx = pw as f64 / 2.0;
    let pcy = ph as f64 / 2.0;
    let cx = width as f64 / 2.0;
    let cy = height as f64 / 2.0;

    GrayImage::from_fn(width, height, |x, y| {
        let dx = x as f64 + 0.5 - cx;
        let dy = y as f64 + 0.5 - cy;
        let sx = (pcx + dx * cos + dy * sin).floor();
        let sy = (pcy - dx * sin + dy * cos).floor();
        if sx < 0.0 || sy < 0.0 || sx >= pw as f64 || sy >= ph as f64 {
            return Luma([0]);
        }
        *pattern.get_pixel(sx as u32, sy as u32)
    })
}

/// Clamp colors near white to `gray(100 - limit)` and near black to
/// `gray(limit)`.
fn near_black_white(image: &RgbaImage, settings: &EmbroiderySettings) -> RgbaImage {
    if settings.gray_limit == 0 && settings.color_fuzz == 0.0 {
        return image.clone();
    }

    // fuzz is a percentage of the largest RGB distance
    let fuzz = settings.color_fuzz / 100.0 * (3.0f64 * 255.0 * 255.0).sqrt();
    let light = (255.0 * (100 - settings.gray_limit) as f64 / 100.0).round() as u8;
    let dark = (255.0 * settings.gray_limit as f64 / 100.0).round() as u8;

    let distance = |p: &[u8; 4], v: f64| {
        (0..3)
            .map(|k| (p[k] as f64 - v).powi(2))
            .sum::<f64>()
            .sqrt()
    };

    let mut out = image.clone();
    for px in out.pixels_mut() {
        if distance(&px.0, 255.0) <= fuzz {
            px.0 = [light, light, light, px.0[3]];
        } else if distance(&px.0, 0.0) <= fuzz {
            px.0 = [dark, dark, dark, px.0[3]];
        }
    }
    out
}

/// Soft-light blend of a source value over a backdrop, both in `0..=1`.
#[inline]
fn soft_light(backdrop: f64, source: f64) -> f64 {
    if source <= 0.5 {
        backdrop - (1.0 - 2.0 * source) * backdrop * (1.0 - backdrop)
    } else {
        let d = if backdrop <= 0.25 {
            ((16.0 * backdrop - 12.0) * backdrop + 4.0) * backdrop
        } else {
            backdrop.sqrt()
        };
        backdrop + (2.0 * source - 1.0) * (d - backdrop)
    }
}

/// Hard-light blend of a source value over a backdrop, both in `0..=1`.
#[inline]
fn hard_light(backdrop: f64, source: f64) -> f64 {
    if source <= 0.5 {
        backdrop * 2.0 * source
    } else {
        let s = 2.0 * source - 1.0;
        backdrop + s - backdrop * s
    }
}

#[inline]
fn unit(v: u8) -> f64 {
    v as f64 / 255.0
}

#[inline]
fn to_u8(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Soft-light the pattern into the toned image, opaque where `mask` holds.
fn stitch_layer(toned: &RgbaImage, pattern: &GrayImage, mask: &[bool]) -> RgbaImage {
    let width = toned.width();
    RgbaImage::from_fn(width, toned.height(), |x, y| {
        let idx = (y * width + x) as usize;
        if !mask[idx] {
            return Rgba([0, 0, 0, 0]);
        }
        let base = toned.get_pixel(x, y).0;
        let s = unit(pattern.get_pixel(x, y).0[0]);
        Rgba([
            to_u8(soft_light(unit(base[0]), s)),
            to_u8(soft_light(unit(base[1]), s)),
            to_u8(soft_light(unit(base[2]), s)),
            255,
        ])
    })
}

fn alpha_of(image: &RgbaImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| Luma([image.get_pixel(x, y).0[3]]))
}

fn blurred(gray: &GrayImage, sigma: f32) -> GrayImage {
    if sigma > 0.0 {
        imageops::blur(gray, sigma)
    } else {
        gray.clone()
    }
}

/// Lambertian shading of a height map lit from `azimuth`/`elevation`.
fn shade(height_map: &GrayImage, azimuth: f64, elevation: f64) -> Vec<f64> {
    let (w, h) = height_map.dimensions();
    let (az_sin, az_cos) = azimuth.to_radians().sin_cos();
    let (el_sin, el_cos) = elevation.to_radians().sin_cos();
    let light = [az_cos * el_cos, az_sin * el_cos, el_sin];

    let at = |x: i64, y: i64| {
        let x = x.clamp(0, w as i64 - 1) as u32;
        let y = y.clamp(0, h as i64 - 1) as u32;
        unit(height_map.get_pixel(x, y).0[0])
    };

    let mut out = Vec::with_capacity((w * h) as usize);
    for y in 0..h as i64 {
        for x in 0..w as i64 {
            let nx = at(x - 1, y - 1) + at(x - 1, y) + at(x - 1, y + 1)
                - at(x + 1, y - 1)
                - at(x + 1, y)
                - at(x + 1, y + 1);
            let ny = at(x - 1, y + 1) + at(x, y + 1) + at(x + 1, y + 1)
                - at(x - 1, y - 1)
                - at(x, y - 1)
                - at(x + 1, y - 1);
            let nz = 2.0;
            let value = if nx == 0.0 && ny == 0.0 {
                light[2]
            } else {
                let dot = nx * light[0] + ny * light[1] + nz * light[2];
                if dot > 0.0 {
                    dot / (nx * nx + ny * ny + nz * nz).sqrt()
                } else {
                    0.0
                }
            };
            out.push(value);
        }
    }
    out
}

/// Sigmoidal contrast around the midpoint; identity for `contrast == 0`.
fn sigmoidal(v: f64, contrast: f64) -> f64 {
    if contrast == 0.0 {
        return v;
    }
    let sig = |t: f64| 1.0 / (1.0 + (-t).exp());
    let low = sig(-contrast / 2.0);
    let high = sig(contrast / 2.0);
    (sig(contrast * (v - 0.5)) - low) / (high - low)
}

/// Hard-light a shaded, blurred copy of the layer's alpha onto the layer.
fn add_bevel(layer: &mut RgbaImage, settings: &EmbroiderySettings) {
    let alpha = blurred(&alpha_of(layer), settings.bevel as f32);
    let shading = shade(&alpha, settings.azimuth, settings.elevation);

    let inside: Vec<f64> = layer
        .pixels()
        .zip(&shading)
        .filter(|(p, _)| p.0[3] != 0)
        .map(|(_, s)| *s)
        .collect();
    let (min, max) = inside
        .iter()
        .fold((f64::MAX, f64::MIN), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    let span = max - min;

    for (px, s) in layer.pixels_mut().zip(&shading) {
        if px.0[3] == 0 {
            continue;
        }
        let leveled = if span > f64::EPSILON { (s - min) / span } else { 0.5 };
        let curved = ((3.5 * leveled - 5.05) * leveled + 2.05) * leveled + 0.25;
        let texture = sigmoidal(curved.clamp(0.0, 1.0), settings.contrast);
        for k in 0..3 {
            px.0[k] = to_u8(hard_light(unit(px.0[k]), texture));
        }
    }
}

/// Put the layer over a black drop shadow of its own alpha.
fn with_shadow(layer: &RgbaImage, settings: &EmbroiderySettings) -> RgbaImage {
    let shadow_alpha = blurred(&alpha_of(layer), settings.extent as f32);
    let intensity = settings.intensity / 100.0;

    RgbaImage::from_fn(layer.width(), layer.height(), |x, y| {
        let a = unit(shadow_alpha.get_pixel(x, y).0[0]) * intensity;
        // level alpha from 0..50% to the full range
        let shadow = Rgba([0, 0, 0, to_u8(a * 2.0)]);
        over(*layer.get_pixel(x, y), shadow)
    })
}

/// Porter-Duff "over" with straight alpha.
fn over(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let sa = unit(src.0[3]);
    let da = unit(dst.0[3]);
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let mut out = [0u8; 4];
    for k in 0..3 {
        let c = (unit(src.0[k]) * sa + unit(dst.0[k]) * da * (1.0 - sa)) / out_a;
        out[k] = to_u8(c);
    }
    out[3] = to_u8(out_a);
    Rgba(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stripes() -> RgbaImage {
        RgbaImage::from_fn(24, 24, |x, _| match x / 8 {
            0 => Rgba([200, 0, 0, 255]),
            1 => Rgba([0, 0, 200, 255]),
            _ => Rgba([0, 0, 0, 0]),
        })
    }

    #[test]
    fn test_default_settings_are_valid() {
        assert!(EmbroiderySettings::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_settings_name_the_setting() {
        let cases = [
            (
                EmbroiderySettings {
                    angle: 400,
                    ..Default::default()
                },
                "angle",
            ),
            (
                EmbroiderySettings {
                    elevation: 95.0,
                    ..Default::default()
                },
                "elevation",
            ),
            (
                EmbroiderySettings {
                    number_of_colors: 0,
                    ..Default::default()
                },
                "number of colors",
            ),
            (
                EmbroiderySettings {
                    thickness: 0,
                    ..Default::default()
                },
                "thickness",
            ),
            (
                EmbroiderySettings {
                    thickness: u32::MAX,
                    ..Default::default()
                },
                "thickness",
            ),
            (
                EmbroiderySettings {
                    mix: 101,
                    ..Default::default()
                },
                "mix",
            ),
        ];
        for (settings, expected) in cases {
            match settings.validate() {
                Err(EffectError::InvalidSetting { name, .. }) => assert_eq!(name, expected),
                other => panic!("expected {expected} to be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_settings_deserialize_partial() {
        let settings: EmbroiderySettings = serde_yaml::from_str("pattern: crosshatch\nthickness: 3\n").unwrap();
        assert_eq!(settings.pattern, EmbroideryPattern::Crosshatch);
        assert_eq!(settings.thickness, 3);
        assert_eq!(settings.azimuth, 130.0);
    }

    #[test]
    fn test_linear_texture_rolls_bands() {
        let texture = linear_texture(2);
        assert_eq!(texture.dimensions(), (8, 8));
        // band 0 starts white, band 1 is rolled right by 2
        assert_eq!(texture.get_pixel(0, 0).0[0], 255);
        assert_eq!(texture.get_pixel(2, 2).0[0], 255);
        assert_eq!(texture.get_pixel(7, 0).0[0], 0);
    }

    #[test]
    fn test_crosshatch_texture_mirrors() {
        let texture = crosshatch_texture(2);
        assert_eq!(texture.dimensions(), (5, 10));
        assert_eq!(texture.get_pixel(0, 0).0[0], 255);
        assert_eq!(texture.get_pixel(0, 5).0[0], 0);
    }

    #[test]
    fn test_blend_modes_identities() {
        // a neutral source leaves the backdrop unchanged
        assert!((soft_light(0.3, 0.5) - 0.3).abs() < 1e-9);
        assert!((hard_light(0.3, 0.5) - 0.3).abs() < 1e-9);
        assert!((hard_light(0.3, 1.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_over_on_transparent() {
        let src = Rgba([10, 20, 30, 255]);
        assert_eq!(over(src, Rgba([0, 0, 0, 0])), src);
        assert_eq!(over(Rgba([0, 0, 0, 0]), Rgba([0, 0, 0, 0])), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_near_black_white_clamp() {
        let img = RgbaImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgba([252, 252, 252, 255])
            } else {
                Rgba([3, 3, 3, 255])
            }
        });
        let out = near_black_white(&img, &EmbroiderySettings::default());
        assert_eq!(out.get_pixel(0, 0).0, [204, 204, 204, 255]);
        assert_eq!(out.get_pixel(1, 0).0, [51, 51, 51, 255]);
    }

    #[test]
    fn test_embroider_keeps_size_and_transparency() {
        let img = stripes();
        let out = embroider(&img, &EmbroiderySettings::default()).unwrap();
        assert_eq!(out.dimensions(), img.dimensions());
        // stitched colors are opaque, the far right stays clear of layers
        assert_eq!(out.get_pixel(4, 12).0[3], 255);
        assert_eq!(out.get_pixel(23, 12).0[3], 0);
    }

    #[test]
    fn test_embroider_is_deterministic() {
        let img = stripes();
        let settings = EmbroiderySettings::default();
        assert_eq!(embroider(&img, &settings).unwrap(), embroider(&img, &settings).unwrap());
    }

    #[test]
    fn test_embroider_rejects_invalid_settings() {
        let settings = EmbroiderySettings {
            intensity: -1.0,
            ..Default::default()
        };
        assert!(embroider(&stripes(), &settings).is_err());
    }

    #[test]
    fn test_do_embroidery_uses_sixteen_colors() {
        let img = RgbaImage::from_fn(20, 1, |x, _| Rgba([(x * 12) as u8, 0, 0, 255]));
        let settings = EmbroiderySettings {
            number_of_colors: 1,
            bevel: 0,
            ..Default::default()
        };
        let one = embroider(&img, &settings).unwrap();
        let sixteen = do_embroidery(&img, &settings).unwrap();
        assert_ne!(one, sixteen);
    }
}
