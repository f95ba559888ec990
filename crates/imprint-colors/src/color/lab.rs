//! CIE L*a*b* conversions
//!
//! Two independent sRGB → Lab conversions are used, and they are NOT
//! interchangeable:
//!
//! | Conversion | White point | Linear segment | Precision | Used by |
//! |------------|-------------|----------------|-----------|---------|
//! | [`rgb_to_lab`] | D50 (0.964221, 1.0, 0.825211) | `c / 12` | `f32`, integer output | [`color_difference`](super::color_difference) |
//! | [`Lab::from_rgb`] | D65 (95.047, 100, 108.883) | `c / 12.92` | `f64` | [`delta_e`](super::delta_e), metrics, color book re-rank |
//!
//! Unifying them would change which colors get merged downstream.

/// D50 reference white.
const D50_WHITE: [f32; 3] = [0.964221, 1.0, 0.825211];

/// sRGB → XYZ (D50 adapted) matrix rows.
const D50_MATRIX: [[f32; 3]; 3] = [
    [0.436052025, 0.385081593, 0.143087414],
    [0.222491598, 0.71688606, 0.060621486],
    [0.013929122, 0.097097002, 0.71418547],
];

/// Lab epsilon (216/24389).
const EPSILON: f32 = 216.0 / 24389.0;
/// Lab kappa (24389/27).
const KAPPA: f32 = 24389.0 / 27.0;

/// D65 reference white (scaled to 100).
const D65_WHITE: [f64; 3] = [95.047, 100.000, 108.883];

/// sRGB → XYZ (D65) matrix rows.
const D65_MATRIX: [[f64; 3]; 3] = [
    [0.4124, 0.3576, 0.1805],
    [0.2126, 0.7152, 0.0722],
    [0.0193, 0.1192, 0.9505],
];

#[inline]
fn linearize_d50(c: u8) -> f32 {
    let c = c as f32 / 255.0;
    if c as f64 <= 0.04045 {
        c / 12.0
    } else {
        ((c as f64 + 0.055) / 1.055).powf(2.4) as f32
    }
}

#[inline]
fn lab_f_d50(t: f32) -> f32 {
    if t > EPSILON {
        (t as f64).powf((1.0f32 / 3.0) as f64) as f32
    } else {
        (KAPPA * t + 16.0) / 116.0
    }
}

/// Convert sRGB to integer Lab using the D50 conversion.
///
/// Returns `[L·2.55, a, b]`, each rounded by adding 0.5 and truncating
/// toward zero.
pub fn rgb_to_lab(r: u8, g: u8, b: u8) -> [i32; 3] {
    let rgb = [linearize_d50(r), linearize_d50(g), linearize_d50(b)];
    let xyz: Vec<f32> = D50_MATRIX
        .iter()
        .map(|row| row[0] * rgb[0] + row[1] * rgb[1] + row[2] * rgb[2])
        .collect();

    let fx = lab_f_d50(xyz[0] / D50_WHITE[0]);
    let fy = lab_f_d50(xyz[1] / D50_WHITE[1]);
    let fz = lab_f_d50(xyz[2] / D50_WHITE[2]);

    let l = 116.0 * fy - 16.0;
    let a = 500.0 * (fx - fy);
    let b = 200.0 * (fy - fz);

    [
        (2.55 * l as f64 + 0.5) as i32,
        (a as f64 + 0.5) as i32,
        (b as f64 + 0.5) as i32,
    ]
}

/// A color in CIE L*a*b* (D65, 2° observer).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    /// Lightness, 0..=100
    pub l: f64,
    /// Green-red axis
    pub a: f64,
    /// Blue-yellow axis
    pub b: f64,
}

impl Lab {
    /// Convert sRGB to Lab via XYZ (D65).
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let linear = |c: u8| {
            let c = c as f64 / 255.0;
            let c = if c > 0.04045 {
                ((c + 0.055) / 1.055).powf(2.4)
            } else {
                c / 12.92
            };
            c * 100.0
        };
        let rgb = [linear(r), linear(g), linear(b)];
        let xyz: Vec<f64> = D65_MATRIX
            .iter()
            .map(|row| row[0] * rgb[0] + row[1] * rgb[1] + row[2] * rgb[2])
            .collect();

        let f = |t: f64| {
            if t > 0.008856 {
                t.powf(1.0 / 3.0)
            } else {
                7.787 * t + 16.0 / 116.0
            }
        };
        let fx = f(xyz[0] / D65_WHITE[0]);
        let fy = f(xyz[1] / D65_WHITE[1]);
        let fz = f(xyz[2] / D65_WHITE[2]);

        Self {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }

    /// CIE76 distance to another Lab color.
    #[inline]
    pub fn distance(&self, other: &Lab) -> f64 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        (dl * dl + da * da + db * db).sqrt()
    }
}
