//! 8-bit ARGB color type
//!
//! [`Argb`] is the pixel and palette value used by the whole pipeline. Its
//! [`name()`](Argb::name) is the canonical lookup key: two colors are "the
//! same color" exactly when their names match.

use std::fmt;
use std::str::FromStr;

use crate::palette::ParseColorError;

/// A color with straight (non-premultiplied) 8-bit alpha.
///
/// Equality and hashing are by channel values. Fully transparent colors
/// compare by channel values too, but all of them share the key `"0"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Argb {
    /// Alpha channel (0 = fully transparent)
    pub a: u8,
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Argb {
    /// Named `Transparent`: white with zero alpha.
    pub const TRANSPARENT: Argb = Argb::new(0, 255, 255, 255);
    /// Opaque black.
    pub const BLACK: Argb = Argb::opaque(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Argb = Argb::opaque(255, 255, 255);

    /// Create a color from all four channels.
    #[inline]
    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Create a fully opaque color.
    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(255, r, g, b)
    }

    /// Create a color from an `image` RGBA pixel.
    #[inline]
    pub fn from_rgba(px: [u8; 4]) -> Self {
        Self::new(px[3], px[0], px[1], px[2])
    }

    /// Convert to an `image` RGBA pixel.
    #[inline]
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Pack as `0xAARRGGBB`.
    #[inline]
    pub fn to_u32(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Unpack from `0xAARRGGBB`.
    #[inline]
    pub fn from_u32(value: u32) -> Self {
        Self::new(
            (value >> 24) as u8,
            (value >> 16) as u8,
            (value >> 8) as u8,
            value as u8,
        )
    }

    /// Whether the alpha channel is zero.
    #[inline]
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Canonical key: lowercase `aarrggbb`, or `"0"` for any fully
    /// transparent color.
    ///
    /// # Example
    /// ```
    /// use imprint_colors::Argb;
    /// assert_eq!(Argb::WHITE.name(), "ffffffff");
    /// assert_eq!(Argb::new(0, 12, 34, 56).name(), "0");
    /// ```
    pub fn name(self) -> String {
        if self.is_transparent() {
            return "0".to_string();
        }
        format!("{:08x}", self.to_u32())
    }

    /// `#RRGGBB` presentation string (alpha dropped).
    pub fn hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// HSV hue in degrees, `0.0..360.0`. Grays have hue 0.
    pub fn hue(self) -> f32 {
        if self.r == self.g && self.g == self.b {
            return 0.0;
        }
        let r = self.r as f32 / 255.0;
        let g = self.g as f32 / 255.0;
        let b = self.b as f32 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let mut hue = if r == max {
            (g - b) / delta
        } else if g == max {
            2.0 + (b - r) / delta
        } else {
            4.0 + (r - g) / delta
        };
        hue *= 60.0;
        if hue < 0.0 {
            hue += 360.0;
        }
        hue
    }
}

impl fmt::Display for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.to_u32())
    }
}

impl serde::Serialize for Argb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for Argb {
    type Err = ParseColorError;

    /// Parse a hex color.
    ///
    /// Accepts `RGB`, `RRGGBB` and `AARRGGBB`, with or without a leading
    /// `#`. Colors without an alpha component are opaque.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        if !matches!(hex.len(), 3 | 6 | 8) {
            return Err(ParseColorError::InvalidLength(hex.len()));
        }
        // from_str_radix alone would accept a sign
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseColorError::InvalidHex(hex.to_string()));
        }
        let invalid = |_: std::num::ParseIntError| ParseColorError::InvalidHex(hex.to_string());

        match hex.len() {
            3 => {
                let mut channels = [0u8; 3];
                for (i, c) in hex.chars().enumerate() {
                    let v = u8::from_str_radix(&c.to_string(), 16).map_err(invalid)?;
                    channels[i] = v * 17;
                }
                Ok(Self::opaque(channels[0], channels[1], channels[2]))
            }
            6 => {
                let v = u32::from_str_radix(hex, 16).map_err(invalid)?;
                Ok(Self::from_u32(0xFF00_0000 | v))
            }
            8 => {
                let v = u32::from_str_radix(hex, 16).map_err(invalid)?;
                Ok(Self::from_u32(v))
            }
            _ => Err(ParseColorError::InvalidLength(hex.len())),
        }
    }
}
