//! Static named-color table and nearest-name lookup
//!
//! The table is explicit data in a fixed order: `Transparent` first, then
//! the web colors alphabetically. Lookups scan in that order, so the order
//! is part of the behavior (e.g. `Aqua` wins over `Cyan` for `#00FFFF`).

use serde::Serialize;

use super::argb::Argb;

/// A color with a well-known name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NamedColor {
    /// Display name, e.g. `"White"`
    pub name: &'static str,
    /// Color value
    pub color: Argb,
}

const fn nc(name: &'static str, rgb: u32) -> NamedColor {
    NamedColor {
        name,
        color: Argb::opaque((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8),
    }
}

/// All named colors in lookup order.
pub const NAMED_COLORS: &[NamedColor] = &[
    NamedColor {
        name: "Transparent",
        color: Argb::TRANSPARENT,
    },
    nc("AliceBlue", 0xF0F8FF),
    nc("AntiqueWhite", 0xFAEBD7),
    nc("Aqua", 0x00FFFF),
    nc("Aquamarine", 0x7FFFD4),
    nc("Azure", 0xF0FFFF),
    nc("Beige", 0xF5F5DC),
    nc("Bisque", 0xFFE4C4),
    nc("Black", 0x000000),
    nc("BlanchedAlmond", 0xFFEBCD),
    nc("Blue", 0x0000FF),
    nc("BlueViolet", 0x8A2BE2),
    nc("Brown", 0xA52A2A),
    nc("BurlyWood", 0xDEB887),
    nc("CadetBlue", 0x5F9EA0),
    nc("Chartreuse", 0x7FFF00),
    nc("Chocolate", 0xD2691E),
    nc("Coral", 0xFF7F50),
    nc("CornflowerBlue", 0x6495ED),
    nc("Cornsilk", 0xFFF8DC),
    nc("Crimson", 0xDC143C),
    nc("Cyan", 0x00FFFF),
    nc("DarkBlue", 0x00008B),
    nc("DarkCyan", 0x008B8B),
    nc("DarkGoldenrod", 0xB8860B),
    nc("DarkGray", 0xA9A9A9),
    nc("DarkGreen", 0x006400),
    nc("DarkKhaki", 0xBDB76B),
    nc("DarkMagenta", 0x8B008B),
    nc("DarkOliveGreen", 0x556B2F),
    nc("DarkOrange", 0xFF8C00),
    nc("DarkOrchid", 0x9932CC),
    nc("DarkRed", 0x8B0000),
    nc("DarkSalmon", 0xE9967A),
    nc("DarkSeaGreen", 0x8FBC8F),
    nc("DarkSlateBlue", 0x483D8B),
    nc("DarkSlateGray", 0x2F4F4F),
    nc("DarkTurquoise", 0x00CED1),
    nc("DarkViolet", 0x9400D3),
    nc("DeepPink", 0xFF1493),
    nc("DeepSkyBlue", 0x00BFFF),
    nc("DimGray", 0x696969),
    nc("DodgerBlue", 0x1E90FF),
    nc("Firebrick", 0xB22222),
    nc("FloralWhite", 0xFFFAF0),
    nc("ForestGreen", 0x228B22),
    nc("Fuchsia", 0xFF00FF),
    nc("Gainsboro", 0xDCDCDC),
    nc("GhostWhite", 0xF8F8FF),
    nc("Gold", 0xFFD700),
    nc("Goldenrod", 0xDAA520),
    nc("Gray", 0x808080),
    nc("Green", 0x008000),
    nc("GreenYellow", 0xADFF2F),
    nc("Honeydew", 0xF0FFF0),
    nc("HotPink", 0xFF69B4),
    nc("IndianRed", 0xCD5C5C),
    nc("Indigo", 0x4B0082),
    nc("Ivory", 0xFFFFF0),
    nc("Khaki", 0xF0E68C),
    nc("Lavender", 0xE6E6FA),
    nc("LavenderBlush", 0xFFF0F5),
    nc("LawnGreen", 0x7CFC00),
    nc("LemonChiffon", 0xFFFACD),
    nc("LightBlue", 0xADD8E6),
    nc("LightCoral", 0xF08080),
    nc("LightCyan", 0xE0FFFF),
    nc("LightGoldenrodYellow", 0xFAFAD2),
    nc("LightGreen", 0x90EE90),
    nc("LightGray", 0xD3D3D3),
    nc("LightPink", 0xFFB6C1),
    nc("LightSalmon", 0xFFA07A),
    nc("LightSeaGreen", 0x20B2AA),
    nc("LightSkyBlue", 0x87CEFA),
    nc("LightSlateGray", 0x778899),
    nc("LightSteelBlue", 0xB0C4DE),
    nc("LightYellow", 0xFFFFE0),
    nc("Lime", 0x00FF00),
    nc("LimeGreen", 0x32CD32),
    nc("Linen", 0xFAF0E6),
    nc("Magenta", 0xFF00FF),
    nc("Maroon", 0x800000),
    nc("MediumAquamarine", 0x66CDAA),
    nc("MediumBlue", 0x0000CD),
    nc("MediumOrchid", 0xBA55D3),
    nc("MediumPurple", 0x9370DB),
    nc("MediumSeaGreen", 0x3CB371),
    nc("MediumSlateBlue", 0x7B68EE),
    nc("MediumSpringGreen", 0x00FA9A),
    nc("MediumTurquoise", 0x48D1CC),
    nc("MediumVioletRed", 0xC71585),
    nc("MidnightBlue", 0x191970),
    nc("MintCream", 0xF5FFFA),
    nc("MistyRose", 0xFFE4E1),
    nc("Moccasin", 0xFFE4B5),
    nc("NavajoWhite", 0xFFDEAD),
    nc("Navy", 0x000080),
    nc("OldLace", 0xFDF5E6),
    nc("Olive", 0x808000),
    nc("OliveDrab", 0x6B8E23),
    nc("Orange", 0xFFA500),
    nc("OrangeRed", 0xFF4500),
    nc("Orchid", 0xDA70D6),
    nc("PaleGoldenrod", 0xEEE8AA),
    nc("PaleGreen", 0x98FB98),
    nc("PaleTurquoise", 0xAFEEEE),
    nc("PaleVioletRed", 0xDB7093),
    nc("PapayaWhip", 0xFFEFD5),
    nc("PeachPuff", 0xFFDAB9),
    nc("Peru", 0xCD853F),
    nc("Pink", 0xFFC0CB),
    nc("Plum", 0xDDA0DD),
    nc("PowderBlue", 0xB0E0E6),
    nc("Purple", 0x800080),
    nc("Red", 0xFF0000),
    nc("RosyBrown", 0xBC8F8F),
    nc("RoyalBlue", 0x4169E1),
    nc("SaddleBrown", 0x8B4513),
    nc("Salmon", 0xFA8072),
    nc("SandyBrown", 0xF4A460),
    nc("SeaGreen", 0x2E8B57),
    nc("SeaShell", 0xFFF5EE),
    nc("Sienna", 0xA0522D),
    nc("Silver", 0xC0C0C0),
    nc("SkyBlue", 0x87CEEB),
    nc("SlateBlue", 0x6A5ACD),
    nc("SlateGray", 0x708090),
    nc("Snow", 0xFFFAFA),
    nc("SpringGreen", 0x00FF7F),
    nc("SteelBlue", 0x4682B4),
    nc("Tan", 0xD2B48C),
    nc("Teal", 0x008080),
    nc("Thistle", 0xD8BFD8),
    nc("Tomato", 0xFF6347),
    nc("Turquoise", 0x40E0D0),
    nc("Violet", 0xEE82EE),
    nc("Wheat", 0xF5DEB3),
    nc("White", 0xFFFFFF),
    nc("WhiteSmoke", 0xF5F5F5),
    nc("Yellow", 0xFFFF00),
    nc("YellowGreen", 0x9ACD32),
];

/// Find the named color closest to `color`.
///
/// An exact ARGB match returns immediately. Otherwise the entry with the
/// smallest sum of absolute channel differences (alpha included) wins,
/// first entry on ties.
pub fn nearest_named_color(color: Argb) -> &'static NamedColor {
    let mut best = &NAMED_COLORS[0];
    let mut best_distance = i32::MAX;

    for named in NAMED_COLORS {
        if named.color == color {
            return named;
        }
        let c = named.color;
        let distance = (c.r as i32 - color.r as i32).abs()
            + (c.g as i32 - color.g as i32).abs()
            + (c.b as i32 - color.b as i32).abs()
            + (c.a as i32 - color.a as i32).abs();
        if distance < best_distance {
            best_distance = distance;
            best = named;
        }
    }
    best
}

/// Look up a named color by case-insensitive name.
pub fn named_color(name: &str) -> Option<&'static NamedColor> {
    NAMED_COLORS
        .iter()
        .find(|n| n.name.eq_ignore_ascii_case(name))
}
