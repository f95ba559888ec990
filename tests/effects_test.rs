//! Effects applied to whole artwork, as the CLI runs them.

mod common;

use common::{canvas, colors, fill, two_color_logo};
use imprint::effects::{
    crop_bounds, deboss, do_embroidery, embroider, laser_engrave, one_color, process_background, remove_colors,
    replace_color, BackgroundActions, BackgroundTone, EmbroideryPattern, EmbroiderySettings, Rect,
};
use imprint::error::EffectError;
use imprint::models::{Effect, PrintMethod};
use imprint_colors::Argb;
use pretty_assertions::assert_eq;

// ============================================================================
// Background crop
// ============================================================================

#[test]
fn test_blank_canvas_crops_to_full_image() {
    let blank = canvas(40, 25, colors::WHITE);
    let rect = crop_bounds(&blank, BackgroundTone::Light, 35, 5);
    assert_eq!(
        rect,
        Rect {
            x: 0,
            y: 0,
            width: 40,
            height: 25
        }
    );
}

#[test]
fn test_black_background_crop() {
    let mut img = canvas(50, 50, colors::BLACK);
    fill(&mut img, 20, 20, 30, 30, colors::WHITE);

    let out = process_background(
        &img,
        "Black",
        BackgroundActions {
            crop: true,
            ..Default::default()
        },
    );
    assert_eq!(
        out.cropped,
        Some(Rect {
            x: 18,
            y: 18,
            width: 15,
            height: 15
        })
    );
    assert!(!out.removed);
}

#[test]
fn test_transparent_background_needs_opt_in() {
    let img = two_color_logo(colors::CLEAR);
    let crop = BackgroundActions {
        crop: true,
        ..Default::default()
    };

    let untouched = process_background(&img, "Transparent", crop);
    assert_eq!(untouched.cropped, None);
    assert_eq!(untouched.image.dimensions(), (64, 64));

    let opted_in = process_background(
        &img,
        "Transparent",
        BackgroundActions {
            remove_on_transparent: true,
            ..crop
        },
    );
    assert!(opted_in.image.width() < 64);
}

// ============================================================================
// Recoloring
// ============================================================================

#[test]
fn test_one_color_clears_background_and_recolors() {
    let gold = Argb::opaque(0xFF, 0xD1, 0x00);
    let out = one_color(&two_color_logo(colors::WHITE), gold, true);

    assert_eq!(out.get_pixel(0, 0).0, [0xFF, 0xD1, 0x00, 0]);
    assert_eq!(out.get_pixel(10, 10).0, [0xFF, 0xD1, 0x00, 255]);
    assert_eq!(out.get_pixel(40, 20).0, [0xFF, 0xD1, 0x00, 255]);
}

#[test]
fn test_replace_then_remove() {
    let logo = two_color_logo(colors::WHITE);
    let red = Argb::from_rgba(colors::BOOK_RED);
    let blue = Argb::from_rgba(colors::BOOK_BLUE);

    let (swapped, changed) = replace_color(&logo, red, blue, 0);
    assert!(changed);
    assert_eq!(swapped.get_pixel(10, 10).0, colors::BOOK_BLUE);

    let stripped = remove_colors(&swapped, &[blue]);
    assert_eq!(stripped.get_pixel(10, 10).0[3], 0);
    assert_eq!(stripped.get_pixel(40, 20).0[3], 0);
    assert_eq!(stripped.get_pixel(0, 0).0[3], 255);
}

// ============================================================================
// Deboss and embroidery
// ============================================================================

#[test]
fn test_deboss_keeps_geometry_and_alpha() {
    let logo = two_color_logo(colors::CLEAR);
    let out = deboss(&logo, false);

    assert_eq!(out.dimensions(), logo.dimensions());
    for (a, b) in logo.pixels().zip(out.pixels()) {
        assert_eq!(a.0[3], b.0[3]);
        assert_eq!(b.0[0], b.0[1]);
        assert_eq!(b.0[1], b.0[2]);
    }
}

#[test]
fn test_embroidery_preserves_canvas_size() {
    let logo = two_color_logo(colors::CLEAR);

    let linear = embroider(&logo, &EmbroiderySettings::default()).unwrap();
    assert_eq!(linear.dimensions(), logo.dimensions());

    let crosshatch = do_embroidery(
        &logo,
        &EmbroiderySettings {
            pattern: EmbroideryPattern::Crosshatch,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(crosshatch.dimensions(), logo.dimensions());
}

#[test]
fn test_embroidery_is_deterministic() {
    let logo = two_color_logo(colors::WHITE);
    let settings = EmbroiderySettings::default();
    let first = embroider(&logo, &settings).unwrap();
    let second = embroider(&logo, &settings).unwrap();
    assert!(first.as_raw() == second.as_raw(), "same input must stitch identically");
}

#[test]
fn test_embroidery_rejects_bad_settings() {
    let settings = EmbroiderySettings {
        mix: 150,
        ..Default::default()
    };
    let err = embroider(&canvas(8, 8, colors::WHITE), &settings).unwrap_err();
    assert_eq!(
        err,
        EffectError::InvalidSetting {
            name: "mix",
            range: "between 0 and 100"
        }
    );
    assert_eq!(err.to_string(), "Invalid mix specified, value must be between 0 and 100");
}

#[test]
fn test_embroidery_rejects_oversized_thickness() {
    let settings = EmbroiderySettings {
        thickness: u32::MAX,
        ..Default::default()
    };
    let err = embroider(&canvas(8, 8, colors::WHITE), &settings).unwrap_err();
    assert_eq!(
        err,
        EffectError::InvalidSetting {
            name: "thickness",
            range: "between 1 and 256"
        }
    );
}

// ============================================================================
// Laser engraving
// ============================================================================

#[test]
fn test_laser_texture_only_where_artwork_is() {
    const STEEL: [u8; 4] = [120, 124, 130, 255];
    let logo = two_color_logo(colors::CLEAR);
    // smaller than the artwork, so it is scaled up to cover it
    let texture = canvas(16, 16, STEEL);

    let out = laser_engrave(&logo, &texture, false);

    assert_eq!(out.dimensions(), logo.dimensions());
    assert_eq!(out.get_pixel(0, 0).0[3], 0);
    assert_eq!(out.get_pixel(63, 63).0[3], 0);
    for (x, y) in [(10, 10), (40, 20)] {
        let px = out.get_pixel(x, y).0;
        assert_eq!(px[3], 255);
        assert!(
            px.iter().zip(STEEL).all(|(a, b)| a.abs_diff(b) <= 1),
            "pixel ({x},{y}) is {px:?}"
        );
    }
}

#[test]
fn test_laser_clears_white_background() {
    let texture = canvas(64, 64, [90, 60, 30, 255]);
    let out = laser_engrave(&two_color_logo(colors::WHITE), &texture, true);

    assert_eq!(out.get_pixel(0, 0).0[3], 0);
    assert_eq!(out.get_pixel(10, 10).0, [90, 60, 30, 255]);
}

// ============================================================================
// Print methods
// ============================================================================

#[test]
fn test_print_methods_select_effects() {
    let cases = [
        (7, Effect::Debossing),
        (12, Effect::Embroidery),
        (16, Effect::LaserEngraved),
        (22, Effect::None),
    ];
    for (id, effect) in cases {
        let method = PrintMethod::from_id(id).unwrap();
        assert_eq!(method.effect(), effect, "print method {id}");
        assert_eq!(method.id(), id);
    }
    assert_eq!(PrintMethod::from_id(2), None);
}
