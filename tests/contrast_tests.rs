// Background luminance and text colour choice

use winhud::contrast::*;
use winhud::models::{Anchor, DpiScale, SurfaceMetrics};

#[test]
fn luminance_uses_rec709_weights() {
    assert_eq!(Rgb::new(0, 0, 0).luminance(), 0.0);
    assert!((Rgb::new(255, 255, 255).luminance() - 255.0).abs() < 1e-9);
    assert!((Rgb::new(0, 255, 0).luminance() - 0.7152 * 255.0).abs() < 1e-9);
}

#[test]
fn average_of_empty_capture_is_none() {
    assert_eq!(average_luminance(&[]), None);
}

#[test]
fn average_luminance_over_pixels() {
    let pixels = [Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)];
    let avg = average_luminance(&pixels).unwrap();
    assert!((avg - 127.5).abs() < 1e-9);
}

#[test]
fn threshold_picks_dark_text_only_above_140() {
    assert_eq!(pick_text_color(200.0), TextColor::Dark);
    assert_eq!(pick_text_color(140.5), TextColor::Dark);
    assert_eq!(pick_text_color(140.0), TextColor::Bright);
    assert_eq!(pick_text_color(20.0), TextColor::Bright);
}

#[test]
fn text_colors() {
    assert_eq!(TextColor::Dark.rgb(), Rgb::new(30, 30, 30));
    assert_eq!(TextColor::Bright.rgb(), Rgb::new(0, 255, 0));
    assert_eq!(TextColor::default(), TextColor::Bright);
}

#[test]
fn sample_region_starts_at_overlay_centre_in_physical_pixels() {
    let region = sample_region(
        Anchor {
            left: 10.0,
            top: 1000.0,
        },
        SurfaceMetrics {
            dpi: DpiScale { x: 2.0, y: 2.0 },
            width: 100.0,
            height: 40.0,
        },
    );
    // Centre (60, 1020) DIP -> (120, 2040) px; the square extends right and down.
    assert_eq!(
        region,
        SampleRegion {
            x: 120,
            y: 2040,
            width: 50,
            height: 50,
        }
    );
}

#[test]
fn sample_region_truncates_each_coordinate() {
    let region = sample_region(
        Anchor {
            left: 10.5,
            top: 7.75,
        },
        SurfaceMetrics {
            dpi: DpiScale { x: 1.25, y: 1.5 },
            width: 101.0,
            height: 33.0,
        },
    );
    // left 13 + 126 / 2, top 11 + 49 / 2
    assert_eq!((region.x, region.y), (76, 35));
}
