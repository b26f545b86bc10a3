//! # Splash Composition Tests
//!
//! End-to-end runs of [`compose_splash`] against generated backgrounds in a
//! scratch directory.
//!
//! Text falls back to the bundled DejaVu Sans faces, so these run the same
//! on hosts without system fonts.

use image::{Rgba, RgbaImage};
use makesplash::compose::render_splash;
use makesplash::fonts::{BUNDLED_FAMILY, FontSet};
use makesplash::{Branding, SplashConfig, SplashError, compose_splash};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};

/// Dark grey, so white text is easy to tell apart.
const BACKGROUND: Rgba<u8> = Rgba([32, 40, 48, 255]);

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Write a solid background PNG and return its path.
fn write_background(dir: &Path, width: u32, height: u32) -> PathBuf {
    let path = dir.join("background.png");
    RgbaImage::from_pixel(width, height, BACKGROUND)
        .save(&path)
        .expect("Failed to write background");
    path
}

fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// ============================================================================
// OUTPUT CONTRACT
// ============================================================================

#[test]
fn test_outputs_match_background_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let background = write_background(dir.path(), 400, 470);

    let output = compose_splash(
        &SplashConfig::default(),
        "2.3",
        &background,
        &dir.path().join("splash.png"),
    )
    .unwrap();

    assert_eq!(output.png, dir.path().join("splash.png"));
    assert_eq!(output.jpg, dir.path().join("splash.jpg"));
    assert_eq!((output.width, output.height), (400, 470));

    let png = image::open(&output.png).unwrap();
    let jpg = image::open(&output.jpg).unwrap();
    assert_eq!((png.width(), png.height()), (400, 470));
    assert_eq!((jpg.width(), jpg.height()), (400, 470));
}

#[test]
fn test_text_lands_in_lower_left() {
    let dir = tempfile::tempdir().unwrap();
    let background = write_background(dir.path(), 400, 470);

    let output = compose_splash(
        &SplashConfig::default(),
        "2.3",
        &background,
        &dir.path().join("splash"),
    )
    .unwrap();
    let splash = image::open(&output.png).unwrap().into_rgba8();

    let lower_left = (0..235u32)
        .flat_map(|y| (0..200u32).map(move |x| (x, 235 + y)))
        .filter(|&(x, y)| *splash.get_pixel(x, y) != BACKGROUND)
        .count();
    assert!(lower_left > 0, "expected text pixels in the lower-left region");

    // Padding strip along the bottom stays untouched.
    for x in 0..400 {
        for y in 470 - 13..470 {
            assert_eq!(*splash.get_pixel(x, y), BACKGROUND, "pixel ({}, {})", x, y);
        }
    }
}

#[test]
fn test_png_output_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let background = write_background(dir.path(), 400, 470);
    let config = SplashConfig::default();

    let first = compose_splash(&config, "2.3", &background, &dir.path().join("a.png")).unwrap();
    let second = compose_splash(&config, "2.3", &background, &dir.path().join("b.png")).unwrap();

    assert_eq!(first.placement, second.placement);
    assert!(fs::read(&first.png).unwrap() == fs::read(&second.png).unwrap());
}

#[test]
fn test_empty_version_renders() {
    let dir = tempfile::tempdir().unwrap();
    let background = write_background(dir.path(), 400, 470);

    let output = compose_splash(
        &SplashConfig::default(),
        "",
        &background,
        &dir.path().join("splash.png"),
    )
    .unwrap();
    assert!(output.png.exists());
    assert!(output.jpg.exists());
}

#[test]
fn test_custom_branding_from_json() {
    let dir = tempfile::tempdir().unwrap();
    let background = write_background(dir.path(), 640, 360);
    let branding_path = dir.path().join("branding.json");
    fs::write(
        &branding_path,
        r#"{ "name": "Orbit", "copyright": "(c) 2026 Orbit team", "credit": "" }"#,
    )
    .unwrap();

    let config = SplashConfig {
        branding: Branding::from_json_file(&branding_path).unwrap(),
        padding: 24.0,
        ..SplashConfig::default()
    };
    let output = compose_splash(&config, "0.9", &background, &dir.path().join("orbit")).unwrap();

    assert_eq!((output.width, output.height), (640, 360));
    assert_eq!(output.placement.dx, 24.0);
}

// ============================================================================
// FAILURES
// ============================================================================

#[test]
fn test_missing_background_creates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("splash.png");

    let err = compose_splash(
        &SplashConfig::default(),
        "2.3",
        &dir.path().join("missing.png"),
        &out,
    )
    .unwrap_err();

    assert!(matches!(err, SplashError::ImageLoad { .. }), "got {:?}", err);
    assert!(err.to_string().contains("missing.png"));
    assert_eq!(entries(dir.path()), Vec::<String>::new());
}

#[test]
fn test_corrupt_background_is_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let background = dir.path().join("background.png");
    fs::write(&background, b"definitely not a png").unwrap();

    let err = compose_splash(
        &SplashConfig::default(),
        "2.3",
        &background,
        &dir.path().join("splash.png"),
    )
    .unwrap_err();

    assert!(matches!(err, SplashError::ImageLoad { .. }), "got {:?}", err);
    assert_eq!(entries(dir.path()), vec!["background.png".to_string()]);
}

#[test]
fn test_unwritable_output_is_write_error() {
    let dir = tempfile::tempdir().unwrap();
    let background = write_background(dir.path(), 400, 470);

    let err = compose_splash(
        &SplashConfig::default(),
        "2.3",
        &background,
        &dir.path().join("no/such/dir/splash.png"),
    )
    .unwrap_err();

    assert!(matches!(err, SplashError::ImageWrite { .. }), "got {:?}", err);
    assert_eq!(entries(dir.path()), vec!["background.png".to_string()]);
}

#[test]
fn test_tiny_canvas_is_layout_error() {
    let dir = tempfile::tempdir().unwrap();
    let background = write_background(dir.path(), 20, 470);

    let err = compose_splash(
        &SplashConfig::default(),
        "2.3",
        &background,
        &dir.path().join("splash.png"),
    )
    .unwrap_err();

    assert!(matches!(err, SplashError::Layout(_)), "got {:?}", err);
}

#[test]
fn test_malformed_template_is_layout_error() {
    let dir = tempfile::tempdir().unwrap();
    let background = write_background(dir.path(), 400, 470);
    let config = SplashConfig {
        branding: Branding {
            template: Some("<span size='7000'>{name}".to_string()),
            ..Branding::default()
        },
        ..SplashConfig::default()
    };

    let err = compose_splash(&config, "2.3", &background, &dir.path().join("splash.png"))
        .unwrap_err();
    assert!(matches!(err, SplashError::Layout(_)), "got {:?}", err);
}

// ============================================================================
// BUNDLED FONTS
// ============================================================================

#[test]
fn test_empty_font_database_renders_with_bundled_faces() {
    let fonts = FontSet::from_database(&fontdb::Database::new(), "Arial").unwrap();
    assert_eq!(fonts.family(), BUNDLED_FAMILY);

    let background = RgbaImage::from_pixel(400, 470, BACKGROUND);
    let config = SplashConfig::default();
    let text = config.branding.text_block("2.3").unwrap();
    let (splash, placement) = render_splash(&background, &text, &fonts, &config).unwrap();

    assert_eq!(splash.dimensions(), (400, 470));
    assert_eq!(placement.dx, 15.0);
    let lit = splash
        .enumerate_pixels()
        .filter(|(x, y, px)| *x < 200 && *y >= 235 && **px != BACKGROUND)
        .count();
    assert!(lit > 0, "expected text pixels in the lower-left region");
}
