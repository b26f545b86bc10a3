//! # CLI Tests
//!
//! Run the `makesplash` binary and check files written, exit codes and
//! error output.

use image::{Rgba, RgbaImage};
use pretty_assertions::assert_eq;
use std::path::Path;
use std::process::{Command, Output};

fn makesplash(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_makesplash"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run makesplash")
}

fn write_background(path: &Path) {
    RgbaImage::from_pixel(120, 90, Rgba([10, 10, 10, 255]))
        .save(path)
        .expect("Failed to write background");
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_defaults_write_png_and_jpg() {
    let dir = tempfile::tempdir().unwrap();
    write_background(&dir.path().join("background.png"));

    let output = makesplash(dir.path(), &[]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(String::from_utf8_lossy(&output.stdout).contains("v.1.0"));
    let png = image::open(dir.path().join("splash.png")).unwrap();
    let jpg = image::open(dir.path().join("splash.jpg")).unwrap();
    assert_eq!((png.width(), png.height()), (120, 90));
    assert_eq!((jpg.width(), jpg.height()), (120, 90));
}

#[test]
fn test_explicit_paths_replace_output_extension() {
    let dir = tempfile::tempdir().unwrap();
    write_background(&dir.path().join("art.png"));

    let output = makesplash(dir.path(), &["2.3", "-b", "art.png", "-o", "banner.jpeg"]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(dir.path().join("banner.png").is_file());
    assert!(dir.path().join("banner.jpg").is_file());
    assert!(!dir.path().join("banner.jpeg").exists());
}

#[test]
fn test_missing_background_exits_one() {
    let dir = tempfile::tempdir().unwrap();

    let output = makesplash(dir.path(), &["2.3", "-b", "missing.png"]);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.starts_with("Error: Image load error: missing.png"), "stderr: {}", err);
    assert!(!dir.path().join("splash.png").exists());
    assert!(!dir.path().join("splash.jpg").exists());
}

#[test]
fn test_unknown_flag_exits_two() {
    let dir = tempfile::tempdir().unwrap();

    let output = makesplash(dir.path(), &["--bogus"]);

    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    assert!(
        err.starts_with("Error: Argument error: unexpected argument '--bogus'"),
        "stderr: {}",
        err
    );
    assert!(!err.contains("error: error"), "stderr: {}", err);
}

#[test]
fn test_help_exits_zero() {
    let dir = tempfile::tempdir().unwrap();

    let output = makesplash(dir.path(), &["--help"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Usage"));
}

#[test]
fn test_negative_padding_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write_background(&dir.path().join("background.png"));

    let output = makesplash(dir.path(), &["--padding=-5"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("padding"), "stderr: {}", stderr(&output));
    assert!(!dir.path().join("splash.png").exists());
}
