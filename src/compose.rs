//! # Splash Composition
//!
//! Fits a laid-out text block onto the background, draws it, and writes the
//! result as PNG and JPEG.
//!
//! ## Pipeline
//!
//! ```text
//! Branding + version → TextBlock → TextLayout (unscaled w × h)
//!                                        ↓
//! background.png → RGBA canvas → Placement::fit → draw glyphs
//!                                        ↓
//!                         encode PNG + JPEG in memory → <base>.png, <base>.jpg
//! ```
//!
//! ## Placement
//!
//! The block is scaled uniformly to the largest size that fits inside the
//! padded canvas, and anchored to the bottom-left corner:
//!
//! ```text
//! ┌──────────────────────────────┐
//! │                              │
//! │  (dx, dy) ┌──────────────┐   │
//! │           │ text × scale │   │
//! │           └──────────────┘   │
//! │  ↕ padding                   │
//! └──────────────────────────────┘
//! ```
//!
//! Both files are encoded from the same pixel buffer before anything is
//! written, so a failure in any earlier stage leaves no output behind.

use ab_glyph::{Font, PxScale, point};
use image::buffer::ConvertBuffer;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageReader, Rgba, RgbaImage, RgbImage};
use std::path::{Path, PathBuf};

use crate::config::SplashConfig;
use crate::error::SplashError;
use crate::fonts::FontSet;
use crate::layout::{self, TextLayout};
use crate::markup::TextBlock;

/// Scale and offset mapping layout space onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub scale: f64,
    /// Left edge of the block on the canvas
    pub dx: f64,
    /// Top edge of the block on the canvas
    pub dy: f64,
}

impl Placement {
    /// Fit a `block_width` × `block_height` block into the canvas with
    /// `padding` on every side, anchored bottom-left.
    ///
    /// ## Example
    ///
    /// ```
    /// use makesplash::compose::Placement;
    ///
    /// let p = Placement::fit(400, 470, 185.0, 60.0, 15.0).unwrap();
    /// assert!((p.scale - 2.0).abs() < 1e-9);
    /// assert_eq!(p.dx, 15.0);
    /// assert_eq!(p.dy, 335.0);
    /// ```
    pub fn fit(
        canvas_width: u32,
        canvas_height: u32,
        block_width: f32,
        block_height: f32,
        padding: f32,
    ) -> Result<Self, SplashError> {
        if !(padding.is_finite() && padding >= 0.0) {
            return Err(SplashError::Layout(format!(
                "padding must be a non-negative number, got {}",
                padding
            )));
        }
        if !(block_width > 0.0 && block_height > 0.0) {
            return Err(SplashError::Layout(format!(
                "text block measures {}x{} px, nothing to scale",
                block_width, block_height
            )));
        }

        let padding = f64::from(padding);
        let avail_w = f64::from(canvas_width) - 2.0 * padding;
        let avail_h = f64::from(canvas_height) - 2.0 * padding;
        if avail_w <= 0.0 || avail_h <= 0.0 {
            return Err(SplashError::Layout(format!(
                "canvas {}x{} px leaves no room inside {} px padding",
                canvas_width, canvas_height, padding
            )));
        }

        let block_height = f64::from(block_height);
        let scale = (avail_w / f64::from(block_width)).min(avail_h / block_height);
        // Ties go to even, as Python's round() does in the original tool.
        let dy = (f64::from(canvas_height) - padding - scale * block_height).round_ties_even();

        Ok(Self {
            scale,
            dx: padding,
            dy,
        })
    }
}

/// Result of a successful composition.
#[derive(Debug, Clone, PartialEq)]
pub struct SplashOutput {
    pub png: PathBuf,
    pub jpg: PathBuf,
    pub width: u32,
    pub height: u32,
    pub placement: Placement,
    /// Family actually used to draw the text
    pub font_family: String,
}

/// Output files for a base path: its extension replaced by `png` and `jpg`.
pub fn output_paths(base: &Path) -> (PathBuf, PathBuf) {
    (base.with_extension("png"), base.with_extension("jpg"))
}

/// Decode the background image into an RGBA canvas.
pub fn load_background(path: &Path) -> Result<RgbaImage, SplashError> {
    let image = ImageReader::open(path)
        .map_err(|e| SplashError::image_load(path, e))?
        .with_guessed_format()
        .map_err(|e| SplashError::image_load(path, e))?
        .decode()
        .map_err(|e| SplashError::image_load(path, e))?;
    log::debug!(
        "Loaded background {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image.into_rgba8())
}

/// Draw `text` onto a copy of `background`.
pub fn render_splash(
    background: &RgbaImage,
    text: &TextBlock,
    fonts: &FontSet,
    config: &SplashConfig,
) -> Result<(RgbaImage, Placement), SplashError> {
    let layout = layout::layout(text, fonts)?;
    let placement = Placement::fit(
        background.width(),
        background.height(),
        layout.width,
        layout.height,
        config.padding,
    )?;
    log::debug!(
        "Block {}x{} px, scale {:.4}, offset ({}, {})",
        layout.width,
        layout.height,
        placement.scale,
        placement.dx,
        placement.dy
    );

    let mut canvas = background.clone();
    draw_layout(&mut canvas, &layout, fonts, &placement, config.text_color);
    Ok((canvas, placement))
}

/// Rasterize every glyph of `layout` at its placed, scaled position.
pub fn draw_layout(
    canvas: &mut RgbaImage,
    layout: &TextLayout,
    fonts: &FontSet,
    placement: &Placement,
    color: [u8; 3],
) {
    let scale = placement.scale as f32;
    let (dx, dy) = (placement.dx as f32, placement.dy as f32);
    let (width, height) = (canvas.width() as i32, canvas.height() as i32);

    for placed in &layout.glyphs {
        let font = fonts.face(placed.bold);
        let glyph = placed.id.with_scale_and_position(
            PxScale {
                x: placed.scale.x * scale,
                y: placed.scale.y * scale,
            },
            point(dx + placed.x * scale, dy + placed.baseline * scale),
        );

        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|px, py, coverage| {
                let x = px as i32 + bounds.min.x as i32;
                let y = py as i32 + bounds.min.y as i32;
                if x >= 0 && x < width && y >= 0 && y < height {
                    blend(canvas.get_pixel_mut(x as u32, y as u32), color, coverage);
                }
            });
        }
    }
}

/// Composite `color` over `pixel` with `coverage` as source alpha.
fn blend(pixel: &mut Rgba<u8>, color: [u8; 3], coverage: f32) {
    let a = coverage.clamp(0.0, 1.0);
    if a <= 0.0 {
        return;
    }
    let [r, g, b, alpha] = pixel.0;
    let dst_a = f32::from(alpha) / 255.0;
    let out_a = a + dst_a * (1.0 - a);

    let mix = |src: u8, dst: u8| {
        let v = (f32::from(src) * a + f32::from(dst) * dst_a * (1.0 - a)) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };
    *pixel = Rgba([
        mix(color[0], r),
        mix(color[1], g),
        mix(color[2], b),
        (out_a * 255.0).round() as u8,
    ]);
}

/// Encode the canvas as PNG.
pub fn encode_png(canvas: &RgbaImage) -> Result<Vec<u8>, image::ImageError> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(
        canvas.as_raw(),
        canvas.width(),
        canvas.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(bytes)
}

/// Encode the canvas as JPEG, dropping the alpha channel.
pub fn encode_jpeg(canvas: &RgbaImage, quality: u8) -> Result<Vec<u8>, image::ImageError> {
    let rgb: RgbImage = canvas.convert();
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100)).write_image(
        rgb.as_raw(),
        rgb.width(),
        rgb.height(),
        ExtendedColorType::Rgb8,
    )?;
    Ok(bytes)
}

/// Encode both formats, then write `<base>.png` and `<base>.jpg`.
pub fn write_outputs(
    canvas: &RgbaImage,
    base: &Path,
    jpeg_quality: u8,
) -> Result<(PathBuf, PathBuf), SplashError> {
    let (png_path, jpg_path) = output_paths(base);
    let png = encode_png(canvas).map_err(|e| SplashError::image_write(&png_path, e))?;
    let jpg =
        encode_jpeg(canvas, jpeg_quality).map_err(|e| SplashError::image_write(&jpg_path, e))?;

    std::fs::write(&png_path, png).map_err(|e| SplashError::image_write(&png_path, e))?;
    log::info!("Wrote {}", png_path.display());
    std::fs::write(&jpg_path, jpg).map_err(|e| SplashError::image_write(&jpg_path, e))?;
    log::info!("Wrote {}", jpg_path.display());

    Ok((png_path, jpg_path))
}

/// Compose a splash for `version` over `background` and write it next to
/// `output` as PNG and JPEG.
pub fn compose_splash(
    config: &SplashConfig,
    version: &str,
    background: &Path,
    output: &Path,
) -> Result<SplashOutput, SplashError> {
    let text = config.branding.text_block(version)?;
    let canvas = load_background(background)?;
    let fonts = FontSet::load(config)?;

    let (splash, placement) = render_splash(&canvas, &text, &fonts, config)?;
    let (png, jpg) = write_outputs(&splash, output, config.jpeg_quality)?;

    Ok(SplashOutput {
        png,
        jpg,
        width: splash.width(),
        height: splash.height(),
        placement,
        font_family: fonts.family().to_string(),
    })
}
