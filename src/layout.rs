//! # Text Layout
//!
//! Arranges a [`TextBlock`] into lines of positioned glyphs and measures the
//! block, before any scaling to the canvas.
//!
//! ## Line Metrics
//!
//! ```text
//! y = 0 ┬──────────────────────────────  line 0 top
//!       │ ascent (max over runs on the line)
//!       ├─ baseline ───────────────────
//!       │ descent
//!       ┼──────────────────────────────  line 1 top
//! ```
//!
//! Sizes are points at 96 DPI. A line with no text (a blank line, or a
//! trailing newline) takes the metrics of the run containing its newline.
//! Block width and height are rounded up to whole pixels.

use ab_glyph::{Font, GlyphId, PxScale, ScaleFont};

use crate::error::SplashError;
use crate::fonts::FontSet;
use crate::markup::{Run, TextBlock};

/// A glyph placed in unscaled layout space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedGlyph {
    pub id: GlyphId,
    pub bold: bool,
    pub scale: PxScale,
    /// Left edge of the glyph origin
    pub x: f32,
    /// Baseline position measured from the top of the block
    pub baseline: f32,
}

/// Measured extent of one line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    pub width: f32,
    pub ascent: f32,
    pub descent: f32,
}

impl LineMetrics {
    pub fn height(&self) -> f32 {
        self.ascent + self.descent
    }
}

/// A laid-out text block.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    pub glyphs: Vec<PlacedGlyph>,
    pub lines: Vec<LineMetrics>,
    /// Unscaled block width in whole pixels
    pub width: f32,
    /// Unscaled block height in whole pixels
    pub height: f32,
}

/// A piece of a run that falls on a single line.
struct Segment<'a> {
    text: &'a str,
    run: &'a Run,
}

/// Lay out `block` with `fonts`.
///
/// Fails with [`SplashError::Layout`] when the block measures zero in either
/// dimension, since it could not be scaled to fit a canvas.
pub fn layout(block: &TextBlock, fonts: &FontSet) -> Result<TextLayout, SplashError> {
    let mut glyphs = Vec::new();
    let mut lines = Vec::new();
    let mut top = 0.0f32;

    for (segments, style) in split_lines(block) {
        let line = layout_line(&segments, style, fonts, top, &mut glyphs)?;
        top += line.height();
        lines.push(line);
    }

    let width = lines.iter().map(|l| l.width).fold(0.0f32, f32::max).ceil();
    let height = top.ceil();
    log::debug!(
        "Laid out {} lines, {} glyphs, {}x{} px",
        lines.len(),
        glyphs.len(),
        width,
        height
    );

    if width <= 0.0 || height <= 0.0 {
        return Err(SplashError::Layout(format!(
            "text block measures {}x{} px, nothing to scale",
            width, height
        )));
    }

    Ok(TextLayout {
        glyphs,
        lines,
        width,
        height,
    })
}

/// Break runs at newlines. Each line carries the run that ended it (or the
/// last run), which sizes the line when it holds no text.
fn split_lines(block: &TextBlock) -> Vec<(Vec<Segment<'_>>, &Run)> {
    let mut lines = Vec::new();
    let mut current = Vec::new();

    for run in &block.runs {
        let mut pieces = run.text.split('\n').peekable();
        while let Some(text) = pieces.next() {
            if !text.is_empty() {
                current.push(Segment { text, run });
            }
            if pieces.peek().is_some() {
                lines.push((std::mem::take(&mut current), run));
            }
        }
    }

    if let Some(last) = block.runs.last() {
        lines.push((current, last));
    }
    lines
}

fn px_scale(fonts: &FontSet, run: &Run) -> Result<PxScale, SplashError> {
    fonts
        .face(run.bold)
        .pt_to_px_scale(run.size)
        .ok_or_else(|| SplashError::Layout(format!("font '{}' has no units per em", fonts.family())))
}

fn layout_line(
    segments: &[Segment<'_>],
    style: &Run,
    fonts: &FontSet,
    top: f32,
    glyphs: &mut Vec<PlacedGlyph>,
) -> Result<LineMetrics, SplashError> {
    let first_glyph = glyphs.len();
    let mut caret = 0.0f32;
    let mut ascent = 0.0f32;
    let mut descent = 0.0f32;

    for segment in segments {
        let font = fonts.face(segment.run.bold);
        let scale = px_scale(fonts, segment.run)?;
        let scaled = font.as_scaled(scale);
        ascent = ascent.max(scaled.ascent());
        descent = descent.max(-scaled.descent());

        let mut previous: Option<GlyphId> = None;
        for ch in segment.text.chars().filter(|c| !c.is_control()) {
            let id = font.glyph_id(ch);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            glyphs.push(PlacedGlyph {
                id,
                bold: segment.run.bold,
                scale,
                x: caret,
                baseline: 0.0,
            });
            caret += scaled.h_advance(id);
            previous = Some(id);
        }
    }

    if segments.is_empty() {
        let scaled = fonts.face(style.bold).as_scaled(px_scale(fonts, style)?);
        ascent = scaled.ascent();
        descent = -scaled.descent();
    }

    // Baseline is only known once every run on the line has been measured.
    for glyph in &mut glyphs[first_glyph..] {
        glyph.baseline = top + ascent;
    }

    Ok(LineMetrics {
        width: caret,
        ascent,
        descent,
    })
}
