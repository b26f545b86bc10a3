//! # Splash Configuration
//!
//! Everything that shapes a splash image apart from the version string and
//! the input/output paths.
//!
//! | Setting | Default | Notes |
//! |---------|---------|-------|
//! | `padding` | 15 px | margin kept clear around the text block |
//! | `font_family` | Arial | see [`crate::fonts`] for the fallback chain |
//! | `text_color` | white | RGB |
//! | `jpeg_quality` | 100 | 1..=100 |
//!
//! ## Usage
//!
//! ```
//! use makesplash::config::SplashConfig;
//!
//! let config = SplashConfig {
//!     padding: 20.0,
//!     ..SplashConfig::default()
//! };
//! assert_eq!(config.font_family, "Arial");
//! ```

use std::path::PathBuf;

use crate::branding::Branding;

/// Margin around the text block, in pixels.
pub const PADDING: f32 = 15.0;

/// Requested font family.
pub const FONT_FAMILY: &str = "Arial";

/// # Splash Configuration
///
/// Branding texts, typography and output settings for one composition.
/// The branding is part of the configuration rather than fixed in code, so
/// alternate products can be rendered with the same binary.
#[derive(Debug, Clone, PartialEq)]
pub struct SplashConfig {
    pub branding: Branding,

    /// Margin in pixels between the text block and the canvas edges
    pub padding: f32,

    /// Family looked up in the system font database
    pub font_family: String,

    /// Regular face file, bypassing the system lookup
    pub font_file: Option<PathBuf>,

    /// Bold face file; falls back to the regular face when absent
    pub bold_font_file: Option<PathBuf>,

    /// Text colour as RGB
    pub text_color: [u8; 3],

    /// JPEG encoder quality (1-100)
    pub jpeg_quality: u8,
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            branding: Branding::default(),
            padding: PADDING,
            font_family: FONT_FAMILY.to_string(),
            font_file: None,
            bold_font_file: None,
            text_color: [255, 255, 255],
            jpeg_quality: 100,
        }
    }
}
