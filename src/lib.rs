//! # Makesplash - Splash Image Generator
//!
//! Makesplash overlays an application's name, version, copyright and credits
//! onto a background image, producing a splash screen in PNG and JPEG.
//!
//! - **Branding**: product texts and the markup template they fill
//! - **Layout**: styled runs measured with system or bundled TTF fonts
//! - **Composition**: uniform scale-to-fit with fixed padding, bottom-left anchored
//!
//! ## Quick Start
//!
//! ```no_run
//! use makesplash::{SplashConfig, compose::compose_splash};
//! use std::path::Path;
//!
//! let config = SplashConfig::default();
//! let output = compose_splash(
//!     &config,
//!     "2.3",
//!     Path::new("background.png"),
//!     Path::new("splash.png"),
//! )?;
//! println!("Wrote {} and {}", output.png.display(), output.jpg.display());
//!
//! # Ok::<(), makesplash::SplashError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`branding`] | Product texts and template |
//! | [`markup`] | Styled runs and span markup |
//! | [`fonts`] | Font lookup and substitution |
//! | [`layout`] | Line breaking and measurement |
//! | [`compose`] | Placement, drawing and encoding |
//! | [`config`] | Composition settings |
//! | [`error`] | Error types |

pub mod branding;
pub mod compose;
pub mod config;
pub mod error;
pub mod fonts;
pub mod layout;
pub mod markup;

// Re-exports for convenience
pub use branding::Branding;
pub use compose::{SplashOutput, compose_splash};
pub use config::SplashConfig;
pub use error::SplashError;
