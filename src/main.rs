//! # Makesplash CLI
//!
//! Command-line interface for generating splash images.
//!
//! ## Usage
//!
//! ```bash
//! # Version 1.0 over background.png, writes splash.png and splash.jpg
//! makesplash
//!
//! # Explicit version, background and output base name
//! makesplash 2.3 -b art/background.png -o build/splash
//!
//! # Alternate product texts and a bundled font
//! makesplash 2.3 --branding branding.json --font fonts/Arimo-Regular.ttf
//!
//! # Show font substitution and placement details
//! makesplash 2.3 -vv
//! ```

use clap::Parser;
use std::path::PathBuf;

use makesplash::{Branding, SplashConfig, SplashError, compose_splash};

/// Makesplash - Overlay application and version information on a background image
#[derive(Parser, Debug)]
#[command(name = "makesplash")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Version string shown after the application name
    #[arg(value_name = "VERSION", default_value = "1.0")]
    version_string: String,

    /// Background image file
    #[arg(short = 'b', value_name = "FILE", default_value = "background.png")]
    background: PathBuf,

    /// Output file name; written in png and jpg formats, extension ignored
    #[arg(short = 'o', value_name = "FILE", default_value = "splash.png")]
    output: PathBuf,

    /// JSON file overriding the product texts
    #[arg(long, value_name = "FILE")]
    branding: Option<PathBuf>,

    /// Font file for regular text instead of the system Arial lookup
    #[arg(long, value_name = "FILE")]
    font: Option<PathBuf>,

    /// Font file for bold text
    #[arg(long, value_name = "FILE")]
    bold_font: Option<PathBuf>,

    /// Margin around the text in pixels
    #[arg(long, default_value = "15")]
    padding: f32,

    /// JPEG quality (1-100)
    #[arg(long, default_value = "100", value_parser = clap::value_parser!(u8).range(1..=100))]
    jpeg_quality: u8,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        let code = match e {
            SplashError::Argument(_) => 2,
            _ => 1,
        };
        std::process::exit(code);
    }
}

fn run() -> Result<(), SplashError> {
    let cli = Cli::try_parse().map_err(|e| {
        // Help and version requests are not failures.
        if !e.use_stderr() {
            e.exit();
        }
        let message = e.render().to_string();
        let message = message.trim_end();
        SplashError::Argument(message.strip_prefix("error: ").unwrap_or(message).to_string())
    })?;

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    let branding = match &cli.branding {
        Some(path) => Branding::from_json_file(path)?,
        None => Branding::default(),
    };

    let config = SplashConfig {
        branding,
        padding: cli.padding,
        font_file: cli.font,
        bold_font_file: cli.bold_font,
        jpeg_quality: cli.jpeg_quality,
        ..SplashConfig::default()
    };

    println!(
        "Generating splash v.{} over {}...",
        cli.version_string,
        cli.background.display()
    );
    let output = compose_splash(&config, &cli.version_string, &cli.background, &cli.output)?;

    println!(
        "Saved {}x{} splash ({}) to {} and {}",
        output.width,
        output.height,
        output.font_family,
        output.png.display(),
        output.jpg.display()
    );

    Ok(())
}
