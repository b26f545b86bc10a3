//! # Font Resolution
//!
//! Finds the regular and bold faces used to lay out splash text, and loads
//! them as `ab_glyph` fonts.
//!
//! ## Substitution Policy
//!
//! The requested family (Arial by default) is often missing on Linux hosts.
//! Faces are resolved in this order, first match wins:
//!
//! 1. Explicit font files from the configuration
//! 2. The requested family from the system font database
//! 3. Metric-compatible substitutes: Liberation Sans, Arimo
//! 4. Common sans faces: DejaVu Sans, Helvetica, FreeSans
//! 5. The DejaVu Sans faces bundled with the binary
//!
//! Bold runs use the bold face of the chosen family when one exists and the
//! regular face otherwise.

use ab_glyph::{FontArc, FontVec};
use fontdb::{Database, Family, Query, Weight};
use std::path::Path;
use std::sync::OnceLock;

use crate::config::SplashConfig;
use crate::error::SplashError;

/// Families tried, in order, after the requested one.
pub const FALLBACK_FAMILIES: &[&str] = &[
    "Liberation Sans",
    "Arimo",
    "DejaVu Sans",
    "Helvetica",
    "FreeSans",
];

/// Family name of the bundled faces.
pub const BUNDLED_FAMILY: &str = "DejaVu Sans (bundled)";

static BUNDLED_REGULAR: OnceLock<FontArc> = OnceLock::new();
static BUNDLED_BOLD: OnceLock<FontArc> = OnceLock::new();

fn bundled_regular() -> &'static FontArc {
    BUNDLED_REGULAR.get_or_init(|| {
        FontArc::try_from_slice(include_bytes!("fonts/DejaVuSans.ttf"))
            .expect("Failed to load bundled DejaVu Sans")
    })
}

fn bundled_bold() -> &'static FontArc {
    BUNDLED_BOLD.get_or_init(|| {
        FontArc::try_from_slice(include_bytes!("fonts/DejaVuSans-Bold.ttf"))
            .expect("Failed to load bundled DejaVu Sans Bold")
    })
}

/// Regular and (optional) bold faces of one family.
#[derive(Clone)]
pub struct FontSet {
    family: String,
    regular: FontArc,
    bold: Option<FontArc>,
}

impl std::fmt::Debug for FontSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontSet")
            .field("family", &self.family)
            .field("bold", &self.bold.is_some())
            .finish()
    }
}

impl FontSet {
    /// Resolve faces according to the configuration and the substitution policy.
    pub fn load(config: &SplashConfig) -> Result<Self, SplashError> {
        let bold_file = match &config.bold_font_file {
            Some(path) => Some(load_file(path)?),
            None => None,
        };

        if let Some(path) = &config.font_file {
            let family = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            log::info!("Using font file {}", path.display());
            return Ok(Self::from_fonts(family, load_file(path)?, bold_file));
        }

        let mut db = Database::new();
        db.load_system_fonts();
        log::debug!("Font database holds {} faces", db.len());

        let mut set = Self::from_database(&db, &config.font_family)?;
        if bold_file.is_some() {
            set.bold = bold_file;
        }
        Ok(set)
    }

    /// Resolve `family` (or a substitute) from an already populated database,
    /// ending with the bundled faces.
    pub fn from_database(db: &Database, family: &str) -> Result<Self, SplashError> {
        let candidates = std::iter::once(family).chain(FALLBACK_FAMILIES.iter().copied());

        for candidate in candidates {
            let Some(id) = query(db, candidate, Weight::NORMAL) else {
                continue;
            };
            if candidate != family {
                log::info!("Font family '{}' not found, substituting '{}'", family, candidate);
            } else {
                log::info!("Using font family '{}'", candidate);
            }

            // The query returns the closest weight, which may be the regular face.
            let bold = query(db, candidate, Weight::BOLD)
                .filter(|bold_id| db.face(*bold_id).is_some_and(|f| f.weight.0 >= 600))
                .map(|bold_id| load_face(db, bold_id))
                .transpose()?;

            return Ok(Self::from_fonts(candidate, load_face(db, id)?, bold));
        }

        log::info!("Font family '{}' not found, using {}", family, BUNDLED_FAMILY);
        Ok(Self::bundled())
    }

    /// The DejaVu Sans faces compiled into the binary.
    pub fn bundled() -> Self {
        Self::from_fonts(
            BUNDLED_FAMILY,
            bundled_regular().clone(),
            Some(bundled_bold().clone()),
        )
    }

    /// Build a set directly from loaded faces.
    pub fn from_fonts(family: impl Into<String>, regular: FontArc, bold: Option<FontArc>) -> Self {
        Self {
            family: family.into(),
            regular,
            bold,
        }
    }

    /// Name of the family actually in use.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Face for a run of the given weight.
    pub fn face(&self, bold: bool) -> &FontArc {
        match (&self.bold, bold) {
            (Some(face), true) => face,
            _ => &self.regular,
        }
    }
}

fn query(db: &Database, family: &str, weight: Weight) -> Option<fontdb::ID> {
    db.query(&Query {
        families: &[Family::Name(family)],
        weight,
        ..Query::default()
    })
}

fn load_face(db: &Database, id: fontdb::ID) -> Result<FontArc, SplashError> {
    db.with_face_data(id, |data, index| {
        FontVec::try_from_vec_and_index(data.to_vec(), index)
    })
    .ok_or_else(|| SplashError::Font("failed to read font face data".to_string()))?
    .map(FontArc::new)
    .map_err(|e| SplashError::Font(format!("invalid font face: {}", e)))
}

fn load_file(path: &Path) -> Result<FontArc, SplashError> {
    let data = std::fs::read(path)
        .map_err(|e| SplashError::Font(format!("{}: {}", path.display(), e)))?;
    FontArc::try_from_vec(data)
        .map_err(|e| SplashError::Font(format!("{}: {}", path.display(), e)))
}
