//! # Branding
//!
//! The fixed texts printed on a splash (application name, copyright,
//! website, description, image credit) and the template that arranges
//! them around the version string.
//!
//! Branding is plain data so it can be swapped without code changes,
//! either in Rust or from a JSON file where missing fields keep their
//! defaults:
//!
//! ```json
//! { "name": "MyApp", "website": "https://example.org" }
//! ```
//!
//! ## Template
//!
//! The template is span markup (see [`crate::markup`]) with placeholders
//! `{name}`, `{version}`, `{copyright}`, `{website}`, `{description}` and
//! `{credit}`. Values are escaped before substitution, so they always render
//! literally.

use serde::Deserialize;
use std::path::Path;

use crate::error::SplashError;
use crate::markup::{self, TextBlock};

/// Default layout, by line and descending size: name + version, copyright,
/// website, blank line, bold description, credit.
pub const DEFAULT_TEMPLATE: &str = "<span size='7000'>{name}</span>\
<span size='2500'> v.{version}\n{copyright}\n{website}\n\n</span>\
<span size='2100' weight='bold'>{description}</span>\n\
<span size='2100'>{credit}</span>";

/// Texts shown on the splash image.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Branding {
    pub name: String,
    pub copyright: String,
    pub website: String,
    pub description: String,
    /// Credit line for the background artwork
    pub credit: String,
    /// Markup template; [`DEFAULT_TEMPLATE`] when absent
    pub template: Option<String>,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            name: "ViSol".to_string(),
            copyright: "© 2014-2021 Rafael Villar Burke, Daniel Jiménez González [GPL v2+]"
                .to_string(),
            website: "http://www.rvburke.com".to_string(),
            description:
                "Aplicación para la visualización de archivos de resultados de LIDER-CALENER/HULC"
                    .to_string(),
            credit: "Fotografía: Jae Rue".to_string(),
            template: None,
        }
    }
}

impl Branding {
    /// Load branding from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, SplashError> {
        let contents = std::fs::read_to_string(path).map_err(|e| SplashError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_json(&contents).map_err(|e| SplashError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Substitute the branding values and `version` into the template.
    pub fn markup(&self, version: &str) -> String {
        let template = self.template.as_deref().unwrap_or(DEFAULT_TEMPLATE);
        let fields: [(&str, &str); 6] = [
            ("{name}", self.name.as_str()),
            ("{version}", version),
            ("{copyright}", self.copyright.as_str()),
            ("{website}", self.website.as_str()),
            ("{description}", self.description.as_str()),
            ("{credit}", self.credit.as_str()),
        ];

        // Single pass so substituted values are never re-scanned for placeholders.
        let mut out = String::with_capacity(template.len() + 128);
        let mut rest = template;
        'scan: while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            rest = &rest[start..];
            for (placeholder, value) in fields {
                if let Some(after) = rest.strip_prefix(placeholder) {
                    out.push_str(&markup::escape(value));
                    rest = after;
                    continue 'scan;
                }
            }
            out.push('{');
            rest = &rest[1..];
        }
        out.push_str(rest);
        out
    }

    /// Build the styled text block for `version`.
    pub fn text_block(&self, version: &str) -> Result<TextBlock, SplashError> {
        markup::parse(&self.markup(version))
    }
}
