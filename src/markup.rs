//! # Styled Text Markup
//!
//! Splash text is a [`TextBlock`]: an ordered list of [`Run`]s, each with its
//! own point size and weight. Newlines inside run text break lines.
//!
//! Blocks are usually produced from span markup, the same small subset of
//! Pango markup the splash templates are written in:
//!
//! ```text
//! <span size='7000'>ViSol</span><span size='2500'> v.1.0
//! ...</span><span size='2100' weight='bold'>Description</span>
//! ```
//!
//! ## Supported Syntax
//!
//! | Construct | Meaning |
//! |-----------|---------|
//! | `<span size='N'>` | size in Pango units (1/1024 pt) |
//! | `<span size='Npt'>` | size in points |
//! | `<span weight='bold'>` | `bold`, `ultrabold`, `heavy`, `normal`, `light` or 100..900 |
//! | `<b>` | bold |
//! | `&amp;` `&lt;` `&gt;` `&quot;` `&apos;` | XML entities |
//!
//! ## Example
//!
//! ```
//! use makesplash::markup;
//!
//! let block = markup::parse("<span size='2048'>Hi</span> <b>there</b>").unwrap();
//! assert_eq!(block.runs.len(), 3);
//! assert_eq!(block.runs[0].size, 2.0);
//! assert!(block.runs[2].bold);
//! ```

use crate::error::SplashError;

/// Pango units per point.
pub const PANGO_SCALE: f32 = 1024.0;

/// Size of text outside any sized span, in points.
pub const DEFAULT_SIZE_PT: f32 = 10.0;

/// A piece of text drawn with a single size and weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub text: String,
    /// Font size in points
    pub size: f32,
    pub bold: bool,
}

impl Run {
    pub fn new(text: impl Into<String>, size: f32, bold: bool) -> Self {
        Self {
            text: text.into(),
            size,
            bold,
        }
    }
}

/// An ordered sequence of styled runs forming one multi-line layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextBlock {
    pub runs: Vec<Run>,
}

impl TextBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a run, merging it into the previous one when the style matches.
    pub fn push(&mut self, run: Run) {
        if run.text.is_empty() {
            return;
        }
        if let Some(last) = self.runs.last_mut() {
            if last.size == run.size && last.bold == run.bold {
                last.text.push_str(&run.text);
                return;
            }
        }
        self.runs.push(run);
    }

    /// The unstyled text of the whole block.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

/// Escape text for safe interpolation into markup.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[derive(Debug, Clone, Copy)]
struct Style {
    size: f32,
    bold: bool,
}

/// Parse span markup into a [`TextBlock`].
///
/// Malformed markup (unknown tags or attributes, unbalanced tags, bad
/// entities) is reported as [`SplashError::Layout`].
pub fn parse(markup: &str) -> Result<TextBlock, SplashError> {
    let mut block = TextBlock::new();
    let mut stack: Vec<(String, Style)> = Vec::new();
    let mut style = Style {
        size: DEFAULT_SIZE_PT,
        bold: false,
    };
    let mut pending = String::new();
    let mut rest = markup;

    while let Some(ch) = rest.chars().next() {
        match ch {
            '<' => {
                let end = rest
                    .find('>')
                    .ok_or_else(|| markup_error("unterminated tag"))?;
                let tag = &rest[1..end];
                rest = &rest[end + 1..];

                block.push(Run::new(std::mem::take(&mut pending), style.size, style.bold));

                if let Some(name) = tag.strip_prefix('/') {
                    let name = name.trim();
                    match stack.pop() {
                        Some((open, previous)) if open == name => style = previous,
                        Some((open, _)) => {
                            return Err(markup_error(&format!(
                                "closing </{}> does not match <{}>",
                                name, open
                            )));
                        }
                        None => {
                            return Err(markup_error(&format!("unexpected closing </{}>", name)));
                        }
                    }
                } else {
                    let (name, next) = open_tag(tag, style)?;
                    stack.push((name, style));
                    style = next;
                }
            }
            '&' => {
                let end = rest
                    .find(';')
                    .ok_or_else(|| markup_error("unterminated entity"))?;
                pending.push(entity(&rest[1..end])?);
                rest = &rest[end + 1..];
            }
            c => {
                pending.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    if let Some((open, _)) = stack.last() {
        return Err(markup_error(&format!("unclosed <{}>", open)));
    }
    block.push(Run::new(pending, style.size, style.bold));

    Ok(block)
}

fn markup_error(detail: &str) -> SplashError {
    SplashError::Layout(format!("invalid markup: {}", detail))
}

/// Apply an opening tag to the current style.
fn open_tag(tag: &str, current: Style) -> Result<(String, Style), SplashError> {
    let tag = tag.trim();
    let (name, attrs) = match tag.find(char::is_whitespace) {
        Some(i) => (&tag[..i], &tag[i..]),
        None => (tag, ""),
    };

    let mut style = current;
    match name {
        "b" => {
            if !attrs.trim().is_empty() {
                return Err(markup_error("<b> takes no attributes"));
            }
            style.bold = true;
        }
        "span" => {
            for (key, value) in attributes(attrs)? {
                match key {
                    "size" => style.size = parse_size(value)?,
                    "weight" => style.bold = parse_weight(value)?,
                    other => {
                        return Err(markup_error(&format!("unknown span attribute '{}'", other)));
                    }
                }
            }
        }
        "" => return Err(markup_error("empty tag")),
        other => return Err(markup_error(&format!("unknown tag <{}>", other))),
    }

    Ok((name.to_string(), style))
}

/// Split `key='value' key2="value2"` into pairs.
fn attributes(mut input: &str) -> Result<Vec<(&str, &str)>, SplashError> {
    let mut pairs = Vec::new();
    loop {
        input = input.trim_start();
        if input.is_empty() {
            return Ok(pairs);
        }
        let eq = input
            .find('=')
            .ok_or_else(|| markup_error("attribute without value"))?;
        let key = input[..eq].trim();
        let after = input[eq + 1..].trim_start();
        let quote = after
            .chars()
            .next()
            .filter(|c| *c == '\'' || *c == '"')
            .ok_or_else(|| markup_error("attribute value must be quoted"))?;
        let close = after[1..]
            .find(quote)
            .ok_or_else(|| markup_error("unterminated attribute value"))?;
        pairs.push((key, &after[1..close + 1]));
        input = &after[close + 2..];
    }
}

fn parse_size(value: &str) -> Result<f32, SplashError> {
    let size = match value.strip_suffix("pt") {
        Some(points) => points.trim().parse::<f32>().ok(),
        None => value.trim().parse::<u32>().ok().map(|units| units as f32 / PANGO_SCALE),
    };
    size.filter(|s| *s > 0.0 && s.is_finite())
        .ok_or_else(|| markup_error(&format!("invalid size '{}'", value)))
}

fn parse_weight(value: &str) -> Result<bool, SplashError> {
    match value {
        "bold" | "ultrabold" | "heavy" => Ok(true),
        "normal" | "light" | "ultralight" | "book" => Ok(false),
        numeric => numeric
            .parse::<u16>()
            .ok()
            .filter(|w| (100..=1000).contains(w))
            .map(|w| w >= 600)
            .ok_or_else(|| markup_error(&format!("invalid weight '{}'", value))),
    }
}

fn entity(name: &str) -> Result<char, SplashError> {
    match name {
        "amp" => Ok('&'),
        "lt" => Ok('<'),
        "gt" => Ok('>'),
        "quot" => Ok('"'),
        "apos" => Ok('\''),
        other => Err(markup_error(&format!("unknown entity '&{};'", other))),
    }
}
