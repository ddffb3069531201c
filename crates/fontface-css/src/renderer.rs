//! `@font-face` rule rendering.

use std::fmt;

use fontface_core::logging::targets;
use fontface_registry::{ResolvedFontConfig, ResolvedFormat};

/// Turns resolved font configs into CSS text.
pub trait CssRenderer: Send + Sync {
    /// Render `fonts`, in order.
    fn render(&self, fonts: &[ResolvedFontConfig]) -> String;
}

impl<F> CssRenderer for F
where
    F: Fn(&[ResolvedFontConfig]) -> String + Send + Sync,
{
    fn render(&self, fonts: &[ResolvedFontConfig]) -> String {
        self(fonts)
    }
}

/// Metadata keys copied into the rule as descriptors, in output order.
const DESCRIPTORS: [(&str, &str); 5] = [
    ("font_style", "font-style"),
    ("font_weight", "font-weight"),
    ("font_stretch", "font-stretch"),
    ("unicode_range", "unicode-range"),
    ("font_display", "font-display"),
];

/// The default renderer: one `@font-face` rule per font.
///
/// Sources are listed in a single `src` descriptor in the order the formats
/// were resolved, since browsers use the first one they can load. Fonts left
/// with no supported format produce no rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontFaceRenderer;

impl FontFaceRenderer {
    /// Create the renderer.
    pub fn new() -> Self {
        Self
    }
}

impl CssRenderer for FontFaceRenderer {
    fn render(&self, fonts: &[ResolvedFontConfig]) -> String {
        let mut rules = Vec::with_capacity(fonts.len());
        for font in fonts {
            if font.formats.is_empty() {
                tracing::debug!(target: targets::CSS, font = %font.name, "No supported formats; skipping rule");
                continue;
            }
            rules.push(FontFaceRule(font).to_string());
        }
        rules.join("\n")
    }
}

/// A single `@font-face` rule.
pub struct FontFaceRule<'a>(pub &'a ResolvedFontConfig);

impl FontFaceRule<'_> {
    fn family(&self) -> &str {
        self.0.metadata_str("font_family").unwrap_or(&self.0.name)
    }
}

impl fmt::Display for FontFaceRule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "@font-face {{")?;

        write!(f, "  font-family: ")?;
        cssparser::serialize_string(self.family(), f)?;
        writeln!(f, ";")?;

        for (key, property) in DESCRIPTORS {
            match self.0.metadata.get(key) {
                Some(serde_json::Value::String(value)) if is_descriptor_value(value) => {
                    writeln!(f, "  {property}: {value};")?
                }
                Some(serde_json::Value::String(value)) => {
                    tracing::warn!(
                        target: targets::CSS,
                        font = %self.0.name,
                        descriptor = property,
                        value = %value,
                        "Descriptor value is not plain CSS; omitting it"
                    );
                }
                Some(serde_json::Value::Number(value)) => writeln!(f, "  {property}: {value};")?,
                _ => {}
            }
        }

        write!(f, "  src: ")?;
        for (i, format) in self.0.formats.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write_source(f, format)?;
        }
        writeln!(f, ";")?;

        writeln!(f, "}}")
    }
}

/// Descriptor values are written unquoted, so they are limited to keywords,
/// numbers, percentages and unicode ranges (`U+0-7F`, `U+4??`).
fn is_descriptor_value(value: &str) -> bool {
    !value.trim().is_empty()
        && value.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '+' | ',' | '.' | '%' | '?' | '_')
        })
}

fn write_source(f: &mut fmt::Formatter<'_>, source: &ResolvedFormat) -> fmt::Result {
    match source.format.css_format() {
        None => {
            write!(f, "local(")?;
            cssparser::serialize_string(&source.url, f)?;
            write!(f, ")")
        }
        Some(hint) => {
            write!(f, "url(")?;
            cssparser::serialize_string(&source.url, f)?;
            write!(f, ") format(")?;
            cssparser::serialize_string(hint, f)?;
            write!(f, ")")
        }
    }
}
