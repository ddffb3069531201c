//! Registry configuration: registered fonts and how to serve them.
//!
//! Configuration can be built in code or loaded from a file:
//!
//! ```json
//! {
//!   // line comments are allowed in JSON configs
//!   "fonts": {
//!     "OpenSansRegular": {
//!       "font_family": "Open Sans",
//!       "font_weight": "400",
//!       "formats": [
//!         { "type": "local", "url": "Open Sans" },
//!         { "type": "woff", "url": { "latin": "/fonts/os-latin.woff", "default": "/fonts/os.woff" } },
//!         { "type": "embedded-opentype", "url": "/fonts/os.eot" }
//!       ]
//!     }
//!   },
//!   "locale_to_url_keys": { "ru": "cyrillic" },
//!   "host": "https://cdn.example.com"
//! }
//! ```
//!
//! The URL modifier and the user-agent parser are code, so they can only be
//! set with the builder methods.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use fontface_core::{FormatTag, LocaleAliases, UrlMap, UrlModifier, UserAgentParser};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Arbitrary per-font metadata (family name, weight, style, ...).
pub type FontMetadata = BTreeMap<String, serde_json::Value>;

/// Metadata keys that resolved configs use for their own fields.
pub const RESERVED_METADATA_KEYS: [&str; 2] = ["name", "formats"];

/// One downloadable (or local) source of a font.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontFormatEntry {
    /// The container format.
    #[serde(rename = "type")]
    pub format: FormatTag,
    /// Where to find it, optionally per locale subset.
    pub url: UrlMap,
    /// Optional identifier, passed through to the resolved config.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl FontFormatEntry {
    /// Create an entry.
    pub fn new(format: impl Into<FormatTag>, url: impl Into<UrlMap>) -> Self {
        Self {
            format: format.into(),
            url: url.into(),
            id: None,
        }
    }

    /// Set the identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// A registered font.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FontConfigEntry {
    /// Sources in preference order. The order is kept in generated CSS.
    pub formats: Vec<FontFormatEntry>,
    /// Font-level locale aliases, consulted before the registry-wide table.
    #[serde(
        default,
        alias = "localeToUrlKeys",
        skip_serializing_if = "Option::is_none"
    )]
    pub locale_to_url_keys: Option<LocaleAliases>,
    /// Every other field, copied through to the resolved config unchanged.
    #[serde(flatten)]
    pub metadata: FontMetadata,
}

impl FontConfigEntry {
    /// Create an entry with no formats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a format.
    pub fn with_format(mut self, format: FontFormatEntry) -> Self {
        self.formats.push(format);
        self
    }

    /// Set a metadata field.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Add a font-level locale alias.
    pub fn with_locale_alias(mut self, locale: impl Into<String>, key: impl Into<String>) -> Self {
        self.locale_to_url_keys
            .get_or_insert_with(LocaleAliases::new)
            .insert(locale, key);
        self
    }

    /// Check that no metadata key collides with a resolved-config field.
    pub fn check_metadata(&self, font: &str) -> Result<()> {
        match RESERVED_METADATA_KEYS
            .into_iter()
            .find(|key| self.metadata.contains_key(*key))
        {
            Some(key) => Err(Error::reserved_metadata_key(font, key)),
            None => Ok(()),
        }
    }
}

/// Everything `FontRegistry::setup` needs.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Registered fonts by name. Required.
    #[serde(default)]
    pub fonts: Option<BTreeMap<String, FontConfigEntry>>,
    /// Registry-wide locale aliases.
    #[serde(default, alias = "localeToUrlKeys")]
    pub locale_to_url_keys: LocaleAliases,
    /// Host prefix for every resolved URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// URL rewrite hook; identity when unset.
    #[serde(skip)]
    pub url_modifier: Option<UrlModifier>,
    /// User-agent parser; [`fontface_core::BuiltinUaParser`] when unset.
    #[serde(skip)]
    pub ua_parser: Option<Arc<dyn UserAgentParser>>,
}

impl RegistryConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON configuration. `//` starts a comment that runs to the end
    /// of the line, unless it appears inside a string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(&strip_line_comments(json))?)
    }

    /// Parse a TOML configuration.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration file, choosing the parser from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let parse: fn(&str) -> Result<Self> = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str,
            Some("toml") => Self::from_toml_str,
            _ => {
                return Err(Error::UnsupportedConfigFormat {
                    path: path.to_path_buf(),
                });
            }
        };

        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config = parse(&text)?;
        tracing::debug!(
            target: fontface_core::logging::targets::REGISTRY,
            "Loaded font config from {}",
            path.display()
        );
        Ok(config)
    }

    /// Register a font.
    pub fn with_font(mut self, name: impl Into<String>, font: FontConfigEntry) -> Self {
        self.fonts
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), font);
        self
    }

    /// Add a registry-wide locale alias.
    pub fn with_locale_alias(mut self, locale: impl Into<String>, key: impl Into<String>) -> Self {
        self.locale_to_url_keys.insert(locale, key);
        self
    }

    /// Set the host prefix.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the URL modifier.
    pub fn with_url_modifier<F>(mut self, modifier: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.url_modifier = Some(Arc::new(modifier));
        self
    }

    /// Set the user-agent parser.
    pub fn with_ua_parser(mut self, parser: impl UserAgentParser + 'static) -> Self {
        self.ua_parser = Some(Arc::new(parser));
        self
    }
}

impl fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryConfig")
            .field("fonts", &self.fonts)
            .field("locale_to_url_keys", &self.locale_to_url_keys)
            .field("host", &self.host)
            .field("url_modifier", &self.url_modifier.is_some())
            .field("ua_parser", &self.ua_parser.is_some())
            .finish()
    }
}

/// Drop `//` comments, keeping line breaks so parse errors report the
/// original line numbers.
fn strip_line_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        out.push_str(&line[..comment_start(line).unwrap_or(line.len())]);
        out.push('\n');
    }
    out
}

/// Byte offset of the first `//` outside a JSON string literal.
fn comment_start(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut in_string = false;
    let mut escaped = false;
    for (i, &b) in bytes.iter().enumerate() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
        } else if b == b'"' {
            in_string = true;
        } else if b == b'/' && bytes.get(i + 1) == Some(&b'/') {
            return Some(i);
        }
    }
    None
}
