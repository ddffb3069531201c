//! Font container formats and per-client capability sets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A font container technology, as named in `@font-face` `format()` hints.
///
/// Tags the classifier does not know are kept verbatim in [`FormatTag::Other`];
/// no client ever supports them, so entries carrying one are dropped during
/// filtering rather than rejected at configuration time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FormatTag {
    /// A face already installed on the client, referenced with `local()`.
    Local,
    TrueType,
    OpenType,
    /// EOT, understood only by Internet Explorer.
    EmbeddedOpenType,
    Woff,
    Woff2,
    Svg,
    Other(String),
}

impl FormatTag {
    /// Every format the classifier has thresholds for, in table order.
    pub const KNOWN: [FormatTag; 7] = [
        FormatTag::Local,
        FormatTag::TrueType,
        FormatTag::OpenType,
        FormatTag::EmbeddedOpenType,
        FormatTag::Woff,
        FormatTag::Woff2,
        FormatTag::Svg,
    ];

    /// The tag as written in configuration and CSS.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Local => "local",
            Self::TrueType => "truetype",
            Self::OpenType => "opentype",
            Self::EmbeddedOpenType => "embedded-opentype",
            Self::Woff => "woff",
            Self::Woff2 => "woff2",
            Self::Svg => "svg",
            Self::Other(tag) => tag,
        }
    }

    /// Whether this tag names an installed face rather than a downloadable resource.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local)
    }

    /// The `format()` hint to emit after `url(...)`, if any.
    pub fn css_format(&self) -> Option<&str> {
        match self {
            Self::Local => None,
            other => Some(other.as_str()),
        }
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatTag {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "local" => Self::Local,
            "truetype" => Self::TrueType,
            "opentype" => Self::OpenType,
            "embedded-opentype" => Self::EmbeddedOpenType,
            "woff" => Self::Woff,
            "woff2" => Self::Woff2,
            "svg" => Self::Svg,
            other => Self::Other(other.to_string()),
        })
    }
}

impl From<String> for FormatTag {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(tag) => tag,
            Err(never) => match never {},
        }
    }
}

impl From<&str> for FormatTag {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<FormatTag> for String {
    fn from(tag: FormatTag) -> Self {
        match tag {
            FormatTag::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

/// Which formats a particular client can use.
///
/// Computed fresh for every classification; never cached on the registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FormatCapabilitySet {
    pub local: bool,
    pub truetype: bool,
    pub opentype: bool,
    #[serde(rename = "embedded-opentype")]
    pub embedded_opentype: bool,
    pub woff: bool,
    pub woff2: bool,
    pub svg: bool,
}

impl FormatCapabilitySet {
    /// A set with every known format enabled.
    pub fn all() -> Self {
        Self {
            local: true,
            truetype: true,
            opentype: true,
            embedded_opentype: true,
            woff: true,
            woff2: true,
            svg: true,
        }
    }

    /// A set with nothing enabled.
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether `format` is usable. Unknown tags are never supported.
    pub fn supports(&self, format: &FormatTag) -> bool {
        match format {
            FormatTag::Local => self.local,
            FormatTag::TrueType => self.truetype,
            FormatTag::OpenType => self.opentype,
            FormatTag::EmbeddedOpenType => self.embedded_opentype,
            FormatTag::Woff => self.woff,
            FormatTag::Woff2 => self.woff2,
            FormatTag::Svg => self.svg,
            FormatTag::Other(_) => false,
        }
    }

    /// Enable or disable a known format. Unknown tags are ignored.
    pub fn set(&mut self, format: &FormatTag, supported: bool) {
        match format {
            FormatTag::Local => self.local = supported,
            FormatTag::TrueType => self.truetype = supported,
            FormatTag::OpenType => self.opentype = supported,
            FormatTag::EmbeddedOpenType => self.embedded_opentype = supported,
            FormatTag::Woff => self.woff = supported,
            FormatTag::Woff2 => self.woff2 = supported,
            FormatTag::Svg => self.svg = supported,
            FormatTag::Other(_) => {}
        }
    }

    /// The supported formats, in [`FormatTag::KNOWN`] order.
    pub fn supported(&self) -> impl Iterator<Item = FormatTag> + '_ {
        FormatTag::KNOWN
            .into_iter()
            .filter(move |format| self.supports(format))
    }

    /// Whether no format at all is supported.
    pub fn is_empty(&self) -> bool {
        self.supported().next().is_none()
    }
}
