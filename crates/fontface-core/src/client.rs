//! Client descriptors and user-agent parsing.
//!
//! Classification works on a structured [`ClientDescriptor`]: a browser
//! family plus a major/minor version. Raw user-agent strings are turned into
//! descriptors by a [`UserAgentParser`]; [`BuiltinUaParser`] covers the
//! families the capability table knows about, and any other parser can be
//! plugged in through the registry configuration.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;
use crate::logging::targets;

/// Sentinel client identifier meaning "assume every capability".
pub const ALL_CLIENTS: &str = "all";

/// Browser families with known font-format support.
///
/// Anything not listed ends up in [`BrowserFamily::Other`], which supports no
/// format at all.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BrowserFamily {
    Firefox,
    Chrome,
    Safari,
    Ie,
    Opera,
    MobileSafari,
    ChromeMobile,
    Edge,
    Other(String),
}

impl BrowserFamily {
    /// Map a family name, as reported by common UA parsers, to a family.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Firefox" => Self::Firefox,
            "Chrome" => Self::Chrome,
            "Safari" => Self::Safari,
            "IE" | "MSIE" | "Internet Explorer" => Self::Ie,
            "Opera" => Self::Opera,
            "Mobile Safari" | "Mobile Safari UI/WKWebView" => Self::MobileSafari,
            "Chrome Mobile" | "Chrome Mobile iOS" => Self::ChromeMobile,
            "Edge" => Self::Edge,
            other => Self::Other(other.to_string()),
        }
    }

    /// The display name of the family.
    pub fn name(&self) -> &str {
        match self {
            Self::Firefox => "Firefox",
            Self::Chrome => "Chrome",
            Self::Safari => "Safari",
            Self::Ie => "IE",
            Self::Opera => "Opera",
            Self::MobileSafari => "Mobile Safari",
            Self::ChromeMobile => "Chrome Mobile",
            Self::Edge => "Edge",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for BrowserFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for BrowserFamily {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<BrowserFamily> for String {
    fn from(family: BrowserFamily) -> Self {
        match family {
            BrowserFamily::Other(name) => name,
            known => known.name().to_string(),
        }
    }
}

/// A parsed client: browser family and version.
///
/// Version components that cannot be read as integers are stored as 0.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientDescriptor {
    pub family: BrowserFamily,
    #[serde(default, deserialize_with = "lenient_version")]
    pub major: u32,
    #[serde(default, deserialize_with = "lenient_version")]
    pub minor: u32,
}

impl ClientDescriptor {
    /// Create a descriptor.
    pub fn new(family: BrowserFamily, major: u32, minor: u32) -> Self {
        Self {
            family,
            major,
            minor,
        }
    }

    /// Create a descriptor from textual version parts, coercing anything
    /// non-numeric to 0. Numeric parts too large for `u32` saturate.
    pub fn from_parts(family: BrowserFamily, major: Option<&str>, minor: Option<&str>) -> Self {
        Self::new(family, coerce_version(major), coerce_version(minor))
    }

    /// Whether the client version is at least `major.minor`.
    pub fn at_least(&self, major: u32, minor: u32) -> bool {
        (self.major, self.minor) >= (major, minor)
    }
}

impl fmt::Display for ClientDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}.{}", self.family, self.major, self.minor)
    }
}

fn coerce_version(part: Option<&str>) -> u32 {
    let Some(part) = part.map(str::trim) else {
        return 0;
    };
    match part.parse::<u32>() {
        Ok(n) => n,
        Err(_) if !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()) => u32::MAX,
        Err(_) => 0,
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientVersion {
    Number(u64),
    Float(f64),
    Text(String),
    Null(Option<u64>),
}

fn saturate(n: u64) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

fn lenient_version<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match LenientVersion::deserialize(deserializer)? {
        LenientVersion::Number(n) => saturate(n),
        LenientVersion::Float(f) if f.is_finite() && f >= 0.0 => f as u32,
        LenientVersion::Float(_) => 0,
        LenientVersion::Text(text) => coerce_version(Some(&text)),
        LenientVersion::Null(n) => n.map_or(0, saturate),
    })
}

/// The client a resolution request is made for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ClientRepr", into = "ClientRepr")]
pub enum Client {
    /// Serve every format; used for debugging and exhaustive testing.
    All,
    /// A raw user-agent string, parsed by the registry's [`UserAgentParser`].
    UserAgent(String),
    /// An already parsed client.
    Descriptor(ClientDescriptor),
}

impl Client {
    /// Build a client from a raw identifier, recognizing the `"all"` sentinel.
    pub fn from_user_agent(user_agent: impl Into<String>) -> Self {
        let user_agent = user_agent.into();
        if user_agent == ALL_CLIENTS {
            Self::All
        } else {
            Self::UserAgent(user_agent)
        }
    }

    /// Resolve to a descriptor. Returns `None` for [`Client::All`].
    pub fn descriptor(&self, parser: &dyn UserAgentParser) -> Result<Option<ClientDescriptor>> {
        match self {
            Self::All => Ok(None),
            Self::UserAgent(ua) => parser.parse(ua).map(Some),
            Self::Descriptor(descriptor) => Ok(Some(descriptor.clone())),
        }
    }
}

impl From<&str> for Client {
    fn from(user_agent: &str) -> Self {
        Self::from_user_agent(user_agent)
    }
}

impl From<String> for Client {
    fn from(user_agent: String) -> Self {
        Self::from_user_agent(user_agent)
    }
}

impl From<ClientDescriptor> for Client {
    fn from(descriptor: ClientDescriptor) -> Self {
        Self::Descriptor(descriptor)
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ClientRepr {
    Text(String),
    Descriptor(ClientDescriptor),
}

impl From<ClientRepr> for Client {
    fn from(repr: ClientRepr) -> Self {
        match repr {
            ClientRepr::Text(text) => Self::from_user_agent(text),
            ClientRepr::Descriptor(descriptor) => Self::Descriptor(descriptor),
        }
    }
}

impl From<Client> for ClientRepr {
    fn from(client: Client) -> Self {
        match client {
            Client::All => ClientRepr::Text(ALL_CLIENTS.to_string()),
            Client::UserAgent(ua) => ClientRepr::Text(ua),
            Client::Descriptor(descriptor) => ClientRepr::Descriptor(descriptor),
        }
    }
}

/// Turns raw user-agent strings into descriptors.
///
/// Errors are propagated to the caller of the resolution request unchanged.
pub trait UserAgentParser: Send + Sync {
    /// Parse a user-agent string.
    fn parse(&self, user_agent: &str) -> Result<ClientDescriptor>;
}

impl<F> UserAgentParser for F
where
    F: Fn(&str) -> Result<ClientDescriptor> + Send + Sync,
{
    fn parse(&self, user_agent: &str) -> Result<ClientDescriptor> {
        self(user_agent)
    }
}

/// One detection rule: the first rule whose pattern matches wins.
/// Capture groups 1 and 2, when present, are the major and minor version.
struct UaRule {
    pattern: Regex,
    family: BrowserFamily,
}

// Order matters: browsers that embed another browser's token (Edge and
// Opera carry "Chrome/", Chrome carries "Safari/") come first.
const UA_RULES: &[(&str, &str)] = &[
    (r"\b(?:Edge|Edg|EdgA|EdgiOS)/(\d+)(?:\.(\d+))?", "Edge"),
    (r"\bOPR/(\d+)(?:\.(\d+))?", "Opera"),
    (r"\bOpera\b.*\bVersion/(\d+)(?:\.(\d+))?", "Opera"),
    (r"\bOpera[/ ](\d+)(?:\.(\d+))?", "Opera"),
    (r"\bCriOS/(\d+)(?:\.(\d+))?", "Chrome Mobile"),
    (r"\bChrome/(\d+)(?:\.(\d+))?.*\bMobile\b", "Chrome Mobile"),
    (r"\b(?:iPhone|iPad|iPod)\b.*\bVersion/(\d+)(?:\.(\d+))?", "Mobile Safari"),
    (r"\b(?:iPhone|iPad|iPod)\b.*\bOS (\d+)(?:_(\d+))?", "Mobile Safari"),
    (r"\b(?:iPhone|iPad|iPod|iOS)\b", "Mobile Safari"),
    (r"\bFirefox/(\d+)(?:\.(\d+))?", "Firefox"),
    (r"\bFirefox\b", "Firefox"),
    (r"\bChrome/(\d+)(?:\.(\d+))?", "Chrome"),
    (r"\bChrome\b", "Chrome"),
    (r"\bMSIE (\d+)(?:\.(\d+))?", "IE"),
    (r"\bTrident/.*\brv:(\d+)(?:\.(\d+))?", "IE"),
    (r"\bMSIE\b", "IE"),
    (r"\bAndroid\b.*\bVersion/(\d+)(?:\.(\d+))?", "Android"),
    (r"\bVersion/(\d+)(?:\.(\d+))?.*\bSafari\b", "Safari"),
    (r"\bSafari\b", "Safari"),
    (r"\bOpera\b", "Opera"),
];

fn compiled_rules() -> &'static [UaRule] {
    static RULES: OnceLock<Vec<UaRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        UA_RULES
            .iter()
            .filter_map(|(pattern, family)| match Regex::new(pattern) {
                Ok(pattern) => Some(UaRule {
                    pattern,
                    family: BrowserFamily::from_name(family),
                }),
                Err(e) => {
                    tracing::error!(target: targets::CLIENT, "Invalid UA rule '{}': {}", pattern, e);
                    None
                }
            })
            .collect()
    })
}

/// Regex-based parser for the families in the capability table.
///
/// Never fails: strings that match no rule become
/// `BrowserFamily::Other("Other")` at version 0.0, which has no capabilities.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinUaParser;

impl BuiltinUaParser {
    /// Create the parser.
    pub fn new() -> Self {
        Self
    }
}

impl UserAgentParser for BuiltinUaParser {
    fn parse(&self, user_agent: &str) -> Result<ClientDescriptor> {
        for rule in compiled_rules() {
            if let Some(caps) = rule.pattern.captures(user_agent) {
                let descriptor = ClientDescriptor::from_parts(
                    rule.family.clone(),
                    caps.get(1).map(|m| m.as_str()),
                    caps.get(2).map(|m| m.as_str()),
                );
                tracing::trace!(target: targets::CLIENT, "Parsed '{}' as {}", user_agent, descriptor);
                return Ok(descriptor);
            }
        }

        tracing::debug!(target: targets::CLIENT, "Unrecognized user agent: {}", user_agent);
        Ok(ClientDescriptor::new(
            BrowserFamily::Other("Other".to_string()),
            0,
            0,
        ))
    }
}
