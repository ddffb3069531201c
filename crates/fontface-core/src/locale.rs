//! Locale resolution: picking the localized asset subset for a request.
//!
//! A format's URLs are either a single string or a map from subset key
//! (`"latin"`, `"cyrillic"`, a full locale, ...) to URL. Picking the key walks
//! [`ResolutionStrategy::CHAIN`] in order and stops at the first strategy that
//! produces a key:
//!
//! 1. the locale itself is a URL-map key
//! 2. the base locale is a URL-map key
//! 3. / 4. the locale, then the base locale, in the font's own alias table
//! 5. / 6. the same against the registry-wide alias table
//! 7. / 8. the same against the built-in language-to-script table
//! 9. the literal `default` key
//!
//! Hyphen and underscore delimiters are interchangeable everywhere a locale
//! is looked up, so `pt_BR` and `pt-BR` always resolve the same way.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::logging::targets;

/// The URL-map key every localized map must carry.
pub const DEFAULT_KEY: &str = "default";

/// A locale or language tag such as `"pt-BR"`, `"pt_BR"` or `"ru"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleTag(String);

impl LocaleTag {
    /// Create a tag. No validation is done; any string is a lookup key.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// The tag as given.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The primary language subtag: everything before the first `-` or `_`.
    pub fn base(&self) -> &str {
        base_locale(&self.0)
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocaleTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for LocaleTag {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

/// Everything before the first `-` or `_` of `tag`.
pub fn base_locale(tag: &str) -> &str {
    tag.split(['-', '_']).next().unwrap_or(tag)
}

/// Look `key` up in `map`, accepting either delimiter in the stored key.
///
/// Returns the stored key and its value.
fn lookup<'a>(map: &'a BTreeMap<String, String>, key: &str) -> Option<(&'a str, &'a str)> {
    if let Some((k, v)) = map.get_key_value(key) {
        return Some((k.as_str(), v.as_str()));
    }
    if !key.contains(['-', '_']) {
        return None;
    }
    [key.replace('_', "-"), key.replace('-', "_")]
        .iter()
        .find_map(|variant| map.get_key_value(variant.as_str()))
        .map(|(k, v)| (k.as_str(), v.as_str()))
}

/// A locale → URL-key alias table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleAliases(BTreeMap<String, String>);

impl LocaleAliases {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an alias.
    pub fn insert(&mut self, locale: impl Into<String>, key: impl Into<String>) -> Option<String> {
        self.0.insert(locale.into(), key.into())
    }

    /// The URL key aliased to `locale`, matching either delimiter.
    pub fn get(&self, locale: &str) -> Option<&str> {
        lookup(&self.0, locale).map(|(_, key)| key)
    }

    /// Number of aliases.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(locale, key)` pairs in locale order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LocaleAliases {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// Language -> script subset. Only languages whose glyphs are fully covered by
// the subset are listed.
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("ca", "latin"),
    ("de", "latin"),
    ("en", "latin"),
    ("es", "latin"),
    ("fr", "latin"),
    ("it", "latin"),
    ("pt", "latin"),
    ("el", "greek"),
    ("be", "cyrillic"),
    ("bg", "cyrillic"),
    ("bs", "cyrillic"),
    ("hu", "cyrillic"),
    ("hr", "cyrillic"),
    ("ro", "cyrillic"),
    ("ru", "cyrillic"),
    ("sh", "cyrillic"),
    ("sr", "cyrillic"),
    ("uk", "cyrillic"),
];

/// The built-in language-to-script alias table.
pub fn builtin_aliases() -> &'static LocaleAliases {
    static TABLE: OnceLock<LocaleAliases> = OnceLock::new();
    TABLE.get_or_init(|| BUILTIN_ALIASES.iter().copied().collect())
}

/// The URLs of one font format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UrlMap {
    /// One URL for every locale.
    Single(String),
    /// Localized URLs by subset key; must contain [`DEFAULT_KEY`].
    Localized(BTreeMap<String, String>),
}

impl From<&str> for UrlMap {
    fn from(url: &str) -> Self {
        Self::Single(url.to_string())
    }
}

impl From<String> for UrlMap {
    fn from(url: String) -> Self {
        Self::Single(url)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for UrlMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Localized(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// The three alias tables consulted after the URL map itself.
#[derive(Debug, Clone, Copy)]
pub struct AliasChain<'a> {
    /// Aliases declared on the font being resolved.
    pub font: Option<&'a LocaleAliases>,
    /// Registry-wide aliases.
    pub global: &'a LocaleAliases,
    /// Built-in language-to-script aliases.
    pub builtin: &'a LocaleAliases,
}

impl<'a> AliasChain<'a> {
    /// A chain with the given global table and the built-in table.
    pub fn new(global: &'a LocaleAliases) -> Self {
        Self {
            font: None,
            global,
            builtin: builtin_aliases(),
        }
    }

    /// Use `font` as the font-level table.
    pub fn with_font(mut self, font: Option<&'a LocaleAliases>) -> Self {
        self.font = font;
        self
    }
}

/// One step of the locale fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionStrategy {
    LocaleInUrlMap,
    BaseInUrlMap,
    LocaleInFontAliases,
    BaseInFontAliases,
    LocaleInGlobalAliases,
    BaseInGlobalAliases,
    LocaleInBuiltinAliases,
    BaseInBuiltinAliases,
    Default,
}

impl ResolutionStrategy {
    /// The strategies in precedence order.
    pub const CHAIN: [ResolutionStrategy; 9] = [
        Self::LocaleInUrlMap,
        Self::BaseInUrlMap,
        Self::LocaleInFontAliases,
        Self::BaseInFontAliases,
        Self::LocaleInGlobalAliases,
        Self::BaseInGlobalAliases,
        Self::LocaleInBuiltinAliases,
        Self::BaseInBuiltinAliases,
        Self::Default,
    ];

    /// Try this strategy. Returns the URL-map key it selects, if any.
    pub fn try_key<'a>(
        self,
        aliases: &AliasChain<'a>,
        locale: &'a LocaleTag,
        urls: &'a BTreeMap<String, String>,
    ) -> Option<&'a str> {
        let (tag, table) = match self {
            Self::LocaleInUrlMap => return lookup(urls, locale.as_str()).map(|(k, _)| k),
            Self::BaseInUrlMap => return lookup(urls, locale.base()).map(|(k, _)| k),
            Self::Default => return Some(DEFAULT_KEY),
            Self::LocaleInFontAliases => (locale.as_str(), aliases.font?),
            Self::BaseInFontAliases => (locale.base(), aliases.font?),
            Self::LocaleInGlobalAliases => (locale.as_str(), aliases.global),
            Self::BaseInGlobalAliases => (locale.base(), aliases.global),
            Self::LocaleInBuiltinAliases => (locale.as_str(), aliases.builtin),
            Self::BaseInBuiltinAliases => (locale.base(), aliases.builtin),
        };
        table.get(tag)
    }
}

/// Pick the URL-map key for `locale`, and the strategy that picked it.
pub fn resolve_key<'a>(
    aliases: &AliasChain<'a>,
    locale: &'a LocaleTag,
    urls: &'a BTreeMap<String, String>,
) -> (&'a str, ResolutionStrategy) {
    ResolutionStrategy::CHAIN
        .into_iter()
        .find_map(|strategy| {
            strategy
                .try_key(aliases, locale, urls)
                .map(|key| (key, strategy))
        })
        .unwrap_or((DEFAULT_KEY, ResolutionStrategy::Default))
}

/// Resolve the URL to serve for `locale`.
///
/// A [`UrlMap::Single`] is returned unchanged. A localized map must carry a
/// `default` entry; the key chosen by [`resolve_key`] is looked up and, if
/// the map has no such entry, `default` is used instead.
pub fn resolve_url(aliases: &AliasChain<'_>, locale: &LocaleTag, urls: &UrlMap) -> Result<String> {
    let map = match urls {
        UrlMap::Single(url) => return Ok(url.clone()),
        UrlMap::Localized(map) => map,
    };

    let Some(default_url) = map.get(DEFAULT_KEY) else {
        return Err(Error::missing_field(DEFAULT_KEY));
    };

    let (key, strategy) = resolve_key(aliases, locale, map);
    let url = lookup(map, key).map_or(default_url.as_str(), |(_, url)| url);
    tracing::debug!(
        target: targets::LOCALE,
        locale = %locale,
        key,
        ?strategy,
        url,
        "Resolved localized URL"
    );
    Ok(url.to_string())
}
