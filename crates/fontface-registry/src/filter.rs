//! Per-client, per-locale filtering of one font's configuration.

use fontface_core::logging::targets;
use fontface_core::{
    AliasChain, Client, FormatCapabilitySet, FormatTag, LocaleTag, UrlMap, UrlPostProcessor,
};
use serde::{Deserialize, Serialize};

use crate::config::{FontConfigEntry, FontMetadata};
use crate::error::Result;
use crate::registry::Registry;

/// A format the client supports, with its final URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedFormat {
    #[serde(rename = "type")]
    pub format: FormatTag,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// A font config reduced to what one client, in one locale, should receive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedFontConfig {
    /// The registry name of the font.
    pub name: String,
    /// Metadata copied from the registry entry.
    #[serde(flatten)]
    pub metadata: FontMetadata,
    /// Supported formats, in declared order.
    pub formats: Vec<ResolvedFormat>,
}

impl ResolvedFontConfig {
    /// A string metadata field, if present.
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(|v| v.as_str())
    }

    /// The formats' types, in order.
    pub fn format_tags(&self) -> impl Iterator<Item = &FormatTag> {
        self.formats.iter().map(|f| &f.format)
    }
}

/// Reduce `font` to the formats in `capabilities`, resolving each URL.
///
/// Entries keep their declared order; unsupported entries are dropped
/// without error. `local` entries name an installed face, so their value is
/// resolved for the locale but not host-prefixed or rewritten. Metadata
/// using a reserved key is rejected, since it would shadow `name`.
pub fn filter_with_capabilities(
    name: &str,
    font: &FontConfigEntry,
    capabilities: &FormatCapabilitySet,
    locale: &LocaleTag,
    aliases: &AliasChain<'_>,
    urls: &UrlPostProcessor,
) -> Result<ResolvedFontConfig> {
    font.check_metadata(name)?;
    let aliases = aliases.with_font(font.locale_to_url_keys.as_ref());
    let mut formats = Vec::with_capacity(font.formats.len());

    for entry in &font.formats {
        if !capabilities.supports(&entry.format) {
            tracing::trace!(target: targets::FILTER, font = name, format = %entry.format, "Dropping unsupported format");
            continue;
        }

        let url = resolve_entry_url(&entry.format, &entry.url, locale, &aliases, urls)?;
        formats.push(ResolvedFormat {
            format: entry.format.clone(),
            url,
            id: entry.id.clone(),
        });
    }

    Ok(ResolvedFontConfig {
        name: name.to_string(),
        metadata: font.metadata.clone(),
        formats,
    })
}

fn resolve_entry_url(
    format: &FormatTag,
    url: &UrlMap,
    locale: &LocaleTag,
    aliases: &AliasChain<'_>,
    urls: &UrlPostProcessor,
) -> Result<String> {
    let resolved = fontface_core::resolve_url(aliases, locale, url)?;
    if format.is_local() {
        Ok(resolved)
    } else {
        Ok(urls.apply(&resolved))
    }
}

/// Filter `font` for `client` and `locale` against `registry`.
///
/// Classifies the client once, then applies [`filter_with_capabilities`].
pub fn filter_for_client_and_locale(
    registry: &Registry,
    name: &str,
    client: &Client,
    locale: &LocaleTag,
    font: &FontConfigEntry,
) -> Result<ResolvedFontConfig> {
    let capabilities = registry.classify(client)?;
    filter_with_capabilities(
        name,
        font,
        &capabilities,
        locale,
        &registry.alias_chain(),
        registry.url_processor(),
    )
}
