//! Registry state and batch resolution.
//!
//! [`Registry`] is an immutable, validated configuration. [`FontRegistry`]
//! owns the current one and gives it an explicit lifecycle: `setup` replaces
//! it, `reset` clears it, and every resolution call fails with
//! [`Error::NotConfigured`] while it is empty.
//!
//! Resolution calls take an `Arc` snapshot under a read lock and run against
//! it, so a concurrent `setup` never changes the registry halfway through a
//! request. Configure once at startup and resolve many times afterwards.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use fontface_core::logging::targets;
use fontface_core::{
    classify, AliasChain, BuiltinUaParser, Client, FormatCapabilitySet, LocaleAliases, UrlMap,
    UrlPostProcessor, UserAgentParser, DEFAULT_KEY,
};
use parking_lot::RwLock;

use crate::config::{FontConfigEntry, RegistryConfig};
use crate::error::{Error, Result};
use crate::filter::{filter_with_capabilities, ResolvedFontConfig};
use crate::request::FontRequest;

/// A validated, immutable registry configuration.
pub struct Registry {
    fonts: BTreeMap<String, FontConfigEntry>,
    locale_to_url_keys: LocaleAliases,
    urls: UrlPostProcessor,
    ua_parser: Arc<dyn UserAgentParser>,
}

impl Registry {
    /// Build a registry from `config`. `fonts` is required, and no font may
    /// use a metadata key listed in [`crate::RESERVED_METADATA_KEYS`].
    pub fn from_config(config: RegistryConfig) -> Result<Self> {
        let fonts = config.fonts.ok_or_else(|| Error::missing_field("fonts"))?;

        for (name, font) in &fonts {
            font.check_metadata(name)?;
            for entry in &font.formats {
                if let UrlMap::Localized(map) = &entry.url
                    && !map.contains_key(DEFAULT_KEY)
                {
                    tracing::warn!(
                        target: targets::REGISTRY,
                        font = %name,
                        format = %entry.format,
                        "Localized URLs have no default entry; resolving this format will fail"
                    );
                }
            }
        }

        let mut urls = UrlPostProcessor::new().with_host(config.host);
        if let Some(modifier) = config.url_modifier {
            urls = urls.with_modifier(modifier);
        }

        Ok(Self {
            fonts,
            locale_to_url_keys: config.locale_to_url_keys,
            urls,
            ua_parser: config
                .ua_parser
                .unwrap_or_else(|| Arc::new(BuiltinUaParser::new())),
        })
    }

    /// Look up a registered font.
    pub fn font(&self, name: &str) -> Option<&FontConfigEntry> {
        self.fonts.get(name)
    }

    /// Registered font names, sorted.
    pub fn font_names(&self) -> impl Iterator<Item = &str> {
        self.fonts.keys().map(String::as_str)
    }

    /// Number of registered fonts.
    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    /// The registry-wide locale aliases.
    pub fn locale_aliases(&self) -> &LocaleAliases {
        &self.locale_to_url_keys
    }

    /// The host prefix, if configured.
    pub fn host(&self) -> Option<&str> {
        self.urls.host()
    }

    /// The URL post-processor (host prefix and modifier).
    pub fn url_processor(&self) -> &UrlPostProcessor {
        &self.urls
    }

    /// The registry-wide and built-in alias tables.
    pub fn alias_chain(&self) -> AliasChain<'_> {
        AliasChain::new(&self.locale_to_url_keys)
    }

    /// Classify `client` with the configured user-agent parser.
    pub fn classify(&self, client: &Client) -> Result<FormatCapabilitySet> {
        Ok(classify(client, self.ua_parser.as_ref())?)
    }

    /// Resolve every requested font for the request's client and locale.
    ///
    /// Fails on the first missing request field, then on the first
    /// unregistered font name; nothing is returned on failure.
    pub fn get_font_configs(&self, request: &FontRequest) -> Result<Vec<ResolvedFontConfig>> {
        let request = request.validate()?;

        let fonts = request
            .fonts
            .iter()
            .map(|name| {
                self.font(name).map(|font| (name.as_str(), font)).ok_or_else(|| {
                    tracing::warn!(target: targets::REGISTRY, font = %name, "Unknown font requested");
                    Error::unknown_font(name.as_str())
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let capabilities = self.classify(request.client)?;
        let aliases = self.alias_chain();

        fonts
            .into_iter()
            .map(|(name, font)| {
                filter_with_capabilities(
                    name,
                    font,
                    &capabilities,
                    request.locale,
                    &aliases,
                    &self.urls,
                )
            })
            .collect()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("fonts", &self.fonts.keys().collect::<Vec<_>>())
            .field("locale_to_url_keys", &self.locale_to_url_keys)
            .field("urls", &self.urls)
            .finish_non_exhaustive()
    }
}

/// Owner of the current [`Registry`], with `setup`/`reset` lifecycle.
pub struct FontRegistry {
    state: RwLock<Option<Arc<Registry>>>,
}

impl FontRegistry {
    /// Create an unconfigured registry.
    pub const fn new() -> Self {
        Self {
            state: parking_lot::const_rwlock(None),
        }
    }

    /// Create a registry configured with `config`.
    pub fn with_config(config: RegistryConfig) -> Result<Self> {
        let registry = Self::new();
        registry.setup(config)?;
        Ok(registry)
    }

    /// Replace the whole configuration. On error the previous state is kept.
    pub fn setup(&self, config: RegistryConfig) -> Result<()> {
        let registry = Registry::from_config(config)?;
        tracing::info!(
            target: targets::REGISTRY,
            fonts = registry.font_count(),
            aliases = registry.locale_aliases().len(),
            host = registry.host(),
            "Font registry configured"
        );
        *self.state.write() = Some(Arc::new(registry));
        Ok(())
    }

    /// Clear the configuration.
    pub fn reset(&self) {
        if self.state.write().take().is_some() {
            tracing::info!(target: targets::REGISTRY, "Font registry reset");
        }
    }

    /// Whether `setup` has succeeded since the last `reset`.
    pub fn is_configured(&self) -> bool {
        self.state.read().is_some()
    }

    /// The current configuration.
    pub fn snapshot(&self) -> Result<Arc<Registry>> {
        self.state.read().clone().ok_or(Error::NotConfigured)
    }

    /// Resolve the fonts in `request`. See [`Registry::get_font_configs`].
    pub fn get_font_configs(&self, request: &FontRequest) -> Result<Vec<ResolvedFontConfig>> {
        self.snapshot()?.get_font_configs(request)
    }
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FontRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontRegistry")
            .field("state", &*self.state.read())
            .finish()
    }
}

static GLOBAL_REGISTRY: FontRegistry = FontRegistry::new();

/// The process-wide registry.
///
/// Prefer an owned [`FontRegistry`]; this exists for applications that
/// configure fonts once at startup and resolve from anywhere.
pub fn global() -> &'static FontRegistry {
    &GLOBAL_REGISTRY
}
