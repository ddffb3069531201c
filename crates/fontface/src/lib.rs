//! fontface - client- and locale-aware `@font-face` resolution.
//!
//! This is the umbrella crate that re-exports the public APIs of the
//! `fontface-*` crates.
//!
//! Given a registry of fonts, each with several downloadable formats and
//! per-locale subsets, fontface works out which formats a client can load and
//! which subset URL each format should point at, then renders the result as
//! `@font-face` CSS.
//!
//! # Example
//!
//! ```
//! use fontface::prelude::*;
//!
//! # fn main() -> fontface::Result<()> {
//! let config = RegistryConfig::from_json_str(r#"{
//!     "fonts": {
//!         "OpenSansRegular": {
//!             "font_family": "Open Sans",
//!             "formats": [
//!                 { "type": "local", "url": "Open Sans" },
//!                 { "type": "woff", "url": { "cyrillic": "/f/cy.woff", "default": "/f/d.woff" } }
//!             ]
//!         }
//!     },
//!     "host": "https://cdn.example.com"
//! }"#)?;
//!
//! let registry = FontRegistry::with_config(config)?;
//! let request = FontRequest::new()
//!     .client("Mozilla/5.0 (X11; Linux x86_64; rv:120.0) Gecko/20100101 Firefox/120.0")
//!     .locale("ru")
//!     .fonts(["OpenSansRegular"]);
//!
//! let css = get_font_css(&registry, &request)?;
//! assert!(css.contains("https://cdn.example.com/f/cy.woff"));
//! # Ok(())
//! # }
//! ```

pub use fontface_core::{
    base_locale, builtin_aliases, capabilities_for, classify, identity_modifier, min_version,
    resolve_key, resolve_url, supports, AliasChain, BrowserFamily, BuiltinUaParser, Client,
    ClientDescriptor, FormatCapabilitySet, FormatTag, LocaleAliases, LocaleTag, MinVersion,
    ResolutionStrategy, UrlMap, UrlModifier, UrlPostProcessor, UserAgentParser, ALL_CLIENTS,
    DEFAULT_KEY,
};
pub use fontface_registry::{
    filter_for_client_and_locale, filter_with_capabilities, global, Error, ErrorKind,
    FontConfigEntry, FontFormatEntry, FontMetadata, FontRegistry, FontRequest, Registry,
    RegistryConfig, ResolvedFontConfig, ResolvedFormat, Result,
};

/// Errors raised by the classification and locale layers.
pub use fontface_core::Error as CoreError;

/// Tracing targets used across the workspace.
pub use fontface_core::logging;

/// `@font-face` rendering.
#[cfg(feature = "css")]
pub mod css {
    pub use fontface_css::*;
}

#[cfg(feature = "css")]
pub use fontface_css::{get_font_css, get_font_css_with, CssRenderer, FontFaceRenderer};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::{
        Client, ClientDescriptor, BrowserFamily, FontConfigEntry, FontFormatEntry, FontRegistry,
        FontRequest, FormatTag, LocaleTag, RegistryConfig, ResolvedFontConfig, UserAgentParser,
    };

    #[cfg(feature = "css")]
    pub use crate::{get_font_css, get_font_css_with, CssRenderer, FontFaceRenderer};
}
