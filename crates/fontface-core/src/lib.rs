//! Core resolution engine for fontface.
//!
//! This crate decides, for one client and one locale, which font formats can
//! be served and which localized URL each format should point at:
//!
//! - **Formats**: the container formats a `@font-face` rule can reference
//! - **Clients**: browser family/version descriptors and user-agent parsing
//! - **Capabilities**: a static minimum-version table per format and family
//! - **Locales**: a fixed fallback chain from locale tag to asset subset key
//! - **URLs**: host prefixing and URL rewriting of the resolved location
//!
//! # Example
//!
//! ```
//! use fontface_core::{
//!     classify, resolve_url, AliasChain, BuiltinUaParser, Client, FormatTag, LocaleAliases,
//!     LocaleTag, UrlMap,
//! };
//!
//! let client = Client::from("Mozilla/4.0 (compatible; MSIE 8.0; Windows NT 6.1)");
//! let formats = classify(&client, &BuiltinUaParser).unwrap();
//! assert!(formats.supports(&FormatTag::EmbeddedOpenType));
//! assert!(!formats.supports(&FormatTag::Woff));
//!
//! let global: LocaleAliases = [("ru", "cyrillic")].into_iter().collect();
//! let urls: UrlMap = [("cyrillic", "/f/cy.woff"), ("default", "/f/d.woff")]
//!     .into_iter()
//!     .collect();
//! let url = resolve_url(&AliasChain::new(&global), &LocaleTag::from("ru"), &urls).unwrap();
//! assert_eq!(url, "/f/cy.woff");
//! ```

pub mod capability;
pub mod client;
mod error;
pub mod format;
pub mod locale;
pub mod logging;
pub mod url;

pub use capability::{capabilities_for, classify, min_version, supports, MinVersion};
pub use client::{
    BrowserFamily, BuiltinUaParser, Client, ClientDescriptor, UserAgentParser, ALL_CLIENTS,
};
pub use error::{Error, Result};
pub use format::{FormatCapabilitySet, FormatTag};
pub use locale::{
    base_locale, builtin_aliases, resolve_key, resolve_url, AliasChain, LocaleAliases,
    LocaleTag, ResolutionStrategy, UrlMap, DEFAULT_KEY,
};
pub use url::{identity_modifier, UrlModifier, UrlPostProcessor};
