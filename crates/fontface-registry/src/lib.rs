//! Font registry and batch resolution for fontface.
//!
//! This crate holds the registered fonts and resolves them for a request:
//!
//! - **Configuration**: [`RegistryConfig`], built in code or loaded from JSON/TOML
//! - **Registry state**: [`FontRegistry`] with an explicit `setup`/`reset` lifecycle
//! - **Filtering**: reduce one font to the formats a client supports
//! - **Batch resolution**: [`FontRegistry::get_font_configs`], in request order
//!
//! # Example
//!
//! ```
//! use fontface_registry::{FontConfigEntry, FontFormatEntry, FontRegistry, FontRequest, RegistryConfig};
//!
//! let registry = FontRegistry::new();
//! registry
//!     .setup(
//!         RegistryConfig::new()
//!             .with_font(
//!                 "OpenSansRegular",
//!                 FontConfigEntry::new().with_format(FontFormatEntry::new("woff", "/f/a.woff")),
//!             )
//!             .with_host("https://cdn.x"),
//!     )
//!     .unwrap();
//!
//! let request = FontRequest::new()
//!     .client("all")
//!     .locale("en")
//!     .fonts(["OpenSansRegular"]);
//! let resolved = registry.get_font_configs(&request).unwrap();
//! assert_eq!(resolved[0].formats[0].url, "https://cdn.x/f/a.woff");
//! ```
//!
//! # Lifecycle
//!
//! Resolution before `setup`, or after `reset`, fails with
//! [`Error::NotConfigured`]. `setup` replaces the whole configuration; it
//! never merges with the previous one.

pub mod config;
mod error;
pub mod filter;
pub mod registry;
pub mod request;

pub use config::{
    FontConfigEntry, FontFormatEntry, FontMetadata, RegistryConfig, RESERVED_METADATA_KEYS,
};
pub use error::{Error, ErrorKind, Result};
pub use filter::{
    filter_for_client_and_locale, filter_with_capabilities, ResolvedFontConfig, ResolvedFormat,
};
pub use registry::{global, FontRegistry, Registry};
pub use request::{FontRequest, ValidatedRequest};
