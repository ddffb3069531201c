//! `@font-face` CSS generation for fontface.
//!
//! [`get_font_css`] resolves a request against a [`FontRegistry`] and renders
//! the result with [`FontFaceRenderer`]. Use [`get_font_css_with`] to supply
//! a different [`CssRenderer`].
//!
//! ```
//! use fontface_css::get_font_css;
//! use fontface_registry::{FontConfigEntry, FontFormatEntry, FontRegistry, FontRequest, RegistryConfig};
//!
//! let registry = FontRegistry::with_config(RegistryConfig::new().with_font(
//!     "OpenSansRegular",
//!     FontConfigEntry::new()
//!         .with_metadata("font_family", "Open Sans")
//!         .with_format(FontFormatEntry::new("woff", "/f/a.woff")),
//! ))
//! .unwrap();
//!
//! let request = FontRequest::new().client("all").locale("en").fonts(["OpenSansRegular"]);
//! let css = get_font_css(&registry, &request).unwrap();
//! assert!(css.contains(r#"url("/f/a.woff") format("woff")"#));
//! ```

pub mod renderer;

pub use renderer::{CssRenderer, FontFaceRenderer, FontFaceRule};

use fontface_core::logging::targets;
use fontface_registry::{FontRegistry, FontRequest, Result};

/// Resolve `request` and render it as `@font-face` rules.
///
/// Any resolution error is returned as is; no CSS is produced for a request
/// that fails.
pub fn get_font_css(registry: &FontRegistry, request: &FontRequest) -> Result<String> {
    get_font_css_with(registry, request, &FontFaceRenderer)
}

/// Like [`get_font_css`], with a custom renderer.
pub fn get_font_css_with(
    registry: &FontRegistry,
    request: &FontRequest,
    renderer: &dyn CssRenderer,
) -> Result<String> {
    let fonts = registry.get_font_configs(request)?;
    let css = renderer.render(&fonts);
    tracing::debug!(target: targets::CSS, fonts = fonts.len(), bytes = css.len(), "Rendered font CSS");
    Ok(css)
}
