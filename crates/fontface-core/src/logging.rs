//! Tracing targets used across the fontface crates.
//!
//! fontface never installs a subscriber. Install one in your application to
//! see resolution decisions:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("fontface_core::locale=debug")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Capability classification.
    pub const CAPABILITY: &str = "fontface_core::capability";
    /// User-agent parsing.
    pub const CLIENT: &str = "fontface_core::client";
    /// Locale key resolution.
    pub const LOCALE: &str = "fontface_core::locale";
    /// Registry lifecycle (setup / reset).
    pub const REGISTRY: &str = "fontface_registry::registry";
    /// Per-font filtering.
    pub const FILTER: &str = "fontface_registry::filter";
    /// CSS rendering.
    pub const CSS: &str = "fontface_css";
}
