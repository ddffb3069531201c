//! Post-processing applied to every resolved font URL.

use std::fmt;
use std::sync::Arc;

/// A URL rewrite hook, e.g. for inserting a content hash for cache busting.
pub type UrlModifier = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// The identity rewrite.
pub fn identity_modifier() -> UrlModifier {
    Arc::new(|url: &str| url.to_string())
}

/// Prefixes resolved URLs with an optional host, then applies the URL modifier.
#[derive(Clone)]
pub struct UrlPostProcessor {
    host: Option<String>,
    modifier: UrlModifier,
}

impl UrlPostProcessor {
    /// A processor with no host and the identity modifier.
    pub fn new() -> Self {
        Self {
            host: None,
            modifier: identity_modifier(),
        }
    }

    /// Set the host prefix. Empty strings disable the prefix.
    pub fn with_host(mut self, host: Option<impl Into<String>>) -> Self {
        self.host = host.map(Into::into).filter(|h| !h.is_empty());
        self
    }

    /// Set the URL modifier.
    pub fn with_modifier(mut self, modifier: UrlModifier) -> Self {
        self.modifier = modifier;
        self
    }

    /// The configured host prefix.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Prefix `url` with the host (if any) and run the modifier.
    ///
    /// Exactly one `/` separates host and path. URLs that are already
    /// absolute (`scheme://` or `//`) are not prefixed. The modifier always
    /// runs.
    pub fn apply(&self, url: &str) -> String {
        let prefixed = match &self.host {
            Some(host) if !is_absolute(url) => join_host(host, url),
            _ => url.to_string(),
        };
        (self.modifier)(&prefixed)
    }
}

impl Default for UrlPostProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for UrlPostProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlPostProcessor")
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

fn is_absolute(url: &str) -> bool {
    url.starts_with("//") || url.contains("://")
}

fn join_host(host: &str, url: &str) -> String {
    let host = host.trim_end_matches('/');
    if url.starts_with('/') {
        format!("{host}{url}")
    } else {
        format!("{host}/{url}")
    }
}
