//! Error types for the font registry.

use std::path::PathBuf;

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring the registry or resolving fonts.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A resolution call was made before `setup`, or after `reset`.
    #[error("Font registry is not configured: setup must be called before resolving fonts")]
    NotConfigured,

    /// A required request or configuration field is absent.
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A requested font has no registry entry.
    #[error("Unknown font '{0}'")]
    UnknownFont(String),

    /// Client classification or URL resolution failed.
    #[error(transparent)]
    Core(#[from] fontface_core::Error),

    /// Configuration file I/O error.
    #[error("Failed to read font config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON configuration.
    #[error("Invalid JSON font config: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed TOML configuration.
    #[error("Invalid TOML font config: {0}")]
    Toml(#[from] toml::de::Error),

    /// A font's metadata uses a key that resolved configs reserve.
    #[error("Font '{font}' uses reserved metadata key '{key}'")]
    ReservedMetadataKey { font: String, key: String },

    /// Configuration file with an extension we cannot parse.
    #[error("Unsupported font config '{path}': expected a .json or .toml file")]
    UnsupportedConfigFormat { path: PathBuf },
}

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The registry has not been set up.
    NotConfigured,
    /// A required field is absent, including a URL map's `default` entry.
    MissingField,
    /// A requested font is not registered.
    UnknownFont,
    /// The client could not be classified.
    Client,
    /// The configuration could not be loaded.
    Config,
}

impl Error {
    /// Create a missing-field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an unknown-font error.
    pub fn unknown_font(name: impl Into<String>) -> Self {
        Self::UnknownFont(name.into())
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a reserved-metadata-key error.
    pub fn reserved_metadata_key(font: impl Into<String>, key: impl Into<String>) -> Self {
        Self::ReservedMetadataKey {
            font: font.into(),
            key: key.into(),
        }
    }

    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotConfigured => ErrorKind::NotConfigured,
            Self::MissingField { .. } => ErrorKind::MissingField,
            Self::UnknownFont(_) => ErrorKind::UnknownFont,
            Self::Core(fontface_core::Error::MissingField { .. }) => ErrorKind::MissingField,
            Self::Core(fontface_core::Error::UnrecognizedClient(_)) => ErrorKind::Client,
            Self::Io { .. }
            | Self::Json(_)
            | Self::Toml(_)
            | Self::ReservedMetadataKey { .. }
            | Self::UnsupportedConfigFormat { .. } => ErrorKind::Config,
        }
    }

    /// The offending font name, for [`Error::UnknownFont`].
    pub fn font_name(&self) -> Option<&str> {
        match self {
            Self::UnknownFont(name) => Some(name),
            _ => None,
        }
    }

    /// The missing field, for either flavour of missing-field error.
    pub fn missing_field_name(&self) -> Option<&str> {
        match self {
            Self::MissingField { field }
            | Self::Core(fontface_core::Error::MissingField { field }) => Some(field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(Error::NotConfigured.kind(), ErrorKind::NotConfigured);
        assert_eq!(Error::missing_field("fonts").kind(), ErrorKind::MissingField);
        assert_eq!(Error::unknown_font("X").kind(), ErrorKind::UnknownFont);
        assert_eq!(Error::reserved_metadata_key("F", "name").kind(), ErrorKind::Config);
        assert_eq!(
            Error::from(fontface_core::Error::missing_field("default")).kind(),
            ErrorKind::MissingField
        );
        assert_eq!(
            Error::from(fontface_core::Error::unrecognized_client("?")).kind(),
            ErrorKind::Client
        );
    }

    #[test]
    fn test_payloads() {
        assert_eq!(Error::unknown_font("UnknownFont").font_name(), Some("UnknownFont"));
        assert_eq!(Error::NotConfigured.font_name(), None);
        assert_eq!(
            Error::from(fontface_core::Error::missing_field("default")).missing_field_name(),
            Some("default")
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Error::unknown_font("Foo").to_string(), "Unknown font 'Foo'");
        assert_eq!(
            Error::missing_field("locale").to_string(),
            "Missing required field: locale"
        );
    }
}
