//! Error types for capability classification and locale resolution.

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while classifying a client or resolving a URL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A required value is absent, e.g. the `default` entry of a localized URL map.
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// The user-agent parser could not produce a descriptor.
    #[error("Unrecognized client '{0}'")]
    UnrecognizedClient(String),
}

impl Error {
    /// Create a missing-field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an unrecognized-client error.
    pub fn unrecognized_client(client: impl Into<String>) -> Self {
        Self::UnrecognizedClient(client.into())
    }
}
