//! The resolution request surface.

use fontface_core::{Client, LocaleTag};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A request for the font configs one client should receive.
///
/// All three fields are required; they are optional here so that requests
/// deserialized from untrusted input report exactly which field is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontRequest {
    /// The requesting client (`"all"`, a user-agent string, or a descriptor).
    #[serde(default, alias = "ua")]
    pub client: Option<Client>,
    /// The locale the client is using.
    #[serde(default, alias = "lang")]
    pub locale: Option<LocaleTag>,
    /// Registered font names, in the order the configs should be returned.
    #[serde(default)]
    pub fonts: Option<Vec<String>>,
}

/// A request whose required fields are known to be present.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedRequest<'a> {
    pub client: &'a Client,
    pub locale: &'a LocaleTag,
    pub fonts: &'a [String],
}

impl FontRequest {
    /// Create an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the client.
    pub fn client(mut self, client: impl Into<Client>) -> Self {
        self.client = Some(client.into());
        self
    }

    /// Set the locale.
    pub fn locale(mut self, locale: impl Into<LocaleTag>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Set the requested font names.
    pub fn fonts<I, S>(mut self, fonts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fonts = Some(fonts.into_iter().map(Into::into).collect());
        self
    }

    /// Check that every required field is present, in the order
    /// `client`, `locale`, `fonts`.
    pub fn validate(&self) -> Result<ValidatedRequest<'_>> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| Error::missing_field("client"))?;
        let locale = self
            .locale
            .as_ref()
            .ok_or_else(|| Error::missing_field("locale"))?;
        let fonts = self
            .fonts
            .as_deref()
            .ok_or_else(|| Error::missing_field("fonts"))?;
        Ok(ValidatedRequest {
            client,
            locale,
            fonts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_validate() {
        let request = FontRequest::new()
            .client("all")
            .locale("en")
            .fonts(["OpenSansRegular"]);
        let valid = request.validate().unwrap();
        assert_eq!(valid.client, &Client::All);
        assert_eq!(valid.locale.as_str(), "en");
        assert_eq!(valid.fonts, ["OpenSansRegular".to_string()]);
    }

    #[test]
    fn test_each_missing_field_is_named() {
        let full = FontRequest::new().client("Firefox").locale("en").fonts(["F"]);

        let mut r = full.clone();
        r.client = None;
        assert_eq!(r.validate().unwrap_err().missing_field_name(), Some("client"));

        let mut r = full.clone();
        r.locale = None;
        assert_eq!(r.validate().unwrap_err().missing_field_name(), Some("locale"));

        let mut r = full;
        r.fonts = None;
        assert_eq!(r.validate().unwrap_err().missing_field_name(), Some("fonts"));
    }

    #[test]
    fn test_empty_font_list_is_valid() {
        let request = FontRequest::new().client("all").locale("en").fonts(Vec::<String>::new());
        assert!(request.validate().unwrap().fonts.is_empty());
    }

    #[test]
    fn test_deserialize_with_aliases() {
        let json = r#"{ "ua": "Firefox", "lang": "it-ch", "fonts": ["OpenSansRegular"] }"#;
        let request: FontRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.client, Some(Client::UserAgent("Firefox".to_string())));
        assert_eq!(request.locale, Some(LocaleTag::from("it-ch")));

        let request: FontRequest = serde_json::from_str(r#"{ "fonts": [] }"#).unwrap();
        assert_eq!(
            request.validate().unwrap_err().missing_field_name(),
            Some("client")
        );
    }
}
