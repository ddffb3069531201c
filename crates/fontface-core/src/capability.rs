//! Capability classification: which font formats a client can load.
//!
//! Support is decided from a static table of minimum versions per format and
//! browser family. The cut-offs are historical browser-compatibility data and
//! are kept exactly as curated; they are not derived from anything.

use crate::client::{BrowserFamily, Client, ClientDescriptor, UserAgentParser};
use crate::error::Result;
use crate::format::{FormatCapabilitySet, FormatTag};
use crate::logging::targets;

/// Minimum client version for a format within one browser family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinVersion {
    /// The family never supports the format.
    Never,
    /// Every version supports the format.
    Any,
    /// Versions at or above `major.minor` support the format.
    AtLeast(u32, u32),
}

impl MinVersion {
    /// Whether `client` satisfies this requirement.
    pub fn admits(self, client: &ClientDescriptor) -> bool {
        match self {
            Self::Never => false,
            Self::Any => true,
            Self::AtLeast(major, minor) => client.at_least(major, minor),
        }
    }
}

/// One row of the threshold table.
#[derive(Debug, Clone, Copy)]
struct FamilyThresholds {
    firefox: MinVersion,
    chrome: MinVersion,
    safari: MinVersion,
    ie: MinVersion,
    opera: MinVersion,
    mobile_safari: MinVersion,
    chrome_mobile: MinVersion,
    edge: MinVersion,
}

impl FamilyThresholds {
    fn for_family(&self, family: &BrowserFamily) -> MinVersion {
        match family {
            BrowserFamily::Firefox => self.firefox,
            BrowserFamily::Chrome => self.chrome,
            BrowserFamily::Safari => self.safari,
            BrowserFamily::Ie => self.ie,
            BrowserFamily::Opera => self.opera,
            BrowserFamily::MobileSafari => self.mobile_safari,
            BrowserFamily::ChromeMobile => self.chrome_mobile,
            BrowserFamily::Edge => self.edge,
            BrowserFamily::Other(_) => MinVersion::Never,
        }
    }
}

use MinVersion::{Any, AtLeast, Never};

const LOCAL: FamilyThresholds = FamilyThresholds {
    firefox: AtLeast(3, 5),
    chrome: AtLeast(4, 0),
    safari: AtLeast(3, 2),
    ie: AtLeast(5, 5),
    opera: AtLeast(10, 0),
    mobile_safari: Any,
    chrome_mobile: Any,
    edge: AtLeast(12, 0),
};

// Also used for opentype.
const TRUETYPE: FamilyThresholds = FamilyThresholds {
    firefox: AtLeast(3, 5),
    chrome: AtLeast(4, 0),
    safari: AtLeast(3, 1),
    ie: AtLeast(9, 0),
    opera: AtLeast(10, 0),
    mobile_safari: Any,
    chrome_mobile: Any,
    edge: AtLeast(12, 0),
};

const WOFF: FamilyThresholds = FamilyThresholds {
    firefox: AtLeast(3, 6),
    chrome: AtLeast(5, 0),
    safari: AtLeast(5, 1),
    ie: AtLeast(9, 0),
    opera: AtLeast(11, 10),
    mobile_safari: Never,
    chrome_mobile: Never,
    edge: AtLeast(12, 0),
};

const WOFF2: FamilyThresholds = FamilyThresholds {
    firefox: AtLeast(39, 0),
    chrome: AtLeast(36, 0),
    safari: AtLeast(10, 0),
    ie: Never,
    opera: AtLeast(23, 0),
    mobile_safari: AtLeast(10, 0),
    chrome_mobile: AtLeast(36, 0),
    edge: AtLeast(14, 0),
};

const EMBEDDED_OPENTYPE: FamilyThresholds = FamilyThresholds {
    firefox: Never,
    chrome: Never,
    safari: Never,
    ie: AtLeast(7, 0),
    opera: Never,
    mobile_safari: Never,
    chrome_mobile: Never,
    edge: Never,
};

const SVG: FamilyThresholds = FamilyThresholds {
    firefox: Never,
    chrome: AtLeast(4, 0),
    safari: AtLeast(3, 2),
    ie: Never,
    opera: AtLeast(9, 0),
    mobile_safari: Any,
    chrome_mobile: Any,
    edge: Never,
};

/// The minimum version of `family` that supports `format`.
///
/// Unknown formats and unknown families are never supported.
pub fn min_version(format: &FormatTag, family: &BrowserFamily) -> MinVersion {
    let row = match format {
        FormatTag::Local => &LOCAL,
        FormatTag::TrueType | FormatTag::OpenType => &TRUETYPE,
        FormatTag::EmbeddedOpenType => &EMBEDDED_OPENTYPE,
        FormatTag::Woff => &WOFF,
        FormatTag::Woff2 => &WOFF2,
        FormatTag::Svg => &SVG,
        FormatTag::Other(_) => return Never,
    };
    row.for_family(family)
}

/// Whether `client` can load `format`.
pub fn supports(client: &ClientDescriptor, format: &FormatTag) -> bool {
    min_version(format, &client.family).admits(client)
}

/// The capability set of an already parsed client.
pub fn capabilities_for(client: &ClientDescriptor) -> FormatCapabilitySet {
    let mut set = FormatCapabilitySet::none();
    for format in FormatTag::KNOWN {
        set.set(&format, supports(client, &format));
    }
    set
}

/// Classify a client into the formats it supports.
///
/// [`Client::All`] supports everything. Raw user agents are parsed with
/// `parser`; a parser error is returned as-is.
pub fn classify(client: &Client, parser: &dyn UserAgentParser) -> Result<FormatCapabilitySet> {
    let Some(descriptor) = client.descriptor(parser)? else {
        return Ok(FormatCapabilitySet::all());
    };

    let set = capabilities_for(&descriptor);
    tracing::debug!(target: targets::CAPABILITY, client = %descriptor, ?set, "Classified client");
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::BuiltinUaParser;

    fn client(family: BrowserFamily, major: u32, minor: u32) -> ClientDescriptor {
        ClientDescriptor::new(family, major, minor)
    }

    #[test]
    fn test_all_supports_everything() {
        let set = classify(&Client::All, &BuiltinUaParser).unwrap();
        assert_eq!(set, FormatCapabilitySet::all());
    }

    #[test]
    fn test_ie8_gets_only_eot_and_local() {
        let set = capabilities_for(&client(BrowserFamily::Ie, 8, 0));
        assert_eq!(
            set.supported().collect::<Vec<_>>(),
            vec![FormatTag::Local, FormatTag::EmbeddedOpenType]
        );
    }

    #[test]
    fn test_ie8_user_agent_classification() {
        let ua = Client::from("Mozilla/4.0 (compatible; MSIE 8.0; Windows NT 6.1; Trident/4.0)");
        let set = classify(&ua, &BuiltinUaParser).unwrap();
        assert!(set.local);
        assert!(set.embedded_opentype);
        assert!(!set.woff);
        assert!(!set.truetype);
    }

    #[test]
    fn test_minor_version_boundaries() {
        assert!(!supports(&client(BrowserFamily::Firefox, 3, 4), &FormatTag::Local));
        assert!(supports(&client(BrowserFamily::Firefox, 3, 5), &FormatTag::Local));
        assert!(!supports(&client(BrowserFamily::Firefox, 3, 5), &FormatTag::Woff));
        assert!(supports(&client(BrowserFamily::Firefox, 3, 6), &FormatTag::Woff));

        assert!(!supports(&client(BrowserFamily::Opera, 11, 9), &FormatTag::Woff));
        assert!(supports(&client(BrowserFamily::Opera, 11, 10), &FormatTag::Woff));

        assert!(!supports(&client(BrowserFamily::Safari, 3, 1), &FormatTag::Local));
        assert!(supports(&client(BrowserFamily::Safari, 3, 1), &FormatTag::TrueType));
        assert!(!supports(&client(BrowserFamily::Safari, 5, 0), &FormatTag::Woff));
        assert!(supports(&client(BrowserFamily::Safari, 5, 1), &FormatTag::Woff));

        assert!(!supports(&client(BrowserFamily::Ie, 5, 4), &FormatTag::Local));
        assert!(supports(&client(BrowserFamily::Ie, 5, 5), &FormatTag::Local));
    }

    #[test]
    fn test_eot_is_ie_only() {
        assert!(!supports(&client(BrowserFamily::Ie, 6, 0), &FormatTag::EmbeddedOpenType));
        assert!(supports(&client(BrowserFamily::Ie, 7, 0), &FormatTag::EmbeddedOpenType));
        for family in [
            BrowserFamily::Firefox,
            BrowserFamily::Chrome,
            BrowserFamily::Safari,
            BrowserFamily::Opera,
            BrowserFamily::Edge,
        ] {
            assert!(!supports(&client(family, 99, 0), &FormatTag::EmbeddedOpenType));
        }
    }

    #[test]
    fn test_opentype_mirrors_truetype() {
        for family in [
            BrowserFamily::Firefox,
            BrowserFamily::Chrome,
            BrowserFamily::Safari,
            BrowserFamily::Ie,
            BrowserFamily::Opera,
            BrowserFamily::MobileSafari,
            BrowserFamily::ChromeMobile,
            BrowserFamily::Edge,
        ] {
            for major in [0, 3, 4, 9, 10, 40] {
                let set = capabilities_for(&client(family.clone(), major, 5));
                assert_eq!(set.opentype, set.truetype, "{family} {major}");
            }
        }
    }

    #[test]
    fn test_woff2_needs_newer_versions_than_woff() {
        let chrome = client(BrowserFamily::Chrome, 35, 0);
        assert!(supports(&chrome, &FormatTag::Woff));
        assert!(!supports(&chrome, &FormatTag::Woff2));
        assert!(supports(&client(BrowserFamily::Chrome, 36, 0), &FormatTag::Woff2));
        assert!(!supports(&client(BrowserFamily::Ie, 11, 0), &FormatTag::Woff2));
        assert!(supports(&client(BrowserFamily::Firefox, 39, 0), &FormatTag::Woff2));
    }

    #[test]
    fn test_mobile_variants() {
        let ios = capabilities_for(&client(BrowserFamily::MobileSafari, 0, 0));
        assert!(ios.local && ios.truetype && ios.svg);
        assert!(!ios.woff2);

        let android = capabilities_for(&client(BrowserFamily::ChromeMobile, 0, 0));
        assert!(android.local && android.truetype && android.svg);
    }

    #[test]
    fn test_svg_thresholds() {
        assert!(supports(&client(BrowserFamily::Opera, 9, 0), &FormatTag::Svg));
        assert!(!supports(&client(BrowserFamily::Opera, 8, 9), &FormatTag::Svg));
        assert!(!supports(&client(BrowserFamily::Firefox, 100, 0), &FormatTag::Svg));
    }

    #[test]
    fn test_unknown_family_has_no_capabilities() {
        let set = capabilities_for(&client(BrowserFamily::Other("Lynx".into()), 99, 0));
        assert!(set.is_empty());
    }

    #[test]
    fn test_unknown_format_never_supported() {
        let fmt = FormatTag::Other("collection".into());
        assert_eq!(min_version(&fmt, &BrowserFamily::Chrome), MinVersion::Never);
    }
}
