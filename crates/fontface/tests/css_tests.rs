//! End-to-end tests: config file to `@font-face` CSS.

#![cfg(feature = "css")]

use std::io::Write;

use fontface::{
    ErrorKind, FontFaceRenderer, FontRegistry, FontRequest, FormatTag, RegistryConfig,
    ResolvedFontConfig, get_font_css, get_font_css_with,
};

const FONTS_JSON: &str = r#"
// Open Sans, subset per script.
{
  "fonts": {
    "OpenSansRegular": {
      "font_family": "Open Sans",
      "font_style": "normal",
      "font_weight": "400",
      "formats": [
        { "type": "local", "url": "Open Sans" },
        { "type": "embedded-opentype", "url": "/fonts/OpenSans-Regular.eot" },
        {
          "type": "woff",
          "url": {
            "latin": "/fonts/OpenSans-Regular-latin.woff",
            "cyrillic": "/fonts/OpenSans-Regular-cyrillic.woff",
            "default": "/fonts/OpenSans-Regular-extended.woff"
          }
        },
        {
          "type": "truetype",
          "url": {
            "latin": "/fonts/OpenSans-Regular-latin.ttf",
            "default": "/fonts/OpenSans-Regular-extended.ttf"
          }
        }
      ]
    }
  },
  // japanese has no subset yet
  "locale_to_url_keys": { "jp": "japanese" }
}
"#;

const FIREFOX: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0";
const CHROME: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const SAFARI: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15";
const MSIE_8: &str = "Mozilla/4.0 (compatible; MSIE 8.0; Windows NT 6.1; Trident/4.0)";
const MSIE_9: &str = "Mozilla/5.0 (compatible; MSIE 9.0; Windows NT 6.1; Trident/5.0)";
const OPERA: &str = "Opera/9.80 (Windows NT 6.1; U; en) Presto/2.8.131 Version/11.10";

fn registry() -> FontRegistry {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(FONTS_JSON.as_bytes()).unwrap();

    let config = RegistryConfig::from_path(file.path())
        .unwrap()
        .with_url_modifier(|url| format!("/inserted_sha{url}"));
    FontRegistry::with_config(config).unwrap()
}

fn request(ua: &str, locale: &str) -> FontRequest {
    FontRequest::new()
        .client(ua)
        .locale(locale)
        .fonts(["OpenSansRegular"])
}

fn css_for(ua: &str, locale: &str) -> String {
    get_font_css(&registry(), &request(ua, locale)).unwrap()
}

fn formats_for(ua: &str) -> Vec<FormatTag> {
    let resolved = registry().get_font_configs(&request(ua, "en")).unwrap();
    resolved[0].format_tags().cloned().collect()
}

// ============================================================================
// Format selection
// ============================================================================

#[test]
fn test_modern_desktop_browsers_get_local_and_woff() {
    for ua in [FIREFOX, SAFARI, CHROME] {
        let formats = formats_for(ua);
        assert!(formats.contains(&FormatTag::Local), "{ua}");
        assert!(formats.contains(&FormatTag::Woff), "{ua}");
        assert!(!formats.contains(&FormatTag::EmbeddedOpenType), "{ua}");
    }
}

#[test]
fn test_internet_explorer_gets_local_and_eot() {
    assert_eq!(formats_for(MSIE_8), vec![FormatTag::Local, FormatTag::EmbeddedOpenType]);
    assert_eq!(
        formats_for(MSIE_9),
        vec![
            FormatTag::Local,
            FormatTag::EmbeddedOpenType,
            FormatTag::Woff,
            FormatTag::TrueType
        ]
    );
}

#[test]
fn test_presto_opera_gets_local_and_woff() {
    assert_eq!(
        formats_for(OPERA),
        vec![FormatTag::Local, FormatTag::Woff, FormatTag::TrueType]
    );
}

#[test]
fn test_ios_gets_local_and_truetype() {
    assert_eq!(formats_for("iOS"), vec![FormatTag::Local, FormatTag::TrueType]);
    let css = css_for("iOS", "en");
    assert!(css.contains(r#"local("Open Sans")"#));
    assert!(css.contains("/inserted_sha/fonts/OpenSans-Regular-latin.ttf"));
}

// ============================================================================
// Locale subsets
// ============================================================================

#[test]
fn test_en_maps_to_latin() {
    let css = css_for(FIREFOX, "en");
    assert!(css.contains("/inserted_sha/fonts/OpenSans-Regular-latin.woff"));
}

#[test]
fn test_regional_variant_uses_base_language_subset() {
    let css = css_for(FIREFOX, "it-ch");
    assert!(css.contains("/inserted_sha/fonts/OpenSans-Regular-latin.woff"));
}

#[test]
fn test_ru_maps_to_cyrillic() {
    let css = css_for(FIREFOX, "ru");
    assert!(css.contains("/inserted_sha/fonts/OpenSans-Regular-cyrillic.woff"));
}

#[test]
fn test_unknown_language_uses_default_subset() {
    let css = css_for(FIREFOX, "cz");
    assert!(css.contains("/inserted_sha/fonts/OpenSans-Regular-extended.woff"));
}

#[test]
fn test_alias_without_subset_uses_default() {
    let css = css_for(FIREFOX, "jp");
    assert!(css.contains("/inserted_sha/fonts/OpenSans-Regular-extended.woff"));
}

#[test]
fn test_local_source_is_not_rewritten() {
    let css = css_for(MSIE_8, "en");
    assert!(css.contains(r#"local("Open Sans")"#));
    assert!(css.contains(r#"url("/inserted_sha/fonts/OpenSans-Regular.eot") format("embedded-opentype")"#));
    assert!(!css.contains("/inserted_shaOpen Sans"));
}

#[test]
fn test_rule_descriptors() {
    let css = css_for(CHROME, "en");
    assert!(css.starts_with("@font-face {\n"));
    assert!(css.contains("  font-family: \"Open Sans\";\n"));
    assert!(css.contains("  font-style: normal;\n"));
    assert!(css.contains("  font-weight: 400;\n"));

    let local = css.find("local(").unwrap();
    let woff = css.find("format(\"woff\")").unwrap();
    let ttf = css.find("format(\"truetype\")").unwrap();
    assert!(local < woff && woff < ttf);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_not_configured() {
    let registry = registry();
    registry.reset();
    let err = get_font_css(&registry, &request(FIREFOX, "en")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotConfigured);
}

#[test]
fn test_missing_request_fields() {
    let registry = registry();
    let full = request(FIREFOX, "en");

    let mut r = full.clone();
    r.client = None;
    assert_eq!(get_font_css(&registry, &r).unwrap_err().kind(), ErrorKind::MissingField);

    let mut r = full.clone();
    r.locale = None;
    assert_eq!(get_font_css(&registry, &r).unwrap_err().kind(), ErrorKind::MissingField);

    let mut r = full;
    r.fonts = None;
    assert_eq!(get_font_css(&registry, &r).unwrap_err().kind(), ErrorKind::MissingField);
}

#[test]
fn test_unknown_font() {
    let r = FontRequest::new()
        .client(FIREFOX)
        .locale("en")
        .fonts(["UnknownFont"]);
    let err = get_font_css(&registry(), &r).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownFont);
    assert_eq!(err.to_string(), "Unknown font 'UnknownFont'");
}

#[test]
fn test_request_from_json() {
    let r: FontRequest = serde_json::from_str(
        &serde_json::json!({ "ua": FIREFOX, "lang": "ru", "fonts": ["OpenSansRegular"] }).to_string(),
    )
    .unwrap();
    let css = get_font_css_with(&registry(), &r, &FontFaceRenderer).unwrap();
    assert!(css.contains("cyrillic.woff"));
}

#[test]
fn test_resolved_configs_serialize() {
    let resolved: Vec<ResolvedFontConfig> = registry()
        .get_font_configs(&request(MSIE_8, "en"))
        .unwrap();
    let value = serde_json::to_value(&resolved).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{
            "name": "OpenSansRegular",
            "font_family": "Open Sans",
            "font_style": "normal",
            "font_weight": "400",
            "formats": [
                { "type": "local", "url": "Open Sans" },
                { "type": "embedded-opentype", "url": "/inserted_sha/fonts/OpenSans-Regular.eot" }
            ]
        }])
    );
}
