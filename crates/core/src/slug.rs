//! Request path to CMS slug resolution.

use crate::locale::{Locale, LocaleSet};
use crate::types::HOME_SLUG;

/// Parameters of the catch-all page route `/:lang?/*slug`.
///
/// `lang` is only the first path segment. Whether it actually names a
/// locale is decided by [`resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    pub lang: Option<String>,
    pub slug: Option<String>,
}

impl RouteParams {
    /// Split a request path into the route's parameters. Empty segments
    /// (double or trailing slashes) are ignored.
    pub fn from_path(path: &str) -> Self {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let lang = segments.next().map(str::to_string);
        let rest: Vec<&str> = segments.collect();
        let slug = if rest.is_empty() {
            None
        } else {
            Some(rest.join("/"))
        };
        Self { lang, slug }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSlug {
    pub locale: Locale,
    pub slug: String,
}

/// Determine the locale and CMS slug for a request.
///
/// `current` is the locale already established for the request by
/// upstream detection; it applies whenever the route's `lang` parameter
/// is not one of the supported locales. A `lang` segment that is not a
/// locale is the first segment of the slug. An empty path, or a path that
/// consists of only the locale segment, resolves to the home slug.
pub fn resolve(locales: &LocaleSet, params: &RouteParams, current: Locale) -> ResolvedSlug {
    let lang = params.lang.as_deref().map(trim_slashes).filter(|s| !s.is_empty());
    let slug = params.slug.as_deref().map(trim_slashes).filter(|s| !s.is_empty());

    let lang_locale = lang.and_then(|l| locales.recognize(l));
    let locale = lang_locale.unwrap_or(current);

    let slug_prefix = match (lang, slug, lang_locale) {
        (Some(lang), Some(_), None) => format!("{}/", lang),
        _ => String::new(),
    };

    let base = match (slug, lang) {
        (Some(slug), _) => slug.to_string(),
        (None, None) => HOME_SLUG.to_string(),
        (None, Some(_)) if lang_locale == Some(locale) => HOME_SLUG.to_string(),
        (None, Some(lang)) => lang.to_string(),
    };

    ResolvedSlug {
        locale,
        slug: format!("{}{}", slug_prefix, base),
    }
}

/// Convenience wrapper: extract the route parameters from `path` and
/// resolve them.
pub fn resolve_path(locales: &LocaleSet, path: &str, current: Locale) -> ResolvedSlug {
    resolve(locales, &RouteParams::from_path(path), current)
}

/// Percent-decode a request path. Malformed escapes are kept as-is and
/// invalid UTF-8 is replaced.
pub fn decode_path(path: &str) -> String {
    let bytes = path.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%'
            && i + 2 < bytes.len()
            && let (Some(hi), Some(lo)) = (hex(bytes[i + 1]), hex(bytes[i + 2]))
        {
            out.push((hi << 4) | lo);
            i += 3;
            continue;
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Percent-encode a path for use in a header. `/` and unreserved ASCII
/// pass through.
pub fn encode_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for b in path.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'/' | b'-' | b'_' | b'.' | b'~') {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{:02X}", b));
        }
    }
    out
}

fn hex(b: u8) -> Option<u8> {
    (b as char).to_digit(16).map(|d| d as u8)
}

fn trim_slashes(s: &str) -> &str {
    s.trim_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(lang: Option<&str>, slug: Option<&str>) -> RouteParams {
        RouteParams {
            lang: lang.map(String::from),
            slug: slug.map(String::from),
        }
    }

    #[test]
    fn test_root_resolves_to_home() {
        let set = LocaleSet::default();
        let resolved = resolve(&set, &params(None, None), Locale::En);
        assert_eq!(resolved.slug, "home");
        assert_eq!(resolved.locale, Locale::En);
    }

    #[test]
    fn test_locale_root_resolves_to_home() {
        let set = LocaleSet::default();
        let resolved = resolve_path(&set, "/nl", Locale::Nl);
        assert_eq!(resolved.slug, "home");
        assert_eq!(resolved.locale, Locale::Nl);
    }

    #[test]
    fn test_locale_prefixed_nested_slug() {
        let set = LocaleSet::default();
        let resolved = resolve(
            &set,
            &params(Some("nl"), Some("vacatures/engineer")),
            Locale::Nl,
        );
        assert_eq!(resolved.slug, "vacatures/engineer");
        assert_eq!(resolved.locale, Locale::Nl);
    }

    #[test]
    fn test_single_segment_without_locale() {
        let set = LocaleSet::default();
        let resolved = resolve_path(&set, "/about", Locale::En);
        assert_eq!(resolved.slug, "about");
        assert_eq!(resolved.locale, Locale::En);
    }

    #[test]
    fn test_non_locale_first_segment_becomes_slug_prefix() {
        let set = LocaleSet::default();
        let resolved = resolve_path(&set, "/careers/backend/engineer", Locale::En);
        assert_eq!(resolved.slug, "careers/backend/engineer");
        assert_eq!(resolved.locale, Locale::En);
    }

    #[test]
    fn test_unsupported_locale_token_is_part_of_slug() {
        // "nl" is locale-shaped but not served by this set
        let set = LocaleSet::new(Locale::En, []);
        let resolved = resolve_path(&set, "/nl/about", Locale::En);
        assert_eq!(resolved.slug, "nl/about");
        assert_eq!(resolved.locale, Locale::En);

        let resolved = resolve_path(&set, "/de", Locale::En);
        assert_eq!(resolved.slug, "de");
    }

    #[test]
    fn test_lang_param_overrides_current_locale() {
        let set = LocaleSet::default();
        let resolved = resolve_path(&set, "/nl/over-ons", Locale::En);
        assert_eq!(resolved.locale, Locale::Nl);
        assert_eq!(resolved.slug, "over-ons");
    }

    #[test]
    fn test_route_params_from_path() {
        assert_eq!(RouteParams::from_path("/"), params(None, None));
        assert_eq!(RouteParams::from_path(""), params(None, None));
        assert_eq!(RouteParams::from_path("/about/"), params(Some("about"), None));
        assert_eq!(
            RouteParams::from_path("//nl//vacatures/engineer/"),
            params(Some("nl"), Some("vacatures/engineer"))
        );
    }

    #[test]
    fn test_decode_path() {
        assert_eq!(decode_path("/nl/caf%C3%A9"), "/nl/café");
        assert_eq!(decode_path("/a%20b"), "/a b");
        assert_eq!(decode_path("/100%"), "/100%");
        assert_eq!(decode_path("/%zz/x"), "/%zz/x");
        assert_eq!(decode_path("/plain"), "/plain");
    }

    #[test]
    fn test_encode_path() {
        assert_eq!(encode_path("/nl/café"), "/nl/caf%C3%A9");
        assert_eq!(encode_path("/nl/over-ons"), "/nl/over-ons");
        assert_eq!(decode_path(&encode_path("/a b/ü")), "/a b/ü");
    }
}
