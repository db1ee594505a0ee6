//! Canonical-URL enforcement for resolved content.

use crate::locale::{Locale, LocaleSet};
use crate::slug::decode_path;
use crate::types::{ContentNode, HOME_SLUG};

/// What to do with a request once its content lookup has completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// No content exists for the resolved slug.
    NotFound,
    /// The request must be redirected before anything is rendered.
    Redirect(String),
    /// Render the content node as requested.
    Render,
}

/// Decide between not-found, redirect and render.
///
/// Rules, first match wins:
/// 1. a request path containing `home` (outside preview) redirects to the
///    locale root; the home story is addressed by that slug internally and
///    must never be reachable by URL, whether or not it was found
/// 2. a missing node is not found
/// 3. a translated node outside the default locale is only served at its
///    own full slug; any other path redirects there
/// 4. everything else renders
///
/// `request_path` is the path as received, still percent-encoded.
pub fn decide(
    locales: &LocaleSet,
    node: Option<&ContentNode>,
    request_path: &str,
    locale: Locale,
    preview: bool,
) -> Decision {
    let requested = decode_path(request_path);
    if !preview && requested.contains(HOME_SLUG) {
        return Decision::Redirect(locale_root(locales, locale));
    }

    let Some(node) = node else {
        return Decision::NotFound;
    };

    let canonical = format!("/{}", node.canonical_full_slug());
    if !node.is_home() && !locales.is_default(locale) && normalize(&requested) != canonical {
        return Decision::Redirect(canonical);
    }

    Decision::Render
}

/// `/` for the default locale, `/{locale}` otherwise.
pub fn locale_root(locales: &LocaleSet, locale: Locale) -> String {
    let prefix = locales.prefix(locale);
    if prefix.is_empty() {
        "/".to_string()
    } else {
        prefix
    }
}

fn normalize(path: &str) -> &str {
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blok::{Blok, Page};
    use crate::types::NodeLocale;

    fn node(slug: &str, full_slug: &str, locale: NodeLocale) -> ContentNode {
        ContentNode {
            name: slug.to_string(),
            slug: slug.to_string(),
            full_slug: full_slug.to_string(),
            default_full_slug: full_slug.to_string(),
            locale,
            translated_slugs: vec![],
            content: Blok::Page(Page::default()),
            published_at: None,
        }
    }

    #[test]
    fn test_missing_node_is_not_found() {
        let set = LocaleSet::default();
        assert_eq!(
            decide(&set, None, "/about", Locale::En, false),
            Decision::NotFound
        );
    }

    #[test]
    fn test_home_in_path_redirects_to_locale_root() {
        let set = LocaleSet::default();
        let home = node("home", "home", NodeLocale::Default);
        assert_eq!(
            decide(&set, Some(&home), "/home", Locale::En, false),
            Decision::Redirect("/".to_string())
        );

        let home_nl = node("home", "nl/home", NodeLocale::Translated(Locale::Nl));
        assert_eq!(
            decide(&set, Some(&home_nl), "/nl/home", Locale::Nl, false),
            Decision::Redirect("/nl".to_string())
        );
    }

    #[test]
    fn test_home_redirect_applies_without_node() {
        let set = LocaleSet::default();
        assert_eq!(
            decide(&set, None, "/nl/home/extra", Locale::Nl, false),
            Decision::Redirect("/nl".to_string())
        );
    }

    #[test]
    fn test_preview_skips_home_redirect() {
        let set = LocaleSet::default();
        let home = node("home", "home", NodeLocale::Default);
        assert_eq!(
            decide(&set, Some(&home), "/home", Locale::En, true),
            Decision::Render
        );
    }

    #[test]
    fn test_default_locale_renders() {
        let set = LocaleSet::default();
        let about = node("about", "about", NodeLocale::Default);
        assert_eq!(
            decide(&set, Some(&about), "/about", Locale::En, false),
            Decision::Render
        );
    }

    #[test]
    fn test_translated_node_at_default_slug_redirects() {
        let set = LocaleSet::default();
        let about = node("over-ons", "nl/over-ons", NodeLocale::Translated(Locale::Nl));
        assert_eq!(
            decide(&set, Some(&about), "/nl/about", Locale::Nl, false),
            Decision::Redirect("/nl/over-ons".to_string())
        );
    }

    #[test]
    fn test_translated_node_at_canonical_path_renders() {
        let set = LocaleSet::default();
        let about = node("over-ons", "nl/over-ons", NodeLocale::Translated(Locale::Nl));
        assert_eq!(
            decide(&set, Some(&about), "/nl/over-ons", Locale::Nl, false),
            Decision::Render
        );
        assert_eq!(
            decide(&set, Some(&about), "/nl/over-ons/", Locale::Nl, false),
            Decision::Render
        );
    }

    #[test]
    fn test_translated_home_at_locale_root_renders() {
        let set = LocaleSet::default();
        let home = node("home", "nl/home", NodeLocale::Translated(Locale::Nl));
        assert_eq!(
            decide(&set, Some(&home), "/nl", Locale::Nl, false),
            Decision::Render
        );
    }

    #[test]
    fn test_folder_full_slug_trailing_slash_is_ignored() {
        let set = LocaleSet::default();
        let folder = node("vacatures", "nl/vacatures/", NodeLocale::Translated(Locale::Nl));
        assert_eq!(
            decide(&set, Some(&folder), "/nl/jobs", Locale::Nl, false),
            Decision::Redirect("/nl/vacatures".to_string())
        );
    }

    #[test]
    fn test_encoded_request_path_matches_translated_slug() {
        let set = LocaleSet::default();
        let cafe = node("café", "nl/café", NodeLocale::Translated(Locale::Nl));
        assert_eq!(
            decide(&set, Some(&cafe), "/nl/caf%C3%A9", Locale::Nl, false),
            Decision::Render
        );
        assert_eq!(
            decide(&set, Some(&cafe), "/nl/cafe", Locale::Nl, false),
            Decision::Redirect("/nl/café".to_string())
        );
        assert_eq!(
            decide(&set, None, "/h%6Fme", Locale::En, false),
            Decision::Redirect("/".to_string())
        );
    }
}
