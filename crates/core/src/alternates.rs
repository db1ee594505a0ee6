//! hreflang alternates for a content node.

use crate::locale::{Locale, LocaleSet};
use crate::types::{ContentNode, HOME_SLUG, NodeLocale, TranslatedSlug};
use serde::Serialize;

/// An `<link rel="alternate">` descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlternateLink {
    pub rel: &'static str,
    pub href_lang: Locale,
    pub href: String,
}

/// Collect the node's sibling slugs, one per locale.
///
/// A default-locale node already carries every translation. A translated
/// node gets a synthesized default-locale entry from its
/// `default_full_slug`, followed by the translations other than its own
/// locale. In both cases the home slug becomes the empty path.
pub fn build(locales: &LocaleSet, node: &ContentNode) -> Vec<TranslatedSlug> {
    let mut slugs: Vec<TranslatedSlug> = Vec::with_capacity(node.translated_slugs.len() + 1);

    match node.locale {
        NodeLocale::Default => {
            slugs.extend(node.translated_slugs.iter().cloned());
        }
        NodeLocale::Translated(current) => {
            slugs.push(TranslatedSlug {
                lang: locales.default_locale(),
                name: None,
                path: node.default_full_slug.clone(),
            });
            slugs.extend(
                node.translated_slugs
                    .iter()
                    .filter(|t| t.lang != current)
                    .cloned(),
            );
        }
    }

    let mut seen = Vec::with_capacity(slugs.len());
    slugs.retain(|t| {
        if seen.contains(&t.lang) {
            false
        } else {
            seen.push(t.lang);
            true
        }
    });

    for slug in &mut slugs {
        slug.path = normalize_path(&slug.path);
    }
    slugs
}

/// Turn translated slugs into alternate-link descriptors under `origin`.
pub fn alternate_links(
    locales: &LocaleSet,
    origin: &str,
    slugs: &[TranslatedSlug],
) -> Vec<AlternateLink> {
    slugs
        .iter()
        .map(|t| AlternateLink {
            rel: "alternate",
            href_lang: t.lang,
            href: localized_url(locales, origin, t.lang, &t.path),
        })
        .collect()
}

/// Absolute URL for a locale-relative path: `origin + prefix + "/" + path`
/// with any trailing slash removed.
pub fn localized_url(locales: &LocaleSet, origin: &str, locale: Locale, path: &str) -> String {
    let url = format!(
        "{}{}/{}",
        origin.trim_end_matches('/'),
        locales.prefix(locale),
        path.trim_start_matches('/')
    );
    url.trim_end_matches('/').to_string()
}

/// Canonical URL of a node under `origin`.
pub fn canonical_url(origin: &str, node: &ContentNode) -> String {
    let full_slug = node.canonical_full_slug();
    let path = match full_slug.rsplit_once('/') {
        Some((prefix, HOME_SLUG)) => prefix,
        None if full_slug == HOME_SLUG => "",
        _ => full_slug,
    };
    let url = format!("{}/{}", origin.trim_end_matches('/'), path);
    url.trim_end_matches('/').to_string()
}

fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    if trimmed == HOME_SLUG {
        String::new()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blok::{Blok, Page};

    fn translated(lang: Locale, path: &str) -> TranslatedSlug {
        TranslatedSlug {
            lang,
            name: None,
            path: path.to_string(),
        }
    }

    fn node(
        full_slug: &str,
        default_full_slug: &str,
        locale: NodeLocale,
        translated_slugs: Vec<TranslatedSlug>,
    ) -> ContentNode {
        ContentNode {
            name: "Node".to_string(),
            slug: full_slug.rsplit('/').next().unwrap_or_default().to_string(),
            full_slug: full_slug.to_string(),
            default_full_slug: default_full_slug.to_string(),
            locale,
            translated_slugs,
            content: Blok::Page(Page::default()),
            published_at: None,
        }
    }

    #[test]
    fn test_default_node_keeps_translations() {
        let set = LocaleSet::default();
        let about = node(
            "about",
            "about",
            NodeLocale::Default,
            vec![translated(Locale::Nl, "over-ons")],
        );
        assert_eq!(build(&set, &about), vec![translated(Locale::Nl, "over-ons")]);
    }

    #[test]
    fn test_translated_node_synthesizes_default_entry() {
        let set = LocaleSet::default();
        let over_ons = node(
            "nl/over-ons",
            "about",
            NodeLocale::Translated(Locale::Nl),
            vec![translated(Locale::Nl, "over-ons")],
        );
        assert_eq!(build(&set, &over_ons), vec![translated(Locale::En, "about")]);
    }

    #[test]
    fn test_home_paths_become_root() {
        let set = LocaleSet::default();
        let home = node(
            "home",
            "home",
            NodeLocale::Default,
            vec![translated(Locale::Nl, "home")],
        );
        let slugs = build(&set, &home);
        assert_eq!(slugs, vec![translated(Locale::Nl, "")]);

        let home_nl = node(
            "nl/home",
            "home",
            NodeLocale::Translated(Locale::Nl),
            vec![translated(Locale::Nl, "home")],
        );
        assert_eq!(build(&set, &home_nl), vec![translated(Locale::En, "")]);
    }

    #[test]
    fn test_at_most_one_entry_per_locale() {
        let set = LocaleSet::default();
        let jobs = node(
            "nl/vacatures",
            "jobs",
            NodeLocale::Translated(Locale::Nl),
            vec![translated(Locale::En, "careers"), translated(Locale::Nl, "vacatures")],
        );
        let slugs = build(&set, &jobs);
        assert_eq!(slugs, vec![translated(Locale::En, "jobs")]);
        for locale in Locale::ALL {
            assert!(slugs.iter().filter(|t| t.lang == locale).count() <= 1);
            assert!(slugs.iter().all(|t| t.path != "home"));
        }
    }

    #[test]
    fn test_alternate_links_prefix_non_default() {
        let set = LocaleSet::default();
        let links = alternate_links(
            &set,
            "https://example.com",
            &[translated(Locale::En, "about"), translated(Locale::Nl, "over-ons")],
        );
        assert_eq!(links[0].href, "https://example.com/about");
        assert_eq!(links[0].rel, "alternate");
        assert_eq!(links[1].href, "https://example.com/nl/over-ons");
        assert_eq!(links[1].href_lang, Locale::Nl);
    }

    #[test]
    fn test_alternate_links_strip_trailing_slash() {
        let set = LocaleSet::default();
        let links = alternate_links(
            &set,
            "https://example.com/",
            &[translated(Locale::En, ""), translated(Locale::Nl, "")],
        );
        assert_eq!(links[0].href, "https://example.com");
        assert_eq!(links[1].href, "https://example.com/nl");
    }

    #[test]
    fn test_canonical_url_hides_home() {
        let home = node("home", "home", NodeLocale::Default, vec![]);
        assert_eq!(canonical_url("https://example.com", &home), "https://example.com");

        let home_nl = node("nl/home", "home", NodeLocale::Translated(Locale::Nl), vec![]);
        assert_eq!(
            canonical_url("https://example.com", &home_nl),
            "https://example.com/nl"
        );

        let job = node("vacatures/engineer/", "jobs/engineer", NodeLocale::Default, vec![]);
        assert_eq!(
            canonical_url("https://example.com", &job),
            "https://example.com/vacatures/engineer"
        );
    }
}
