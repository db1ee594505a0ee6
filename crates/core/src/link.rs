use crate::locale::{Locale, LocaleSet};
use crate::types::{HOME_SLUG, Link, LinkType};

/// Resolve a CMS multilink to an href for a page rendered in `locale`.
///
/// Story links are rewritten into the active locale's URL space: any
/// locale segment the CMS put in front is replaced by the locale prefix,
/// the home slug becomes the locale root and trailing slashes go away.
/// Returns `None` for links with nothing to point at.
pub fn resolve(locales: &LocaleSet, link: &Link, locale: Locale) -> Option<String> {
    match link.linktype {
        LinkType::Story => {
            let target = if link.cached_url.is_empty() {
                &link.url
            } else {
                &link.cached_url
            };
            if target.trim().is_empty() {
                return None;
            }
            Some(story_href(locales, target, locale))
        }
        LinkType::Url | LinkType::Asset => {
            let target = if link.url.is_empty() {
                &link.cached_url
            } else {
                &link.url
            };
            non_empty(target).map(str::to_string)
        }
        LinkType::Email => {
            let address = if link.email.is_empty() {
                &link.url
            } else {
                &link.email
            };
            non_empty(address).map(|a| {
                if a.starts_with("mailto:") {
                    a.to_string()
                } else {
                    format!("mailto:{}", a)
                }
            })
        }
    }
}

fn story_href(locales: &LocaleSet, cached_url: &str, locale: Locale) -> String {
    let mut segments: Vec<&str> = cached_url.split('/').filter(|s| !s.is_empty()).collect();
    if segments
        .first()
        .is_some_and(|first| locales.recognize(first).is_some())
    {
        segments.remove(0);
    }
    if segments.last() == Some(&HOME_SLUG) {
        segments.pop();
    }

    let href = format!("{}/{}", locales.prefix(locale), segments.join("/"));
    let trimmed = href.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

fn non_empty(s: &str) -> Option<&str> {
    let s = s.trim();
    if s.is_empty() { None } else { Some(s) }
}
