use crate::locale::{Locale, LocaleSet};
use crate::types::Breadcrumb;

/// Derive the breadcrumb trail for a URL path.
///
/// A leading `/{locale}` segment is the locale root rather than a content
/// step and produces no crumb. Crumb paths keep the locale's URL prefix,
/// which is empty for the default locale. The last crumb is the current
/// page.
pub fn build(locales: &LocaleSet, path: &str, locale: Locale) -> Vec<Breadcrumb> {
    let mut segments: Vec<&str> = path
        .trim_start_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();

    let base = if segments.first() == Some(&locale.as_str()) {
        segments.remove(0);
        locales.prefix(locale)
    } else {
        String::new()
    };

    let mut crumbs = Vec::with_capacity(segments.len());
    let mut current = base;
    for segment in segments {
        current.push('/');
        current.push_str(segment);
        crumbs.push(Breadcrumb {
            path: current.clone(),
            name: unslugify(segment),
        });
    }
    crumbs
}

/// `case-studies` -> `Case Studies`
pub fn unslugify(segment: &str) -> String {
    segment
        .split('-')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crumb(path: &str, name: &str) -> Breadcrumb {
        Breadcrumb {
            path: path.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_locale_root_segment_is_dropped() {
        let set = LocaleSet::default();
        assert_eq!(
            build(&set, "/en/careers/engineer", Locale::En),
            vec![
                crumb("/careers", "Careers"),
                crumb("/careers/engineer", "Engineer"),
            ]
        );
    }

    #[test]
    fn test_default_locale_path_without_prefix() {
        let set = LocaleSet::default();
        assert_eq!(
            build(&set, "/careers/engineer", Locale::En),
            vec![
                crumb("/careers", "Careers"),
                crumb("/careers/engineer", "Engineer"),
            ]
        );
    }

    #[test]
    fn test_non_default_locale_keeps_prefix_in_paths() {
        let set = LocaleSet::default();
        assert_eq!(
            build(&set, "/nl/vacatures/senior-engineer", Locale::Nl),
            vec![
                crumb("/nl/vacatures", "Vacatures"),
                crumb("/nl/vacatures/senior-engineer", "Senior Engineer"),
            ]
        );
    }

    #[test]
    fn test_other_locale_segment_is_content() {
        let set = LocaleSet::default();
        assert_eq!(
            build(&set, "/nl/about", Locale::En),
            vec![crumb("/nl", "Nl"), crumb("/nl/about", "About")]
        );
    }

    #[test]
    fn test_root_has_no_crumbs() {
        let set = LocaleSet::default();
        assert!(build(&set, "/", Locale::En).is_empty());
        assert!(build(&set, "/nl", Locale::Nl).is_empty());
    }

    #[test]
    fn test_unslugify() {
        assert_eq!(unslugify("case-studies"), "Case Studies");
        assert_eq!(unslugify("about"), "About");
        assert_eq!(unslugify("a--b"), "A B");
        assert_eq!(unslugify(""), "");
    }
}
