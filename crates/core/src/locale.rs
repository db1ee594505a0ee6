use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Languages the site is published in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Nl,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Nl];

    pub fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Nl => "nl",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Locale::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| Error::InvalidData(format!("Unknown locale '{}'", s)))
    }
}

/// The locales a deployment serves, with one distinguished default.
///
/// Default-locale URLs carry no prefix (`/about`), every other locale is
/// served under `/{locale}/...`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleSet {
    default: Locale,
    supported: Vec<Locale>,
}

impl LocaleSet {
    /// Build a locale set. The default locale is always part of the set and
    /// duplicates are dropped, keeping first-seen order.
    pub fn new(default: Locale, supported: impl IntoIterator<Item = Locale>) -> Self {
        let mut list = vec![default];
        for locale in supported {
            if !list.contains(&locale) {
                list.push(locale);
            }
        }
        Self {
            default,
            supported: list,
        }
    }

    pub fn default_locale(&self) -> Locale {
        self.default
    }

    pub fn supported(&self) -> &[Locale] {
        &self.supported
    }

    pub fn is_default(&self, locale: Locale) -> bool {
        locale == self.default
    }

    /// Interpret a path segment as a locale, if it names one of the
    /// supported locales. Locale-looking tokens outside the set are not
    /// locales.
    pub fn recognize(&self, token: &str) -> Option<Locale> {
        self.supported.iter().copied().find(|l| l.as_str() == token)
    }

    /// URL prefix for a locale: empty for the default locale, `/{locale}`
    /// otherwise.
    pub fn prefix(&self, locale: Locale) -> String {
        if self.is_default(locale) {
            String::new()
        } else {
            format!("/{}", locale)
        }
    }

    /// Locale established for a request before any route parameters are
    /// looked at: the first path segment when it is a supported locale,
    /// the default locale otherwise.
    pub fn detect_from_path(&self, path: &str) -> Locale {
        path.split('/')
            .find(|s| !s.is_empty())
            .and_then(|first| self.recognize(first))
            .unwrap_or(self.default)
    }
}

impl Default for LocaleSet {
    fn default() -> Self {
        LocaleSet::new(Locale::En, Locale::ALL)
    }
}
