//! CMS delivery API payloads.

use blokfront_core::{Blok, ContentNode, LocaleSet, NodeLocale, TranslatedSlug};
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct StoryResponse {
    pub story: RawStory,
}

#[derive(Debug, Deserialize)]
pub struct StoriesResponse {
    #[serde(default)]
    pub stories: Vec<RawStory>,
}

/// A story as delivered by the CMS.
#[derive(Debug, Clone, Deserialize)]
pub struct RawStory {
    pub name: String,
    pub slug: String,
    pub full_slug: String,
    #[serde(default)]
    pub default_full_slug: Option<String>,
    /// `"default"` or a language code
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub translated_slugs: Option<Vec<RawTranslatedSlug>>,
    pub content: Blok,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTranslatedSlug {
    pub lang: String,
    #[serde(default)]
    pub name: Option<String>,
    pub path: String,
}

impl RawStory {
    /// Convert into a content node. Translations in languages the site does
    /// not serve are dropped.
    pub fn into_node(self, locales: &LocaleSet) -> ContentNode {
        let locale = match self.lang.as_deref() {
            None | Some("default") => NodeLocale::Default,
            Some(lang) => match locales.recognize(lang) {
                Some(l) if locales.is_default(l) => NodeLocale::Default,
                Some(l) => NodeLocale::Translated(l),
                None => {
                    tracing::warn!(lang, slug = %self.full_slug, "story in unserved language");
                    NodeLocale::Default
                }
            },
        };

        let translated_slugs = self
            .translated_slugs
            .unwrap_or_default()
            .into_iter()
            .filter_map(|t| {
                locales.recognize(&t.lang).map(|lang| TranslatedSlug {
                    lang,
                    name: t.name,
                    path: t.path,
                })
            })
            .collect();

        let default_full_slug = self
            .default_full_slug
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| self.full_slug.clone());

        ContentNode {
            name: self.name,
            slug: self.slug,
            full_slug: self.full_slug,
            default_full_slug,
            locale,
            translated_slugs,
            content: self.content,
            published_at: self.published_at,
        }
    }
}
