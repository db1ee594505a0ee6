//! Content store backed by JSON files on disk, for offline development and
//! tests.

use crate::wire::RawStory;
use crate::{ClientError, ContentStore, Result};
use async_trait::async_trait;
use blokfront_core::{Blok, ContentNode, Locale, LocaleSet, NodeLocale};
use serde_json::Value;
use std::fs;
use std::path::Path;

pub struct FixtureStore {
    locales: LocaleSet,
    vacancies_folder: String,
    nodes: Vec<ContentNode>,
}

impl FixtureStore {
    pub fn new(locales: LocaleSet, vacancies_folder: &str, stories: Vec<RawStory>) -> Self {
        let nodes = stories.into_iter().map(|s| s.into_node(&locales)).collect();
        Self {
            locales,
            vacancies_folder: vacancies_folder.trim_matches('/').to_string(),
            nodes,
        }
    }

    /// Load every `*.json` file in `dir`. A file holds either one story or
    /// an array of stories, in delivery API shape.
    pub fn from_dir(dir: &Path, locales: LocaleSet, vacancies_folder: &str) -> Result<Self> {
        let mut paths: Vec<_> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        let mut stories = Vec::new();
        for path in paths {
            let content = fs::read_to_string(&path)?;
            let value: Value = serde_json::from_str(&content)
                .map_err(|e| ClientError::Decode(format!("{}: {}", path.display(), e)))?;
            let parsed = match value {
                Value::Array(_) => serde_json::from_value::<Vec<RawStory>>(value),
                other => serde_json::from_value::<RawStory>(other).map(|s| vec![s]),
            };
            stories.extend(
                parsed.map_err(|e| ClientError::Decode(format!("{}: {}", path.display(), e)))?,
            );
        }

        tracing::info!(dir = %dir.display(), stories = stories.len(), "loaded fixture stories");
        Ok(Self::new(locales, vacancies_folder, stories))
    }

    fn in_locale(&self, locale: Locale) -> impl Iterator<Item = &ContentNode> {
        let is_default = self.locales.is_default(locale);
        self.nodes.iter().filter(move |n| match n.locale {
            NodeLocale::Default => is_default,
            NodeLocale::Translated(l) => !is_default && l == locale,
        })
    }

    /// Full slug with the locale segment removed.
    fn unprefixed<'a>(&self, node: &'a ContentNode) -> &'a str {
        let full_slug = node.canonical_full_slug();
        match node.locale {
            NodeLocale::Translated(l) => full_slug
                .strip_prefix(l.as_str())
                .and_then(|rest| rest.strip_prefix('/'))
                .unwrap_or(full_slug),
            NodeLocale::Default => full_slug,
        }
    }
}

#[async_trait]
impl ContentStore for FixtureStore {
    async fn story_by_slug(
        &self,
        slug: &str,
        locale: Locale,
        _preview: bool,
    ) -> Result<Option<ContentNode>> {
        let slug = slug.trim_matches('/');
        Ok(self
            .in_locale(locale)
            .find(|n| self.unprefixed(n) == slug || n.default_full_slug.trim_end_matches('/') == slug)
            .cloned())
    }

    async fn all_vacancies(&self, locale: Locale, _preview: bool) -> Result<Vec<ContentNode>> {
        let folder = format!("{}/", self.vacancies_folder);
        Ok(self
            .in_locale(locale)
            .filter(|n| matches!(n.content, Blok::Vacancy(_)))
            .filter(|n| {
                self.unprefixed(n).starts_with(&folder)
                    || n.default_full_slug.starts_with(&folder)
            })
            .cloned()
            .collect())
    }

    async fn stories_for_sitemap(&self, locale: Locale) -> Result<Vec<ContentNode>> {
        Ok(self.in_locale(locale).cloned().collect())
    }

    fn vacancies_folder(&self) -> &str {
        &self.vacancies_folder
    }
}
