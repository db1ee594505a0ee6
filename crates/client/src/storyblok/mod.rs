// Storyblok content delivery API client

use crate::wire::{StoriesResponse, StoryResponse};
use crate::{ClientError, ContentStore, Result};
use async_trait::async_trait;
use blokfront_core::config::CmsConfig;
use blokfront_core::{Blok, ContentNode, Locale, LocaleSet};
use reqwest::StatusCode;
use std::time::Duration;

const PER_PAGE: usize = 100;
/// Upper bound on listing pages, so a misbehaving API cannot loop us forever.
const MAX_PAGES: usize = 50;

pub struct StoryblokClient {
    client: reqwest::Client,
    api_base: String,
    token: String,
    vacancies_folder: String,
    locales: LocaleSet,
}

impl StoryblokClient {
    /// Create a client from the `[cms]` configuration. The delivery token is
    /// required.
    pub fn new(cms: &CmsConfig, locales: LocaleSet) -> Result<Self> {
        let token = cms.token.clone().ok_or_else(|| {
            ClientError::Config(
                "CMS token missing: set cms.token or BLOKFRONT_CMS_TOKEN".to_string(),
            )
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cms.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_base: cms.api_base.clone(),
            token,
            vacancies_folder: cms.vacancies_folder.clone(),
            locales,
        })
    }

    fn version(preview: bool) -> &'static str {
        if preview { "draft" } else { "published" }
    }

    /// Path of a story in the delivery API. Stories in other than the
    /// default locale are addressed through their language prefix.
    fn story_path(&self, slug: &str, locale: Locale) -> String {
        let slug = slug.trim_matches('/');
        if self.locales.is_default(locale) {
            format!("{}/stories/{}", self.api_base, slug)
        } else {
            format!("{}/stories/{}/{}", self.api_base, locale, slug)
        }
    }

    async fn list(
        &self,
        starts_with: Option<&str>,
        locale: Locale,
        preview: bool,
    ) -> Result<Vec<ContentNode>> {
        let url = format!("{}/stories", self.api_base);
        let mut nodes = Vec::new();

        for page in 1..=MAX_PAGES {
            let mut query: Vec<(&str, String)> = vec![
                ("token", self.token.clone()),
                ("version", Self::version(preview).to_string()),
                ("per_page", PER_PAGE.to_string()),
                ("page", page.to_string()),
            ];
            if let Some(prefix) = starts_with {
                query.push(("starts_with", format!("{}/", prefix.trim_matches('/'))));
            }
            if !self.locales.is_default(locale) {
                query.push(("language", locale.to_string()));
            }

            let response = self.client.get(&url).query(&query).send().await?;
            if !response.status().is_success() {
                return Err(ClientError::Status {
                    status: response.status().as_u16(),
                    url,
                });
            }
            let body: StoriesResponse = response
                .json()
                .await
                .map_err(|e| ClientError::Decode(e.without_url().to_string()))?;

            let count = body.stories.len();
            nodes.extend(body.stories.into_iter().map(|s| s.into_node(&self.locales)));
            if count < PER_PAGE {
                return Ok(nodes);
            }
        }

        tracing::warn!(url = %url, max_pages = MAX_PAGES, "story listing truncated");
        Ok(nodes)
    }
}

#[async_trait]
impl ContentStore for StoryblokClient {
    async fn story_by_slug(
        &self,
        slug: &str,
        locale: Locale,
        preview: bool,
    ) -> Result<Option<ContentNode>> {
        let url = self.story_path(slug, locale);
        let response = self
            .client
            .get(&url)
            .query(&[("token", self.token.as_str()), ("version", Self::version(preview))])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(slug, %locale, "story not found");
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(ClientError::Status {
                status: response.status().as_u16(),
                url,
            });
        }

        let body: StoryResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.without_url().to_string()))?;
        Ok(Some(body.story.into_node(&self.locales)))
    }

    async fn all_vacancies(&self, locale: Locale, preview: bool) -> Result<Vec<ContentNode>> {
        let nodes = self.list(Some(&self.vacancies_folder), locale, preview).await?;
        Ok(nodes
            .into_iter()
            .filter(|n| matches!(n.content, Blok::Vacancy(_)))
            .collect())
    }

    async fn stories_for_sitemap(&self, locale: Locale) -> Result<Vec<ContentNode>> {
        self.list(None, locale, false).await
    }

    fn vacancies_folder(&self) -> &str {
        &self.vacancies_folder
    }
}
