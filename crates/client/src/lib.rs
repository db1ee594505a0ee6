// Outbound collaborators: the headless CMS, the spam check and the CRM

pub mod fixtures;
pub mod forms;
pub mod storyblok;
pub mod wire;

use async_trait::async_trait;
use blokfront_core::{ContentNode, Locale};
use thiserror::Error;

pub use fixtures::FixtureStore;
pub use forms::{CrmSink, ForwardOutcome, HttpCrmSink, HttpSpamChecker, SpamChecker, forward};
pub use storyblok::StoryblokClient;
pub use wire::RawStory;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),

    #[error("{url} returned {status}")]
    Status { status: u16, url: String },

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

// Request URLs carry the delivery token in their query string, so it is
// stripped before the error can reach a log line.
impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Http(err.without_url())
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

/// Read access to CMS stories.
///
/// Every call is a live read; nothing is cached between requests.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Fetch one story by its slug in `locale`. `Ok(None)` when the CMS has
    /// no such story.
    async fn story_by_slug(
        &self,
        slug: &str,
        locale: Locale,
        preview: bool,
    ) -> Result<Option<ContentNode>>;

    /// All job postings in `locale`.
    async fn all_vacancies(&self, locale: Locale, preview: bool) -> Result<Vec<ContentNode>>;

    /// Every published story in `locale`, for the sitemap.
    async fn stories_for_sitemap(&self, locale: Locale) -> Result<Vec<ContentNode>>;

    /// Folder job postings live in.
    fn vacancies_folder(&self) -> &str;

    /// Fetch a job posting by its slug within the vacancies folder.
    async fn vacancy_by_slug(
        &self,
        slug: &str,
        locale: Locale,
        preview: bool,
    ) -> Result<Option<ContentNode>> {
        let full_slug = format!("{}/{}", self.vacancies_folder(), slug.trim_matches('/'));
        let node = self.story_by_slug(&full_slug, locale, preview).await?;
        Ok(node.filter(|n| matches!(n.content, blokfront_core::Blok::Vacancy(_))))
    }
}
