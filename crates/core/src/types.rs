use crate::blok::Blok;
use crate::locale::Locale;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Slug the CMS uses for the home page. It is never part of a public URL.
pub const HOME_SLUG: &str = "home";

/// Locale a content node was delivered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeLocale {
    /// The CMS default language, served without a path prefix.
    Default,
    Translated(Locale),
}

/// A CMS story: one page or entity with its nested content tree.
#[derive(Debug, Clone)]
pub struct ContentNode {
    pub name: String,
    /// Locale-specific last path segment
    pub slug: String,
    /// Full path including folder prefixes, e.g. `vacatures/engineer` or
    /// `nl/vacatures/engineer` for a translated node
    pub full_slug: String,
    /// The equivalent full slug in the default locale
    pub default_full_slug: String,
    pub locale: NodeLocale,
    pub translated_slugs: Vec<TranslatedSlug>,
    pub content: Blok,
    pub published_at: Option<DateTime<Utc>>,
}

impl ContentNode {
    pub fn is_home(&self) -> bool {
        self.slug == HOME_SLUG
    }

    /// `full_slug` without the trailing slash folders carry.
    pub fn canonical_full_slug(&self) -> &str {
        self.full_slug.trim_end_matches('/')
    }
}

/// A sibling story's slug in another locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatedSlug {
    pub lang: Locale,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub path: String,
    pub name: String,
}

/// A CMS asset reference (images, documents).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Asset {
    pub filename: String,
    pub alt: Option<String>,
    pub title: Option<String>,
}

impl Asset {
    pub fn is_empty(&self) -> bool {
        self.filename.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    #[default]
    Story,
    Url,
    Email,
    Asset,
}

/// A CMS multilink field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    pub linktype: LinkType,
    pub cached_url: String,
    pub url: String,
    pub email: String,
    pub target: Option<String>,
}

/// SEO fields authored per page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metatags {
    pub title: String,
    pub description: String,
    pub og_image: String,
}

/// Listing entry for a job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacancySummary {
    pub title: String,
    pub href: String,
    pub location: Option<String>,
    pub hours: Option<String>,
}

impl VacancySummary {
    /// Listing entry for a job posting node. Nodes that are not job
    /// postings yield `None`.
    pub fn from_node(node: &ContentNode) -> Option<Self> {
        let Blok::Vacancy(vacancy) = &node.content else {
            return None;
        };
        let title = if vacancy.title.trim().is_empty() {
            node.name.clone()
        } else {
            vacancy.title.clone()
        };
        Some(VacancySummary {
            title,
            href: format!("/{}", node.canonical_full_slug()),
            location: vacancy.location.clone().filter(|l| !l.is_empty()),
            hours: vacancy.hours.clone().filter(|h| !h.is_empty()),
        })
    }
}
