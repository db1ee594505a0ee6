//! Sitemap aggregation and XML serialization.

use crate::locale::Locale;
use async_trait::async_trait;
use chrono::NaiveDate;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChangeFreq::Always => "always",
            ChangeFreq::Hourly => "hourly",
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
            ChangeFreq::Yearly => "yearly",
            ChangeFreq::Never => "never",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitemapEntry {
    /// Path relative to the site origin, starting with `/`
    pub route: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changefreq: Option<ChangeFreq>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastmod: Option<NaiveDate>,
}

impl SitemapEntry {
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            priority: None,
            changefreq: None,
            lastmod: None,
        }
    }

    pub fn priority(mut self, priority: f32) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn changefreq(mut self, changefreq: ChangeFreq) -> Self {
        self.changefreq = Some(changefreq);
        self
    }

    pub fn lastmod(mut self, lastmod: NaiveDate) -> Self {
        self.lastmod = Some(lastmod);
        self
    }
}

/// A route module's contribution to the sitemap.
///
/// Returning `None` keeps the route out of the sitemap entirely (internal
/// and preview routes). Dynamic routes may fetch content to emit one entry
/// per node.
#[async_trait]
pub trait SitemapSource: Send + Sync {
    type Error: Send;

    async fn entries(&self, locale: Locale) -> Result<Option<Vec<SitemapEntry>>, Self::Error>;
}

/// Gather the entries of every source.
///
/// Sources are awaited concurrently; the result is the concatenation of
/// their entries in source order, without deduplication. The first failing
/// source fails the whole sitemap.
pub async fn build<E: Send>(
    sources: &[&dyn SitemapSource<Error = E>],
    locale: Locale,
) -> Result<Vec<SitemapEntry>, E> {
    let contributions = try_join_all(sources.iter().map(|s| s.entries(locale))).await?;
    Ok(contributions.into_iter().flatten().flatten().collect())
}

/// Serialize entries as a sitemaps.org `urlset`.
pub fn to_xml(origin: &str, entries: &[SitemapEntry]) -> String {
    let origin = origin.trim_end_matches('/');
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        let route = entry.route.trim_end_matches('/');
        xml.push_str("  <url>\n");
        xml.push_str(&format!(
            "    <loc>{}</loc>\n",
            xml_escape(&format!("{}{}", origin, route))
        ));
        if let Some(lastmod) = entry.lastmod {
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", lastmod.format("%Y-%m-%d")));
        }
        if let Some(changefreq) = entry.changefreq {
            xml.push_str(&format!("    <changefreq>{}</changefreq>\n", changefreq));
        }
        if let Some(priority) = entry.priority {
            xml.push_str(&format!("    <priority>{:.1}</priority>\n", priority));
        }
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
