//! `/sitemap.xml` and `/robots.txt`.

use super::AppState;
use async_trait::async_trait;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use blokfront_client::{ClientError, ContentStore};
use blokfront_core::sitemap::{self, ChangeFreq, SitemapEntry, SitemapSource};
use blokfront_core::{Blok, ContentNode, Locale, LocaleSet, SiteConfig, alternates};

/// Routes listed in `[sitemap]`, repeated under each locale's prefix.
struct StaticRoutes<'a> {
    routes: &'a [SitemapEntry],
    locales: &'a LocaleSet,
}

#[async_trait]
impl SitemapSource for StaticRoutes<'_> {
    type Error = ClientError;

    async fn entries(&self, locale: Locale) -> Result<Option<Vec<SitemapEntry>>, ClientError> {
        let prefix = self.locales.prefix(locale);
        Ok(Some(
            self.routes
                .iter()
                .map(|entry| {
                    let route = format!("{}{}", prefix, entry.route);
                    SitemapEntry {
                        route: normalize_route(&route),
                        ..entry.clone()
                    }
                })
                .collect(),
        ))
    }
}

/// Every CMS page except job postings.
struct Stories<'a> {
    store: &'a dyn ContentStore,
}

#[async_trait]
impl SitemapSource for Stories<'_> {
    type Error = ClientError;

    async fn entries(&self, locale: Locale) -> Result<Option<Vec<SitemapEntry>>, ClientError> {
        let nodes = self.store.stories_for_sitemap(locale).await?;
        Ok(Some(
            nodes
                .iter()
                .filter(|n| !matches!(n.content, Blok::Vacancy(_)))
                .map(|n| {
                    let entry = node_entry(n);
                    if n.is_home() {
                        entry.priority(1.0).changefreq(ChangeFreq::Weekly)
                    } else {
                        entry
                    }
                })
                .collect(),
        ))
    }
}

/// One entry per open job posting.
struct Vacancies<'a> {
    store: &'a dyn ContentStore,
}

#[async_trait]
impl SitemapSource for Vacancies<'_> {
    type Error = ClientError;

    async fn entries(&self, locale: Locale) -> Result<Option<Vec<SitemapEntry>>, ClientError> {
        let nodes = self.store.all_vacancies(locale, false).await?;
        Ok(Some(
            nodes
                .iter()
                .map(|n| node_entry(n).priority(0.8).changefreq(ChangeFreq::Weekly))
                .collect(),
        ))
    }
}

fn node_entry(node: &ContentNode) -> SitemapEntry {
    let route = normalize_route(&alternates::canonical_url("", node));
    let entry = SitemapEntry::new(route);
    match node.published_at {
        Some(published) => entry.lastmod(published.date_naive()),
        None => entry,
    }
}

fn normalize_route(route: &str) -> String {
    let trimmed = route.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Sitemap XML covering every supported locale.
pub async fn build_xml(config: &SiteConfig, store: &dyn ContentStore) -> Result<String, ClientError> {
    let statics = StaticRoutes {
        routes: &config.sitemap_routes,
        locales: &config.locales,
    };
    let stories = Stories { store };
    let vacancies = Vacancies { store };
    let sources: [&dyn SitemapSource<Error = ClientError>; 3] = [&statics, &stories, &vacancies];

    let mut entries = Vec::new();
    for &locale in config.locales.supported() {
        entries.extend(sitemap::build(&sources, locale).await?);
    }
    Ok(sitemap::to_xml(&config.site.origin, &entries))
}

pub async fn sitemap_xml(State(state): State<AppState>) -> Response {
    match build_xml(&state.config, state.store.as_ref()).await {
        Ok(xml) => {
            tracing::debug!(bytes = xml.len(), "sitemap built");
            (
                [
                    (header::CONTENT_TYPE, "application/xml".to_string()),
                    (header::CONTENT_LENGTH, xml.len().to_string()),
                ],
                xml,
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "sitemap build failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "sitemap unavailable").into_response()
        }
    }
}

pub async fn robots_txt(State(state): State<AppState>) -> impl IntoResponse {
    let config = &state.config;
    let rules = if config.server.preview {
        "Disallow: /"
    } else {
        "Allow: /"
    };
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        format!(
            "User-agent: *\n{}\n\nSitemap: {}/sitemap.xml\n",
            rules, config.site.origin
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::super::router;
    use super::super::test_support::{body_string, config, fixture_state, stories};
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use blokfront_client::FixtureStore;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_build_xml_covers_all_locales() {
        let config = config();
        let store = FixtureStore::new(config.locales.clone(), "vacatures", stories());
        let xml = build_xml(&config, &store).await.unwrap();

        assert!(xml.contains("<loc>https://studio.example/contact</loc>"));
        assert!(xml.contains("<loc>https://studio.example/nl/contact</loc>"));
        assert!(xml.contains("<loc>https://studio.example</loc>"));
        assert!(xml.contains("<loc>https://studio.example/about</loc>"));
        assert!(xml.contains("<loc>https://studio.example/nl</loc>"));
        assert!(xml.contains("<loc>https://studio.example/nl/over-ons</loc>"));
        assert!(xml.contains("<loc>https://studio.example/vacatures/engineer</loc>"));
        assert!(xml.contains("<lastmod>2025-03-01</lastmod>"));
        // the job posting comes from the vacancies source only
        assert_eq!(xml.matches("vacatures/engineer").count(), 1);
    }

    #[tokio::test]
    async fn test_sitemap_route_headers() {
        let response = router(fixture_state(None), None)
            .oneshot(Request::builder().uri("/sitemap.xml").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/xml");
        let length: usize = response.headers()[header::CONTENT_LENGTH]
            .to_str()
            .unwrap()
            .parse()
            .unwrap();

        let body = body_string(response).await;
        assert_eq!(body.len(), length);
        assert!(body.contains("<urlset"));
    }

    #[tokio::test]
    async fn test_robots_txt_points_at_sitemap() {
        let response = router(fixture_state(None), None)
            .oneshot(Request::builder().uri("/robots.txt").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_string(response).await;
        assert!(body.contains("Allow: /"));
        assert!(body.contains("Sitemap: https://studio.example/sitemap.xml"));
    }
}
