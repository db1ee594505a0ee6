//! HTTP surface of the site.

mod error;
mod forms;
mod pages;
pub mod sitemap;

use axum::{
    Router,
    routing::{get, post},
};
use blokfront_client::{ContentStore, CrmSink, SpamChecker};
use blokfront_core::SiteConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<SiteConfig>,
    pub store: Arc<dyn ContentStore>,
    /// `None` when no `[forms]` section is configured
    pub forms: Option<Arc<FormsBackend>>,
}

pub struct FormsBackend {
    pub spam: Box<dyn SpamChecker>,
    pub crm: Box<dyn CrmSink>,
}

pub fn router(state: AppState, assets: Option<PathBuf>) -> Router {
    let mut app = Router::new()
        .route("/sitemap.xml", get(sitemap::sitemap_xml))
        .route("/robots.txt", get(sitemap::robots_txt))
        .route("/api/contact", post(forms::contact))
        .route("/api/apply", post(forms::apply))
        .route("/", get(pages::page))
        .route("/{*path}", get(pages::page));

    if let Some(dir) = assets {
        app = app.nest_service("/assets", ServeDir::new(dir));
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use blokfront_client::{FixtureStore, RawStory};
    use blokfront_core::parse_site_toml_str;
    use serde_json::json;

    pub const SITE_TOML: &str = r#"
[site]
name = "Studio"
origin = "https://studio.example"

[locales]
default = "en"
supported = ["en", "nl"]

[[sitemap.routes]]
route = "/contact"
priority = 0.5
changefreq = "monthly"
"#;

    pub fn stories() -> Vec<RawStory> {
        serde_json::from_value(json!([
            {
                "name": "Home",
                "slug": "home",
                "full_slug": "home",
                "lang": "default",
                "translated_slugs": [{ "lang": "nl", "path": "home" }],
                "published_at": "2025-02-01T09:00:00Z",
                "content": {
                    "component": "page",
                    "metatags": { "title": "Welcome", "description": "We build products" },
                    "body": [
                        { "component": "hero", "title": "We build digital products" },
                        { "component": "vacancies", "title": "Open roles" },
                        { "component": "countdown" }
                    ]
                }
            },
            {
                "name": "Home",
                "slug": "home",
                "full_slug": "nl/home",
                "default_full_slug": "home",
                "lang": "nl",
                "content": {
                    "component": "page",
                    "body": [{ "component": "hero", "title": "Wij bouwen digitale producten" }]
                }
            },
            {
                "name": "About",
                "slug": "about",
                "full_slug": "about",
                "lang": "default",
                "translated_slugs": [{ "lang": "nl", "name": "Over ons", "path": "over-ons" }],
                "content": {
                    "component": "page",
                    "body": [{ "component": "text", "body": "About **us**" }]
                }
            },
            {
                "name": "Over ons",
                "slug": "over-ons",
                "full_slug": "nl/over-ons",
                "default_full_slug": "about",
                "lang": "nl",
                "translated_slugs": [{ "lang": "nl", "name": "Over ons", "path": "over-ons" }],
                "content": {
                    "component": "page",
                    "body": [{ "component": "text", "body": "Over **ons**" }]
                }
            },
            {
                "name": "Engineer",
                "slug": "engineer",
                "full_slug": "vacatures/engineer",
                "lang": "default",
                "published_at": "2025-03-01T10:00:00Z",
                "content": {
                    "component": "vacancy",
                    "title": "Senior Engineer",
                    "location": "Amsterdam",
                    "body": "Join us."
                }
            }
        ]))
        .unwrap()
    }

    pub fn config() -> SiteConfig {
        parse_site_toml_str(SITE_TOML).unwrap()
    }

    pub fn state_with(store: Arc<dyn ContentStore>, forms: Option<FormsBackend>) -> AppState {
        AppState {
            config: Arc::new(config()),
            store,
            forms: forms.map(Arc::new),
        }
    }

    pub fn fixture_state(forms: Option<FormsBackend>) -> AppState {
        let config = config();
        let store = FixtureStore::new(
            config.locales.clone(),
            &config.cms.vacancies_folder,
            stories(),
        );
        state_with(Arc::new(store), forms)
    }

    pub async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }
}
