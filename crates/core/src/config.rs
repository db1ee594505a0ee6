use crate::error::{Error, Result};
use crate::locale::{Locale, LocaleSet};
use crate::sitemap::{ChangeFreq, SitemapEntry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const DEFAULT_CMS_API_BASE: &str = "https://api.storyblok.com/v2/cdn";
const DEFAULT_VACANCIES_FOLDER: &str = "vacatures";
const DEFAULT_PORT: u16 = 3000;

/// Raw TOML configuration structure
/// This matches the site.toml file structure exactly
#[derive(Debug, Deserialize)]
struct RawConfig {
    site: RawSite,
    locales: RawLocales,
    #[serde(default)]
    cms: RawCms,
    forms: Option<FormsConfig>,
    #[serde(default)]
    server: RawServer,
    #[serde(default)]
    sitemap: RawSitemap,
    #[serde(default)]
    labels: BTreeMap<String, RawLabels>,
}

#[derive(Debug, Deserialize)]
struct RawSite {
    name: String,
    origin: String,
    theme: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawLocales {
    default: Locale,
    #[serde(default)]
    supported: Vec<Locale>,
}

#[derive(Debug, Default, Deserialize)]
struct RawCms {
    api_base: Option<String>,
    token: Option<String>,
    vacancies_folder: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct RawServer {
    port: Option<u16>,
    #[serde(default)]
    preview: bool,
}

#[derive(Debug, Default, Deserialize)]
struct RawSitemap {
    #[serde(default)]
    routes: Vec<RawSitemapRoute>,
}

#[derive(Debug, Deserialize)]
struct RawSitemapRoute {
    route: String,
    priority: Option<f32>,
    changefreq: Option<ChangeFreq>,
}

#[derive(Debug, Default, Deserialize)]
struct RawLabels {
    not_found_title: Option<String>,
    not_found_description: Option<String>,
    error_title: Option<String>,
    error_description: Option<String>,
    breadcrumb_home: Option<String>,
    vacancies_empty: Option<String>,
}

/// Complete, validated site configuration
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub site: Site,
    pub locales: LocaleSet,
    pub cms: CmsConfig,
    pub forms: Option<FormsConfig>,
    pub server: ServerConfig,
    /// Static routes contributed to the sitemap
    pub sitemap_routes: Vec<SitemapEntry>,
    labels: BTreeMap<Locale, Labels>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Site {
    pub name: String,
    /// Absolute origin without trailing slash, e.g. `https://example.com`
    pub origin: String,
    pub theme: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmsConfig {
    pub api_base: String,
    #[serde(skip_serializing)]
    pub token: Option<String>,
    /// Folder holding job postings
    pub vacancies_folder: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormsConfig {
    pub spam_check_url: String,
    pub crm_url: String,
    #[serde(default, skip_serializing)]
    pub crm_token: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    pub port: u16,
    /// Serve draft content to every request
    pub preview: bool,
}

/// Static texts per locale, used when there is no content node to take
/// them from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Labels {
    pub not_found_title: String,
    pub not_found_description: String,
    pub error_title: String,
    pub error_description: String,
    pub breadcrumb_home: String,
    pub vacancies_empty: String,
}

impl Labels {
    pub fn builtin(locale: Locale) -> Self {
        match locale {
            Locale::En => Labels {
                not_found_title: "Page not found".to_string(),
                not_found_description: "The page you are looking for does not exist.".to_string(),
                error_title: "Something went wrong".to_string(),
                error_description: "We could not load this page. Please try again later."
                    .to_string(),
                breadcrumb_home: "Home".to_string(),
                vacancies_empty: "There are no open positions at the moment.".to_string(),
            },
            Locale::Nl => Labels {
                not_found_title: "Pagina niet gevonden".to_string(),
                not_found_description: "De pagina die je zoekt bestaat niet.".to_string(),
                error_title: "Er ging iets mis".to_string(),
                error_description: "We konden deze pagina niet laden. Probeer het later opnieuw."
                    .to_string(),
                breadcrumb_home: "Home".to_string(),
                vacancies_empty: "Er zijn op dit moment geen openstaande vacatures.".to_string(),
            },
        }
    }

    fn merge(locale: Locale, raw: RawLabels) -> Self {
        let base = Labels::builtin(locale);
        Labels {
            not_found_title: raw.not_found_title.unwrap_or(base.not_found_title),
            not_found_description: raw
                .not_found_description
                .unwrap_or(base.not_found_description),
            error_title: raw.error_title.unwrap_or(base.error_title),
            error_description: raw.error_description.unwrap_or(base.error_description),
            breadcrumb_home: raw.breadcrumb_home.unwrap_or(base.breadcrumb_home),
            vacancies_empty: raw.vacancies_empty.unwrap_or(base.vacancies_empty),
        }
    }
}

impl SiteConfig {
    /// Labels for a locale, falling back to the built-in texts.
    pub fn labels(&self, locale: Locale) -> Labels {
        self.labels
            .get(&locale)
            .cloned()
            .unwrap_or_else(|| Labels::builtin(locale))
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply `BLOKFRONT_CMS_TOKEN`, `BLOKFRONT_CRM_TOKEN` and
    /// `BLOKFRONT_PORT` from `lookup`.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(token) = lookup("BLOKFRONT_CMS_TOKEN").filter(|t| !t.is_empty()) {
            self.cms.token = Some(token);
        }
        if let Some(token) = lookup("BLOKFRONT_CRM_TOKEN").filter(|t| !t.is_empty())
            && let Some(forms) = self.forms.as_mut()
        {
            forms.crm_token = Some(token);
        }
        if let Some(port) = lookup("BLOKFRONT_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| Error::Config(format!("Invalid BLOKFRONT_PORT '{}'", port)))?;
        }
        Ok(self)
    }
}

/// Parse site.toml from a file path
pub fn parse_site_toml<P: AsRef<Path>>(path: P) -> Result<SiteConfig> {
    let content = fs::read_to_string(path)?;
    parse_site_toml_str(&content)
}

/// Parse site.toml from a string (useful for testing)
pub fn parse_site_toml_str(content: &str) -> Result<SiteConfig> {
    let raw: RawConfig = toml::from_str(content)?;

    let origin = validate_origin(&raw.site.origin)?;

    if !raw.locales.supported.is_empty() && !raw.locales.supported.contains(&raw.locales.default) {
        return Err(Error::Config(format!(
            "Default locale '{}' is not listed in locales.supported",
            raw.locales.default
        )));
    }
    let locales = LocaleSet::new(raw.locales.default, raw.locales.supported);

    let mut labels = BTreeMap::new();
    for (token, raw_labels) in raw.labels {
        let locale = locales.recognize(&token).ok_or_else(|| {
            Error::Config(format!("Labels given for unsupported locale '{}'", token))
        })?;
        labels.insert(locale, Labels::merge(locale, raw_labels));
    }

    let cms = CmsConfig {
        api_base: raw
            .cms
            .api_base
            .unwrap_or_else(|| DEFAULT_CMS_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string(),
        token: raw.cms.token.filter(|t| !t.is_empty()),
        vacancies_folder: raw
            .cms
            .vacancies_folder
            .unwrap_or_else(|| DEFAULT_VACANCIES_FOLDER.to_string())
            .trim_matches('/')
            .to_string(),
        timeout_secs: raw.cms.timeout_secs.unwrap_or(10),
    };

    let sitemap_routes = raw
        .sitemap
        .routes
        .into_iter()
        .map(|r| {
            if !r.route.starts_with('/') {
                return Err(Error::Config(format!(
                    "Sitemap route '{}' must start with '/'",
                    r.route
                )));
            }
            if let Some(priority) = r.priority
                && !(0.0..=1.0).contains(&priority)
            {
                return Err(Error::Config(format!(
                    "Sitemap priority for '{}' must be between 0.0 and 1.0",
                    r.route
                )));
            }
            Ok(SitemapEntry {
                route: r.route,
                priority: r.priority,
                changefreq: r.changefreq,
                lastmod: None,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(SiteConfig {
        site: Site {
            name: raw.site.name,
            origin,
            theme: raw.site.theme.unwrap_or_else(|| "light".to_string()),
        },
        locales,
        cms,
        forms: raw.forms,
        server: ServerConfig {
            port: raw.server.port.unwrap_or(DEFAULT_PORT),
            preview: raw.server.preview,
        },
        sitemap_routes,
        labels,
    })
}

/// The origin must be an absolute http(s) URL without a path. A trailing
/// slash is dropped.
fn validate_origin(origin: &str) -> Result<String> {
    let trimmed = origin.trim().trim_end_matches('/');
    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .ok_or_else(|| {
            Error::Config(format!(
                "site.origin must start with http:// or https://: '{}'",
                origin
            ))
        })?;
    if rest.is_empty() || rest.contains('/') {
        return Err(Error::Config(format!(
            "site.origin must be a bare origin without a path: '{}'",
            origin
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[site]
name = "Acme"
origin = "https://acme.example/"

[locales]
default = "en"
supported = ["en", "nl"]
"#;

    #[test]
    fn test_parse_minimal_config() {
        let config = parse_site_toml_str(MINIMAL).unwrap();
        assert_eq!(config.site.origin, "https://acme.example");
        assert_eq!(config.site.theme, "light");
        assert_eq!(config.locales.default_locale(), Locale::En);
        assert_eq!(config.locales.supported(), &[Locale::En, Locale::Nl]);
        assert_eq!(config.cms.api_base, DEFAULT_CMS_API_BASE);
        assert_eq!(config.cms.vacancies_folder, "vacatures");
        assert_eq!(config.server.port, 3000);
        assert!(!config.server.preview);
        assert!(config.forms.is_none());
        assert!(config.sitemap_routes.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[site]
name = "Acme"
origin = "https://acme.example"
theme = "dark"

[locales]
default = "nl"
supported = ["nl", "en"]

[cms]
api_base = "https://cms.example/v2/cdn/"
token = "public-token"
vacancies_folder = "/jobs/"
timeout_secs = 3

[forms]
spam_check_url = "https://spam.example/check"
crm_url = "https://crm.example/submissions"

[server]
port = 8080
preview = true

[[sitemap.routes]]
route = "/"
priority = 1.0
changefreq = "daily"

[[sitemap.routes]]
route = "/contact"

[labels.en]
not_found_title = "Lost?"
"#;
        let config = parse_site_toml_str(toml).unwrap();
        assert_eq!(config.locales.default_locale(), Locale::Nl);
        assert_eq!(config.cms.api_base, "https://cms.example/v2/cdn");
        assert_eq!(config.cms.token.as_deref(), Some("public-token"));
        assert_eq!(config.cms.vacancies_folder, "jobs");
        assert_eq!(config.cms.timeout_secs, 3);
        assert_eq!(
            config.forms.as_ref().unwrap().crm_url,
            "https://crm.example/submissions"
        );
        assert_eq!(config.server.port, 8080);
        assert!(config.server.preview);
        assert_eq!(config.sitemap_routes.len(), 2);
        assert_eq!(config.sitemap_routes[0].changefreq, Some(ChangeFreq::Daily));

        let en = config.labels(Locale::En);
        assert_eq!(en.not_found_title, "Lost?");
        assert_eq!(en.error_title, "Something went wrong");
        assert_eq!(config.labels(Locale::Nl), Labels::builtin(Locale::Nl));
    }

    #[test]
    fn test_rejects_default_outside_supported() {
        let toml = r#"
[site]
name = "Acme"
origin = "https://acme.example"

[locales]
default = "nl"
supported = ["en"]
"#;
        let err = parse_site_toml_str(toml).unwrap_err();
        assert!(err.to_string().contains("not listed in locales.supported"));
    }

    #[test]
    fn test_rejects_unknown_locale_token() {
        let toml = r#"
[site]
name = "Acme"
origin = "https://acme.example"

[locales]
default = "de"
"#;
        assert!(parse_site_toml_str(toml).is_err());
    }

    #[test]
    fn test_rejects_labels_for_unsupported_locale() {
        let toml = r#"
[site]
name = "Acme"
origin = "https://acme.example"

[locales]
default = "en"
supported = ["en"]

[labels.nl]
not_found_title = "Weg"
"#;
        let err = parse_site_toml_str(toml).unwrap_err();
        assert!(err.to_string().contains("unsupported locale 'nl'"));
    }

    #[test]
    fn test_validate_origin() {
        assert_eq!(
            validate_origin("https://example.com/").unwrap(),
            "https://example.com"
        );
        assert_eq!(
            validate_origin("http://localhost:3000").unwrap(),
            "http://localhost:3000"
        );
        assert!(validate_origin("example.com").is_err());
        assert!(validate_origin("https://example.com/blog").is_err());
        assert!(validate_origin("https://").is_err());
    }

    #[test]
    fn test_rejects_bad_sitemap_route() {
        let toml = format!("{}\n[[sitemap.routes]]\nroute = \"about\"\n", MINIMAL);
        let err = parse_site_toml_str(&toml).unwrap_err();
        assert!(err.to_string().contains("must start with '/'"));

        let toml = format!(
            "{}\n[[sitemap.routes]]\nroute = \"/about\"\npriority = 1.5\n",
            MINIMAL
        );
        assert!(parse_site_toml_str(&toml).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let toml = format!(
            "{}\n[forms]\nspam_check_url = \"https://s.example\"\ncrm_url = \"https://c.example\"\n",
            MINIMAL
        );
        let config = parse_site_toml_str(&toml)
            .unwrap()
            .with_overrides(|name| match name {
                "BLOKFRONT_CMS_TOKEN" => Some("cms-secret".to_string()),
                "BLOKFRONT_CRM_TOKEN" => Some("crm-secret".to_string()),
                "BLOKFRONT_PORT" => Some("9000".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.cms.token.as_deref(), Some("cms-secret"));
        assert_eq!(
            config.forms.unwrap().crm_token.as_deref(),
            Some("crm-secret")
        );
        assert_eq!(config.server.port, 9000);

        let err = parse_site_toml_str(MINIMAL)
            .unwrap()
            .with_overrides(|name| (name == "BLOKFRONT_PORT").then(|| "http".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("Invalid BLOKFRONT_PORT"));
    }
}
