pub mod check;
pub mod serve;
pub mod sitemap;

use anyhow::{Context, Result};
use blokfront_client::{ContentStore, FixtureStore, StoryblokClient};
use blokfront_core::{SiteConfig, parse_site_toml};
use std::path::Path;
use std::sync::Arc;

/// Load site.toml and apply environment overrides.
fn load_config(path: &Path) -> Result<SiteConfig> {
    if !path.exists() {
        anyhow::bail!("Config file does not exist: {}", path.display());
    }
    let config = parse_site_toml(path)
        .with_context(|| format!("Failed to parse {}", path.display()))?
        .with_env_overrides()
        .context("Invalid environment override")?;
    Ok(config)
}

/// The CMS client, or a fixture store when a fixtures directory is given.
fn content_store(config: &SiteConfig, fixtures: Option<&Path>) -> Result<Arc<dyn ContentStore>> {
    match fixtures {
        Some(dir) => {
            let store =
                FixtureStore::from_dir(dir, config.locales.clone(), &config.cms.vacancies_folder)
                    .with_context(|| format!("Failed to load fixtures from {}", dir.display()))?;
            Ok(Arc::new(store))
        }
        None => {
            let client = StoryblokClient::new(&config.cms, config.locales.clone())
                .context("Failed to create CMS client")?;
            Ok(Arc::new(client))
        }
    }
}
