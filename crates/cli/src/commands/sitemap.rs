use super::{content_store, load_config};
use crate::server::sitemap::build_xml;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Build sitemap.xml from the configured routes and the CMS.
pub async fn run(path: PathBuf, fixtures: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let config = load_config(&path)?;
    let store = content_store(&config, fixtures.as_deref())?;

    let xml = build_xml(&config, store.as_ref())
        .await
        .context("Failed to build sitemap")?;

    match output {
        Some(output) => {
            fs::write(&output, &xml)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("✓ Wrote {} ({} urls)", output.display(), xml.matches("<url>").count());
        }
        None => print!("{}", xml),
    }

    Ok(())
}
