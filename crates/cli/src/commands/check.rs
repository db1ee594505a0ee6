use super::load_config;
use std::path::PathBuf;

pub async fn run(path: PathBuf) -> anyhow::Result<()> {
    println!("Validating site config at: {}", path.display());

    let config = load_config(&path)?;

    println!("✓ {} valid", path.display());
    println!("  Site: {} ({})", config.site.name, config.site.origin);

    let locales: Vec<String> = config
        .locales
        .supported()
        .iter()
        .map(|l| {
            if config.locales.is_default(*l) {
                format!("{} (default)", l)
            } else {
                l.to_string()
            }
        })
        .collect();
    println!("  Locales: {}", locales.join(", "));

    println!("  CMS: {}", config.cms.api_base);
    if config.cms.token.is_none() {
        println!("  ⚠ No CMS token: set cms.token or BLOKFRONT_CMS_TOKEN, or serve with --fixtures");
    }
    println!("  Vacancies folder: {}", config.cms.vacancies_folder);

    match &config.forms {
        Some(forms) => {
            println!("  Forms: spam check {}, CRM {}", forms.spam_check_url, forms.crm_url);
            if forms.crm_token.is_none() {
                println!("  ⚠ No CRM token: submissions are sent unauthenticated");
            }
        }
        None => println!("  Forms: disabled"),
    }

    println!("  Static sitemap routes: {}", config.sitemap_routes.len());
    if config.server.preview {
        println!("  ⚠ Preview mode is on: draft content will be served");
    }

    Ok(())
}
