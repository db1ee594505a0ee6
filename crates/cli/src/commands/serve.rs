use super::{content_store, load_config};
use crate::server::{self, AppState, FormsBackend};
use anyhow::{Context, Result};
use blokfront_client::{HttpCrmSink, HttpSpamChecker};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

pub struct ServeOptions {
    pub config: PathBuf,
    pub port: Option<u16>,
    pub preview: bool,
    pub fixtures: Option<PathBuf>,
    pub assets: PathBuf,
}

/// Start the site server.
pub async fn run(options: ServeOptions) -> Result<()> {
    let mut config = load_config(&options.config)?;
    if let Some(port) = options.port {
        config.server.port = port;
    }
    if options.preview {
        config.server.preview = true;
    }

    let store = content_store(&config, options.fixtures.as_deref())?;

    let forms = match &config.forms {
        Some(forms) => Some(Arc::new(FormsBackend {
            spam: Box::new(HttpSpamChecker::new(forms).context("Failed to create spam check client")?),
            crm: Box::new(HttpCrmSink::new(forms).context("Failed to create CRM client")?),
        })),
        None => {
            tracing::warn!("no [forms] section, form endpoints are disabled");
            None
        }
    };

    let assets = options.assets.is_dir().then_some(options.assets);
    let port = config.server.port;
    tracing::info!(
        site = %config.site.name,
        origin = %config.site.origin,
        preview = config.server.preview,
        fixtures = options.fixtures.is_some(),
        "starting server"
    );

    let state = AppState {
        config: Arc::new(config),
        store,
        forms,
    };
    let app = server::router(state, assets);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to port {}", port))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
