mod commands;
mod server;

use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "blokfront=info,tower_http=info";

#[derive(Parser)]
#[command(name = "blokfront")]
#[command(version, about = "Server-rendered marketing site on top of a headless CMS", long_about = None)]
struct Cli {
    /// Log as JSON lines (also BLOKFRONT_LOG_JSON=1)
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Serve the site
    Serve {
        /// Path to site.toml
        #[arg(short, long, default_value = "site.toml")]
        config: PathBuf,

        /// Port to serve on (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Serve draft content and disable the home redirect
        #[arg(long)]
        preview: bool,

        /// Serve stories from a directory of JSON files instead of the CMS
        #[arg(long)]
        fixtures: Option<PathBuf>,

        /// Directory served under /assets
        #[arg(long, default_value = "assets")]
        assets: PathBuf,
    },

    /// Validate site configuration
    Check {
        /// Path to site.toml
        #[arg(short, long, default_value = "site.toml")]
        config: PathBuf,
    },

    /// Generate sitemap.xml
    Sitemap {
        /// Path to site.toml
        #[arg(short, long, default_value = "site.toml")]
        config: PathBuf,

        /// Read stories from a directory of JSON files instead of the CMS
        #[arg(long)]
        fixtures: Option<PathBuf>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn env_bool(name: &str) -> bool {
    std::env::var(name)
        .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

fn init_tracing(log_json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    if log_json || env_bool("BLOKFRONT_LOG_JSON") {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            port,
            preview,
            fixtures,
            assets,
        } => {
            init_tracing(cli.log_json);
            commands::serve::run(commands::serve::ServeOptions {
                config,
                port,
                preview,
                fixtures,
                assets,
            })
            .await
        }
        Command::Check { config } => commands::check::run(config).await,
        Command::Sitemap {
            config,
            fixtures,
            output,
        } => commands::sitemap::run(config, fixtures, output).await,
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "blokfront", &mut io::stdout());
            Ok(())
        }
    }
}
