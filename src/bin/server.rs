//! HTTP server binary for docrank.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use docrank::{AppConfig, DocumentSearchServer};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Keyword-driven document search service.
#[derive(Parser)]
#[command(name = "docrank-server", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interface to bind (overrides the config file).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides the config file).
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("docrank=info,docrank_search=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => AppConfig::from_file(path)?,
        None => AppConfig::load_or_default(&AppConfig::default_config_path())?,
    };
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    config.validate()?;

    let search = docrank_search::from_env(&config.search)?;
    info!(?search, "document search pipeline ready");

    let server = DocumentSearchServer::start(Arc::new(search), &config.server).await?;
    info!(addr = %server.addr(), "docrank-server started");

    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    server.shutdown();
    Ok(())
}
