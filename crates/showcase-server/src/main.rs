//! Showcase Server - GitHub proxy for the repository showcase widget.

use anyhow::Context;
use clap::Parser;
use showcase_github::GitHubClient;
use showcase_server::api::{create_router, AppState};
use showcase_server::config::Config;
use showcase_server::observability::{init_logging, LogFormat};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Showcase Server - repository listing and star proxy
#[derive(Parser, Debug)]
#[command(name = "showcase-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "showcase.yaml")]
    config: PathBuf,

    /// HTTP listen address
    #[arg(long)]
    listen_addr: Option<SocketAddr>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Log format (pretty, json)
    #[arg(long)]
    log_format: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::load(Some(&args.config))
        .with_context(|| format!("failed to load {}", args.config.display()))?;
    if let Some(addr) = args.listen_addr {
        config.listen_addr = addr;
    }
    if let Some(level) = args.log_level {
        config.log_level = level;
    }
    if let Some(format) = args.log_format {
        config.log_format = format;
    }

    init_logging(&config.log_level, LogFormat::parse(&config.log_format));

    tracing::info!(
        listen_addr = %config.listen_addr,
        api_url = %config.github.api_url,
        cookie = %config.session.cookie_name,
        "Server configuration"
    );

    let github = GitHubClient::new(&config.github).context("failed to build GitHub client")?;
    let app = create_router(AppState::new(github, config.session));

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;

    tracing::info!(addr = %config.listen_addr, "Showcase server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Showcase server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
