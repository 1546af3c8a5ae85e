//! # Ferrous Reports Server
//!
//! Serves cached report endpoints and keeps the backing materialized views
//! fresh in the background.

mod bootstrap;
mod di;
mod server;

use clap::Parser;
use ferrous_reports_domain::CliOverrides;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "ferrous-reports")]
#[command(version)]
#[command(about = "Reporting server with response caching and materialized view refresh")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short = 'c', long, env = "FERROUS_REPORTS_CONFIG")]
    config: Option<String>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Web server port
    #[arg(short = 'w', long)]
    web_port: Option<u16>,

    /// Postgres connection URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        bind_address: cli.bind,
        web_port: cli.web_port,
        database_url: cli.database_url,
        log_level: cli.log_level,
    };
    let config = bootstrap::load_config(cli.config.as_deref(), overrides)?;
    bootstrap::init_logging(&config);

    info!(
        config_file = cli.config.as_deref().unwrap_or("default"),
        web_port = config.server.web_port,
        bind = %config.server.bind_address,
        views = config.refresh.views.len(),
        cache_enabled = config.cache.enabled,
        "Configuration loaded"
    );

    let shutdown = CancellationToken::new();
    let services = di::Services::build(&config, shutdown.clone()).await?;
    services.job_runner(&config, &shutdown).start().await;

    tokio::spawn(shutdown_on_ctrl_c(shutdown.clone()));

    let web_addr = config
        .server
        .socket_addr()
        .map_err(|e| anyhow::anyhow!(e))?;
    server::start_web_server(
        web_addr,
        services.state,
        &config.server.cors_allowed_origins,
        shutdown,
    )
    .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_on_ctrl_c(shutdown: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
    shutdown.cancel();
}
