use std::net::SocketAddr;
use std::path::PathBuf;

use cinebus_core::loading::screenings_from_csv;
use cinebus_core::create_city_model;
use cinebus_server::{AppState, ServiceConfig, app};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Cinema planner HTTP service", long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, default_value = "cinebus.toml")]
    config: PathBuf,
    /// Listen address, overrides `[server] bind`
    #[arg(short, long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut config = ServiceConfig::load(&args.config)?;
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }

    let model_config = config.model.clone();
    let model = tokio::task::spawn_blocking(move || create_city_model(&model_config)).await??;

    let screenings = match &config.screenings {
        Some(path) => screenings_from_csv(path)?,
        None => {
            warn!("No screenings file configured; /screening will find nothing");
            Vec::new()
        }
    };

    let state = AppState::new(model, screenings);
    let router = app(state, &config.server);

    let listener = tokio::net::TcpListener::bind(config.server.bind).await?;
    info!("Cinema planner listening on http://{}", config.server.bind);
    info!("  GET  /health     - Health check");
    info!("  GET  /model      - Loaded network summary");
    info!("  POST /route      - Fastest route between two points");
    info!("  POST /screening  - First reachable screening of a film");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
