use anyhow::Context;
use clap::Parser;
use route_quote::sdk::config::{AppConfig, MapStorage};
use route_quote::sdk::routing::provider::GoogleDirectionsProvider;
use route_quote::sdk::server::{router, AppState};
use route_quote::sdk::staticmap;
use route_quote::sdk::util::{log::init_logging, rate_limit::directions_limiter};
use std::path::PathBuf;
use std::sync::Arc;

/// HTTP service quoting round-trip mileage fees for driving routes.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Address to bind the HTTP server on
    #[arg(long, env = "ROUTE_QUOTE_ADDR", default_value = "127.0.0.1:8080")]
    addr: String,

    /// [Optional] Directory for locally stored map images (overrides MAP_IMAGE_DIR)
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Start with our custom logger
    init_logging();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // --- 1. Configuration ---
    let mut config = AppConfig::from_env()?;
    if let Some(dir) = cli.static_dir {
        config.map_storage = MapStorage::Local { dir };
    }
    let static_dir = match &config.map_storage {
        MapStorage::Local { dir } => Some(dir.clone()),
        _ => None,
    };

    // --- 2. Dependency initialization ---
    let limiter = directions_limiter();
    let provider = Arc::new(GoogleDirectionsProvider::new(
        config.maps_api_key.clone(),
        limiter,
    ));
    let maps = staticmap::publisher_for(&config.maps_api_key, config.map_storage);

    let state = AppState { provider, maps };
    let app = router(state, static_dir.clone());

    // --- 3. Serve ---
    if let Some(dir) = static_dir {
        log::info!("Serving map images from {}", dir.display());
    }
    log::info!("Listening on {}", cli.addr);

    let listener = tokio::net::TcpListener::bind(&cli.addr)
        .await
        .with_context(|| format!("Failed to bind {}", cli.addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
