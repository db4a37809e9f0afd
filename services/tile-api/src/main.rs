//! Tile API Server
//!
//! Computes WMS tile grids for the layers configured in a YAML directory.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use tile_api::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "tile-api")]
#[command(about = "WMS tile grid server")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8084", env = "TILE_API_LISTEN")]
    listen: String,

    /// Directory of layer YAML files
    #[arg(long, default_value = "config/layers", env = "TILE_API_LAYERS_DIR")]
    layers_dir: String,

    /// Log level
    #[arg(long, default_value = "info", env = "TILE_API_LOG_LEVEL")]
    log_level: String,

    /// Number of tokio worker threads (default: number of CPU cores)
    #[arg(long)]
    worker_threads: Option<usize>,
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = runtime_builder.build()?;
    runtime.block_on(async_main(args))
}

async fn async_main(args: Args) -> Result<()> {
    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Initialize Prometheus metrics exporter
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    info!("Prometheus metrics exporter initialized");
    info!(layers_dir = %args.layers_dir, "Starting tile API server");

    let state = Arc::new(AppState::load(&args.layers_dir)?.with_prometheus(prometheus_handle));

    let app = tile_api::build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Parse listen address
    let addr: SocketAddr = args
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address: {}", args.listen))?;
    info!(address = %addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
