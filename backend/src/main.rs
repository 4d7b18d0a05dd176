use std::net::SocketAddr;

use clap::Parser;
use pinmap::{AppState, config::Config, create_router};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(author, version, about = "HTTP API for dropping pins and routing between them")]
struct Args {
    /// Address to listen on (overrides PINMAP_BIND_ADDR)
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Nominatim-compatible geocoder base URL (overrides PINMAP_GEOCODER_URL)
    #[arg(long)]
    geocoder_url: Option<String>,

    /// OSRM-compatible directions base URL (overrides PINMAP_DIRECTIONS_URL)
    #[arg(long)]
    directions_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pinmap=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let mut config = Config::from_env()?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(url) = args.geocoder_url {
        config.geocoder_url = url;
    }
    if let Some(url) = args.directions_url {
        config.directions_url = url;
    }
    tracing::info!("geocoder: {}", config.geocoder_url);
    tracing::info!("directions: {}", config.directions_url);

    let state = AppState::from_config(&config)?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let app = create_router(state).layer(cors);

    let addr = config.bind_addr;
    tracing::info!("starting pinmap on http://{addr}");
    tracing::info!("API endpoints:");
    tracing::info!("  GET    /api/waypoints - List pins and control visibility");
    tracing::info!("  POST   /api/waypoints - Geocode an address and drop a pin");
    tracing::info!("  DELETE /api/waypoints - Reset pins and map");
    tracing::info!("  POST   /api/routes - Walking routes between consecutive pins");
    tracing::info!("  GET    /api/map - Markers and polylines to render");
    tracing::info!("  GET    /api/alerts - Pending user-facing errors");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
