use std::error::Error;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use trip_server::cache::RouteCache;
use trip_server::config::ServerConfig;
use trip_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    // Load deals (fail fast if the dataset is unusable)
    info!(source = %config.data, "Loading deals");
    let set = config.data.fetch().await?;
    let currency = set.currency.clone().unwrap_or_default();
    if currency.is_empty() {
        warn!("Dataset has no currency");
    }
    let graph = Arc::new(set.into_graph()?);
    info!(
        deals = graph.len(),
        departures = graph.departures().len(),
        arrivals = graph.arrivals().len(),
        "Loaded deals"
    );

    let routes = RouteCache::new(graph, &config.cache);
    let state = AppState::new(routes, currency);
    let app = create_router(state, config.static_dir.as_deref());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "Trip planner listening");
    info!("  GET  /health         - Health check");
    info!("  GET  /api/locations  - Departure and arrival locations");
    info!("  GET  /api/route      - Plan a route (?start=&end=&key=duration|cost)");

    axum::serve(listener, app).await?;
    Ok(())
}
