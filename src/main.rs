//! Catalog API service entrypoint.
//!
//! Startup order: configuration → logging → metrics → listener → server.
//! Configuration comes first so the subscriber filter can honor the
//! configured log level.

use std::path::Path;

use tokio::net::TcpListener;

use catalog_api::config::loader::load_config;
use catalog_api::config::ApiConfig;
use catalog_api::http::HttpServer;
use catalog_api::lifecycle::Shutdown;
use catalog_api::observability::{logging, metrics};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Optional config file path as the first argument; defaults otherwise.
    let config = match std::env::args().nth(1) {
        Some(path) => load_config(Path::new(&path))?,
        None => ApiConfig::default(),
    };

    logging::init(&logging::filter_for(&config.observability.log_level));

    tracing::info!("catalog-api v0.1.0 starting");

    tracing::info!(
        bind_address = %config.listener.bind_address,
        per_page = config.catalog.per_page,
        cache_ttl_secs = config.cache.ttl_secs,
        rate_limit_enabled = config.rate_limit.enabled,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
