//! Market analysis server binary

use anyhow::Context;
use pma_server::{cli, routes, telemetry, MarketAnalysisService, ServerConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    let config = ServerConfig::from_matches(&matches).context("resolving configuration")?;

    telemetry::init(config.log_format).context("initializing logging")?;

    info!(
        bind = %config.bind_addr,
        dataset = %config.dataset_path.display(),
        cache_capacity = config.cache_capacity,
        log_format = %config.log_format,
        "Starting market analysis server v{}",
        pma_server::VERSION
    );

    let service = MarketAnalysisService::from_config(&config);
    let (addr, server) = warp::serve(routes(service))
        .try_bind_with_graceful_shutdown(config.bind_addr, shutdown_signal())
        .with_context(|| format!("binding {}", config.bind_addr))?;

    info!(%addr, "Listening");
    server.await;
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
