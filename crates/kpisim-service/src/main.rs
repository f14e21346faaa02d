//! KPI Simulator Service Binary

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kpisim_engine::KpiEngine;
use kpisim_service::{router, AppState, KpiSimConfig};
use kpisim_store::DecisionStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting KPI simulator v{}", kpisim_common::VERSION);

    // Load configuration
    let config = KpiSimConfig::load()?;
    info!("Loaded configuration: {:?}", config);

    let baseline = config.baseline()?;
    if let Some(path) = &config.baseline_file {
        info!("Baseline constants loaded from {}", path.display());
    }

    let engine = KpiEngine::with_validated(baseline)?;
    let store = DecisionStore::with_scenario(engine, config.initial_scenario);
    info!(
        scenario = config.initial_scenario.key(),
        "Initial KPIs: {}",
        store.kpis()
    );

    let app = router(AppState::new(store));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST API listening on {}", addr);

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for shutdown signal: {}", e);
        }
        info!("Received shutdown signal");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Shutting down KPI simulator");
    Ok(())
}
