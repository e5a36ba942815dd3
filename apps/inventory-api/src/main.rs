//! Inventory API - REST server for products and stock levels

use axum_helpers::server::create_production_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_from_config_with_retry, run_migrations};
use migration::Migrator;
use tracing::{info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let cors = config.cors_layer()?;

    info!("Connecting to PostgreSQL at {}", config.database.redacted_url());
    let db = connect_from_config_with_retry(
        config.database.clone(),
        Some(config.connect_retry.clone()),
    )
    .await?;

    if config.run_migrations {
        run_migrations::<Migrator>(&db, config.app.name).await?;
    }

    // Initialize the application state
    let state = AppState {
        config: config.clone(),
        db,
    };

    let app = api::app(&state, cors);

    info!(
        "Starting Inventory API on {} ({:?})",
        config.server.address(),
        config.environment
    );

    let db = state.db.clone();
    create_production_app(app, &config.server, config.shutdown_timeout, async move {
        info!("Shutting down: closing PostgreSQL pool");
        match db.close().await {
            Ok(()) => info!("PostgreSQL pool closed"),
            Err(e) => warn!(error = %e, "Failed to close PostgreSQL pool"),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Inventory API shutdown complete");
    Ok(())
}
