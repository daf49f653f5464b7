/**
 * Server Initialization
 *
 * This module builds the application state and the router.
 *
 * # Initialization Process
 *
 * 1. Validate the configuration
 * 2. Open the SQLite pool and run migrations
 * 3. Create the storage and upload directories
 * 4. Build the router and start the maintenance task
 */

use std::time::Duration;

use axum::Router;

use crate::backend::error::{BackendError, BackendResult};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::AppState;

/// How often expired cache entries and idle locks are dropped
const MAINTENANCE_INTERVAL: Duration = Duration::from_secs(300);

/// Build the application state
///
/// Fails if the configuration is invalid, the database cannot be opened or
/// migrated, or a storage directory cannot be created.
pub async fn build_state(config: ServerConfig) -> BackendResult<AppState> {
    config
        .validate()
        .map_err(|e| BackendError::validation("config", e.to_string()))?;

    if config.uses_default_secret() {
        tracing::warn!("SECRET_KEY is not set; using the built-in default");
    }

    let db_pool = load_database(&config).await?;
    tracing::info!("Database ready at {}", config.database_url);

    let state = AppState::new(config, db_pool);
    state.storage.ensure_base_dir().await?;
    state.uploads.ensure_base_dir().await?;
    tracing::info!(
        "Storage at {}, uploads at {}",
        state.storage.base_dir().display(),
        state.uploads.base_dir().display()
    );

    Ok(state)
}

/// Create and configure the Axum application
pub async fn create_app(config: ServerConfig) -> BackendResult<Router<()>> {
    tracing::info!("Initializing docvault backend server");

    let state = build_state(config).await?;
    let app = create_router(state.clone());

    let maintenance = state;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(MAINTENANCE_INTERVAL);
        loop {
            interval.tick().await;
            maintenance.run_maintenance().await;
        }
    });

    tracing::info!("Router configured with periodic maintenance task");

    Ok(app)
}
