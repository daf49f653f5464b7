/**
 * Router Configuration
 *
 * Combines the route groups into one router and wraps it in the
 * middleware stack.
 *
 * # Middleware
 *
 * Outermost first:
 * 1. `TraceLayer` - one span per request
 * 2. `TimeoutLayer` - 408 once `REQUEST_TIMEOUT_SECS` elapses
 * 3. `DefaultBodyLimit` - caps request bodies at `MAX_UPLOAD_BYTES`
 *
 * Unmatched paths fall through to a JSON 404.
 */

use axum::{extract::DefaultBodyLimit, Router};
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::version_routes::configure_version_routes;
use crate::backend::server::state::AppState;
use crate::backend::system::not_found_fallback;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new();
    let router = configure_api_routes(router);
    let router = configure_version_routes(router);

    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(app_state.config.request_timeout))
        .layer(DefaultBodyLimit::max(app_state.config.max_upload_bytes));

    router
        .fallback(not_found_fallback)
        .layer(middleware)
        .with_state(app_state)
}
