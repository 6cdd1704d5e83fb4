//! Router for the guiapi endpoints.

use crate::handlers::{dispatch_action, health_check, readiness_check};
use crate::state::GuiState;
use axum::{
    routing::{get, post},
    Router,
};

/// Build the router for actions and health checks.
///
/// The correlation layer is not applied here; add it once around the merged
/// application router.
///
/// # Routes
///
/// - `POST /guiapi/:name` - Run an action
/// - `GET /health` - Liveness
/// - `GET /health/ready` - Readiness (registered actions)
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/", get(list_page))
///     .with_state(pages)
///     .merge(guiapi_router(GuiState::new(registry)));
/// ```
pub fn guiapi_router(state: GuiState) -> Router {
    Router::new()
        .route("/guiapi/:name", post(dispatch_action))
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
        .with_state(state)
}
