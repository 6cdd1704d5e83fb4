//! Health check endpoints.

use crate::state::GuiState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

/// Liveness check.
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// Readiness report.
#[derive(Debug, Serialize)]
pub struct Readiness {
    /// `ready` once at least one action is registered.
    pub status: &'static str,
    /// Registered action names, sorted.
    pub actions: Vec<String>,
}

/// Readiness check: the server is ready once actions are registered.
///
/// # Endpoint
///
/// ```text
/// GET /health/ready
/// ```
///
/// # Status Codes
///
/// - 200 OK: at least one action registered
/// - 503 Service Unavailable: empty registry
#[allow(clippy::unused_async)]
pub async fn readiness_check(State(state): State<GuiState>) -> (StatusCode, Json<Readiness>) {
    let actions: Vec<String> = state
        .registry()
        .names()
        .into_iter()
        .map(str::to_string)
        .collect();

    if actions.is_empty() {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(Readiness {
                status: "empty",
                actions,
            }),
        )
    } else {
        (
            StatusCode::OK,
            Json(Readiness {
                status: "ready",
                actions,
            }),
        )
    }
}
