//! The action endpoint.

use crate::extractors::CorrelationId;
use crate::state::GuiState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use guiapi_core::Args;

/// Run a registered action.
///
/// # Endpoint
///
/// ```text
/// POST /guiapi/:name
/// Content-Type: application/json
///
/// "part-id"
/// ```
///
/// The body is handed to the action's handler untouched.
///
/// # Response
///
/// ```json
/// {"type": "replace", "target": "#container", "html": "<div>...</div>"}
/// ```
///
/// Failures use the same shape with `"type": "error"` and the status of the
/// error kind (404 unknown action, 400 bad arguments, 500 handler failure).
pub async fn dispatch_action(
    State(state): State<GuiState>,
    Path(name): Path<String>,
    CorrelationId(correlation_id): CorrelationId,
    body: Bytes,
) -> Response {
    tracing::debug!(
        action = %name,
        correlation_id = %correlation_id,
        bytes = body.len(),
        "dispatching action"
    );

    let envelope = state
        .dispatcher()
        .dispatch(&name, Args::new(body.to_vec()))
        .await;
    let status =
        StatusCode::from_u16(envelope.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (status, Json(envelope)).into_response()
}
