//! Errors for page routes.
//!
//! Action routes never fail at the HTTP level: every outcome, including
//! failures, is an envelope. Page routes are different, since a browser is
//! waiting for a document. [`AppError`] carries the status and message of a
//! failed navigation and renders it as a best-effort HTML page, inside the
//! application layout when one is attached.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use guiapi_core::block::{self, Block};
use guiapi_core::page::{render_page, Shell};
use std::fmt;

/// Failed page navigation.
///
/// # Examples
///
/// ```ignore
/// async fn part_page(Path(id): Path<String>) -> Result<Html<String>, AppError> {
///     let part = repo.by_id(&id).await
///         .map_err(|e| AppError::internal("Could not load part").with_source(e.into()))?
///         .ok_or_else(|| AppError::not_found("Part", &id))?;
///     Ok(Html(render_page(layout(), view(&part))))
/// }
/// ```
#[derive(Debug)]
pub struct AppError {
    /// HTTP status code
    status: StatusCode,
    /// Error message (user-facing)
    message: String,
    /// Error code (for logs and the page's data attribute)
    code: String,
    /// Layout to render the error into
    layout: Option<Block>,
    /// Internal error (for logging, not exposed to client)
    source: Option<anyhow::Error>,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub const fn new(status: StatusCode, message: String, code: String) -> Self {
        Self {
            status,
            message,
            code,
            layout: None,
            source: None,
        }
    }

    /// Attach the underlying cause.
    #[must_use]
    pub fn with_source(mut self, source: anyhow::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// Render the error inside `layout` instead of a bare document.
    #[must_use]
    pub fn with_layout(mut self, layout: Block) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Create a 404 Not Found error.
    #[must_use]
    pub fn not_found(resource: impl fmt::Display, id: impl fmt::Display) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            format!("{resource} with id {id} not found"),
            "NOT_FOUND".to_string(),
        )
    }

    /// Create a 500 Internal Server Error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            message.into(),
            "INTERNAL_SERVER_ERROR".to_string(),
        )
    }

    /// HTTP status of the error page.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Error code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Block shown in place of the page content.
    #[must_use]
    pub fn notice(&self) -> Block {
        block::div(
            block::class("ui negative message").attr("data-error", self.code.as_str()),
            vec![
                block::div(block::class("header"), vec![block::text(self.status.to_string())]),
                block::p(None, vec![block::text(self.message.as_str())]),
                block::a(block::href("/"), vec![block::text("Back to the list")]),
            ],
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            if let Some(source) = &self.source {
                tracing::error!(
                    status = %self.status,
                    code = %self.code,
                    message = %self.message,
                    error = %source,
                    "Page failed"
                );
            } else {
                tracing::error!(
                    status = %self.status,
                    code = %self.code,
                    message = %self.message,
                    "Page failed"
                );
            }
        } else {
            tracing::warn!(
                status = %self.status,
                code = %self.code,
                message = %self.message,
                "Page not served"
            );
        }

        let notice = self.notice();
        let layout = self
            .layout
            .unwrap_or_else(|| Shell::new(self.status.to_string()).build());

        (self.status, Html(render_page(layout, notice))).into_response()
    }
}

/// Convert `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal("An internal error occurred").with_source(err)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn test_error_display() {
        let err = AppError::internal("Could not list parts");
        assert_eq!(err.to_string(), "[INTERNAL_SERVER_ERROR] Could not list parts");
    }

    #[test]
    fn test_not_found() {
        let err = AppError::not_found("Part", "123");
        assert_eq!(err.to_string(), "[NOT_FOUND] Part with id 123 not found");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_anyhow_is_internal() {
        let err = AppError::from(anyhow::anyhow!("disk on fire"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "INTERNAL_SERVER_ERROR");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[tokio::test]
    async fn test_renders_html_page_in_layout() {
        let layout = Shell::new("Inventory").build();
        let response = AppError::not_found("Part", "abc")
            .with_layout(layout)
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Inventory</title>"));
        assert!(html.contains("Part with id abc not found"));
        assert!(html.contains(r#"data-error="NOT_FOUND""#));
    }
}
