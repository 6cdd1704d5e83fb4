//! Full-page routes.
//!
//! Navigations render the whole document: the layout with the view block in
//! `#container`. Actions take over from there.

use super::actions::Parts;
use super::layout::main_layout;
use super::views::{list_block, view_part_block};
use axum::extract::{Path, State};
use axum::response::Html;
use guiapi_core::render_page;
use guiapi_web::{AppError, WebResult};

/// `GET /`: all parts.
///
/// # Errors
///
/// Renders a 500 page when the parts cannot be listed.
pub async fn list_page(State(parts): State<Parts>) -> WebResult<Html<String>> {
    let all = parts.all().await.map_err(|e| {
        AppError::internal("Could not list parts")
            .with_source(e.into())
            .with_layout(main_layout())
    })?;

    Ok(Html(render_page(main_layout(), list_block(&all))))
}

/// `GET /part/:id`: one part.
///
/// # Errors
///
/// Renders a 404 page for an unknown id and a 500 page on storage failure.
pub async fn part_page(
    State(parts): State<Parts>,
    Path(id): Path<String>,
) -> WebResult<Html<String>> {
    let part = parts
        .by_id(&id)
        .await
        .map_err(|e| {
            AppError::internal("Could not load part")
                .with_source(e.into())
                .with_layout(main_layout())
        })?
        .ok_or_else(|| AppError::not_found("Part", &id).with_layout(main_layout()))?;

    Ok(Html(render_page(main_layout(), view_part_block(&part))))
}
