//! Action handlers for the parts views.
//!
//! Each handler takes the shared repository and the raw arguments, decodes
//! what it needs and answers with a replace of `#container` or a redirect
//! to the list.

use super::views::{edit_part_block, view_part_block};
use crate::parts::{PartRepository, PartStoreError};
use guiapi_core::{ActionError, ActionResult, Args, SLOT_SELECTOR};
use serde::Deserialize;
use std::sync::Arc;

/// Shared handle every action receives.
pub type Parts = Arc<dyn PartRepository>;

/// Where deleted and unknown parts send the browser.
pub const LIST_LOCATION: &str = "/";

/// Form posted by the edit view.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SavePartInput {
    /// Id of the edited part, empty for a new one.
    #[serde(rename = "ID")]
    pub id: String,
    /// `"true"` when the form was opened by `newPart`.
    #[serde(rename = "New")]
    pub new: String,
    /// Part code.
    #[serde(rename = "Code")]
    pub code: String,
    /// Storage location.
    #[serde(rename = "Location")]
    pub location: String,
    /// Part family.
    #[serde(rename = "Family")]
    pub family: String,
}

impl SavePartInput {
    fn is_new(&self) -> bool {
        self.new == "true"
    }
}

/// Form posted by the checkout button.
#[derive(Debug, Default, Deserialize)]
pub struct CheckoutInput {
    /// Part id.
    #[serde(rename = "ID", default)]
    pub id: String,
}

/// `viewPart(id)`: show a part, or go back to the list if it is gone.
///
/// # Errors
///
/// Fails on undecodable arguments or a storage error.
pub async fn view_part(parts: Parts, args: Args) -> Result<ActionResult, ActionError> {
    let id: String = args.decode()?;
    match parts.by_id(&id).await? {
        Some(part) => ActionResult::replace(SLOT_SELECTOR, view_part_block(&part)),
        None => {
            tracing::debug!(id = %id, "viewPart on a missing part");
            ActionResult::redirect(LIST_LOCATION)
        }
    }
}

/// `newPart()`: show an empty edit form. Arguments are ignored.
///
/// # Errors
///
/// Never fails.
#[allow(clippy::unused_async, clippy::needless_pass_by_value)]
pub async fn new_part(_parts: Parts, _args: Args) -> Result<ActionResult, ActionError> {
    ActionResult::replace(SLOT_SELECTOR, edit_part_block(None))
}

/// `editPart(id)`: show the edit form for an existing part.
///
/// # Errors
///
/// Fails on undecodable arguments, a storage error or a missing part.
pub async fn edit_part(parts: Parts, args: Args) -> Result<ActionResult, ActionError> {
    let id: String = args.decode()?;
    let part = parts
        .by_id(&id)
        .await?
        .ok_or(PartStoreError::NotFound(id))?;
    ActionResult::replace(SLOT_SELECTOR, edit_part_block(Some(&part)))
}

/// `savePart(form)`: create or update a part, then show it.
///
/// # Errors
///
/// Fails on undecodable arguments, a storage error or, when updating, a
/// missing part.
pub async fn save_part(parts: Parts, args: Args) -> Result<ActionResult, ActionError> {
    let input: SavePartInput = args.decode()?;
    let created = input.is_new();

    let mut part = if created {
        parts.create().await?
    } else {
        parts
            .by_id(&input.id)
            .await?
            .ok_or_else(|| PartStoreError::NotFound(input.id.clone()))?
    };
    part.code = input.code;
    part.location = input.location;
    part.family = input.family;

    parts.store(part.clone()).await?;
    tracing::info!(id = %part.id, code = %part.code, created, "Part saved");

    ActionResult::replace(SLOT_SELECTOR, view_part_block(&part))
}

/// `deletePart(id)`: delete a part and go back to the list.
///
/// # Errors
///
/// Fails on undecodable arguments or a storage error.
pub async fn delete_part(parts: Parts, args: Args) -> Result<ActionResult, ActionError> {
    let id: String = args.decode()?;
    parts.delete_by_id(&id).await?;
    tracing::info!(id = %id, "Part deleted");
    ActionResult::redirect(LIST_LOCATION)
}

/// `checkout({ID})`: record a checkout and show the part again.
///
/// The part is stored back unchanged; stock levels are not tracked.
///
/// # Errors
///
/// Fails on undecodable arguments or a storage error.
pub async fn checkout(parts: Parts, args: Args) -> Result<ActionResult, ActionError> {
    let input: CheckoutInput = args.decode()?;
    let Some(part) = parts.by_id(&input.id).await? else {
        return ActionResult::redirect(LIST_LOCATION);
    };

    parts.store(part.clone()).await?;
    ActionResult::replace(SLOT_SELECTOR, view_part_block(&part))
}
