//! Parts GUI: pages, views and the actions behind their buttons.
//!
//! [`install`] registers the actions on a
//! [`RegistryBuilder`](guiapi_core::RegistryBuilder); [`routes`] serves the
//! full pages. Both share one repository handle.
//!
//! | Action       | Arguments                          | Result                         |
//! |--------------|------------------------------------|--------------------------------|
//! | `viewPart`   | `"id"`                             | view, or redirect to `/`       |
//! | `newPart`    | ignored                            | empty edit form                |
//! | `editPart`   | `"id"`                             | edit form, error if missing    |
//! | `savePart`   | `{ID, New, Code, Location, Family}`| view of the saved part         |
//! | `deletePart` | `"id"`                             | redirect to `/`                |
//! | `checkout`   | `{ID}`                             | view, or redirect to `/`       |

pub mod actions;
pub mod layout;
pub mod pages;
pub mod views;

use crate::parts::PartRepository;
use actions::Parts;
use axum::{routing::get, Router};
use guiapi_core::{ActionError, ActionResult, Args, Handler, RegistryBuilder};
use std::future::Future;
use std::sync::Arc;

/// Show a part.
pub const VIEW_PART: &str = "viewPart";
/// Open an empty edit form.
pub const NEW_PART: &str = "newPart";
/// Open the edit form of a part.
pub const EDIT_PART: &str = "editPart";
/// Save the edit form.
pub const SAVE_PART: &str = "savePart";
/// Delete a part.
pub const DELETE_PART: &str = "deletePart";
/// Check parts out.
pub const CHECKOUT: &str = "checkout";

/// Initializer registering every parts action.
///
/// # Example
///
/// ```
/// use guiapi_core::RegistryBuilder;
/// use inventory::gui;
/// use inventory::parts::InMemoryPartRepository;
/// use std::sync::Arc;
///
/// let registry = RegistryBuilder::new()
///     .install(gui::install(Arc::new(InMemoryPartRepository::new())))
///     .freeze();
/// assert_eq!(
///     registry.names(),
///     vec!["checkout", "deletePart", "editPart", "newPart", "savePart", "viewPart"]
/// );
/// ```
pub fn install(parts: Arc<dyn PartRepository>) -> impl FnOnce(&mut RegistryBuilder) {
    move |builder| {
        builder
            .register(VIEW_PART, with_parts(&parts, actions::view_part))
            .register(NEW_PART, with_parts(&parts, actions::new_part))
            .register(EDIT_PART, with_parts(&parts, actions::edit_part))
            .register(SAVE_PART, with_parts(&parts, actions::save_part))
            .register(DELETE_PART, with_parts(&parts, actions::delete_part))
            .register(CHECKOUT, with_parts(&parts, actions::checkout));
        tracing::debug!(actions = 6, "Parts actions installed");
    }
}

/// Page routes: `GET /` and `GET /part/:id`.
pub fn routes(parts: Arc<dyn PartRepository>) -> Router {
    Router::new()
        .route("/", get(pages::list_page))
        .route("/part/:id", get(pages::part_page))
        .with_state(parts)
}

/// Bind the repository into a handler taking only the arguments.
fn with_parts<F, Fut>(parts: &Parts, action: F) -> impl Handler + 'static
where
    F: Fn(Parts, Args) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ActionResult, ActionError>> + Send + 'static,
{
    let parts = Arc::clone(parts);
    move |args: Args| action(Arc::clone(&parts), args)
}
