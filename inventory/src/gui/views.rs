//! Blocks for the list, part and edit views.
//!
//! Buttons call back into the client script: `guiapi(name, args)` for
//! single-value actions and `sendForm(name, selector)` for forms, where the
//! selector picks the inputs whose `name`/`value` pairs become the argument
//! object.

use super::{CHECKOUT, DELETE_PART, EDIT_PART, NEW_PART, SAVE_PART, VIEW_PART};
use crate::parts::Part;
use guiapi_core::block::{
    a, button, class, div, h1, href, input, label, table, tbody, td, text, th, thead, tr, type_,
};
use guiapi_core::Block;

/// Class marking the inputs of the edit form.
pub const EDIT_FORM_FIELD: &str = "ga-edit-part";

/// Class marking the inputs of the checkout form.
pub const CHECKOUT_FIELD: &str = "ga-checkout";

/// `guiapi('<action>', "<id>")`, with the id quoted as a JSON string.
fn call_with_id(action: &str, id: &str) -> String {
    let id = serde_json::Value::String(id.to_string());
    format!("guiapi('{action}', {id})")
}

fn send_form(action: &str, field_class: &str) -> String {
    format!("sendForm('{action}', '.{field_class}')")
}

/// Table of all parts with a button to start a new one.
#[must_use]
pub fn list_block(parts: &[Part]) -> Block {
    let rows = if parts.is_empty() {
        vec![tr(
            None,
            vec![td(
                class("center aligned").attr("colspan", "3"),
                vec![text("No parts yet")],
            )],
        )]
    } else {
        parts.iter().map(list_row).collect()
    };

    div(
        None,
        vec![
            div(
                None,
                vec![button(
                    class("ui green button").onclick(format!("guiapi('{NEW_PART}', null)")),
                    vec![text("New Part")],
                )],
            ),
            h1(None, vec![text("Parts")]),
            table(
                class("ui celled table"),
                vec![
                    thead(
                        None,
                        vec![tr(
                            None,
                            vec![
                                th(None, vec![text("Code")]),
                                th(None, vec![text("Location")]),
                                th(None, vec![text("Family")]),
                            ],
                        )],
                    ),
                    tbody(None, rows),
                ],
            ),
        ],
    )
}

fn list_row(part: &Part) -> Block {
    tr(
        None,
        vec![
            td(
                None,
                vec![a(
                    href(format!("/part/{}", part.id)),
                    vec![text(part.code.as_str())],
                )],
            ),
            td(None, vec![text(part.location.as_str())]),
            td(None, vec![text(part.family.as_str())]),
        ],
    )
}

/// Read-only view of a part with edit, delete and checkout controls.
#[must_use]
pub fn view_part_block(part: &Part) -> Block {
    let row = |key: &str, value: &str| {
        tr(
            None,
            vec![td(None, vec![text(key)]), td(None, vec![text(value)])],
        )
    };

    div(
        None,
        vec![
            div(
                None,
                vec![
                    a(
                        href("/"),
                        vec![button(class("ui button"), vec![text("< List")])],
                    ),
                    button(
                        class("ui button").onclick(call_with_id(EDIT_PART, &part.id)),
                        vec![text("Edit")],
                    ),
                    button(
                        class("ui red button").onclick(call_with_id(DELETE_PART, &part.id)),
                        vec![text("Delete")],
                    ),
                ],
            ),
            h1(None, vec![text(part.code.as_str())]),
            div(
                class("ui form"),
                vec![
                    hidden("ID", &part.id, CHECKOUT_FIELD),
                    div(class("field"), vec![label(None, vec![text("Inventory")])]),
                    div(class("field"), vec![label(None, vec![text("Checkout")])]),
                    button(
                        class("ui yellow button").onclick(send_form(CHECKOUT, CHECKOUT_FIELD)),
                        vec![text("Checkout Parts")],
                    ),
                ],
            ),
            table(
                class("ui celled table"),
                vec![tbody(
                    None,
                    vec![
                        row("Code", &part.code),
                        row("Location", &part.location),
                        row("Family", &part.family),
                    ],
                )],
            ),
        ],
    )
}

/// Edit form for `part`, or an empty creation form for `None`.
///
/// The hidden `New` input carries `"true"` or `"false"` as a string, which
/// `savePart` reads back to decide between creating and updating.
#[must_use]
pub fn edit_part_block(part: Option<&Part>) -> Block {
    let is_new = part.is_none();
    let blank = Part::default();
    let part = part.unwrap_or(&blank);

    div(
        None,
        vec![
            div(
                None,
                vec![
                    button(
                        class("ui button").onclick(call_with_id(VIEW_PART, &part.id)),
                        vec![text("Cancel")],
                    ),
                    button(
                        class("ui green button").onclick(send_form(SAVE_PART, EDIT_FORM_FIELD)),
                        vec![text("Save")],
                    ),
                ],
            ),
            div(
                class("ui form"),
                vec![
                    hidden("New", if is_new { "true" } else { "false" }, EDIT_FORM_FIELD),
                    hidden("ID", &part.id, EDIT_FORM_FIELD),
                    text_field("Code", &part.code),
                    text_field("Location", &part.location),
                    text_field("Family", &part.family),
                ],
            ),
        ],
    )
}

fn hidden(name: &str, value: &str, field_class: &str) -> Block {
    input(type_("hidden").name(name).value(value).class(field_class))
}

fn text_field(name: &str, value: &str) -> Block {
    div(
        class("field"),
        vec![
            label(None, vec![text(name)]),
            input(type_("text").name(name).value(value).class(EDIT_FORM_FIELD)),
        ],
    )
}
