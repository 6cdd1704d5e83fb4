//! Patch results and the response envelope.
//!
//! Handlers return an [`ActionResult`]; the dispatcher validates it and turns
//! it into an [`Envelope`], which is the JSON object the client script reads:
//!
//! ```text
//! {"type":"replace","target":"#container","html":"<div>...</div>"}
//! {"type":"redirect","location":"/"}
//! {"type":"noop"}
//! {"type":"error","kind":"ActionNotFound","message":"no such action: x"}
//! ```

use crate::block::Block;
use crate::error::{ActionError, ErrorKind};
use serde::{Deserialize, Serialize};

/// Client-visible effect of an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    /// Replace the children of the element matching `target` with `content`.
    Replace {
        /// CSS selector of the element to patch.
        target: String,
        /// New children.
        content: Block,
    },
    /// Navigate the client to `location`.
    Redirect {
        /// URL to load.
        location: String,
    },
    /// Leave the page as it is.
    NoOp,
}

impl ActionResult {
    /// Replace the content of `target`.
    ///
    /// Always returns `Ok`; the `Result` lets handlers end with
    /// `ActionResult::replace(..)` directly.
    ///
    /// # Errors
    ///
    /// Never fails.
    #[allow(clippy::unnecessary_wraps)]
    pub fn replace(target: impl Into<String>, content: Block) -> Result<Self, ActionError> {
        Ok(Self::Replace {
            target: target.into(),
            content,
        })
    }

    /// Redirect the client to `location`.
    ///
    /// # Errors
    ///
    /// Never fails.
    #[allow(clippy::unnecessary_wraps)]
    pub fn redirect(location: impl Into<String>) -> Result<Self, ActionError> {
        Ok(Self::Redirect {
            location: location.into(),
        })
    }

    /// Do nothing on the client.
    ///
    /// # Errors
    ///
    /// Never fails.
    #[allow(clippy::unnecessary_wraps)]
    pub const fn noop() -> Result<Self, ActionError> {
        Ok(Self::NoOp)
    }

    /// Validate the result and render it into its wire form.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::InvalidResult`] when a replace has an empty
    /// target or renders to empty markup, or when a redirect has an empty
    /// location.
    pub fn into_envelope(self) -> Result<Envelope, ActionError> {
        match self {
            Self::Replace { target, content } => {
                if target.trim().is_empty() {
                    return Err(ActionError::InvalidResult(
                        "replace without a target".to_string(),
                    ));
                }
                let html = content.render();
                if html.is_empty() {
                    return Err(ActionError::InvalidResult(format!(
                        "replace of {target} renders no content"
                    )));
                }
                Ok(Envelope::Replace { target, html })
            }
            Self::Redirect { location } => {
                if location.trim().is_empty() {
                    return Err(ActionError::InvalidResult(
                        "redirect without a location".to_string(),
                    ));
                }
                Ok(Envelope::Redirect { location })
            }
            Self::NoOp => Ok(Envelope::Noop),
        }
    }
}

/// JSON body of an action response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Envelope {
    /// Patch the children of `target` with `html`.
    Replace {
        /// CSS selector.
        target: String,
        /// Rendered markup.
        html: String,
    },
    /// Navigate to `location`.
    Redirect {
        /// URL to load.
        location: String,
    },
    /// Nothing to do.
    Noop,
    /// The action failed.
    Error {
        /// Error classification.
        kind: ErrorKind,
        /// Human-readable message.
        message: String,
    },
}

impl Envelope {
    /// HTTP status for this envelope.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Error { kind, .. } => kind.status_code(),
            Self::Replace { .. } | Self::Redirect { .. } | Self::Noop => 200,
        }
    }

    /// Returns `true` for the error variant.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

impl From<&ActionError> for Envelope {
    fn from(err: &ActionError) -> Self {
        Self::Error {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<ActionError> for Envelope {
    fn from(err: ActionError) -> Self {
        Self::from(&err)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::block::{div, text};
    use serde_json::json;

    #[test]
    fn replace_envelope_has_target_and_html() {
        let envelope = ActionResult::replace("#container", div(None, vec![text("C1")]))
            .unwrap()
            .into_envelope()
            .unwrap();
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"type": "replace", "target": "#container", "html": "<div>C1</div>"})
        );
    }

    #[test]
    fn redirect_envelope_has_location_only() {
        let envelope = ActionResult::redirect("/").unwrap().into_envelope().unwrap();
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value, json!({"type": "redirect", "location": "/"}));
        assert!(value.get("html").is_none());
    }

    #[test]
    fn noop_envelope() {
        let envelope = ActionResult::noop().unwrap().into_envelope().unwrap();
        assert_eq!(serde_json::to_value(&envelope).unwrap(), json!({"type": "noop"}));
    }

    #[test]
    fn empty_replace_is_invalid() {
        let err = ActionResult::replace("#container", Block::empty())
            .unwrap()
            .into_envelope()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidResult);

        let err = ActionResult::replace("  ", text("x"))
            .unwrap()
            .into_envelope()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidResult);
    }

    #[test]
    fn empty_redirect_is_invalid() {
        let err = ActionResult::redirect("")
            .unwrap()
            .into_envelope()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidResult);
    }

    #[test]
    fn error_envelope_carries_kind_and_message() {
        let envelope = Envelope::from(ActionError::NotFound("nope".into()));
        assert_eq!(envelope.status_code(), 404);
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"type": "error", "kind": "ActionNotFound", "message": "no such action: nope"})
        );
    }
}
