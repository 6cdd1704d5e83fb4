//! Action dispatcher.
//!
//! The dispatcher resolves an action name against the frozen [`Registry`],
//! runs the handler with the raw payload, and converts whatever comes back
//! into an [`Envelope`]. It never interprets the payload, holds no state
//! between calls, and never lets a handler failure escape unformatted: errors
//! and panics alike become error envelopes.
//!
//! # Status codes
//!
//! | outcome | status |
//! |---|---|
//! | `replace` / `redirect` / `noop` | 200 |
//! | `ActionNotFound` | 404 |
//! | `ArgumentDecodeError` | 400 |
//! | `HandlerError`, `InvalidResult` | 500 |

use crate::error::ActionError;
use crate::registry::{Args, Registry};
use crate::result::{ActionResult, Envelope};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

/// Stateless action dispatcher over a shared registry.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<Registry>,
}

impl Dispatcher {
    /// Create a dispatcher reading from `registry`.
    #[must_use]
    pub const fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// The registry this dispatcher resolves names against.
    #[must_use]
    pub const fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Run the action `name` and return its response envelope.
    pub async fn dispatch(&self, name: &str, args: Args) -> Envelope {
        let started = Instant::now();
        let outcome = self.run(name, args).await.and_then(ActionResult::into_envelope);

        let envelope = match outcome {
            Ok(envelope) => {
                tracing::debug!(action = %name, "action completed");
                envelope
            }
            Err(err) => {
                log_failure(name, &err);
                Envelope::from(err)
            }
        };

        record(name, &envelope, started);
        envelope
    }

    /// Run the action and serialize the envelope, returning the HTTP status
    /// and the JSON body.
    pub async fn dispatch_raw(&self, name: &str, args: Args) -> (u16, Vec<u8>) {
        let envelope = self.dispatch(name, args).await;
        let status = envelope.status_code();
        match serde_json::to_vec(&envelope) {
            Ok(body) => (status, body),
            Err(err) => {
                tracing::error!(action = %name, error = %err, "failed to encode action envelope");
                (
                    500,
                    br#"{"type":"error","kind":"HandlerError","message":"failed to encode response"}"#
                        .to_vec(),
                )
            }
        }
    }

    /// Resolve and invoke the handler, catching panics from both the call and
    /// the returned future.
    async fn run(&self, name: &str, args: Args) -> Result<ActionResult, ActionError> {
        let handler = self
            .registry
            .lookup(name)
            .ok_or_else(|| ActionError::NotFound(name.to_string()))?;

        let future = std::panic::catch_unwind(AssertUnwindSafe(|| handler.call(args)))
            .map_err(|payload| panicked(&*payload))?;

        AssertUnwindSafe(future)
            .catch_unwind()
            .await
            .map_err(|payload| panicked(&*payload))?
    }
}

fn panicked(payload: &(dyn Any + Send)) -> ActionError {
    let message = payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    ActionError::Handler(format!("handler panicked: {message}"))
}

fn log_failure(name: &str, err: &ActionError) {
    match err {
        ActionError::NotFound(_) => {
            tracing::warn!(action = %name, "unknown action requested");
        }
        ActionError::ArgumentDecode(source) => {
            tracing::warn!(action = %name, error = %source, "action arguments rejected");
        }
        ActionError::Handler(message) => {
            tracing::warn!(action = %name, error = %message, "action handler failed");
        }
        ActionError::InvalidResult(message) => {
            tracing::error!(
                action = %name,
                error = %message,
                "action handler broke the result contract"
            );
        }
    }
}

fn record(name: &str, envelope: &Envelope, started: Instant) {
    let outcome = match envelope {
        Envelope::Replace { .. } => "replace",
        Envelope::Redirect { .. } => "redirect",
        Envelope::Noop => "noop",
        Envelope::Error { kind, .. } => kind.as_str(),
    };
    metrics::counter!(
        "guiapi_actions_total",
        "action" => name.to_string(),
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!("guiapi_action_duration_seconds", "action" => name.to_string())
        .record(started.elapsed().as_secs_f64());
}
