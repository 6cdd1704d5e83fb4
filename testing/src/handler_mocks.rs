//! Handler doubles for dispatcher and router tests.
//!
//! - [`RecordingHandler`]: replies with a fixed outcome and records every
//!   payload it receives

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Panics only on poisoned locks

use guiapi_core::{ActionError, ActionResult, Args, Handler};
use std::sync::{Arc, Mutex};

/// Handler double that records its calls.
///
/// # Example
///
/// ```
/// use guiapi_core::{ActionResult, Args, Dispatcher, RegistryBuilder};
/// use guiapi_testing::RecordingHandler;
/// use std::sync::Arc;
///
/// # async fn example() {
/// let recorder = RecordingHandler::replying(ActionResult::NoOp);
/// let mut builder = RegistryBuilder::new();
/// builder.register("ping", recorder.handler());
/// let dispatcher = Dispatcher::new(Arc::new(builder.freeze()));
///
/// dispatcher.dispatch("ping", Args::new(b"1".to_vec())).await;
/// assert_eq!(recorder.calls(), 1);
/// assert_eq!(recorder.last_args().unwrap().as_bytes(), b"1");
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct RecordingHandler {
    calls: Arc<Mutex<Vec<Args>>>,
    reply: Result<ActionResult, String>,
}

impl RecordingHandler {
    /// A handler that always succeeds with `result`.
    #[must_use]
    pub fn replying(result: ActionResult) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            reply: Ok(result),
        }
    }

    /// A handler that always fails with a handler error carrying `message`.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            reply: Err(message.into()),
        }
    }

    /// A registrable handler sharing this recorder's call log.
    #[must_use]
    pub fn handler(&self) -> impl Handler + 'static {
        let recorder = self.clone();
        move |args: Args| {
            recorder.calls.lock().unwrap().push(args);
            let reply = recorder.reply.clone();
            async move { reply.map_err(ActionError::Handler) }
        }
    }

    /// Number of invocations so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Payload of the most recent invocation.
    #[must_use]
    pub fn last_args(&self) -> Option<Args> {
        self.calls.lock().unwrap().last().cloned()
    }
}
