//! Action handlers and the registry that names them.
//!
//! Feature modules register their actions on a [`RegistryBuilder`] while the
//! server is being assembled. [`RegistryBuilder::freeze`] turns the builder
//! into a [`Registry`], an immutable table that request tasks share through
//! an `Arc` and read without locking.
//!
//! # Example
//!
//! ```
//! use guiapi_core::registry::RegistryBuilder;
//! use guiapi_core::{ActionResult, Args};
//!
//! fn install_ping(builder: &mut RegistryBuilder) {
//!     builder.register("ping", |_args: Args| async { ActionResult::noop() });
//! }
//!
//! let registry = RegistryBuilder::new().install(install_ping).freeze();
//! assert!(registry.lookup("ping").is_some());
//! assert!(registry.lookup("pong").is_none());
//! ```

use crate::error::ActionError;
use crate::result::ActionResult;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Raw, undecoded argument payload of an action request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args(Vec<u8>);

impl Args {
    /// Wrap a raw payload.
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Encode `value` as a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if `value` cannot be encoded.
    pub fn json<T: serde::Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_vec(value).map(Self)
    }

    /// Decode the payload as JSON into the handler's input type.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::ArgumentDecode`] when the payload is not valid
    /// JSON for `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ActionError> {
        Ok(serde_json::from_slice(&self.0)?)
    }

    /// The payload bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Future returned by a [`Handler`].
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<ActionResult, ActionError>> + Send>>;

/// Server-side implementation of one action.
///
/// Any `Fn(Args) -> impl Future<Output = Result<ActionResult, ActionError>>`
/// closure is a handler. Handlers own the decoding of their arguments and
/// keep no state between calls beyond what their collaborators persist.
pub trait Handler: Send + Sync {
    /// Run the action with its raw arguments.
    fn call(&self, args: Args) -> HandlerFuture;
}

impl<F, Fut> Handler for F
where
    F: Fn(Args) -> Fut + Send + Sync,
    Fut: Future<Output = Result<ActionResult, ActionError>> + Send + 'static,
{
    fn call(&self, args: Args) -> HandlerFuture {
        Box::pin(self(args))
    }
}

/// Mutable table used while the server is assembled.
#[derive(Default)]
pub struct RegistryBuilder {
    handlers: HashMap<String, Arc<dyn Handler>>,
}

impl RegistryBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `name`, replacing any earlier registration.
    pub fn register<H>(&mut self, name: impl Into<String>, handler: H) -> &mut Self
    where
        H: Handler + 'static,
    {
        self.register_shared(name, Arc::new(handler))
    }

    /// Register an already shared handler under `name`.
    pub fn register_shared(
        &mut self,
        name: impl Into<String>,
        handler: Arc<dyn Handler>,
    ) -> &mut Self {
        let name = name.into();
        if self.handlers.insert(name.clone(), handler).is_some() {
            tracing::warn!(action = %name, "action registered twice; keeping the latest handler");
        }
        self
    }

    /// Run a feature module's initializer against this builder.
    #[must_use]
    pub fn install(mut self, initializer: impl FnOnce(&mut Self)) -> Self {
        initializer(&mut self);
        self
    }

    /// Freeze the table.
    #[must_use]
    pub fn freeze(self) -> Registry {
        tracing::debug!(actions = self.handlers.len(), "action registry frozen");
        Registry {
            handlers: self.handlers,
        }
    }
}

impl fmt::Debug for RegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field("actions", &sorted_names(&self.handlers))
            .finish()
    }
}

/// Immutable name → handler table.
pub struct Registry {
    handlers: HashMap<String, Arc<dyn Handler>>,
}

impl Registry {
    /// Find the handler registered under `name`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Arc<dyn Handler>> {
        self.handlers.get(name)
    }

    /// Registered action names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        sorted_names(&self.handlers)
    }

    /// Number of registered actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("actions", &self.names())
            .finish()
    }
}

fn sorted_names(handlers: &HashMap<String, Arc<dyn Handler>>) -> Vec<&str> {
    let mut names: Vec<&str> = handlers.keys().map(String::as_str).collect();
    names.sort_unstable();
    names
}
