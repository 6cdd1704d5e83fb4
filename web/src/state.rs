//! Shared state for the guiapi routes.

use guiapi_core::{Dispatcher, Registry};
use std::sync::Arc;

/// State shared by the action and health handlers.
///
/// Holds the dispatcher over the frozen registry. Cloning is cheap: the
/// registry sits behind an `Arc` and is never written after startup.
///
/// # Examples
///
/// ```
/// use guiapi_core::RegistryBuilder;
/// use guiapi_web::GuiState;
///
/// let state = GuiState::new(RegistryBuilder::new().freeze());
/// assert!(state.registry().is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct GuiState {
    dispatcher: Dispatcher,
}

impl GuiState {
    /// Wrap a frozen registry.
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        Self::from_shared(Arc::new(registry))
    }

    /// Wrap an already shared registry.
    #[must_use]
    pub const fn from_shared(registry: Arc<Registry>) -> Self {
        Self {
            dispatcher: Dispatcher::new(registry),
        }
    }

    /// The dispatcher.
    #[must_use]
    pub const fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// The registry behind the dispatcher.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        self.dispatcher.registry()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_is_clone() {
        // Axum requires Clone state
        fn assert_clone<T: Clone + Send + Sync>() {}
        assert_clone::<GuiState>();
    }
}
