//! Axum integration for guiapi.
//!
//! Exposes the action dispatcher over HTTP and gives page routes a common
//! error type.
//!
//! # Request Flow
//!
//! 1. **Client script** posts raw JSON arguments to `/guiapi/:name`
//! 2. **Correlation middleware** opens a request span
//! 3. **`dispatch_action`** hands the body to the [`Dispatcher`](guiapi_core::Dispatcher)
//! 4. **Envelope** is returned as JSON with the status of its outcome
//! 5. **Client script** replaces the target's content or navigates
//!
//! Plain page routes live in the application and render through
//! [`guiapi_core::render_page`]; failed navigations return an [`AppError`],
//! which renders a best-effort HTML page.
//!
//! # Example
//!
//! ```ignore
//! use guiapi_core::RegistryBuilder;
//! use guiapi_web::{guiapi_router, GuiState};
//!
//! let registry = RegistryBuilder::new().install(parts::install).freeze();
//! let app = guiapi_router(GuiState::new(registry));
//! axum::serve(listener, app).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::AppError;
pub use extractors::CorrelationId;
pub use middleware::{correlation_id_layer, CORRELATION_ID_HEADER};
pub use router::guiapi_router;
pub use state::GuiState;

/// Result type alias for page handlers.
pub type WebResult<T> = Result<T, AppError>;
