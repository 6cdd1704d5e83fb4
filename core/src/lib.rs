//! # guiapi core
//!
//! Server-driven UI patching: handlers registered under action names return
//! declarative [`Block`] trees wrapped in an [`ActionResult`], and the
//! [`Dispatcher`] turns them into JSON envelopes that a small client script
//! applies to the live DOM.
//!
//! ## Pieces
//!
//! - [`block`]: plain-data markup trees and their deterministic serializer
//! - [`registry`]: handler trait, startup builder and the frozen [`Registry`]
//! - [`dispatch`]: name resolution, invocation, panic containment, envelopes
//! - [`result`]: the `replace` / `redirect` / `noop` / `error` vocabulary
//! - [`page`]: full-document rendering for plain navigation requests
//!
//! ## Example
//!
//! ```
//! use guiapi_core::block::{div, text};
//! use guiapi_core::{ActionResult, Args, Dispatcher, Envelope, RegistryBuilder};
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let registry = RegistryBuilder::new()
//!     .install(|b| {
//!         b.register("greet", |args: Args| async move {
//!             let name: String = args.decode()?;
//!             ActionResult::replace("#container", div(None, vec![text(format!("Hi {name}"))]))
//!         });
//!     })
//!     .freeze();
//!
//! let dispatcher = Dispatcher::new(Arc::new(registry));
//! let envelope = dispatcher.dispatch("greet", Args::new(br#""Ada""#.to_vec())).await;
//! assert_eq!(
//!     envelope,
//!     Envelope::Replace {
//!         target: "#container".into(),
//!         html: "<div>Hi Ada</div>".into(),
//!     }
//! );
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod block;
pub mod dispatch;
pub mod error;
pub mod page;
pub mod registry;
pub mod result;

pub use block::{AttrValue, Attributes, Block};
pub use dispatch::Dispatcher;
pub use error::{ActionError, ErrorKind};
pub use page::{render_page, Shell, SLOT_SELECTOR};
pub use registry::{Args, Handler, HandlerFuture, Registry, RegistryBuilder};
pub use result::{ActionResult, Envelope};
