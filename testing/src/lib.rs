//! # guiapi testing
//!
//! Testing utilities for guiapi handlers, dispatchers and block trees.
//!
//! This crate provides:
//! - Handler doubles that record their invocations
//! - Envelope assertion helpers
//! - proptest strategies for [`Block`] trees
//!
//! ## Example
//!
//! ```
//! use guiapi_core::block::text;
//! use guiapi_core::{ActionResult, Args};
//! use guiapi_testing::helpers::{dispatcher_with, expect_replace};
//!
//! # async fn example() {
//! let dispatcher = dispatcher_with(|b| {
//!     b.register("hello", |_args: Args| async {
//!         ActionResult::replace("#container", text("hello"))
//!     });
//! });
//! let envelope = dispatcher.dispatch("hello", Args::default()).await;
//! let (target, html) = expect_replace(&envelope);
//! assert_eq!((target, html), ("#container", "hello"));
//! # }
//! ```

use guiapi_core::Block;

mod handler_mocks;

pub use handler_mocks::RecordingHandler;

/// Dispatcher construction and envelope assertions.
pub mod helpers {
    #![allow(clippy::panic)] // Assertion helpers fail the test by panicking

    use guiapi_core::{Dispatcher, Envelope, ErrorKind, RegistryBuilder};
    use std::sync::Arc;

    /// Build a dispatcher over a registry populated by `install`.
    #[must_use]
    pub fn dispatcher_with(install: impl FnOnce(&mut RegistryBuilder)) -> Dispatcher {
        Dispatcher::new(Arc::new(RegistryBuilder::new().install(install).freeze()))
    }

    /// Unwrap a replace envelope into `(target, html)`.
    ///
    /// # Panics
    ///
    /// Panics if the envelope is not a replace.
    #[must_use]
    pub fn expect_replace(envelope: &Envelope) -> (&str, &str) {
        match envelope {
            Envelope::Replace { target, html } => (target.as_str(), html.as_str()),
            other => panic!("expected a replace envelope, got {other:?}"),
        }
    }

    /// Unwrap a redirect envelope into its location.
    ///
    /// # Panics
    ///
    /// Panics if the envelope is not a redirect.
    #[must_use]
    pub fn expect_redirect(envelope: &Envelope) -> &str {
        match envelope {
            Envelope::Redirect { location } => location.as_str(),
            other => panic!("expected a redirect envelope, got {other:?}"),
        }
    }

    /// Unwrap an error envelope into `(kind, message)`.
    ///
    /// # Panics
    ///
    /// Panics if the envelope is not an error.
    #[must_use]
    pub fn expect_error(envelope: &Envelope) -> (ErrorKind, &str) {
        match envelope {
            Envelope::Error { kind, message } => (*kind, message.as_str()),
            other => panic!("expected an error envelope, got {other:?}"),
        }
    }

    /// Parse a raw JSON response body into an envelope.
    ///
    /// # Panics
    ///
    /// Panics if the body is not a valid envelope.
    #[must_use]
    pub fn parse_envelope(body: &[u8]) -> Envelope {
        serde_json::from_slice(body).unwrap_or_else(|err| {
            panic!(
                "body is not an envelope ({err}): {}",
                String::from_utf8_lossy(body)
            )
        })
    }
}

/// proptest strategies for block trees.
pub mod properties {
    use super::Block;
    use guiapi_core::block::{AttrValue, Attributes};
    use proptest::prelude::*;

    /// Tag names, mixing containers and void elements.
    pub fn arb_tag() -> impl Strategy<Value = String> {
        prop::sample::select(vec![
            "div", "span", "p", "td", "tr", "button", "label", "input", "br", "img",
        ])
        .prop_map(str::to_string)
    }

    /// Attribute values, including characters that need escaping.
    pub fn arb_attr_value() -> impl Strategy<Value = AttrValue> {
        prop_oneof![
            "[a-zA-Z0-9 <>&\"'/=#-]{0,12}".prop_map(AttrValue::Str),
            any::<bool>().prop_map(AttrValue::Flag),
        ]
    }

    /// Attribute lists of up to four entries.
    pub fn arb_attributes() -> impl Strategy<Value = Attributes> {
        prop::collection::vec(("[a-z]{1,8}", arb_attr_value()), 0..4).prop_map(|pairs| {
            pairs
                .into_iter()
                .fold(Attributes::new(), |attrs, (key, value)| attrs.attr(key, value))
        })
    }

    /// Arbitrary text content, including markup characters.
    pub fn arb_text() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 <>&\"']{0,16}"
    }

    /// Block trees up to a few levels deep.
    pub fn arb_block() -> impl Strategy<Value = Block> {
        let leaf = arb_text().prop_map(Block::text);
        leaf.prop_recursive(4, 32, 4, |inner| {
            prop_oneof![
                (arb_tag(), arb_attributes(), prop::collection::vec(inner.clone(), 0..4))
                    .prop_map(|(tag, attributes, children)| Block::Element {
                        tag,
                        attributes,
                        children,
                    }),
                prop::collection::vec(inner, 0..4).prop_map(Block::fragment),
            ]
        })
    }
}
