//! # Inventory
//!
//! A small parts inventory: a list of parts, a page per part and an edit
//! form, all driven by guiapi actions. Pages are rendered on the server;
//! buttons post actions whose results patch `#container` or navigate.
//!
//! - [`parts`]: the `Part` record and its repositories
//! - [`gui`]: layout, views, page routes and action handlers
//! - [`config`]: environment configuration
//! - [`server`]: wiring everything into an axum application

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod gui;
pub mod parts;
pub mod server;

pub use config::Config;
