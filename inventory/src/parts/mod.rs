//! Parts domain: the record type and the repository the GUI talks to.
//!
//! The GUI never touches storage directly. Actions and pages go through
//! [`PartRepository`], which has two implementations:
//!
//! - [`SqlitePartRepository`]: the database file used by the server
//! - [`InMemoryPartRepository`]: fast, deterministic storage for tests and
//!   throwaway runs

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

mod memory;
mod sqlite;

pub use memory::InMemoryPartRepository;
pub use sqlite::SqlitePartRepository;

/// An inventory record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Part {
    /// Unique identifier, a UUID v4 string.
    pub id: String,
    /// Part code, shown as the part's title.
    pub code: String,
    /// Storage location.
    pub location: String,
    /// Part family.
    pub family: String,
}

impl Part {
    /// A blank part with a fresh identifier.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            ..Self::default()
        }
    }
}

/// Errors from part storage.
#[derive(Error, Debug)]
pub enum PartStoreError {
    /// No part with the given id.
    #[error("part {0} not found")]
    NotFound(String),

    /// Database connection or query failed.
    #[error("database error: {0}")]
    Database(String),

    /// Schema migration failed.
    #[error("migration failed: {0}")]
    Migration(String),
}

impl From<sqlx::Error> for PartStoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<PartStoreError> for guiapi_core::ActionError {
    fn from(err: PartStoreError) -> Self {
        Self::handler(err)
    }
}

/// Convenience alias for repository results.
pub type Result<T> = std::result::Result<T, PartStoreError>;

/// Boxed future returned by repository methods.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Storage for parts.
///
/// Methods return boxed futures so the repository can be shared as
/// `Arc<dyn PartRepository>` between handlers and page routes.
pub trait PartRepository: Send + Sync {
    /// Load a part. A missing id is `Ok(None)`.
    fn by_id<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Option<Part>>;

    /// Allocate a blank part with a fresh id.
    ///
    /// Nothing is written until the part is passed to [`store`](Self::store).
    fn create(&self) -> StoreFuture<'_, Part>;

    /// Insert or update `part`.
    fn store(&self, part: Part) -> StoreFuture<'_, ()>;

    /// Delete a part. Deleting a missing id succeeds.
    fn delete_by_id<'a>(&'a self, id: &'a str) -> StoreFuture<'a, ()>;

    /// All parts ordered by code, then id.
    fn all(&self) -> StoreFuture<'_, Vec<Part>>;
}
