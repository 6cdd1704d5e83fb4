//! Repository doubles shared by the integration tests.

#![allow(dead_code)]

use inventory::parts::{InMemoryPartRepository, Part, PartRepository, PartStoreError, StoreFuture};

fn unavailable() -> PartStoreError {
    PartStoreError::Database("disk unavailable".to_string())
}

/// Repository whose every call fails.
pub struct FailingPartRepository;

impl PartRepository for FailingPartRepository {
    fn by_id<'a>(&'a self, _id: &'a str) -> StoreFuture<'a, Option<Part>> {
        Box::pin(async { Err(unavailable()) })
    }

    fn create(&self) -> StoreFuture<'_, Part> {
        Box::pin(async { Err(unavailable()) })
    }

    fn store(&self, _part: Part) -> StoreFuture<'_, ()> {
        Box::pin(async { Err(unavailable()) })
    }

    fn delete_by_id<'a>(&'a self, _id: &'a str) -> StoreFuture<'a, ()> {
        Box::pin(async { Err(unavailable()) })
    }

    fn all(&self) -> StoreFuture<'_, Vec<Part>> {
        Box::pin(async { Err(unavailable()) })
    }
}

/// In-memory repository whose writes fail.
#[derive(Clone, Default)]
pub struct ReadOnlyPartRepository {
    pub inner: InMemoryPartRepository,
}

impl PartRepository for ReadOnlyPartRepository {
    fn by_id<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Option<Part>> {
        self.inner.by_id(id)
    }

    fn create(&self) -> StoreFuture<'_, Part> {
        self.inner.create()
    }

    fn store(&self, _part: Part) -> StoreFuture<'_, ()> {
        Box::pin(async { Err(unavailable()) })
    }

    fn delete_by_id<'a>(&'a self, id: &'a str) -> StoreFuture<'a, ()> {
        self.inner.delete_by_id(id)
    }

    fn all(&self) -> StoreFuture<'_, Vec<Part>> {
        self.inner.all()
    }
}
