//! In-memory part storage.

use super::{Part, PartRepository, PartStoreError, StoreFuture};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// `HashMap`-backed repository.
///
/// Clones share the same data.
///
/// # Example
///
/// ```
/// use inventory::parts::{InMemoryPartRepository, PartRepository};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let repo = InMemoryPartRepository::new();
/// let mut part = repo.create().await?;
/// part.code = "C1".to_string();
/// repo.store(part.clone()).await?;
///
/// assert_eq!(repo.by_id(&part.id).await?, Some(part));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryPartRepository {
    parts: Arc<RwLock<HashMap<String, Part>>>,
}

impl InMemoryPartRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding `parts`.
    #[must_use]
    pub fn with_parts(parts: impl IntoIterator<Item = Part>) -> Self {
        let parts = parts.into_iter().map(|p| (p.id.clone(), p)).collect();
        Self {
            parts: Arc::new(RwLock::new(parts)),
        }
    }

    /// Number of stored parts.
    ///
    /// # Errors
    ///
    /// Returns [`PartStoreError::Database`] if the lock is poisoned.
    pub fn len(&self) -> Result<usize, PartStoreError> {
        Ok(self.parts.read().map_err(poisoned)?.len())
    }

    /// Returns `true` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`PartStoreError::Database`] if the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, PartStoreError> {
        self.len().map(|n| n == 0)
    }
}

#[allow(clippy::needless_pass_by_value)]
fn poisoned<T>(_: std::sync::PoisonError<T>) -> PartStoreError {
    PartStoreError::Database("part map lock poisoned".to_string())
}

impl PartRepository for InMemoryPartRepository {
    fn by_id<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Option<Part>> {
        Box::pin(async move { Ok(self.parts.read().map_err(poisoned)?.get(id).cloned()) })
    }

    fn create(&self) -> StoreFuture<'_, Part> {
        Box::pin(async { Ok(Part::blank()) })
    }

    fn store(&self, part: Part) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            self.parts
                .write()
                .map_err(poisoned)?
                .insert(part.id.clone(), part);
            Ok(())
        })
    }

    fn delete_by_id<'a>(&'a self, id: &'a str) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            self.parts.write().map_err(poisoned)?.remove(id);
            Ok(())
        })
    }

    fn all(&self) -> StoreFuture<'_, Vec<Part>> {
        Box::pin(async move {
            let mut parts: Vec<Part> = self.parts.read().map_err(poisoned)?.values().cloned().collect();
            parts.sort_by(|a, b| a.code.cmp(&b.code).then_with(|| a.id.cmp(&b.id)));
            Ok(parts)
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn part(id: &str, code: &str) -> Part {
        Part {
            id: id.to_string(),
            code: code.to_string(),
            location: "L".to_string(),
            family: "F".to_string(),
        }
    }

    #[tokio::test]
    async fn create_writes_nothing_until_stored() {
        let repo = InMemoryPartRepository::new();
        let created = repo.create().await.unwrap();
        assert!(repo.is_empty().unwrap());

        repo.store(created.clone()).await.unwrap();
        assert_eq!(repo.by_id(&created.id).await.unwrap(), Some(created));
        assert_eq!(repo.len().unwrap(), 1);
    }

    #[tokio::test]
    async fn store_overwrites() {
        let repo = InMemoryPartRepository::with_parts([part("p1", "A")]);
        repo.store(part("p1", "B")).await.unwrap();
        assert_eq!(repo.by_id("p1").await.unwrap().unwrap().code, "B");
        assert_eq!(repo.len().unwrap(), 1);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let repo = InMemoryPartRepository::with_parts([part("p1", "A")]);
        repo.delete_by_id("p1").await.unwrap();
        repo.delete_by_id("p1").await.unwrap();
        assert!(repo.is_empty().unwrap());
        assert_eq!(repo.by_id("p1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn all_is_sorted_by_code_then_id() {
        let repo = InMemoryPartRepository::with_parts([
            part("p3", "B"),
            part("p2", "A"),
            part("p1", "B"),
        ]);
        let ids: Vec<String> = repo.all().await.unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["p2", "p1", "p3"]);
    }
}
