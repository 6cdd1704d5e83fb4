//! `SQLite` part storage.
//!
//! Parts live in a single `parts` table created by the migrations under
//! `inventory/migrations`:
//!
//! ```sql
//! CREATE TABLE parts (
//!     id TEXT PRIMARY KEY NOT NULL,
//!     code TEXT NOT NULL DEFAULT '',
//!     location TEXT NOT NULL DEFAULT '',
//!     family TEXT NOT NULL DEFAULT ''
//! );
//! ```

use super::{Part, PartRepository, PartStoreError, Result, StoreFuture};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

/// SQLite-backed part repository.
///
/// # Example
///
/// ```ignore
/// let repo = SqlitePartRepository::connect("sqlite://inventory.db?mode=rwc", 5).await?;
/// repo.migrate().await?;
/// let parts = repo.all().await?;
/// ```
#[derive(Clone, Debug)]
pub struct SqlitePartRepository {
    pool: SqlitePool,
}

impl SqlitePartRepository {
    /// Wrap an existing pool.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool on `url`, creating the database file if it is missing.
    ///
    /// # Errors
    ///
    /// Returns [`PartStoreError::Database`] if the URL is invalid or the
    /// database cannot be opened.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        tracing::info!(url, max_connections, "Connected to SQLite");
        Ok(Self::new(pool))
    }

    /// Open a private in-memory database with the schema applied.
    ///
    /// The pool holds a single connection that is never recycled, since
    /// every new `:memory:` connection would see an empty database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await?;

        let repo = Self::new(pool);
        repo.migrate().await?;
        Ok(repo)
    }

    /// Apply pending schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`PartStoreError::Migration`] if a migration fails.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| PartStoreError::Migration(e.to_string()))?;
        tracing::debug!("Migrations applied");
        Ok(())
    }

    async fn upsert(&self, part: &Part) -> Result<()> {
        sqlx::query(
            "INSERT INTO parts (id, code, location, family) VALUES (?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                 code = excluded.code,
                 location = excluded.location,
                 family = excluded.family",
        )
        .bind(&part.id)
        .bind(&part.code)
        .bind(&part.location)
        .bind(&part.family)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

impl PartRepository for SqlitePartRepository {
    fn by_id<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Option<Part>> {
        Box::pin(async move {
            let part = sqlx::query_as::<_, Part>(
                "SELECT id, code, location, family FROM parts WHERE id = ?",
            )
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
            Ok(part)
        })
    }

    fn create(&self) -> StoreFuture<'_, Part> {
        Box::pin(async {
            let part = Part::blank();
            tracing::debug!(id = %part.id, "Allocated part id");
            Ok(part)
        })
    }

    fn store(&self, part: Part) -> StoreFuture<'_, ()> {
        Box::pin(async move { self.upsert(&part).await })
    }

    fn delete_by_id<'a>(&'a self, id: &'a str) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let result = sqlx::query("DELETE FROM parts WHERE id = ?")
                .bind(id)
                .execute(&self.pool)
                .await?;
            tracing::debug!(id, deleted = result.rows_affected(), "Deleted part");
            Ok(())
        })
    }

    fn all(&self) -> StoreFuture<'_, Vec<Part>> {
        Box::pin(async move {
            let parts = sqlx::query_as::<_, Part>(
                "SELECT id, code, location, family FROM parts ORDER BY code, id",
            )
            .fetch_all(&self.pool)
            .await?;
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
            location: "Shelf 3".to_string(),
            family: "Resistors".to_string(),
        }
    }

    #[tokio::test]
    async fn store_then_load() {
        let repo = SqlitePartRepository::in_memory().await.unwrap();
        repo.store(part("p1", "R10K")).await.unwrap();
        assert_eq!(repo.by_id("p1").await.unwrap(), Some(part("p1", "R10K")));
        assert_eq!(repo.by_id("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn store_updates_existing_row() {
        let repo = SqlitePartRepository::in_memory().await.unwrap();
        repo.store(part("p1", "R10K")).await.unwrap();
        repo.store(part("p1", "R22K")).await.unwrap();

        let all = repo.all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].code, "R22K");
    }

    #[tokio::test]
    async fn create_inserts_nothing_until_stored() {
        let repo = SqlitePartRepository::in_memory().await.unwrap();
        let created = repo.create().await.unwrap();
        assert!(created.code.is_empty());
        assert_eq!(repo.by_id(&created.id).await.unwrap(), None);

        repo.store(created.clone()).await.unwrap();
        assert_eq!(repo.by_id(&created.id).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn delete_and_list() {
        let repo = SqlitePartRepository::in_memory().await.unwrap();
        repo.store(part("b", "C2")).await.unwrap();
        repo.store(part("a", "C1")).await.unwrap();
        repo.store(part("c", "C1")).await.unwrap();

        repo.delete_by_id("c").await.unwrap();
        repo.delete_by_id("nope").await.unwrap();

        let ids: Vec<String> = repo.all().await.unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn migrate_is_repeatable() {
        let repo = SqlitePartRepository::in_memory().await.unwrap();
        repo.migrate().await.unwrap();
    }
}
