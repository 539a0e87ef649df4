use async_trait::async_trait;

use estimate_core::db::factory::{StoreConfig, StoreFactory};
use estimate_core::db::repository::{EstimateStore, StoreError};

use crate::store::SqliteStore;

/// [`StoreFactory`] for SQLite.
///
/// Register this with a [`estimate_core::db::StoreRegistry`] to make the
/// `"sqlite"` backend available:
///
/// ```rust,no_run
/// use estimate_core::db::StoreRegistry;
/// use estimate_db_sqlite::SqliteStoreFactory;
///
/// let mut registry = StoreRegistry::new();
/// registry.register(Box::new(SqliteStoreFactory));
/// ```
pub struct SqliteStoreFactory;

#[async_trait]
impl StoreFactory for SqliteStoreFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Open the database described by `config.connection_string`.
    ///
    /// Accepted connection-string values are sqlx SQLite URLs:
    /// * `sqlite:estimates.db?mode=rwc` — a file, created if missing.
    /// * `sqlite::memory:` — an ephemeral in-memory database (tests).
    ///
    /// Opening runs migrations and seeds the default catalog/templates into
    /// empty collections, so a first launch is immediately usable.
    async fn create(&self, config: &StoreConfig) -> Result<Box<dyn EstimateStore>, StoreError> {
        let store = SqliteStore::open(&config.connection_string).await?;
        store.seed_defaults().await?;
        Ok(Box::new(store))
    }
}

#[cfg(test)]
mod tests {
    use estimate_core::db::factory::{StoreConfig, StoreFactory};

    use super::SqliteStoreFactory;

    #[test]
    fn backend_name_is_sqlite() {
        assert_eq!(SqliteStoreFactory.backend_name(), "sqlite");
    }

    /// Full round-trip: factory → SqliteStore with an in-memory DB, seeded.
    #[tokio::test]
    async fn creates_in_memory_store_with_defaults() {
        let config = StoreConfig {
            backend: "sqlite".to_string(),
            connection_string: "sqlite::memory:".to_string(),
        };

        let store = SqliteStoreFactory
            .create(&config)
            .await
            .expect("Should create in-memory store");

        let catalog = store.list_catalog().await.expect("Should list catalog");
        let templates = store.list_templates().await.expect("Should list templates");
        assert!(!catalog.is_empty());
        assert!(!templates.is_empty());
    }
}
