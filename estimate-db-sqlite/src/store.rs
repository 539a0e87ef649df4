use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use sqlx::{Row, sqlite::SqlitePool};
use tracing::info;

use estimate_core::defaults;
use estimate_core::models::{CatalogEntry, Estimate, EstimateStatus, Template};
use estimate_core::{EstimateStore, SeedOutcome, StoreError};

/// SQLite-backed [`EstimateStore`].
///
/// Records are stored as JSON documents; each table carries the extra
/// columns its secondary indexes need (date/status for estimates,
/// kind/name/category for the catalog, category for templates). Puts are
/// single-statement upserts, so a save is atomic per record. Migrations are
/// additive only: re-opening an existing database never destroys data.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connects and brings the schema up to date. Safe to call against an
    /// existing database; creating already-existing collections is a no-op.
    pub async fn open(database_url: &str) -> Result<Self, StoreError> {
        let pool = SqlitePool::connect(database_url)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Estimates with the given status, via the status index.
    pub async fn find_estimates_by_status(
        &self,
        status: EstimateStatus,
    ) -> Result<Vec<Estimate>, StoreError> {
        let rows = sqlx::query("SELECT body FROM estimates WHERE status = ?")
            .bind(status.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        rows.iter().map(decode_row).collect()
    }

    /// Catalog entries filed under the given category, via the category index.
    pub async fn find_catalog_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<CatalogEntry>, StoreError> {
        let rows = sqlx::query("SELECT body FROM catalog WHERE category = ?")
            .bind(category)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        rows.iter().map(decode_row).collect()
    }

    async fn count(&self, table: &str) -> Result<i64, StoreError> {
        // Table names are the three fixed collection names, never user input.
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))
    }
}

fn encode<T: Serialize>(record: &T) -> Result<String, StoreError> {
    serde_json::to_string(record).map_err(|e| StoreError::Database(e.to_string()))
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, StoreError> {
    serde_json::from_str(body).map_err(|e| StoreError::Corrupt(e.to_string()))
}

fn decode_row<T: DeserializeOwned>(row: &sqlx::sqlite::SqliteRow) -> Result<T, StoreError> {
    let body: String = row
        .try_get("body")
        .map_err(|e| StoreError::Database(e.to_string()))?;
    decode(&body)
}

#[async_trait]
impl EstimateStore for SqliteStore {
    async fn list_estimates(&self) -> Result<Vec<Estimate>, StoreError> {
        let rows = sqlx::query("SELECT body FROM estimates")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        rows.iter().map(decode_row).collect()
    }

    async fn get_estimate(&self, id: &str) -> Result<Estimate, StoreError> {
        let row = sqlx::query("SELECT body FROM estimates WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?
            .ok_or(StoreError::NotFound)?;

        decode_row(&row)
    }

    async fn put_estimate(&self, estimate: &Estimate) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO estimates (id, date, status, body) VALUES (?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                date = excluded.date, status = excluded.status, body = excluded.body",
        )
        .bind(&estimate.id)
        .bind(estimate.date.to_string())
        .bind(estimate.status.as_str())
        .bind(encode(estimate)?)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    async fn delete_estimate(&self, id: &str) -> Result<(), StoreError> {
        // Deleting a missing id is deliberately not an error.
        sqlx::query("DELETE FROM estimates WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    async fn list_catalog(&self) -> Result<Vec<CatalogEntry>, StoreError> {
        let rows = sqlx::query("SELECT body FROM catalog")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        rows.iter().map(decode_row).collect()
    }

    async fn get_catalog_entry(&self, id: &str) -> Result<CatalogEntry, StoreError> {
        let row = sqlx::query("SELECT body FROM catalog WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?
            .ok_or(StoreError::NotFound)?;

        decode_row(&row)
    }

    async fn put_catalog_entry(&self, entry: &CatalogEntry) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO catalog (id, kind, name, category, body) VALUES (?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                kind = excluded.kind, name = excluded.name,
                category = excluded.category, body = excluded.body",
        )
        .bind(entry.id())
        .bind(entry.kind())
        .bind(entry.name())
        .bind(entry.category())
        .bind(encode(entry)?)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    async fn delete_catalog_entry(&self, id: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM catalog WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    async fn list_templates(&self) -> Result<Vec<Template>, StoreError> {
        let rows = sqlx::query("SELECT body FROM templates")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        rows.iter().map(decode_row).collect()
    }

    async fn get_template(&self, id: &str) -> Result<Template, StoreError> {
        let row = sqlx::query("SELECT body FROM templates WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?
            .ok_or(StoreError::NotFound)?;

        decode_row(&row)
    }

    async fn put_template(&self, template: &Template) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO templates (id, category, body) VALUES (?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                category = excluded.category, body = excluded.body",
        )
        .bind(&template.id)
        .bind(&template.category)
        .bind(encode(template)?)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    async fn delete_template(&self, id: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM templates WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    async fn seed_defaults(&self) -> Result<SeedOutcome, StoreError> {
        let mut outcome = SeedOutcome::default();

        if self.count("catalog").await? == 0 {
            for entry in defaults::default_catalog() {
                self.put_catalog_entry(&entry).await?;
                outcome.catalog_entries += 1;
            }
        }

        if self.count("templates").await? == 0 {
            for template in defaults::default_templates() {
                self.put_template(&template).await?;
                outcome.templates += 1;
            }
        }

        if outcome != SeedOutcome::default() {
            info!(
                catalog = outcome.catalog_entries,
                templates = outcome.templates,
                "seeded default records"
            );
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use sqlx::sqlite::SqlitePoolOptions;

    use estimate_core::models::{CatalogItem, Category, LineItem, Unit};

    use super::*;

    async fn setup_test_db() -> SqliteStore {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");

        let store = SqliteStore::new_with_pool(pool).await;
        store
            .run_migrations()
            .await
            .expect("Failed to run migrations");
        store
    }

    fn sample_estimate() -> Estimate {
        let mut estimate = Estimate::new();
        estimate.name = "Bedroom ceiling".to_string();
        estimate.address = "12 Main St".to_string();
        estimate.items = vec![
            LineItem::new("Sheet", Unit::SquareMeter, dec!(18.5), dec!(610)),
            LineItem::new("Profile", Unit::LinearMeter, dec!(17), dec!(310)),
        ];
        estimate.discount = dec!(5);
        estimate.recalculate();
        estimate
    }

    #[tokio::test]
    async fn test_put_and_get_estimate_round_trips() {
        let store = setup_test_db().await;
        let estimate = sample_estimate();

        store
            .put_estimate(&estimate)
            .await
            .expect("Should put estimate");
        let fetched = store
            .get_estimate(&estimate.id)
            .await
            .expect("Should fetch estimate");

        assert_eq!(fetched, estimate);
    }

    #[tokio::test]
    async fn test_get_estimate_not_found() {
        let store = setup_test_db().await;

        let result = store.get_estimate("no-such-id").await;

        assert_eq!(result, Err(StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_put_estimate_replaces_by_id() {
        let store = setup_test_db().await;
        let mut estimate = sample_estimate();
        store
            .put_estimate(&estimate)
            .await
            .expect("Should put estimate");

        estimate.name = "Renamed".to_string();
        estimate.status = EstimateStatus::Sent;
        store
            .put_estimate(&estimate)
            .await
            .expect("Should upsert estimate");

        let all = store.list_estimates().await.expect("Should list");
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Renamed");
        assert_eq!(all[0].status, EstimateStatus::Sent);
    }

    #[tokio::test]
    async fn test_delete_estimate_missing_id_is_no_op() {
        let store = setup_test_db().await;
        let estimate = sample_estimate();
        store
            .put_estimate(&estimate)
            .await
            .expect("Should put estimate");

        store
            .delete_estimate("no-such-id")
            .await
            .expect("Delete of a missing id should succeed");

        let all = store.list_estimates().await.expect("Should list");
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_estimate_removes_record() {
        let store = setup_test_db().await;
        let estimate = sample_estimate();
        store
            .put_estimate(&estimate)
            .await
            .expect("Should put estimate");

        store
            .delete_estimate(&estimate.id)
            .await
            .expect("Should delete estimate");

        let result = store.get_estimate(&estimate.id).await;
        assert_eq!(result, Err(StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_find_estimates_by_status() {
        let store = setup_test_db().await;
        let draft = sample_estimate();
        let mut sent = sample_estimate();
        sent.status = EstimateStatus::Sent;

        store.put_estimate(&draft).await.expect("Should put draft");
        store.put_estimate(&sent).await.expect("Should put sent");

        let drafts = store
            .find_estimates_by_status(EstimateStatus::Draft)
            .await
            .expect("Should query by status");
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].id, draft.id);

        let accepted = store
            .find_estimates_by_status(EstimateStatus::Accepted)
            .await
            .expect("Should query by status");
        assert!(accepted.is_empty());
    }

    #[tokio::test]
    async fn test_catalog_round_trip_for_both_kinds() {
        let store = setup_test_db().await;
        let item = CatalogEntry::Item(CatalogItem::new(
            "Sheet",
            Unit::SquareMeter,
            dec!(610),
            Some("Core works".to_string()),
        ));
        let category = CatalogEntry::Category(Category {
            id: "cat-test".to_string(),
            name: "Core works".to_string(),
            sort_order: 0,
        });

        store
            .put_catalog_entry(&item)
            .await
            .expect("Should put item");
        store
            .put_catalog_entry(&category)
            .await
            .expect("Should put category");

        let fetched_item = store
            .get_catalog_entry(item.id())
            .await
            .expect("Should fetch item");
        let fetched_category = store
            .get_catalog_entry("cat-test")
            .await
            .expect("Should fetch category");

        assert_eq!(fetched_item, item);
        assert_eq!(fetched_category, category);
    }

    #[tokio::test]
    async fn test_find_catalog_by_category() {
        let store = setup_test_db().await;
        store
            .seed_defaults()
            .await
            .expect("Should seed defaults");

        let core = store
            .find_catalog_by_category("Core works")
            .await
            .expect("Should query by category");

        // Three items plus the category record itself, which is indexed
        // under its own name.
        assert_eq!(core.len(), 4);
    }

    #[tokio::test]
    async fn test_template_round_trip() {
        let store = setup_test_db().await;
        let template = defaults::default_templates().remove(0);

        store
            .put_template(&template)
            .await
            .expect("Should put template");
        let fetched = store
            .get_template(&template.id)
            .await
            .expect("Should fetch template");

        assert_eq!(fetched, template);
    }

    #[tokio::test]
    async fn test_seeding_twice_never_duplicates() {
        let store = setup_test_db().await;

        let first = store.seed_defaults().await.expect("Should seed");
        let second = store.seed_defaults().await.expect("Should seed again");

        assert_eq!(first.catalog_entries, 13);
        assert_eq!(first.templates, 2);
        assert_eq!(second, SeedOutcome::default());

        let catalog = store.list_catalog().await.expect("Should list catalog");
        assert_eq!(catalog.len(), 13);
    }

    #[tokio::test]
    async fn test_seeding_skips_non_empty_catalog() {
        let store = setup_test_db().await;
        let item = CatalogEntry::Item(CatalogItem::new("Custom", Unit::Piece, dec!(1), None));
        store
            .put_catalog_entry(&item)
            .await
            .expect("Should put item");

        let outcome = store.seed_defaults().await.expect("Should seed");

        assert_eq!(outcome.catalog_entries, 0);
        assert_eq!(outcome.templates, 2);
        let catalog = store.list_catalog().await.expect("Should list catalog");
        assert_eq!(catalog.len(), 1);
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let store = setup_test_db().await;

        store
            .run_migrations()
            .await
            .expect("Re-running migrations should be a no-op");
    }

    #[tokio::test]
    async fn test_undecodable_body_is_a_corrupt_error() {
        let store = setup_test_db().await;
        sqlx::query(
            "INSERT INTO estimates (id, date, status, body) VALUES ('bad', '2026-01-01', 'draft', '{not json')",
        )
        .execute(store.pool())
        .await
        .expect("Should insert raw row");

        let result = store.get_estimate("bad").await;

        assert!(matches!(result, Err(StoreError::Corrupt(_))));
    }
}
