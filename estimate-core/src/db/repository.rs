use async_trait::async_trait;
use thiserror::Error;

use crate::models::{CatalogEntry, Estimate, Template};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// What a seeding pass actually inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedOutcome {
    pub catalog_entries: usize,
    pub templates: usize,
}

/// Durable keyed storage for the three record collections: estimates, the
/// catalog (items + categories), and templates.
///
/// Every collection gets the same four primitives:
///
/// * `list_*` — every record, no ordering guarantee; ordering is the
///   caller's concern.
/// * `get_*` — point lookup by id; missing id is [`StoreError::NotFound`].
/// * `put_*` — full-record upsert by id. The only mutation primitive;
///   partial updates are read-modify-write at the caller.
/// * `delete_*` — removes the record; deleting a missing id is a no-op,
///   not an error.
///
/// A put followed by a get returns the record unchanged; implementations
/// must not stamp timestamps or otherwise rewrite records on the way in.
#[async_trait]
pub trait EstimateStore: Send + Sync {
    // Estimates
    async fn list_estimates(&self) -> Result<Vec<Estimate>, StoreError>;
    async fn get_estimate(&self, id: &str) -> Result<Estimate, StoreError>;
    async fn put_estimate(&self, estimate: &Estimate) -> Result<(), StoreError>;
    async fn delete_estimate(&self, id: &str) -> Result<(), StoreError>;

    // Catalog (items + categories)
    async fn list_catalog(&self) -> Result<Vec<CatalogEntry>, StoreError>;
    async fn get_catalog_entry(&self, id: &str) -> Result<CatalogEntry, StoreError>;
    async fn put_catalog_entry(&self, entry: &CatalogEntry) -> Result<(), StoreError>;
    async fn delete_catalog_entry(&self, id: &str) -> Result<(), StoreError>;

    // Templates
    async fn list_templates(&self) -> Result<Vec<Template>, StoreError>;
    async fn get_template(&self, id: &str) -> Result<Template, StoreError>;
    async fn put_template(&self, template: &Template) -> Result<(), StoreError>;
    async fn delete_template(&self, id: &str) -> Result<(), StoreError>;

    /// Seeds the default catalog and templates into their collections, but
    /// only into collections that are currently empty. Idempotent: calling
    /// it repeatedly never duplicates records.
    async fn seed_defaults(&self) -> Result<SeedOutcome, StoreError>;
}
