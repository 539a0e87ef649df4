//! In-memory implementation of [`EstimateStore`].
//!
//! This is the fallback backend: when opening the durable store fails, the
//! application seeds one of these with the built-in defaults and stays
//! usable (edits are simply lost on exit). It doubles as the test store.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use crate::defaults;
use crate::models::{CatalogEntry, Estimate, Template};

use super::repository::{EstimateStore, SeedOutcome, StoreError};

#[derive(Default)]
pub struct MemoryStore {
    estimates: Mutex<HashMap<String, Estimate>>,
    catalog: Mutex<HashMap<String, CatalogEntry>>,
    templates: Mutex<HashMap<String, Template>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with the default catalog and templates.
    pub async fn with_defaults() -> Self {
        let store = Self::new();
        // Seeding an empty in-memory store cannot fail.
        let _ = store.seed_defaults().await;
        store
    }

    fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
        // A poisoned lock means another thread panicked mid-insert; the map
        // itself is still a valid HashMap, so keep going with its contents.
        mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl EstimateStore for MemoryStore {
    async fn list_estimates(&self) -> Result<Vec<Estimate>, StoreError> {
        Ok(Self::lock(&self.estimates).values().cloned().collect())
    }

    async fn get_estimate(&self, id: &str) -> Result<Estimate, StoreError> {
        Self::lock(&self.estimates)
            .get(id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn put_estimate(&self, estimate: &Estimate) -> Result<(), StoreError> {
        Self::lock(&self.estimates).insert(estimate.id.clone(), estimate.clone());
        Ok(())
    }

    async fn delete_estimate(&self, id: &str) -> Result<(), StoreError> {
        Self::lock(&self.estimates).remove(id);
        Ok(())
    }

    async fn list_catalog(&self) -> Result<Vec<CatalogEntry>, StoreError> {
        Ok(Self::lock(&self.catalog).values().cloned().collect())
    }

    async fn get_catalog_entry(&self, id: &str) -> Result<CatalogEntry, StoreError> {
        Self::lock(&self.catalog)
            .get(id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn put_catalog_entry(&self, entry: &CatalogEntry) -> Result<(), StoreError> {
        Self::lock(&self.catalog).insert(entry.id().to_string(), entry.clone());
        Ok(())
    }

    async fn delete_catalog_entry(&self, id: &str) -> Result<(), StoreError> {
        Self::lock(&self.catalog).remove(id);
        Ok(())
    }

    async fn list_templates(&self) -> Result<Vec<Template>, StoreError> {
        Ok(Self::lock(&self.templates).values().cloned().collect())
    }

    async fn get_template(&self, id: &str) -> Result<Template, StoreError> {
        Self::lock(&self.templates)
            .get(id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn put_template(&self, template: &Template) -> Result<(), StoreError> {
        Self::lock(&self.templates).insert(template.id.clone(), template.clone());
        Ok(())
    }

    async fn delete_template(&self, id: &str) -> Result<(), StoreError> {
        Self::lock(&self.templates).remove(id);
        Ok(())
    }

    async fn seed_defaults(&self) -> Result<SeedOutcome, StoreError> {
        let mut outcome = SeedOutcome::default();

        {
            let mut catalog = Self::lock(&self.catalog);
            if catalog.is_empty() {
                for entry in defaults::default_catalog() {
                    catalog.insert(entry.id().to_string(), entry);
                    outcome.catalog_entries += 1;
                }
            }
        }

        {
            let mut templates = Self::lock(&self.templates);
            if templates.is_empty() {
                for template in defaults::default_templates() {
                    templates.insert(template.id.clone(), template);
                    outcome.templates += 1;
                }
            }
        }

        debug!(
            catalog = outcome.catalog_entries,
            templates = outcome.templates,
            "seeded in-memory store"
        );
        Ok(outcome)
    }
}
