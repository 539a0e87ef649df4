//! CSV price-list loading into the catalog.
//!
//! Installers maintain their price lists as spreadsheets; this reads the
//! exported CSV and upserts catalog items from it.
//!
//! The CSV format:
//! - `name`: position name (e.g. "MSD Premium white matte sheet, installed")
//! - `unit`: unit code (`m2`, `lm`, `pc`, `set`)
//! - `price`: price per unit
//! - `category`: category name (may be empty)

use std::collections::HashMap;
use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use estimate_core::models::{CatalogEntry, CatalogItem, Unit};
use estimate_core::{EstimateStore, StoreError};

#[derive(Debug, Error)]
pub enum PriceListError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<csv::Error> for PriceListError {
    fn from(err: csv::Error) -> Self {
        PriceListError::CsvParse(err.to_string())
    }
}

/// A single record from the price-list CSV file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PriceListRecord {
    pub name: String,
    pub unit: Unit,
    pub price: Decimal,
    #[serde(default)]
    pub category: Option<String>,
}

/// Loader for price-list data from CSV files.
///
/// Works against any [`EstimateStore`] backend. Loading is idempotent by
/// item name: a record whose name already exists in the catalog replaces
/// that item (keeping its id) instead of inserting a duplicate.
pub struct PriceListLoader;

impl PriceListLoader {
    /// Parse price-list records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<PriceListRecord>, PriceListError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: PriceListRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Load price-list records into the catalog. Returns the number of
    /// records written.
    pub async fn load<S: EstimateStore + ?Sized>(
        store: &S,
        records: &[PriceListRecord],
    ) -> Result<usize, PriceListError> {
        // Existing item ids by name, so re-loading a price list updates in
        // place instead of duplicating.
        let existing: HashMap<String, String> = store
            .list_catalog()
            .await?
            .into_iter()
            .filter_map(|entry| match entry {
                CatalogEntry::Item(item) => Some((item.name, item.id)),
                CatalogEntry::Category(_) => None,
            })
            .collect();

        let mut written = 0;
        for record in records {
            let mut item = CatalogItem::new(
                record.name.clone(),
                record.unit,
                record.price,
                record.category.clone(),
            );
            if let Some(id) = existing.get(&record.name) {
                item.id = id.clone();
            }
            store.put_catalog_entry(&CatalogEntry::Item(item)).await?;
            written += 1;
        }

        Ok(written)
    }
}
