//! Importing JSON documents into the store.
//!
//! Two accepted shapes:
//!
//! 1. A tagged [`ExportDocument`](crate::export::ExportDocument), the
//!    format this crate writes.
//! 2. A bare JSON array (legacy exports), classified by structural
//!    sniffing: objects carrying `items` + `name` + `object` are estimates,
//!    objects carrying `name` + `unit` + `price` are catalog items.
//!
//! Records missing an id get a fresh one. Imports upsert by id on purpose:
//! re-importing an edited export updates the matching records instead of
//! failing or silently duplicating them.
//!
//! Records are applied one `put` at a time. If a put fails mid-sequence,
//! the records already written stay written; imports are incremental, not
//! transactional across records or collections.

use serde_json::Value;
use thiserror::Error;
use tracing::info;

use estimate_core::models::{CatalogEntry, CatalogItem, Estimate, Template, new_record_id};
use estimate_core::{EstimateStore, StoreError};

use crate::export::{ExportDocument, ExportPayload};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Invalid JSON: {0}")]
    Parse(String),

    #[error("Unrecognized import shape: {0}")]
    UnrecognizedShape(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// How many records an import wrote into each collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub estimates: usize,
    pub items: usize,
    pub templates: usize,
}

impl ImportReport {
    pub fn total(&self) -> usize {
        self.estimates + self.items + self.templates
    }
}

/// Imports a JSON document (tagged or legacy array) into the store.
pub async fn import_json<S: EstimateStore + ?Sized>(
    store: &S,
    json: &str,
) -> Result<ImportReport, ImportError> {
    let value: Value = serde_json::from_str(json).map_err(|e| ImportError::Parse(e.to_string()))?;

    let report = match &value {
        Value::Object(map) if map.contains_key("kind") => {
            let document: ExportDocument =
                serde_json::from_value(value.clone()).map_err(|e| ImportError::Parse(e.to_string()))?;
            apply_payload(store, document.payload).await?
        }
        Value::Array(elements) => import_untagged_array(store, elements).await?,
        _ => {
            return Err(ImportError::UnrecognizedShape(
                "expected a tagged export document or a JSON array".to_string(),
            ));
        }
    };

    info!(
        estimates = report.estimates,
        items = report.items,
        templates = report.templates,
        "import finished"
    );
    Ok(report)
}

async fn apply_payload<S: EstimateStore + ?Sized>(
    store: &S,
    payload: ExportPayload,
) -> Result<ImportReport, ImportError> {
    let mut report = ImportReport::default();
    match payload {
        ExportPayload::Estimates { estimates } => {
            report.estimates = apply_estimates(store, estimates).await?;
        }
        ExportPayload::Items { items } => {
            report.items = apply_items(store, items).await?;
        }
        ExportPayload::Templates { templates } => {
            report.templates = apply_templates(store, templates).await?;
        }
        ExportPayload::Everything {
            estimates,
            items,
            templates,
        } => {
            report.estimates = apply_estimates(store, estimates).await?;
            report.items = apply_items(store, items).await?;
            report.templates = apply_templates(store, templates).await?;
        }
    }
    Ok(report)
}

/// Structural sniffing for untagged legacy arrays.
async fn import_untagged_array<S: EstimateStore + ?Sized>(
    store: &S,
    elements: &[Value],
) -> Result<ImportReport, ImportError> {
    let Some(first) = elements.first() else {
        // Nothing to import; an empty array is a valid, empty export.
        return Ok(ImportReport::default());
    };

    let Value::Object(keys) = first else {
        return Err(ImportError::UnrecognizedShape(
            "array elements must be objects".to_string(),
        ));
    };

    let mut report = ImportReport::default();
    if keys.contains_key("items") && keys.contains_key("name") && keys.contains_key("object") {
        let estimates: Vec<Estimate> = serde_json::from_value(Value::Array(elements.to_vec()))
            .map_err(|e| ImportError::Parse(e.to_string()))?;
        report.estimates = apply_estimates(store, estimates).await?;
    } else if keys.contains_key("name") && keys.contains_key("unit") && keys.contains_key("price") {
        let items: Vec<CatalogItem> = serde_json::from_value(Value::Array(elements.to_vec()))
            .map_err(|e| ImportError::Parse(e.to_string()))?;
        report.items =
            apply_items(store, items.into_iter().map(CatalogEntry::Item).collect()).await?;
    } else {
        let found: Vec<&str> = keys.keys().map(String::as_str).collect();
        return Err(ImportError::UnrecognizedShape(format!(
            "neither an estimate (items+name+object) nor a catalog item (name+unit+price); found keys {found:?}"
        )));
    }
    Ok(report)
}

async fn apply_estimates<S: EstimateStore + ?Sized>(
    store: &S,
    estimates: Vec<Estimate>,
) -> Result<usize, ImportError> {
    let mut written = 0;
    for mut estimate in estimates {
        if estimate.id.is_empty() {
            estimate.id = new_record_id();
        }
        for item in &mut estimate.items {
            if item.id.is_empty() {
                item.id = new_record_id();
            }
        }
        // Imported totals are not trusted; the calculator re-derives them.
        estimate.recalculate();
        store.put_estimate(&estimate).await?;
        written += 1;
    }
    Ok(written)
}

async fn apply_items<S: EstimateStore + ?Sized>(
    store: &S,
    entries: Vec<CatalogEntry>,
) -> Result<usize, ImportError> {
    let mut written = 0;
    for mut entry in entries {
        match &mut entry {
            CatalogEntry::Item(item) if item.id.is_empty() => item.id = new_record_id(),
            CatalogEntry::Category(category) if category.id.is_empty() => {
                category.id = new_record_id()
            }
            _ => {}
        }
        store.put_catalog_entry(&entry).await?;
        written += 1;
    }
    Ok(written)
}

async fn apply_templates<S: EstimateStore + ?Sized>(
    store: &S,
    templates: Vec<Template>,
) -> Result<usize, ImportError> {
    let mut written = 0;
    for mut template in templates {
        if template.id.is_empty() {
            template.id = new_record_id();
        }
        store.put_template(&template).await?;
        written += 1;
    }
    Ok(written)
}
