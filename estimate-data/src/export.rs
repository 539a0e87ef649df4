//! Serializing collections to a single versioned JSON document.
//!
//! Exports are tagged with `kind` so imports never have to guess what a
//! document contains; the structural sniffing in [`crate::import`] exists
//! only for untagged legacy arrays.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use estimate_core::models::{CatalogEntry, Estimate, Template};
use estimate_core::{EstimateStore, StoreError};

/// Format version written into every export.
pub const EXPORT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A complete export: version tag, timestamp, and one tagged payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    #[serde(flatten)]
    pub payload: ExportPayload,
}

/// What an export carries, discriminated by the serialized `kind` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ExportPayload {
    Estimates {
        estimates: Vec<Estimate>,
    },
    Items {
        items: Vec<CatalogEntry>,
    },
    Templates {
        templates: Vec<Template>,
    },
    Everything {
        estimates: Vec<Estimate>,
        items: Vec<CatalogEntry>,
        templates: Vec<Template>,
    },
}

impl ExportDocument {
    fn new(payload: ExportPayload) -> Self {
        Self {
            version: EXPORT_VERSION,
            exported_at: Utc::now(),
            payload,
        }
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub async fn export_estimates<S: EstimateStore + ?Sized>(
    store: &S,
) -> Result<ExportDocument, ExportError> {
    let estimates = store.list_estimates().await?;
    Ok(ExportDocument::new(ExportPayload::Estimates { estimates }))
}

pub async fn export_items<S: EstimateStore + ?Sized>(
    store: &S,
) -> Result<ExportDocument, ExportError> {
    let items = store.list_catalog().await?;
    Ok(ExportDocument::new(ExportPayload::Items { items }))
}

pub async fn export_templates<S: EstimateStore + ?Sized>(
    store: &S,
) -> Result<ExportDocument, ExportError> {
    let templates = store.list_templates().await?;
    Ok(ExportDocument::new(ExportPayload::Templates { templates }))
}

/// All three collections in one document. The three reads are independent
/// transactions; there is no cross-collection snapshot guarantee.
pub async fn export_everything<S: EstimateStore + ?Sized>(
    store: &S,
) -> Result<ExportDocument, ExportError> {
    let estimates = store.list_estimates().await?;
    let items = store.list_catalog().await?;
    let templates = store.list_templates().await?;
    Ok(ExportDocument::new(ExportPayload::Everything {
        estimates,
        items,
        templates,
    }))
}
