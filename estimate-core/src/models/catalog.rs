use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{LineItem, Unit, new_record_id};

/// A record in the catalog collection.
///
/// Reusable items and their categories live in the same collection and are
/// told apart by the `kind` tag on the serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CatalogEntry {
    Item(CatalogItem),
    Category(Category),
}

impl CatalogEntry {
    pub fn id(&self) -> &str {
        match self {
            Self::Item(item) => &item.id,
            Self::Category(category) => &category.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Item(item) => &item.name,
            Self::Category(category) => &category.name,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Item(_) => "item",
            Self::Category(_) => "category",
        }
    }

    /// Category name an item belongs to, or the category's own name.
    pub fn category(&self) -> Option<&str> {
        match self {
            Self::Item(item) => item.category.as_deref(),
            Self::Category(category) => Some(&category.name),
        }
    }
}

/// A reusable priced position, independent of any estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub unit: Unit,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl CatalogItem {
    pub fn new(
        name: impl Into<String>,
        unit: Unit,
        price: Decimal,
        category: Option<String>,
    ) -> Self {
        Self {
            id: new_record_id(),
            name: name.into(),
            unit,
            price,
            category,
            created_at: Utc::now(),
        }
    }

    /// Instantiates the catalog entry as an estimate line item with a fresh
    /// id and the given quantity.
    pub fn to_line_item(&self, quantity: Decimal) -> LineItem {
        let mut item = LineItem::new(self.name.clone(), self.unit, quantity, self.price);
        item.category = self.category.clone();
        item
    }
}

/// A named grouping for catalog items, with a display sort order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sort_order: i32,
}
