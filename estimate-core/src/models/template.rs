use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{LineItem, Unit, new_record_id};

/// A reusable named bundle of line-item definitions that seeds a new
/// estimate's items when applied. No quantities: those are entered once the
/// template is on a concrete estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub items: Vec<TemplateItem>,
}

/// One position inside a template: name, unit and price only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateItem {
    pub name: String,
    #[serde(default)]
    pub unit: Unit,
    #[serde(default)]
    pub price: Decimal,
}

impl Template {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: new_record_id(),
            name: name.into(),
            category: category.into(),
            items: Vec::new(),
        }
    }

    /// Instantiates every template position as an estimate line item with a
    /// fresh id and zero quantity.
    pub fn instantiate(&self) -> Vec<LineItem> {
        self.items
            .iter()
            .map(|item| LineItem::new(item.name.clone(), item.unit, Decimal::ZERO, item.price))
            .collect()
    }
}
