use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations;

use super::{EstimateStatus, LineItem, new_record_id};

/// A single customer quote: descriptive fields, room metrics, the ordered
/// line items, and the redundantly persisted totals.
///
/// `total`, `discount` and `final_total` are caches of what the calculator
/// derives from `items` + `discount`; [`Estimate::recalculate`] is the only
/// thing that writes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub address: String,
    #[serde(default = "default_rooms")]
    pub rooms: u32,
    #[serde(default = "default_date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub status: EstimateStatus,
    #[serde(default)]
    pub area: Decimal,
    #[serde(default)]
    pub perimeter: Decimal,
    #[serde(default)]
    pub height: Decimal,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub total: Decimal,
    #[serde(default)]
    pub discount: Decimal,
    #[serde(default)]
    pub final_total: Decimal,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

fn default_rooms() -> u32 {
    1
}

fn default_date() -> NaiveDate {
    Utc::now().date_naive()
}

impl Estimate {
    /// A blank draft with the stock defaults the form starts from.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: new_record_id(),
            name: "New estimate".to_string(),
            object: "Apartment".to_string(),
            address: String::new(),
            rooms: 1,
            date: now.date_naive(),
            status: EstimateStatus::Draft,
            area: Decimal::ZERO,
            perimeter: Decimal::ZERO,
            height: Decimal::ZERO,
            items: Vec::new(),
            notes: String::new(),
            total: Decimal::ZERO,
            discount: Decimal::ZERO,
            final_total: Decimal::ZERO,
            created_at: now,
            updated_at: now,
        }
    }

    /// Deep copy with a fresh id, fresh item ids, today's date, fresh
    /// timestamps, and the status reset to draft. Every other descriptive
    /// field is carried over unchanged.
    pub fn duplicate(&self) -> Self {
        let now = Utc::now();
        Self {
            id: new_record_id(),
            name: format!("Copy: {}", self.name),
            date: now.date_naive(),
            status: EstimateStatus::Draft,
            items: self.items.iter().map(LineItem::with_new_id).collect(),
            created_at: now,
            updated_at: now,
            ..self.clone()
        }
    }

    /// Recomputes the cached totals from the current items and discount.
    ///
    /// Always a full pass over the item list; there is no incremental path.
    pub fn recalculate(&mut self) {
        for item in &mut self.items {
            item.total = calculations::line_total(item);
        }
        let totals = calculations::compute(&self.items, self.discount);
        self.total = totals.subtotal;
        self.final_total = totals.final_total;
    }

    /// Refreshes `updated_at`. Called by the save path so that the store can
    /// stay a verbatim put/get round trip.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for Estimate {
    fn default() -> Self {
        Self::new()
    }
}
