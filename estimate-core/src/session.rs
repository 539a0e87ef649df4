//! The one in-memory working copy of an estimate.
//!
//! An [`EditSession`] owns the estimate being edited and is the only thing
//! that mutates it: every mutation recomputes the cached totals in the same
//! step, so the invariant `total == quantity × price` on each item (and the
//! subtotal/final-total pair on the estimate) holds after every call.
//!
//! Persisting is explicit: [`EditSession::finish`] validates, stamps
//! `updated_at` and hands back the record for the caller to `put`. Dropping
//! the session discards the edits, which is exactly what navigating away
//! without saving does.
//!
//! Only one session exists at a time in practice; that is a product rule,
//! nothing here enforces it.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{CatalogItem, Estimate, EstimateStatus, LineItem, Template, Unit};

/// Local validation, rejected before anything reaches the store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("item name must not be empty")]
    EmptyItemName,

    #[error("estimate name must not be empty")]
    EmptyEstimateName,
}

pub struct EditSession {
    estimate: Estimate,
}

impl EditSession {
    /// Starts editing a blank draft.
    pub fn new_estimate() -> Self {
        Self {
            estimate: Estimate::new(),
        }
    }

    /// Starts editing an existing record (a working copy; the stored record
    /// is untouched until the session's result is put back).
    pub fn open(estimate: Estimate) -> Self {
        let mut estimate = estimate;
        estimate.recalculate();
        Self { estimate }
    }

    /// Starts editing a duplicate of `original`.
    pub fn duplicate_of(original: &Estimate) -> Self {
        Self {
            estimate: original.duplicate(),
        }
    }

    pub fn estimate(&self) -> &Estimate {
        &self.estimate
    }

    // ── descriptive fields ───────────────────────────────────────────────

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.estimate.name = name.into();
    }

    pub fn set_object(&mut self, object: impl Into<String>) {
        self.estimate.object = object.into();
    }

    pub fn set_address(&mut self, address: impl Into<String>) {
        self.estimate.address = address.into();
    }

    pub fn set_rooms(&mut self, rooms: u32) {
        self.estimate.rooms = rooms;
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.estimate.date = date;
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.estimate.notes = notes.into();
    }

    /// Status is a free field edit; no transition graph is enforced.
    pub fn set_status(&mut self, status: EstimateStatus) {
        self.estimate.status = status;
    }

    pub fn set_metrics(&mut self, area: Decimal, perimeter: Decimal, height: Decimal) {
        self.estimate.area = area;
        self.estimate.perimeter = perimeter;
        self.estimate.height = height;
    }

    // ── items and discount ───────────────────────────────────────────────

    pub fn set_discount(&mut self, percent: Decimal) {
        self.estimate.discount = percent;
        self.estimate.recalculate();
    }

    /// Adds a free-form item. The id of the new item is returned.
    pub fn add_item(
        &mut self,
        name: &str,
        unit: Unit,
        quantity: Decimal,
        price: Decimal,
        category: Option<String>,
    ) -> Result<String, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyItemName);
        }
        let mut item = LineItem::new(name, unit, quantity, price);
        item.category = category;
        let id = item.id.clone();
        self.estimate.items.push(item);
        self.estimate.recalculate();
        Ok(id)
    }

    /// Adds a catalog item with the given quantity.
    pub fn add_catalog_item(&mut self, catalog_item: &CatalogItem, quantity: Decimal) -> String {
        let item = catalog_item.to_line_item(quantity);
        let id = item.id.clone();
        self.estimate.items.push(item);
        self.estimate.recalculate();
        id
    }

    /// Appends every position of the template with zero quantity.
    pub fn apply_template(&mut self, template: &Template) {
        self.estimate.items.extend(template.instantiate());
        self.estimate.recalculate();
    }

    /// Removes the item; returns whether it was present.
    pub fn remove_item(&mut self, item_id: &str) -> bool {
        let before = self.estimate.items.len();
        self.estimate.items.retain(|item| item.id != item_id);
        let removed = self.estimate.items.len() != before;
        if removed {
            self.estimate.recalculate();
        }
        removed
    }

    pub fn rename_item(&mut self, item_id: &str, name: &str) -> Result<bool, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyItemName);
        }
        Ok(self.mutate_item(item_id, |item| item.name = name.to_string()))
    }

    pub fn set_item_unit(&mut self, item_id: &str, unit: Unit) -> bool {
        self.mutate_item(item_id, |item| item.unit = unit)
    }

    pub fn set_item_quantity(&mut self, item_id: &str, quantity: Decimal) -> bool {
        self.mutate_item(item_id, |item| item.quantity = quantity)
    }

    pub fn set_item_price(&mut self, item_id: &str, price: Decimal) -> bool {
        self.mutate_item(item_id, |item| item.price = price)
    }

    fn mutate_item(&mut self, item_id: &str, apply: impl FnOnce(&mut LineItem)) -> bool {
        let Some(index) = self.estimate.items.iter().position(|i| i.id == item_id) else {
            return false;
        };
        apply(&mut self.estimate.items[index]);
        self.estimate.recalculate();
        true
    }

    // ── completion ───────────────────────────────────────────────────────

    /// Validates and yields the record ready to persist.
    pub fn finish(mut self) -> Result<Estimate, ValidationError> {
        if self.estimate.name.trim().is_empty() {
            return Err(ValidationError::EmptyEstimateName);
        }
        self.estimate.recalculate();
        self.estimate.touch();
        Ok(self.estimate)
    }
}
