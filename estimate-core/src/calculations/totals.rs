//! Subtotal, discount and final-total derivation for an estimate.
//!
//! The contract, in full:
//!
//! | value            | definition                                 |
//! |------------------|--------------------------------------------|
//! | line total       | quantity × price, negatives treated as 0   |
//! | subtotal         | Σ line totals (0 for an empty list)        |
//! | discount amount  | subtotal × discount / 100                  |
//! | final total      | subtotal − discount amount                 |
//!
//! The discount percentage is deliberately not range-checked: values outside
//! 0–100 pass straight through, matching how the estimate form behaves.
//! Results are exact decimals; rounding to two places happens at display
//! time only.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use estimate_core::calculations::compute;
//! use estimate_core::models::{LineItem, Unit};
//!
//! let items = vec![
//!     LineItem::new("Sheet", Unit::SquareMeter, dec!(2), dec!(100)),
//!     LineItem::new("Profile", Unit::LinearMeter, dec!(1), dec!(50)),
//! ];
//!
//! let totals = compute(&items, dec!(10));
//!
//! assert_eq!(totals.subtotal, dec!(250));
//! assert_eq!(totals.discount_amount, dec!(25.0));
//! assert_eq!(totals.final_total, dec!(225.0));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::max;
use crate::models::LineItem;

/// The three derived monetary values for an estimate, recomputed together
/// whenever any factor changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateTotals {
    /// Sum of all line totals before discount.
    pub subtotal: Decimal,

    /// The discount percentage the amounts were derived from.
    pub discount_percent: Decimal,

    /// subtotal × discount / 100.
    pub discount_amount: Decimal,

    /// subtotal − discount amount.
    pub final_total: Decimal,
}

/// quantity × price with negative factors clamped to zero.
///
/// Missing numeric fields are already zero by the time a record is
/// deserialized, so this never fails.
pub fn line_total_parts(quantity: Decimal, price: Decimal) -> Decimal {
    max(quantity, Decimal::ZERO) * max(price, Decimal::ZERO)
}

/// Line total of a single item.
pub fn line_total(item: &LineItem) -> Decimal {
    line_total_parts(item.quantity, item.price)
}

/// Full recomputation over the current item list.
pub fn compute(items: &[LineItem], discount_percent: Decimal) -> EstimateTotals {
    let subtotal: Decimal = items.iter().map(line_total).sum();
    let discount_amount = subtotal * discount_percent / Decimal::ONE_HUNDRED;
    let final_total = subtotal - discount_amount;

    EstimateTotals {
        subtotal,
        discount_percent,
        discount_amount,
        final_total,
    }
}
