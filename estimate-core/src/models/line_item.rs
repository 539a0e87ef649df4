use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::new_record_id;

/// Unit of measure for a line item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    #[default]
    #[serde(rename = "m2")]
    SquareMeter,
    #[serde(rename = "lm")]
    LinearMeter,
    #[serde(rename = "pc")]
    Piece,
    #[serde(rename = "set")]
    Set,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SquareMeter => "m2",
            Self::LinearMeter => "lm",
            Self::Piece => "pc",
            Self::Set => "set",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "m2" => Some(Self::SquareMeter),
            "lm" => Some(Self::LinearMeter),
            "pc" => Some(Self::Piece),
            "set" => Some(Self::Set),
            _ => None,
        }
    }
}

/// One priced unit of work or material inside an estimate.
///
/// `quantity` and `price` default to zero when absent from a serialized
/// record; older exports omit fields freely. `total` is a cache of
/// quantity × price that the calculator, not the item, keeps consistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub unit: Unit,
    #[serde(default)]
    pub quantity: Decimal,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub total: Decimal,
}

impl LineItem {
    pub fn new(name: impl Into<String>, unit: Unit, quantity: Decimal, price: Decimal) -> Self {
        Self {
            id: new_record_id(),
            name: name.into(),
            unit,
            quantity,
            price,
            category: None,
            total: crate::calculations::line_total_parts(quantity, price),
        }
    }

    /// Copy with a freshly minted id; used by estimate duplication.
    pub fn with_new_id(&self) -> Self {
        Self {
            id: new_record_id(),
            ..self.clone()
        }
    }
}
