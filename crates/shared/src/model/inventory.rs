use crate::errors::ParseEnumError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    pub product_id: String,
    pub available_quantity: i64,
    pub reserved_quantity: i64,
    pub updated_at: i64,
}

impl Inventory {
    pub fn empty(product_id: impl Into<String>, now: i64) -> Self {
        Self {
            product_id: product_id.into(),
            available_quantity: 0,
            reserved_quantity: 0,
            updated_at: now,
        }
    }

    /// Quantities after applying `quantity` with `op`, or `None` if either
    /// would go negative. The record itself is left untouched.
    pub fn preview(&self, quantity: i64, op: InventoryOp) -> Option<(i64, i64)> {
        let available = self.available_quantity.checked_add(quantity)?;
        let reserved = self
            .reserved_quantity
            .checked_sub(quantity * op.reserved_factor())?;

        if available < 0 || reserved < 0 {
            return None;
        }

        Some((available, reserved))
    }
}

/// How a signed quantity delta is applied to a stock record.
///
/// Every op adds the delta to the available quantity. Reserve and release
/// move the same amount in the opposite direction on the reserved quantity,
/// so reserving `-3` takes three units out of available stock and holds them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InventoryOp {
    Reserve,
    Release,
    Restock,
}

impl InventoryOp {
    pub const ALL: [InventoryOp; 3] = [
        InventoryOp::Reserve,
        InventoryOp::Release,
        InventoryOp::Restock,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InventoryOp::Reserve => "reserve",
            InventoryOp::Release => "release",
            InventoryOp::Restock => "restock",
        }
    }

    fn reserved_factor(&self) -> i64 {
        match self {
            InventoryOp::Reserve | InventoryOp::Release => 1,
            InventoryOp::Restock => 0,
        }
    }
}

impl fmt::Display for InventoryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InventoryOp {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        InventoryOp::ALL
            .into_iter()
            .find(|op| op.as_str() == wanted)
            .ok_or_else(|| ParseEnumError::new("inventory operation", s))
    }
}
