//! Raw materials and their stock levels.
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::Decimal;

/// Server-assigned identifier for raw materials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawMaterialId(pub u64);

impl From<u64> for RawMaterialId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for RawMaterialId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMaterial {
    pub id: RawMaterialId,
    pub name: String,
    pub stock_quantity: Decimal,
}

impl RawMaterial {
    pub fn new(id: RawMaterialId, name: impl Into<String>, stock_quantity: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            stock_quantity,
        }
    }
}

/// Body of a create or update call. The id always comes from the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMaterialRequest {
    pub name: String,
    pub stock_quantity: Decimal,
}

impl RawMaterialRequest {
    pub fn new(name: impl Into<String>, stock_quantity: Decimal) -> Self {
        Self {
            name: name.into(),
            stock_quantity,
        }
    }
}
