//! Products and their bill of materials.
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::{Decimal, RawMaterialId};

/// Server-assigned identifier for products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price.
    pub value: Decimal,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, value: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: String,
    pub value: Decimal,
}

impl ProductRequest {
    pub fn new(name: impl Into<String>, value: Decimal) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// One line of a product's bill of materials.
///
/// `raw_material_name` is a snapshot taken by the service when the entry was
/// read; it is never re-derived from the raw material collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomEntry {
    pub raw_material_id: RawMaterialId,
    pub raw_material_name: String,
    pub required_quantity: Decimal,
}

/// Body of an add-entry or update-entry call. Updates repeat the raw
/// material that the path already names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomEntryRequest {
    pub raw_material_id: RawMaterialId,
    pub required_quantity: Decimal,
}

/// A product together with its bill of materials.
///
/// Entries are unique by raw material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    #[serde(rename = "rawMaterials", default)]
    pub bom: Vec<BomEntry>,
}

impl ProductDetail {
    pub fn id(&self) -> ProductId {
        self.product.id
    }

    pub fn bom_entry(&self, raw_material_id: RawMaterialId) -> Option<&BomEntry> {
        self.bom.iter().find(|e| e.raw_material_id == raw_material_id)
    }

    pub fn uses(&self, raw_material_id: RawMaterialId) -> bool {
        self.bom_entry(raw_material_id).is_some()
    }
}
