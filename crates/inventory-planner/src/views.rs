//! Derived views.
//!
//! Plain functions over the current store contents. Nothing here is cached:
//! call them on every read so they follow their inputs.

use crate::model::{Decimal, ProductDetail, RawMaterial};

/// Raw materials that can still be added to `detail`'s bill of materials.
///
/// Without a selected detail every raw material is available.
pub fn available_raw_materials(
    raw_materials: &[RawMaterial],
    detail: Option<&ProductDetail>,
) -> Vec<RawMaterial> {
    match detail {
        None => raw_materials.to_vec(),
        Some(detail) => raw_materials
            .iter()
            .filter(|m| !detail.uses(m.id))
            .cloned()
            .collect(),
    }
}

/// Stock health of a raw material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockStatus {
    Out,
    Low,
    Healthy,
}

const LOW_STOCK_LIMIT: Decimal = Decimal::TEN;

impl StockStatus {
    /// `0` is out of stock, anything below 10 is low.
    pub fn of(quantity: Decimal) -> Self {
        if quantity <= Decimal::ZERO {
            StockStatus::Out
        } else if quantity < LOW_STOCK_LIMIT {
            StockStatus::Low
        } else {
            StockStatus::Healthy
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StockStatus::Out => "Out of Stock",
            StockStatus::Low => "Low Stock",
            StockStatus::Healthy => "Healthy",
        }
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StockSummary {
    pub total: usize,
    pub healthy: usize,
    pub low: usize,
    pub out: usize,
}

pub fn stock_summary(raw_materials: &[RawMaterial]) -> StockSummary {
    raw_materials
        .iter()
        .fold(StockSummary::default(), |mut summary, material| {
            summary.total += 1;
            match StockStatus::of(material.stock_quantity) {
                StockStatus::Healthy => summary.healthy += 1,
                StockStatus::Low => summary.low += 1,
                StockStatus::Out => summary.out += 1,
            }
            summary
        })
}

/// Case-insensitive substring match on the name. An empty query matches all.
pub fn search_by_name(raw_materials: &[RawMaterial], query: &str) -> Vec<RawMaterial> {
    let needle = query.trim().to_lowercase();
    raw_materials
        .iter()
        .filter(|m| m.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
