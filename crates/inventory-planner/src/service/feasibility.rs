//! Feasibility report computed from current stock.
//!
//! Every product is projected against the full, undepleted stock. Two products
//! that need the same material both see all of it; nothing is reserved across
//! the report.

use crate::model::{
    BomEntry, Decimal, ProductDetail, ProductionSuggestion, RawMaterial, RawMaterialId,
    SuggestionItem,
};
use rust_decimal::prelude::ToPrimitive;
use std::collections::HashMap;

/// Builds the report for `products` (each with its bill of materials).
///
/// Items are ordered by product value, highest first, ties by id. A product
/// without BOM entries is listed with a producible quantity of zero.
pub fn compute_suggestions(
    raw_materials: &[RawMaterial],
    products: &[ProductDetail],
) -> ProductionSuggestion {
    let stock: HashMap<RawMaterialId, Decimal> = raw_materials
        .iter()
        .map(|m| (m.id, m.stock_quantity))
        .collect();

    let mut ordered: Vec<&ProductDetail> = products.iter().collect();
    ordered.sort_by(|a, b| {
        b.product
            .value
            .cmp(&a.product.value)
            .then(a.product.id.cmp(&b.product.id))
    });

    let suggestions: Vec<SuggestionItem> = ordered
        .into_iter()
        .map(|detail| {
            let producible_quantity = producible_quantity(&stock, &detail.bom);
            SuggestionItem {
                product_id: detail.product.id,
                product_name: detail.product.name.clone(),
                product_value: detail.product.value,
                producible_quantity,
                total_value: detail
                    .product
                    .value
                    .checked_mul(Decimal::from(producible_quantity))
                    .unwrap_or(Decimal::MAX),
            }
        })
        .collect();

    let grand_total_value = suggestions
        .iter()
        .filter(|s| s.producible_quantity > 0)
        .fold(Decimal::ZERO, |total, s| total.saturating_add(s.total_value));

    ProductionSuggestion {
        suggestions,
        grand_total_value,
    }
}

/// `floor(min(stock / required))` over the entries; zero for an empty BOM.
/// A material missing from `stock` counts as having none.
pub fn producible_quantity(stock: &HashMap<RawMaterialId, Decimal>, bom: &[BomEntry]) -> u64 {
    bom.iter()
        .map(|entry| {
            let available = stock
                .get(&entry.raw_material_id)
                .copied()
                .unwrap_or(Decimal::ZERO);
            units_from(available, entry.required_quantity)
        })
        .min()
        .unwrap_or(0)
}

/// Whole number of times `required` fits into `available`.
fn units_from(available: Decimal, required: Decimal) -> u64 {
    if required <= Decimal::ZERO || available <= Decimal::ZERO {
        return 0;
    }
    available
        .checked_div(required)
        .map_or(u64::MAX, |ratio| ratio.floor().to_u64().unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Product, ProductId};

    fn entry(raw_material_id: u64, required: i64) -> BomEntry {
        BomEntry {
            raw_material_id: RawMaterialId(raw_material_id),
            raw_material_name: format!("material-{raw_material_id}"),
            required_quantity: Decimal::from(required),
        }
    }

    fn detail(id: u64, name: &str, value: i64, bom: Vec<BomEntry>) -> ProductDetail {
        ProductDetail {
            product: Product::new(ProductId(id), name, Decimal::from(value)),
            bom,
        }
    }

    #[test]
    fn test_products_see_undepleted_stock() {
        let stock = vec![
            RawMaterial::new(RawMaterialId(1), "A", Decimal::from(100)),
            RawMaterial::new(RawMaterialId(2), "B", Decimal::from(5)),
        ];
        let products = vec![
            detail(1, "X", 50, vec![entry(1, 10), entry(2, 2)]),
            detail(2, "Y", 20, vec![entry(1, 5)]),
        ];

        let report = compute_suggestions(&stock, &products);

        let x = report.item(ProductId(1)).unwrap();
        assert_eq!(x.producible_quantity, 2);
        assert_eq!(x.total_value, Decimal::from(100));
        let y = report.item(ProductId(2)).unwrap();
        assert_eq!(y.producible_quantity, 20);
        assert_eq!(y.total_value, Decimal::from(400));
        assert_eq!(report.grand_total_value, Decimal::from(500));
    }

    #[test]
    fn test_ordering_and_empty_bom() {
        let stock = vec![RawMaterial::new(RawMaterialId(1), "A", Decimal::from(3))];
        let products = vec![
            detail(3, "Cheap", 5, vec![entry(1, 1)]),
            detail(2, "Bare", 90, vec![]),
            detail(1, "Tie", 5, vec![entry(1, 1)]),
        ];

        let report = compute_suggestions(&stock, &products);
        let order: Vec<u64> = report.suggestions.iter().map(|s| s.product_id.0).collect();
        assert_eq!(order, vec![2, 1, 3]);
        assert_eq!(report.suggestions[0].producible_quantity, 0);
        assert_eq!(report.suggestions[0].total_value, Decimal::ZERO);
        assert_eq!(report.grand_total_value, Decimal::from(30));
    }

    #[test]
    fn test_missing_or_insufficient_material_yields_zero() {
        let stock = vec![RawMaterial::new(RawMaterialId(1), "A", Decimal::from(1))];
        let products = vec![
            detail(1, "Needs more", 10, vec![entry(1, 2)]),
            detail(2, "Unknown material", 10, vec![entry(1, 1), entry(9, 1)]),
        ];

        let report = compute_suggestions(&stock, &products);
        assert!(report.suggestions.iter().all(|s| s.producible_quantity == 0));
        assert_eq!(report.grand_total_value, Decimal::ZERO);
    }

    #[test]
    fn test_fractional_quantities_floor_exactly() {
        let stock = vec![RawMaterial::new(RawMaterialId(1), "Resin", "0.3".parse().unwrap())];
        let bom = vec![BomEntry {
            raw_material_id: RawMaterialId(1),
            raw_material_name: "Resin".into(),
            required_quantity: "0.1".parse().unwrap(),
        }];
        let stock_map = stock.iter().map(|m| (m.id, m.stock_quantity)).collect();
        assert_eq!(producible_quantity(&stock_map, &bom), 3);
    }

    #[test]
    fn test_units_from_floors_and_guards() {
        let dec = |s: &str| s.parse::<Decimal>().unwrap();
        assert_eq!(units_from(dec("5"), dec("2")), 2);
        assert_eq!(units_from(dec("1.9999"), dec("2")), 0);
        assert_eq!(units_from(dec("100"), dec("0.0001")), 1_000_000);
        assert_eq!(units_from(dec("5"), Decimal::ZERO), 0);
        assert_eq!(units_from(Decimal::ZERO, dec("1")), 0);
    }
}
