use crate::model::{BomEntry, Product, ProductDetail, ProductId, RawMaterialId};
use store_framework::TrackedState;
use tracing::debug;

/// Which product, if any, has its bill of materials loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Selection {
    #[default]
    None,
    Selected(ProductDetail),
}

impl Selection {
    pub fn detail(&self) -> Option<&ProductDetail> {
        match self {
            Selection::Selected(detail) => Some(detail),
            Selection::None => None,
        }
    }

    pub fn product_id(&self) -> Option<ProductId> {
        self.detail().map(ProductDetail::id)
    }

    pub fn is_selected(&self, id: ProductId) -> bool {
        self.product_id() == Some(id)
    }

    /// The detail, only if it belongs to `id`.
    fn detail_for(&mut self, id: ProductId) -> Option<&mut ProductDetail> {
        match self {
            Selection::Selected(detail) if detail.id() == id => Some(detail),
            _ => None,
        }
    }
}

/// Independent loading flags of the product store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductLane {
    /// Top-level list, create, update and delete.
    Catalog,
    /// Selection and bill-of-materials operations.
    Detail,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductState {
    pub items: Vec<Product>,
    pub selection: Selection,
    pub loading: bool,
    pub detail_loading: bool,
    /// Shared by both lanes.
    pub error: Option<String>,
}

impl TrackedState for ProductState {
    type Lane = ProductLane;

    fn loading_mut(&mut self, lane: ProductLane) -> &mut bool {
        match lane {
            ProductLane::Catalog => &mut self.loading,
            ProductLane::Detail => &mut self.detail_loading,
        }
    }

    fn error_mut(&mut self) -> &mut Option<String> {
        &mut self.error
    }

    fn size(&self) -> usize {
        self.items.len()
    }
}

impl ProductState {
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.items.iter().find(|p| p.id == id)
    }

    pub fn detail(&self) -> Option<&ProductDetail> {
        self.selection.detail()
    }

    // --- Catalog reducers ---

    /// Replaces the collection. A selection whose product is gone is cleared.
    pub fn replace_all(&mut self, items: Vec<Product>) {
        self.items = items;
        if let Some(id) = self.selection.product_id() {
            if self.get(id).is_none() {
                debug!(product = %id, "Selected product no longer listed");
                self.selection = Selection::None;
            }
        }
    }

    pub fn append(&mut self, product: Product) {
        self.items.push(product);
    }

    /// Replaces the product in place and shallow-merges its scalar fields
    /// into the selected detail. The BOM is left as is.
    pub fn replace(&mut self, product: Product) {
        if let Some(slot) = self.items.iter_mut().find(|p| p.id == product.id) {
            *slot = product.clone();
        }
        if let Some(detail) = self.selection.detail_for(product.id) {
            detail.product.name = product.name;
            detail.product.value = product.value;
        }
    }

    /// Removes the product and, in the same transition, its selection.
    pub fn remove(&mut self, id: ProductId) {
        self.items.retain(|p| p.id != id);
        if self.selection.is_selected(id) {
            self.selection = Selection::None;
        }
    }

    // --- Selection reducers ---

    /// Wholesale-replaces the selection, unless the product has left the
    /// collection in the meantime.
    pub fn show_detail(&mut self, detail: ProductDetail) {
        if self.get(detail.id()).is_none() {
            debug!(product = %detail.id(), "Discarding detail of unlisted product");
            return;
        }
        self.selection = Selection::Selected(detail);
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::None;
    }

    // --- BOM reducers ---
    //
    // Each takes the product the call was issued for; a result for a product
    // that is no longer selected is dropped.

    pub fn replace_bom(&mut self, product_id: ProductId, bom: Vec<BomEntry>) {
        if let Some(detail) = self.selection.detail_for(product_id) {
            detail.bom = bom;
        }
    }

    /// Appends `entry`, replacing an entry for the same raw material so the
    /// set stays unique.
    pub fn add_bom_entry(&mut self, product_id: ProductId, entry: BomEntry) {
        if let Some(detail) = self.selection.detail_for(product_id) {
            match detail
                .bom
                .iter_mut()
                .find(|e| e.raw_material_id == entry.raw_material_id)
            {
                Some(existing) => *existing = entry,
                None => detail.bom.push(entry),
            }
        }
    }

    pub fn update_bom_entry(&mut self, product_id: ProductId, entry: BomEntry) {
        if let Some(detail) = self.selection.detail_for(product_id) {
            if let Some(existing) = detail
                .bom
                .iter_mut()
                .find(|e| e.raw_material_id == entry.raw_material_id)
            {
                *existing = entry;
            }
        }
    }

    pub fn remove_bom_entry(&mut self, product_id: ProductId, raw_material_id: RawMaterialId) {
        if let Some(detail) = self.selection.detail_for(product_id) {
            detail.bom.retain(|e| e.raw_material_id != raw_material_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Decimal;

    fn product(id: u64, name: &str, value: i64) -> Product {
        Product::new(ProductId(id), name, Decimal::from(value))
    }

    fn entry(raw_material_id: u64, required: i64) -> BomEntry {
        BomEntry {
            raw_material_id: RawMaterialId(raw_material_id),
            raw_material_name: format!("material-{raw_material_id}"),
            required_quantity: Decimal::from(required),
        }
    }

    fn with_selection() -> ProductState {
        let mut state = ProductState::default();
        state.replace_all(vec![product(1, "Chair", 40), product(2, "Table", 90)]);
        state.show_detail(ProductDetail {
            product: product(1, "Chair", 40),
            bom: vec![entry(10, 2)],
        });
        state
    }

    #[test]
    fn test_scalar_update_merges_into_detail() {
        let mut state = with_selection();
        state.replace(product(1, "Armchair", 55));

        let detail = state.detail().unwrap();
        assert_eq!(detail.product.name, "Armchair");
        assert_eq!(detail.product.value, Decimal::from(55));
        assert_eq!(detail.bom, vec![entry(10, 2)]);
        assert_eq!(state.get(ProductId(1)).unwrap().name, "Armchair");
    }

    #[test]
    fn test_update_of_other_product_leaves_detail() {
        let mut state = with_selection();
        let before = state.selection.clone();
        state.replace(product(2, "Desk", 95));
        assert_eq!(state.selection, before);
    }

    #[test]
    fn test_delete_cascades_to_selection() {
        let mut state = with_selection();
        state.remove(ProductId(2));
        assert!(state.selection.is_selected(ProductId(1)));

        state.remove(ProductId(1));
        assert_eq!(state.selection, Selection::None);
    }

    #[test]
    fn test_list_without_selected_product_clears_selection() {
        let mut state = with_selection();
        state.replace_all(vec![product(1, "Chair", 40)]);
        assert!(state.selection.is_selected(ProductId(1)));

        state.replace_all(vec![product(2, "Table", 90)]);
        assert_eq!(state.selection, Selection::None);
    }

    #[test]
    fn test_detail_of_unlisted_product_is_discarded() {
        let mut state = with_selection();
        state.show_detail(ProductDetail {
            product: product(3, "Ghost", 1),
            bom: vec![],
        });
        assert!(state.selection.is_selected(ProductId(1)));
    }

    #[test]
    fn test_bom_results_for_other_products_are_dropped() {
        let mut state = with_selection();
        let before = state.selection.clone();

        state.add_bom_entry(ProductId(2), entry(11, 1));
        state.remove_bom_entry(ProductId(2), RawMaterialId(10));
        state.replace_bom(ProductId(2), vec![]);
        assert_eq!(state.selection, before);
    }

    #[test]
    fn test_add_keeps_entries_unique() {
        let mut state = with_selection();
        state.add_bom_entry(ProductId(1), entry(10, 5));
        state.add_bom_entry(ProductId(1), entry(11, 1));

        let bom = &state.detail().unwrap().bom;
        assert_eq!(bom, &vec![entry(10, 5), entry(11, 1)]);
    }
}
