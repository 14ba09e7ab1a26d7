//! # Product Store
//!
//! The client copy of every product, plus the bill of materials of at most one
//! selected product.
//!
//! ## Lanes
//!
//! Catalog operations (list, create, update, delete) and detail operations
//! (selection and the BOM) track their own loading flag, so a slow detail
//! fetch does not mark the catalog as loading. Both lanes report failures
//! through the single `error` message.
//!
//! ## Selection
//!
//! [`ProductStore::select_detail`] toggles: selecting the product that is
//! already selected collapses it, anything else fetches the detail and
//! replaces the selection when the fetch settles. Fetches are not cancelled,
//! so when two overlap the one that settles last wins.
//!
//! Reconciliation with the catalog:
//!
//! - deleting the selected product clears the selection in the same transition
//! - updating the selected product merges its name and value into the detail,
//!   leaving the BOM alone
//! - a list that no longer contains the selected product clears the selection
//! - BOM results are applied only while their product is still selected
//!
//! BOM operations require a selection and fail with
//! [`StoreError::NoSelection`] without contacting the service otherwise.

pub mod state;

pub use state::{ProductLane, ProductState, Selection};

use crate::error::StoreError;
use crate::model::{BomEntryRequest, Decimal, ProductId, ProductRequest, RawMaterialId};
use crate::service::InventoryService;
use std::sync::Arc;
use store_framework::{StoreActor, StoreClient, StoreHandle};
use tracing::{debug, instrument};

/// What [`ProductStore::select_detail`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// The detail was fetched and shown.
    Expanded,
    /// The product was already selected; the selection is now empty.
    Collapsed,
    /// The detail was fetched but is not the selection once the fetch
    /// settled: the product was not listed, or a later fetch replaced it.
    Discarded,
}

pub fn new(
    service: Arc<dyn InventoryService>,
    buffer_size: usize,
) -> (StoreActor<ProductState>, ProductStore) {
    let (actor, handle) = StoreActor::new(buffer_size);
    (actor, ProductStore { handle, service })
}

#[derive(Clone)]
pub struct ProductStore {
    handle: StoreHandle<ProductState>,
    service: Arc<dyn InventoryService>,
}

impl StoreClient<ProductState> for ProductStore {
    fn handle(&self) -> &StoreHandle<ProductState> {
        &self.handle
    }
}

impl ProductStore {
    // =========================================================================
    // Catalog
    // =========================================================================

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<(), StoreError> {
        self.handle
            .track(
                ProductLane::Catalog,
                "list",
                self.service.list_products(),
                ProductState::replace_all,
            )
            .await?;
        Ok(())
    }

    #[instrument(skip(self, name))]
    pub async fn create(&self, name: impl Into<String>, value: Decimal) -> Result<(), StoreError> {
        let request = ProductRequest::new(name, value);
        self.handle
            .track(
                ProductLane::Catalog,
                "create",
                self.service.create_product(request),
                ProductState::append,
            )
            .await?;
        Ok(())
    }

    #[instrument(skip(self, name))]
    pub async fn update(
        &self,
        id: ProductId,
        name: impl Into<String>,
        value: Decimal,
    ) -> Result<(), StoreError> {
        let request = ProductRequest::new(name, value);
        self.handle
            .track(
                ProductLane::Catalog,
                "update",
                self.service.update_product(id, request),
                ProductState::replace,
            )
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        self.handle
            .track(
                ProductLane::Catalog,
                "delete",
                self.service.delete_product(id),
                move |state, ()| state.remove(id),
            )
            .await?;
        Ok(())
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Collapses the selection if `id` is selected, fetches its detail
    /// otherwise. Call [`list`](Self::list) first: details of products the
    /// store does not hold are discarded.
    #[instrument(skip(self))]
    pub async fn select_detail(&self, id: ProductId) -> Result<Toggle, StoreError> {
        let current = self.handle.snapshot().await?;
        if current.selection.is_selected(id) {
            self.clear_selection().await?;
            return Ok(Toggle::Collapsed);
        }

        self.handle
            .track(
                ProductLane::Detail,
                "select_detail",
                self.service.get_product_detail(id),
                ProductState::show_detail,
            )
            .await?;

        let settled = self.handle.snapshot().await?;
        if settled.selection.is_selected(id) {
            Ok(Toggle::Expanded)
        } else {
            debug!(product = %id, "Fetched detail is not the selection");
            Ok(Toggle::Discarded)
        }
    }

    #[instrument(skip(self))]
    pub async fn clear_selection(&self) -> Result<(), StoreError> {
        self.handle
            .apply("clear_selection", ProductState::clear_selection)
            .await?;
        Ok(())
    }

    // =========================================================================
    // Bill of materials
    // =========================================================================

    /// Wholesale-replaces the selected product's BOM.
    #[instrument(skip(self))]
    pub async fn reload_bom(&self) -> Result<(), StoreError> {
        let product_id = self.selected_product()?;
        self.handle
            .track(
                ProductLane::Detail,
                "reload_bom",
                self.service.list_bom(product_id),
                move |state, bom| state.replace_bom(product_id, bom),
            )
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn add_bom_entry(
        &self,
        raw_material_id: RawMaterialId,
        required_quantity: Decimal,
    ) -> Result<(), StoreError> {
        let product_id = self.selected_product()?;
        let request = BomEntryRequest {
            raw_material_id,
            required_quantity,
        };
        self.handle
            .track(
                ProductLane::Detail,
                "add_bom_entry",
                self.service.add_bom_entry(product_id, request),
                move |state, entry| state.add_bom_entry(product_id, entry),
            )
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn update_bom_entry(
        &self,
        raw_material_id: RawMaterialId,
        required_quantity: Decimal,
    ) -> Result<(), StoreError> {
        let product_id = self.selected_product()?;
        self.handle
            .track(
                ProductLane::Detail,
                "update_bom_entry",
                self.service
                    .update_bom_entry(product_id, raw_material_id, required_quantity),
                move |state, entry| state.update_bom_entry(product_id, entry),
            )
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn remove_bom_entry(&self, raw_material_id: RawMaterialId) -> Result<(), StoreError> {
        let product_id = self.selected_product()?;
        self.handle
            .track(
                ProductLane::Detail,
                "remove_bom_entry",
                self.service.remove_bom_entry(product_id, raw_material_id),
                move |state, ()| state.remove_bom_entry(product_id, raw_material_id),
            )
            .await?;
        Ok(())
    }

    fn selected_product(&self) -> Result<ProductId, StoreError> {
        let selected = self.handle.state().selection.product_id();
        if selected.is_none() {
            debug!("BOM operation without a selected product");
        }
        selected.ok_or(StoreError::NoSelection)
    }
}
