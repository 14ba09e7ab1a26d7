//! Scripted [`InventoryService`] for tests.
//!
//! Each operation has its own [`ScriptedCalls`] queue. Script the answers
//! before driving a store, and use deferred answers to control the order in
//! which overlapping calls settle:
//!
//! ```rust
//! use inventory_planner::service::{InventoryService, MockInventoryService};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockInventoryService::new();
//!     mock.list_products.expect().return_ok(vec![]);
//!     assert!(mock.list_products().await.unwrap().is_empty());
//!     mock.verify();
//! }
//! ```

use super::{InventoryService, ServiceError};
use crate::model::{
    BomEntry, BomEntryRequest, Decimal, Product, ProductDetail, ProductId, ProductRequest,
    ProductionSuggestion, RawMaterial, RawMaterialId, RawMaterialRequest,
};
use async_trait::async_trait;
use store_framework::mock::ScriptedCalls;

type Calls<T> = ScriptedCalls<T, ServiceError>;

/// Clones share every queue.
#[derive(Clone)]
pub struct MockInventoryService {
    pub list_raw_materials: Calls<Vec<RawMaterial>>,
    pub get_raw_material: Calls<RawMaterial>,
    pub create_raw_material: Calls<RawMaterial>,
    pub update_raw_material: Calls<RawMaterial>,
    pub delete_raw_material: Calls<()>,
    pub list_products: Calls<Vec<Product>>,
    pub get_product_detail: Calls<ProductDetail>,
    pub create_product: Calls<Product>,
    pub update_product: Calls<Product>,
    pub delete_product: Calls<()>,
    pub list_bom: Calls<Vec<BomEntry>>,
    pub add_bom_entry: Calls<BomEntry>,
    pub update_bom_entry: Calls<BomEntry>,
    pub remove_bom_entry: Calls<()>,
    pub production_suggestions: Calls<ProductionSuggestion>,
}

impl Default for MockInventoryService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockInventoryService {
    pub fn new() -> Self {
        Self {
            list_raw_materials: ScriptedCalls::new("list_raw_materials"),
            get_raw_material: ScriptedCalls::new("get_raw_material"),
            create_raw_material: ScriptedCalls::new("create_raw_material"),
            update_raw_material: ScriptedCalls::new("update_raw_material"),
            delete_raw_material: ScriptedCalls::new("delete_raw_material"),
            list_products: ScriptedCalls::new("list_products"),
            get_product_detail: ScriptedCalls::new("get_product_detail"),
            create_product: ScriptedCalls::new("create_product"),
            update_product: ScriptedCalls::new("update_product"),
            delete_product: ScriptedCalls::new("delete_product"),
            list_bom: ScriptedCalls::new("list_bom"),
            add_bom_entry: ScriptedCalls::new("add_bom_entry"),
            update_bom_entry: ScriptedCalls::new("update_bom_entry"),
            remove_bom_entry: ScriptedCalls::new("remove_bom_entry"),
            production_suggestions: ScriptedCalls::new("production_suggestions"),
        }
    }

    /// Panics if any scripted answer was left unconsumed.
    pub fn verify(&self) {
        self.list_raw_materials.verify();
        self.get_raw_material.verify();
        self.create_raw_material.verify();
        self.update_raw_material.verify();
        self.delete_raw_material.verify();
        self.list_products.verify();
        self.get_product_detail.verify();
        self.create_product.verify();
        self.update_product.verify();
        self.delete_product.verify();
        self.list_bom.verify();
        self.add_bom_entry.verify();
        self.update_bom_entry.verify();
        self.remove_bom_entry.verify();
        self.production_suggestions.verify();
    }
}

#[async_trait]
impl InventoryService for MockInventoryService {
    async fn list_raw_materials(&self) -> Result<Vec<RawMaterial>, ServiceError> {
        self.list_raw_materials.next().await
    }

    async fn get_raw_material(&self, _id: RawMaterialId) -> Result<RawMaterial, ServiceError> {
        self.get_raw_material.next().await
    }

    async fn create_raw_material(
        &self,
        _request: RawMaterialRequest,
    ) -> Result<RawMaterial, ServiceError> {
        self.create_raw_material.next().await
    }

    async fn update_raw_material(
        &self,
        _id: RawMaterialId,
        _request: RawMaterialRequest,
    ) -> Result<RawMaterial, ServiceError> {
        self.update_raw_material.next().await
    }

    async fn delete_raw_material(&self, _id: RawMaterialId) -> Result<(), ServiceError> {
        self.delete_raw_material.next().await
    }

    async fn list_products(&self) -> Result<Vec<Product>, ServiceError> {
        self.list_products.next().await
    }

    async fn get_product_detail(&self, _id: ProductId) -> Result<ProductDetail, ServiceError> {
        self.get_product_detail.next().await
    }

    async fn create_product(&self, _request: ProductRequest) -> Result<Product, ServiceError> {
        self.create_product.next().await
    }

    async fn update_product(
        &self,
        _id: ProductId,
        _request: ProductRequest,
    ) -> Result<Product, ServiceError> {
        self.update_product.next().await
    }

    async fn delete_product(&self, _id: ProductId) -> Result<(), ServiceError> {
        self.delete_product.next().await
    }

    async fn list_bom(&self, _product_id: ProductId) -> Result<Vec<BomEntry>, ServiceError> {
        self.list_bom.next().await
    }

    async fn add_bom_entry(
        &self,
        _product_id: ProductId,
        _request: BomEntryRequest,
    ) -> Result<BomEntry, ServiceError> {
        self.add_bom_entry.next().await
    }

    async fn update_bom_entry(
        &self,
        _product_id: ProductId,
        _raw_material_id: RawMaterialId,
        _required_quantity: Decimal,
    ) -> Result<BomEntry, ServiceError> {
        self.update_bom_entry.next().await
    }

    async fn remove_bom_entry(
        &self,
        _product_id: ProductId,
        _raw_material_id: RawMaterialId,
    ) -> Result<(), ServiceError> {
        self.remove_bom_entry.next().await
    }

    async fn production_suggestions(&self) -> Result<ProductionSuggestion, ServiceError> {
        self.production_suggestions.next().await
    }
}
