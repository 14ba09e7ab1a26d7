//! # Inventory Service
//!
//! The remote source of truth for raw materials, products, bills of materials
//! and the feasibility report. Stores only talk to it through
//! [`InventoryService`].
//!
//! ## Implementations
//!
//! - [`HttpInventoryService`]: JSON over HTTP.
//! - [`InMemoryInventoryService`]: a single-owner task holding the whole
//!   inventory in memory, used by the demo binary and tests.
//! - [`MockInventoryService`]: scripted answers per operation.

pub mod error;
pub mod feasibility;
pub mod http;
pub mod memory;
pub mod mock;

pub use error::ServiceError;
pub use feasibility::compute_suggestions;
pub use http::HttpInventoryService;
pub use memory::InMemoryInventoryService;
pub use mock::MockInventoryService;

use crate::model::{
    BomEntry, BomEntryRequest, Decimal, Product, ProductDetail, ProductId, ProductRequest,
    ProductionSuggestion, RawMaterial, RawMaterialId, RawMaterialRequest,
};
use async_trait::async_trait;

/// Contract of the remote inventory service.
///
/// | Operation | Route |
/// |---|---|
/// | list / get raw material | `GET /raw-materials[/{id}]` |
/// | create / update / delete raw material | `POST/PUT/DELETE /raw-materials[/{id}]` |
/// | list products | `GET /products` |
/// | product detail | `GET /products/{id}` |
/// | create / update / delete product | `POST/PUT/DELETE /products[/{id}]` |
/// | list BOM | `GET /products/{id}/raw-materials` |
/// | add / update / remove BOM entry | `POST/PUT/DELETE /products/{id}/raw-materials[/{rawMaterialId}]` |
/// | suggestions | `GET /production-planning/suggestions` |
#[async_trait]
pub trait InventoryService: Send + Sync {
    async fn list_raw_materials(&self) -> Result<Vec<RawMaterial>, ServiceError>;

    async fn get_raw_material(&self, id: RawMaterialId) -> Result<RawMaterial, ServiceError>;

    async fn create_raw_material(
        &self,
        request: RawMaterialRequest,
    ) -> Result<RawMaterial, ServiceError>;

    async fn update_raw_material(
        &self,
        id: RawMaterialId,
        request: RawMaterialRequest,
    ) -> Result<RawMaterial, ServiceError>;

    async fn delete_raw_material(&self, id: RawMaterialId) -> Result<(), ServiceError>;

    async fn list_products(&self) -> Result<Vec<Product>, ServiceError>;

    async fn get_product_detail(&self, id: ProductId) -> Result<ProductDetail, ServiceError>;

    async fn create_product(&self, request: ProductRequest) -> Result<Product, ServiceError>;

    async fn update_product(
        &self,
        id: ProductId,
        request: ProductRequest,
    ) -> Result<Product, ServiceError>;

    async fn delete_product(&self, id: ProductId) -> Result<(), ServiceError>;

    async fn list_bom(&self, product_id: ProductId) -> Result<Vec<BomEntry>, ServiceError>;

    async fn add_bom_entry(
        &self,
        product_id: ProductId,
        request: BomEntryRequest,
    ) -> Result<BomEntry, ServiceError>;

    async fn update_bom_entry(
        &self,
        product_id: ProductId,
        raw_material_id: RawMaterialId,
        required_quantity: Decimal,
    ) -> Result<BomEntry, ServiceError>;

    async fn remove_bom_entry(
        &self,
        product_id: ProductId,
        raw_material_id: RawMaterialId,
    ) -> Result<(), ServiceError>;

    async fn production_suggestions(&self) -> Result<ProductionSuggestion, ServiceError>;
}
