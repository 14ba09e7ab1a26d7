//! # In-Memory Inventory Service
//!
//! A reference implementation of [`InventoryService`] whose data lives in one
//! [`Inventory`] owned by a single task ([`InventoryBackend`]). Handles send
//! closures over an mpsc channel and wait for the result on a oneshot channel,
//! so the inventory is never shared and needs no lock.
//!
//! The backend enforces what the HTTP service would:
//!
//! - ids are assigned here, starting at 1, and never reused
//! - names must not be blank, stock must not be negative, values and required
//!   quantities must be positive
//! - a raw material appears at most once per bill of materials, and must exist
//! - a raw material still used by a bill of materials cannot be deleted
//! - deleting a product deletes its bill of materials

use super::{compute_suggestions, InventoryService, ServiceError};
use crate::model::{
    BomEntry, BomEntryRequest, Decimal, Product, ProductDetail, ProductId, ProductRequest,
    ProductionSuggestion, RawMaterial, RawMaterialId, RawMaterialRequest,
};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info};

// =============================================================================
// INVENTORY DATA
// =============================================================================

#[derive(Debug, Clone, Copy)]
struct BomLine {
    raw_material_id: RawMaterialId,
    required_quantity: Decimal,
}

/// The complete inventory, with every rule of the service applied
/// synchronously.
#[derive(Debug, Default)]
pub struct Inventory {
    raw_materials: Vec<RawMaterial>,
    products: Vec<Product>,
    boms: HashMap<ProductId, Vec<BomLine>>,
    last_raw_material_id: u64,
    last_product_id: u64,
}

fn require_name(name: &str) -> Result<(), ServiceError> {
    if name.trim().is_empty() {
        return Err(ServiceError::validation("name must not be blank"));
    }
    Ok(())
}

fn require_positive(field: &str, value: Decimal) -> Result<(), ServiceError> {
    if value <= Decimal::ZERO {
        return Err(ServiceError::validation(format!(
            "{field} must be greater than zero"
        )));
    }
    Ok(())
}

fn raw_material_not_found(id: RawMaterialId) -> ServiceError {
    ServiceError::not_found(format!("Raw material not found: {id}"))
}

fn product_not_found(id: ProductId) -> ServiceError {
    ServiceError::not_found(format!("Product not found: {id}"))
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Raw materials ---

    pub fn list_raw_materials(&self) -> Vec<RawMaterial> {
        self.raw_materials.clone()
    }

    pub fn raw_material(&self, id: RawMaterialId) -> Result<RawMaterial, ServiceError> {
        self.raw_materials
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| raw_material_not_found(id))
    }

    pub fn create_raw_material(
        &mut self,
        request: RawMaterialRequest,
    ) -> Result<RawMaterial, ServiceError> {
        Self::validate_raw_material(&request)?;
        self.last_raw_material_id += 1;
        let material = RawMaterial::new(
            RawMaterialId(self.last_raw_material_id),
            request.name,
            request.stock_quantity,
        );
        self.raw_materials.push(material.clone());
        Ok(material)
    }

    pub fn update_raw_material(
        &mut self,
        id: RawMaterialId,
        request: RawMaterialRequest,
    ) -> Result<RawMaterial, ServiceError> {
        Self::validate_raw_material(&request)?;
        let material = self
            .raw_materials
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| raw_material_not_found(id))?;
        material.name = request.name;
        material.stock_quantity = request.stock_quantity;
        Ok(material.clone())
    }

    pub fn delete_raw_material(&mut self, id: RawMaterialId) -> Result<(), ServiceError> {
        let index = self
            .raw_materials
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| raw_material_not_found(id))?;
        let in_use = self
            .boms
            .values()
            .any(|lines| lines.iter().any(|line| line.raw_material_id == id));
        if in_use {
            return Err(ServiceError::validation(format!(
                "Raw material {id} is used by a bill of materials"
            )));
        }
        self.raw_materials.remove(index);
        Ok(())
    }

    fn validate_raw_material(request: &RawMaterialRequest) -> Result<(), ServiceError> {
        require_name(&request.name)?;
        if request.stock_quantity < Decimal::ZERO {
            return Err(ServiceError::validation(
                "stockQuantity must be zero or greater",
            ));
        }
        Ok(())
    }

    // --- Products ---

    pub fn list_products(&self) -> Vec<Product> {
        self.products.clone()
    }

    pub fn product_detail(&self, id: ProductId) -> Result<ProductDetail, ServiceError> {
        let product = self.product(id)?;
        Ok(ProductDetail {
            product: product.clone(),
            bom: self.bom_entries(id),
        })
    }

    pub fn create_product(&mut self, request: ProductRequest) -> Result<Product, ServiceError> {
        Self::validate_product(&request)?;
        self.last_product_id += 1;
        let product = Product::new(ProductId(self.last_product_id), request.name, request.value);
        self.products.push(product.clone());
        Ok(product)
    }

    pub fn update_product(
        &mut self,
        id: ProductId,
        request: ProductRequest,
    ) -> Result<Product, ServiceError> {
        Self::validate_product(&request)?;
        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| product_not_found(id))?;
        product.name = request.name;
        product.value = request.value;
        Ok(product.clone())
    }

    pub fn delete_product(&mut self, id: ProductId) -> Result<(), ServiceError> {
        let index = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| product_not_found(id))?;
        self.products.remove(index);
        self.boms.remove(&id);
        Ok(())
    }

    fn product(&self, id: ProductId) -> Result<&Product, ServiceError> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| product_not_found(id))
    }

    fn validate_product(request: &ProductRequest) -> Result<(), ServiceError> {
        require_name(&request.name)?;
        require_positive("value", request.value)
    }

    // --- Bills of materials ---

    pub fn list_bom(&self, product_id: ProductId) -> Result<Vec<BomEntry>, ServiceError> {
        self.product(product_id)?;
        Ok(self.bom_entries(product_id))
    }

    pub fn add_bom_entry(
        &mut self,
        product_id: ProductId,
        request: BomEntryRequest,
    ) -> Result<BomEntry, ServiceError> {
        require_positive("requiredQuantity", request.required_quantity)?;
        self.product(product_id)?;
        let material = self.raw_material(request.raw_material_id)?;

        let lines = self.boms.entry(product_id).or_default();
        if lines
            .iter()
            .any(|line| line.raw_material_id == request.raw_material_id)
        {
            return Err(ServiceError::validation(
                "Raw material already in BOM for this product",
            ));
        }
        lines.push(BomLine {
            raw_material_id: material.id,
            required_quantity: request.required_quantity,
        });

        Ok(BomEntry {
            raw_material_id: material.id,
            raw_material_name: material.name,
            required_quantity: request.required_quantity,
        })
    }

    pub fn update_bom_entry(
        &mut self,
        product_id: ProductId,
        raw_material_id: RawMaterialId,
        required_quantity: Decimal,
    ) -> Result<BomEntry, ServiceError> {
        require_positive("requiredQuantity", required_quantity)?;
        let line = self
            .boms
            .get_mut(&product_id)
            .and_then(|lines| {
                lines
                    .iter_mut()
                    .find(|line| line.raw_material_id == raw_material_id)
            })
            .ok_or_else(|| ServiceError::not_found("BOM entry not found"))?;
        line.required_quantity = required_quantity;
        let line = *line;
        Ok(self.entry_for(line))
    }

    pub fn remove_bom_entry(
        &mut self,
        product_id: ProductId,
        raw_material_id: RawMaterialId,
    ) -> Result<(), ServiceError> {
        let lines = self
            .boms
            .get_mut(&product_id)
            .ok_or_else(|| ServiceError::not_found("BOM entry not found"))?;
        let index = lines
            .iter()
            .position(|line| line.raw_material_id == raw_material_id)
            .ok_or_else(|| ServiceError::not_found("BOM entry not found"))?;
        lines.remove(index);
        Ok(())
    }

    fn bom_entries(&self, product_id: ProductId) -> Vec<BomEntry> {
        self.boms
            .get(&product_id)
            .map(|lines| lines.iter().map(|line| self.entry_for(*line)).collect())
            .unwrap_or_default()
    }

    /// Entries carry the material's current name.
    fn entry_for(&self, line: BomLine) -> BomEntry {
        let raw_material_name = self
            .raw_materials
            .iter()
            .find(|m| m.id == line.raw_material_id)
            .map(|m| m.name.clone())
            .unwrap_or_default();
        BomEntry {
            raw_material_id: line.raw_material_id,
            raw_material_name,
            required_quantity: line.required_quantity,
        }
    }

    // --- Planning ---

    pub fn production_suggestions(&self) -> ProductionSuggestion {
        let details: Vec<ProductDetail> = self
            .products
            .iter()
            .map(|product| ProductDetail {
                product: product.clone(),
                bom: self.bom_entries(product.id),
            })
            .collect();
        compute_suggestions(&self.raw_materials, &details)
    }
}

// =============================================================================
// OWNER TASK
// =============================================================================

struct Job {
    op: &'static str,
    work: Box<dyn FnOnce(&mut Inventory) + Send>,
}

/// The task that owns the [`Inventory`]. Runs until every service handle has
/// been dropped.
pub struct InventoryBackend {
    receiver: mpsc::Receiver<Job>,
    inventory: Inventory,
}

impl InventoryBackend {
    pub async fn run(mut self) {
        info!("Inventory backend started");
        while let Some(job) = self.receiver.recv().await {
            debug!(op = job.op, "Handling request");
            (job.work)(&mut self.inventory);
        }
        info!(
            raw_materials = self.inventory.raw_materials.len(),
            products = self.inventory.products.len(),
            "Inventory backend stopped"
        );
    }
}

/// Creates an empty backend and the service handle that talks to it.
pub fn new(buffer_size: usize) -> (InventoryBackend, InMemoryInventoryService) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let backend = InventoryBackend {
        receiver,
        inventory: Inventory::new(),
    };
    (backend, InMemoryInventoryService { sender })
}

/// Handle to an [`InventoryBackend`]. Cloning is inexpensive.
#[derive(Clone)]
pub struct InMemoryInventoryService {
    sender: mpsc::Sender<Job>,
}

impl InMemoryInventoryService {
    /// Spawns a backend on the current runtime.
    pub fn spawn(buffer_size: usize) -> (Self, JoinHandle<()>) {
        let (backend, service) = new(buffer_size);
        let task = tokio::spawn(backend.run());
        (service, task)
    }

    async fn call<T, F>(&self, op: &'static str, f: F) -> Result<T, ServiceError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Inventory) -> Result<T, ServiceError> + Send + 'static,
    {
        let (respond_to, response) = oneshot::channel();
        let job = Job {
            op,
            work: Box::new(move |inventory| {
                let _ = respond_to.send(f(inventory));
            }),
        };
        self.sender
            .send(job)
            .await
            .map_err(|_| ServiceError::Network("inventory backend stopped".into()))?;
        response
            .await
            .map_err(|_| ServiceError::Network("inventory backend dropped the request".into()))?
    }
}

#[async_trait]
impl InventoryService for InMemoryInventoryService {
    async fn list_raw_materials(&self) -> Result<Vec<RawMaterial>, ServiceError> {
        self.call("list_raw_materials", |inv| Ok(inv.list_raw_materials()))
            .await
    }

    async fn get_raw_material(&self, id: RawMaterialId) -> Result<RawMaterial, ServiceError> {
        self.call("get_raw_material", move |inv| inv.raw_material(id))
            .await
    }

    async fn create_raw_material(
        &self,
        request: RawMaterialRequest,
    ) -> Result<RawMaterial, ServiceError> {
        self.call("create_raw_material", move |inv| {
            inv.create_raw_material(request)
        })
        .await
    }

    async fn update_raw_material(
        &self,
        id: RawMaterialId,
        request: RawMaterialRequest,
    ) -> Result<RawMaterial, ServiceError> {
        self.call("update_raw_material", move |inv| {
            inv.update_raw_material(id, request)
        })
        .await
    }

    async fn delete_raw_material(&self, id: RawMaterialId) -> Result<(), ServiceError> {
        self.call("delete_raw_material", move |inv| inv.delete_raw_material(id))
            .await
    }

    async fn list_products(&self) -> Result<Vec<Product>, ServiceError> {
        self.call("list_products", |inv| Ok(inv.list_products())).await
    }

    async fn get_product_detail(&self, id: ProductId) -> Result<ProductDetail, ServiceError> {
        self.call("get_product_detail", move |inv| inv.product_detail(id))
            .await
    }

    async fn create_product(&self, request: ProductRequest) -> Result<Product, ServiceError> {
        self.call("create_product", move |inv| inv.create_product(request))
            .await
    }

    async fn update_product(
        &self,
        id: ProductId,
        request: ProductRequest,
    ) -> Result<Product, ServiceError> {
        self.call("update_product", move |inv| inv.update_product(id, request))
            .await
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), ServiceError> {
        self.call("delete_product", move |inv| inv.delete_product(id))
            .await
    }

    async fn list_bom(&self, product_id: ProductId) -> Result<Vec<BomEntry>, ServiceError> {
        self.call("list_bom", move |inv| inv.list_bom(product_id))
            .await
    }

    async fn add_bom_entry(
        &self,
        product_id: ProductId,
        request: BomEntryRequest,
    ) -> Result<BomEntry, ServiceError> {
        self.call("add_bom_entry", move |inv| {
            inv.add_bom_entry(product_id, request)
        })
        .await
    }

    async fn update_bom_entry(
        &self,
        product_id: ProductId,
        raw_material_id: RawMaterialId,
        required_quantity: Decimal,
    ) -> Result<BomEntry, ServiceError> {
        self.call("update_bom_entry", move |inv| {
            inv.update_bom_entry(product_id, raw_material_id, required_quantity)
        })
        .await
    }

    async fn remove_bom_entry(
        &self,
        product_id: ProductId,
        raw_material_id: RawMaterialId,
    ) -> Result<(), ServiceError> {
        self.call("remove_bom_entry", move |inv| {
            inv.remove_bom_entry(product_id, raw_material_id)
        })
        .await
    }

    async fn production_suggestions(&self) -> Result<ProductionSuggestion, ServiceError> {
        self.call("production_suggestions", |inv| {
            Ok(inv.production_suggestions())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(n: i64) -> Decimal {
        Decimal::from(n)
    }

    #[test]
    fn test_ids_are_assigned_from_one_and_never_reused() {
        let mut inv = Inventory::new();
        let a = inv
            .create_raw_material(RawMaterialRequest::new("Pine", units(10)))
            .unwrap();
        let b = inv
            .create_raw_material(RawMaterialRequest::new("Oak", units(3)))
            .unwrap();
        assert_eq!((a.id, b.id), (RawMaterialId(1), RawMaterialId(2)));

        inv.delete_raw_material(b.id).unwrap();
        let c = inv
            .create_raw_material(RawMaterialRequest::new("Birch", units(1)))
            .unwrap();
        assert_eq!(c.id, RawMaterialId(3));
    }

    #[test]
    fn test_validation_rules() {
        let mut inv = Inventory::new();
        assert!(matches!(
            inv.create_raw_material(RawMaterialRequest::new("  ", units(1))),
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            inv.create_raw_material(RawMaterialRequest::new("Pine", units(-1))),
            Err(ServiceError::Validation(_))
        ));
        assert!(inv
            .create_raw_material(RawMaterialRequest::new("Pine", Decimal::ZERO))
            .is_ok());
        assert!(matches!(
            inv.create_product(ProductRequest::new("Chair", Decimal::ZERO)),
            Err(ServiceError::Validation(_))
        ));
        assert_eq!(
            inv.update_product(ProductId(9), ProductRequest::new("Chair", units(1))),
            Err(ServiceError::NotFound("Product not found: 9".into()))
        );
    }

    #[test]
    fn test_bom_rules() {
        let mut inv = Inventory::new();
        let pine = inv
            .create_raw_material(RawMaterialRequest::new("Pine", units(10)))
            .unwrap();
        let chair = inv
            .create_product(ProductRequest::new("Chair", units(40)))
            .unwrap();
        let request = BomEntryRequest {
            raw_material_id: pine.id,
            required_quantity: units(2),
        };

        let entry = inv.add_bom_entry(chair.id, request.clone()).unwrap();
        assert_eq!(entry.raw_material_name, "Pine");
        assert!(matches!(
            inv.add_bom_entry(chair.id, request),
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            inv.add_bom_entry(
                chair.id,
                BomEntryRequest {
                    raw_material_id: RawMaterialId(42),
                    required_quantity: units(1),
                }
            ),
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            inv.update_bom_entry(chair.id, pine.id, Decimal::ZERO),
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            inv.delete_raw_material(pine.id),
            Err(ServiceError::Validation(_))
        ));

        let updated = inv.update_bom_entry(chair.id, pine.id, units(3)).unwrap();
        assert_eq!(updated.required_quantity, units(3));

        inv.delete_product(chair.id).unwrap();
        inv.delete_raw_material(pine.id).unwrap();
        assert!(inv.list_raw_materials().is_empty());
    }

    #[test]
    fn test_entries_carry_current_material_name() {
        let mut inv = Inventory::new();
        let pine = inv
            .create_raw_material(RawMaterialRequest::new("Pine", units(10)))
            .unwrap();
        let chair = inv
            .create_product(ProductRequest::new("Chair", units(40)))
            .unwrap();
        inv.add_bom_entry(
            chair.id,
            BomEntryRequest {
                raw_material_id: pine.id,
                required_quantity: units(2),
            },
        )
        .unwrap();
        inv.update_raw_material(pine.id, RawMaterialRequest::new("Pine board", units(10)))
            .unwrap();

        let detail = inv.product_detail(chair.id).unwrap();
        assert_eq!(detail.bom[0].raw_material_name, "Pine board");
    }

    #[tokio::test]
    async fn test_service_round_trip_through_backend() {
        let (service, task) = InMemoryInventoryService::spawn(8);

        let steel = service
            .create_raw_material(RawMaterialRequest::new("Steel", units(12)))
            .await
            .unwrap();
        let fetched = service.get_raw_material(steel.id).await.unwrap();
        assert_eq!(fetched, steel);
        assert!(matches!(
            service.get_raw_material(RawMaterialId(99)).await,
            Err(ServiceError::NotFound(_))
        ));

        drop(service);
        task.await.unwrap();
    }
}
