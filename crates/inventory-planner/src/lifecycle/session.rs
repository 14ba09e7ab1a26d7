use crate::config::ClientConfig;
use crate::model::RawMaterial;
use crate::planning_store::{self, PlanningStore};
use crate::product_store::{self, ProductStore};
use crate::raw_material_store::{self, RawMaterialStore};
use crate::service::InventoryService;
use crate::views;
use std::sync::Arc;
use store_framework::StoreClient;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("store task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

/// The explicit context object of a client session.
///
/// Created once, it owns the three stores; clone the stores out of it to
/// share them. Cross-store reads such as
/// [`available_raw_materials`](InventorySession::available_raw_materials)
/// are recomputed from both stores on every call.
pub struct InventorySession {
    pub raw_materials: RawMaterialStore,
    pub products: ProductStore,
    pub planning: PlanningStore,

    /// Store tasks, awaited on shutdown.
    handles: Vec<JoinHandle<()>>,
}

impl InventorySession {
    /// Spawns the store tasks on the current runtime, all talking to
    /// `service`.
    pub fn start(service: Arc<dyn InventoryService>, config: &ClientConfig) -> Self {
        let buffer = config.store_buffer;
        let (raw_material_actor, raw_materials) =
            raw_material_store::new(service.clone(), buffer);
        let (product_actor, products) = product_store::new(service.clone(), buffer);
        let (planning_actor, planning) = planning_store::new(service, buffer);

        let handles = vec![
            tokio::spawn(raw_material_actor.run()),
            tokio::spawn(product_actor.run()),
            tokio::spawn(planning_actor.run()),
        ];
        info!(buffer, "Session started");

        Self {
            raw_materials,
            products,
            planning,
            handles,
        }
    }

    /// Raw materials not yet in the selected product's bill of materials.
    pub fn available_raw_materials(&self) -> Vec<RawMaterial> {
        let materials = self.raw_materials.state();
        let products = self.products.state();
        views::available_raw_materials(&materials.items, products.detail())
    }

    /// Drops the session's stores and waits for the store tasks.
    ///
    /// A task only stops once every clone of its store is gone, so clones
    /// handed out earlier must be dropped first.
    pub async fn shutdown(self) -> Result<(), SessionError> {
        info!("Shutting down session...");
        drop(self.raw_materials);
        drop(self.products);
        drop(self.planning);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(e.into());
            }
        }

        info!("Session shutdown complete.");
        Ok(())
    }
}
