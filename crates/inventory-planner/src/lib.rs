//! # Inventory Planner
//!
//! Client-side state for an inventory and production-planning tool: raw
//! materials with stock levels, products built from a bill of materials (BOM),
//! and a report of how many units current stock can support.
//!
//! ## Modules
//!
//! - **[model]**: data exchanged with the service, with exact
//!   [`Decimal`](model::Decimal) quantities.
//! - **[service]**: the [`InventoryService`](service::InventoryService) contract and its HTTP,
//!   in-memory and scripted implementations.
//! - **[raw_material_store]**, **[product_store]**, **[planning_store]**: one store task each,
//!   built on [`store_framework`].
//! - **[views]**: derived views, recomputed on every read.
//! - **[lifecycle]**: the session context that starts and stops the stores.
//!
//! ## Quick Start
//!
//! ```rust
//! use inventory_planner::config::ClientConfig;
//! use inventory_planner::lifecycle::InventorySession;
//! use inventory_planner::model::Decimal;
//! use inventory_planner::service::InMemoryInventoryService;
//! use std::sync::Arc;
//! use store_framework::StoreClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (service, _backend) = InMemoryInventoryService::spawn(16);
//!     let session = InventorySession::start(Arc::new(service), &ClientConfig::default());
//!
//!     session.raw_materials.create("Pine board", Decimal::from(40)).await?;
//!     session.products.create("Stool", Decimal::from(25)).await?;
//!     assert_eq!(session.raw_materials.state().items.len(), 1);
//!
//!     session.shutdown().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod planning_store;
pub mod product_store;
pub mod raw_material_store;
pub mod service;
pub mod views;

pub use error::StoreError;
