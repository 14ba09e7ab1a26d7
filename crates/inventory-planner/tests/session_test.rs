use inventory_planner::config::ClientConfig;
use inventory_planner::lifecycle::InventorySession;
use inventory_planner::model::{Decimal, ProductId, RawMaterialId};
use inventory_planner::planning_store::PlanningPhase;
use inventory_planner::product_store::{Selection, Toggle};
use inventory_planner::service::{InMemoryInventoryService, ServiceError};
use inventory_planner::views::{self, StockStatus};
use inventory_planner::StoreError;
use std::sync::Arc;
use store_framework::tracing::setup_test_tracing;
use store_framework::StoreClient;
use tokio::task::JoinHandle;

fn units(n: i64) -> Decimal {
    Decimal::from(n)
}

fn start() -> (InventorySession, JoinHandle<()>) {
    setup_test_tracing();
    let (service, backend) = InMemoryInventoryService::spawn(16);
    let config = ClientConfig {
        store_buffer: 8,
        ..ClientConfig::default()
    };
    (InventorySession::start(Arc::new(service), &config), backend)
}

async fn stop(session: InventorySession, backend: JoinHandle<()>) {
    session.shutdown().await.unwrap();
    backend.await.unwrap();
}

#[tokio::test]
async fn test_feasibility_uses_undepleted_stock() {
    let (session, backend) = start();
    let a = RawMaterialId(1);
    let b = RawMaterialId(2);
    session.raw_materials.create("A", units(100)).await.unwrap();
    session.raw_materials.create("B", units(5)).await.unwrap();
    session.products.create("X", units(50)).await.unwrap();
    session.products.create("Y", units(20)).await.unwrap();

    session.products.select_detail(ProductId(1)).await.unwrap();
    session.products.add_bom_entry(a, units(10)).await.unwrap();
    session.products.add_bom_entry(b, units(2)).await.unwrap();
    session.products.select_detail(ProductId(2)).await.unwrap();
    session.products.add_bom_entry(a, units(5)).await.unwrap();

    assert_eq!(session.planning.phase(), PlanningPhase::NeverComputed);
    session.planning.fetch_suggestions().await.unwrap();

    let PlanningPhase::Computed(report) = session.planning.phase() else {
        panic!("report should be computed");
    };
    let x = report.item(ProductId(1)).unwrap();
    assert_eq!((x.producible_quantity, x.total_value), (2, units(100)));
    let y = report.item(ProductId(2)).unwrap();
    assert_eq!((y.producible_quantity, y.total_value), (20, units(400)));
    assert_eq!(report.grand_total_value, units(500));

    stop(session, backend).await;
}

#[tokio::test]
async fn test_deleting_selected_product_clears_detail() {
    let (session, backend) = start();
    session.products.create("Chair", units(40)).await.unwrap();
    session.products.create("Table", units(90)).await.unwrap();
    session.products.select_detail(ProductId(1)).await.unwrap();
    assert!(session.products.state().selection.is_selected(ProductId(1)));

    session.products.delete(ProductId(1)).await.unwrap();

    let state = session.products.snapshot().await.unwrap();
    assert_eq!(state.selection, Selection::None);
    assert_eq!(state.items.len(), 1);

    // Re-listing from the service agrees.
    session.products.list().await.unwrap();
    assert!(session.products.state().get(ProductId(1)).is_none());

    stop(session, backend).await;
}

#[tokio::test]
async fn test_add_then_remove_bom_entry_restores_bom() {
    let (session, backend) = start();
    session.raw_materials.create("Pine", units(10)).await.unwrap();
    session.raw_materials.create("Glue", units(3)).await.unwrap();
    session.products.create("Chair", units(40)).await.unwrap();
    session.products.select_detail(ProductId(1)).await.unwrap();
    session
        .products
        .add_bom_entry(RawMaterialId(1), units(2))
        .await
        .unwrap();
    let before = session.products.state().detail().unwrap().bom.clone();

    session
        .products
        .add_bom_entry(RawMaterialId(2), "0.5".parse().unwrap())
        .await
        .unwrap();
    assert_eq!(session.products.state().detail().unwrap().bom.len(), 2);
    session
        .products
        .remove_bom_entry(RawMaterialId(2))
        .await
        .unwrap();

    assert_eq!(session.products.state().detail().unwrap().bom, before);
    session.products.reload_bom().await.unwrap();
    assert_eq!(session.products.state().detail().unwrap().bom, before);

    stop(session, backend).await;
}

#[tokio::test]
async fn test_available_materials_follow_both_stores() {
    let (session, backend) = start();
    for (name, stock) in [("Pine", 12), ("Glue", 4), ("Screws", 0)] {
        session.raw_materials.create(name, units(stock)).await.unwrap();
    }
    assert_eq!(session.available_raw_materials().len(), 3);

    session.products.create("Chair", units(40)).await.unwrap();
    session.products.select_detail(ProductId(1)).await.unwrap();
    session
        .products
        .add_bom_entry(RawMaterialId(2), units(1))
        .await
        .unwrap();

    let available = session.available_raw_materials();
    let bom = session.products.state().detail().unwrap().bom.clone();
    assert!(available.iter().all(|m| bom.iter().all(|e| e.raw_material_id != m.id)));
    assert_eq!(available.len(), 3 - bom.len());

    assert_eq!(
        session.products.select_detail(ProductId(1)).await.unwrap(),
        Toggle::Collapsed
    );
    assert_eq!(session.available_raw_materials().len(), 3);

    let statuses: Vec<StockStatus> = session
        .raw_materials
        .state()
        .items
        .iter()
        .map(|m| StockStatus::of(m.stock_quantity))
        .collect();
    assert_eq!(
        statuses,
        vec![StockStatus::Healthy, StockStatus::Low, StockStatus::Out]
    );
    assert_eq!(views::stock_summary(&session.raw_materials.state().items).total, 3);

    stop(session, backend).await;
}

#[tokio::test]
async fn test_service_rules_surface_as_store_errors() {
    let (session, backend) = start();
    session.raw_materials.create("Pine", units(10)).await.unwrap();
    session.products.create("Chair", units(40)).await.unwrap();
    session.products.select_detail(ProductId(1)).await.unwrap();
    session
        .products
        .add_bom_entry(RawMaterialId(1), units(2))
        .await
        .unwrap();

    let duplicate = session
        .products
        .add_bom_entry(RawMaterialId(1), units(1))
        .await;
    assert!(matches!(
        duplicate,
        Err(StoreError::Remote(ServiceError::Validation(_)))
    ));
    assert_eq!(session.products.state().detail().unwrap().bom.len(), 1);
    assert_eq!(
        session.products.error().as_deref(),
        Some("Raw material already in BOM for this product")
    );

    let in_use = session.raw_materials.delete(RawMaterialId(1)).await;
    assert!(matches!(
        in_use,
        Err(StoreError::Remote(ServiceError::Validation(_)))
    ));
    assert_eq!(session.raw_materials.state().items.len(), 1);

    let missing = session
        .raw_materials
        .update(RawMaterialId(9), "Oak", units(1))
        .await;
    assert!(matches!(
        missing,
        Err(StoreError::Remote(ServiceError::NotFound(_)))
    ));

    // A later success clears the message.
    session.raw_materials.list().await.unwrap();
    assert!(session.raw_materials.error().is_none());

    stop(session, backend).await;
}
