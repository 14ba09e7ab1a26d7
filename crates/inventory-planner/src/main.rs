use inventory_planner::config::ClientConfig;
use inventory_planner::lifecycle::InventorySession;
use inventory_planner::model::{Decimal, ProductId, RawMaterialId};
use inventory_planner::planning_store::PlanningPhase;
use inventory_planner::service::{
    HttpInventoryService, InMemoryInventoryService, InventoryService,
};
use inventory_planner::views::{stock_summary, StockStatus};
use std::error::Error;
use std::sync::Arc;
use store_framework::tracing::setup_tracing;
use store_framework::StoreClient;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_tracing();
    let config = ClientConfig::from_env()?;

    if ClientConfig::remote_configured() {
        info!(url = %config.api_base_url, "Using remote inventory service");
        let service = HttpInventoryService::from_config(&config);
        return browse(Arc::new(service), &config).await;
    }

    info!("INVENTORY_API_URL not set, using in-memory inventory service");
    let (service, backend) = InMemoryInventoryService::spawn(config.store_buffer);
    demo(Arc::new(service), &config).await?;
    backend.await?;
    Ok(())
}

/// Read-only tour of a live service.
async fn browse(
    service: Arc<dyn InventoryService>,
    config: &ClientConfig,
) -> Result<(), Box<dyn Error>> {
    let session = InventorySession::start(service, config);

    if let Err(e) = session.raw_materials.list().await {
        warn!(error = %e, "Could not load raw materials");
    }
    if let Err(e) = session.planning.fetch_suggestions().await {
        warn!(error = %e, "Could not compute suggestions");
    }
    report(&session);

    session.shutdown().await?;
    Ok(())
}

/// Seeds an empty inventory, then walks through the main flows.
async fn demo(
    service: Arc<dyn InventoryService>,
    config: &ClientConfig,
) -> Result<(), Box<dyn Error>> {
    let session = InventorySession::start(service, config);

    async {
        session.raw_materials.create("Pine board", Decimal::from(100)).await?;
        session.raw_materials.create("Wood glue", Decimal::from(5)).await?;
        session.raw_materials.create("Steel screw", Decimal::ZERO).await?;
        session.products.create("Bookshelf", Decimal::from(50)).await?;
        session.products.create("Stool", Decimal::from(20)).await?;
        Ok::<_, inventory_planner::StoreError>(())
    }
    .instrument(tracing::info_span!("seed"))
    .await?;

    let pine = RawMaterialId(1);
    let glue = RawMaterialId(2);
    let screws = RawMaterialId(3);
    let bookshelf = ProductId(1);
    let stool = ProductId(2);

    session.products.select_detail(bookshelf).await?;
    session.products.add_bom_entry(pine, Decimal::from(10)).await?;
    session.products.add_bom_entry(glue, Decimal::from(2)).await?;
    info!(
        available = session.available_raw_materials().len(),
        "Bookshelf BOM ready"
    );

    session.products.select_detail(stool).await?;
    session.products.add_bom_entry(pine, Decimal::from(5)).await?;

    // Rejected by the service; the store keeps its data and records the message.
    if session.raw_materials.delete(pine).await.is_err() {
        warn!(error = ?session.raw_materials.error(), "Delete rejected");
    }
    session.raw_materials.refresh(screws).await?;

    session.planning.fetch_suggestions().await?;
    report(&session);

    session.shutdown().await?;
    Ok(())
}

fn report(session: &InventorySession) {
    let materials = session.raw_materials.state().items;
    let summary = stock_summary(&materials);
    info!(
        total = summary.total,
        healthy = summary.healthy,
        low = summary.low,
        out = summary.out,
        "Stock"
    );
    for material in &materials {
        info!(
            name = %material.name,
            stock = %material.stock_quantity,
            status = %StockStatus::of(material.stock_quantity),
            "Raw material"
        );
    }

    match session.planning.phase() {
        PlanningPhase::Computed(report) => {
            for item in &report.suggestions {
                info!(
                    product = %item.product_name,
                    quantity = item.producible_quantity,
                    total = %item.total_value,
                    "Suggestion"
                );
            }
            info!(grand_total = %report.grand_total_value, "Production plan");
        }
        PlanningPhase::Computing => info!("Production plan still computing"),
        PlanningPhase::NeverComputed => info!("No production plan"),
    }
}
