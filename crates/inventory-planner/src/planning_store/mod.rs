//! # Production Planning Store
//!
//! Holds the latest feasibility report. A fetch replaces the whole report; the
//! client never recomputes or patches totals.

pub mod state;

pub use state::{PlanningPhase, PlanningState};

use crate::error::StoreError;
use crate::service::InventoryService;
use std::sync::Arc;
use store_framework::{StoreActor, StoreClient, StoreHandle};
use tracing::instrument;

pub fn new(
    service: Arc<dyn InventoryService>,
    buffer_size: usize,
) -> (StoreActor<PlanningState>, PlanningStore) {
    let (actor, handle) = StoreActor::new(buffer_size);
    (actor, PlanningStore { handle, service })
}

#[derive(Clone)]
pub struct PlanningStore {
    handle: StoreHandle<PlanningState>,
    service: Arc<dyn InventoryService>,
}

impl StoreClient<PlanningState> for PlanningStore {
    fn handle(&self) -> &StoreHandle<PlanningState> {
        &self.handle
    }
}

impl PlanningStore {
    #[instrument(skip(self))]
    pub async fn fetch_suggestions(&self) -> Result<(), StoreError> {
        self.handle
            .track(
                (),
                "fetch_suggestions",
                self.service.production_suggestions(),
                PlanningState::replace_report,
            )
            .await?;
        Ok(())
    }

    pub fn phase(&self) -> PlanningPhase {
        self.handle.state().phase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Decimal, ProductId, ProductionSuggestion, SuggestionItem};
    use crate::service::{MockInventoryService, ServiceError};

    fn report(total: i64) -> ProductionSuggestion {
        ProductionSuggestion {
            suggestions: vec![SuggestionItem {
                product_id: ProductId(1),
                product_name: "Chair".into(),
                product_value: Decimal::from(total),
                producible_quantity: 1,
                total_value: Decimal::from(total),
            }],
            grand_total_value: Decimal::from(total),
        }
    }

    fn start(mock: &MockInventoryService) -> PlanningStore {
        let (actor, store) = new(Arc::new(mock.clone()), 4);
        tokio::spawn(actor.run());
        store
    }

    #[tokio::test]
    async fn test_phases() {
        let mock = MockInventoryService::new();
        let pending = mock.production_suggestions.expect().deferred();
        let store = start(&mock);
        assert_eq!(store.phase(), PlanningPhase::NeverComputed);

        let fetch = tokio::spawn({
            let store = store.clone();
            async move { store.fetch_suggestions().await }
        });
        mock.production_suggestions.wait_for_calls(1).await;
        assert_eq!(store.phase(), PlanningPhase::Computing);

        pending.resolve_ok(report(40));
        fetch.await.unwrap().unwrap();
        assert_eq!(store.phase(), PlanningPhase::Computed(report(40)));
    }

    #[tokio::test]
    async fn test_report_is_replaced_wholesale_and_kept_on_failure() {
        let mock = MockInventoryService::new();
        mock.production_suggestions.expect().return_ok(report(40));
        mock.production_suggestions.expect().return_ok(report(15));
        mock.production_suggestions
            .expect()
            .return_err(ServiceError::Network("connection reset".into()));
        let store = start(&mock);

        store.fetch_suggestions().await.unwrap();
        store.fetch_suggestions().await.unwrap();
        assert_eq!(store.state().report, Some(report(15)));

        assert!(store.fetch_suggestions().await.is_err());
        let state = store.snapshot().await.unwrap();
        assert_eq!(state.report, Some(report(15)));
        assert_eq!(
            state.error.as_deref(),
            Some("network failure: connection reset")
        );
        mock.verify();
    }
}
