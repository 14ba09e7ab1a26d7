//! # Raw Material Store
//!
//! The client copy of every raw material and its stock level.
//!
//! | Operation | Merge on success |
//! |---|---|
//! | [`list`](RawMaterialStore::list) | replace the collection, in service order |
//! | [`refresh`](RawMaterialStore::refresh) | replace one entity in place |
//! | [`create`](RawMaterialStore::create) | append the returned entity |
//! | [`update`](RawMaterialStore::update) | replace in place, ignored if absent |
//! | [`delete`](RawMaterialStore::delete) | remove, ignored if absent |
//!
//! A failure of any of them leaves the collection as it was and records the
//! message in `error`.

pub mod state;

pub use state::RawMaterialState;

use crate::error::StoreError;
use crate::model::{Decimal, RawMaterialId, RawMaterialRequest};
use crate::service::InventoryService;
use std::sync::Arc;
use store_framework::{StoreActor, StoreClient, StoreHandle};
use tracing::instrument;

/// Creates the store task and the store that drives it.
pub fn new(
    service: Arc<dyn InventoryService>,
    buffer_size: usize,
) -> (StoreActor<RawMaterialState>, RawMaterialStore) {
    let (actor, handle) = StoreActor::new(buffer_size);
    (actor, RawMaterialStore { handle, service })
}

#[derive(Clone)]
pub struct RawMaterialStore {
    handle: StoreHandle<RawMaterialState>,
    service: Arc<dyn InventoryService>,
}

impl StoreClient<RawMaterialState> for RawMaterialStore {
    fn handle(&self) -> &StoreHandle<RawMaterialState> {
        &self.handle
    }
}

impl RawMaterialStore {
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<(), StoreError> {
        self.handle
            .track(
                (),
                "list",
                self.service.list_raw_materials(),
                RawMaterialState::replace_all,
            )
            .await?;
        Ok(())
    }

    /// Re-reads one raw material.
    #[instrument(skip(self))]
    pub async fn refresh(&self, id: RawMaterialId) -> Result<(), StoreError> {
        self.handle
            .track(
                (),
                "refresh",
                self.service.get_raw_material(id),
                RawMaterialState::replace,
            )
            .await?;
        Ok(())
    }

    #[instrument(skip(self, name))]
    pub async fn create(
        &self,
        name: impl Into<String>,
        stock_quantity: Decimal,
    ) -> Result<(), StoreError> {
        let request = RawMaterialRequest::new(name, stock_quantity);
        self.handle
            .track(
                (),
                "create",
                self.service.create_raw_material(request),
                RawMaterialState::append,
            )
            .await?;
        Ok(())
    }

    #[instrument(skip(self, name))]
    pub async fn update(
        &self,
        id: RawMaterialId,
        name: impl Into<String>,
        stock_quantity: Decimal,
    ) -> Result<(), StoreError> {
        let request = RawMaterialRequest::new(name, stock_quantity);
        self.handle
            .track(
                (),
                "update",
                self.service.update_raw_material(id, request),
                RawMaterialState::replace,
            )
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: RawMaterialId) -> Result<(), StoreError> {
        self.handle
            .track(
                (),
                "delete",
                self.service.delete_raw_material(id),
                move |state, ()| state.remove(id),
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawMaterial;
    use crate::service::{MockInventoryService, ServiceError};

    fn material(id: u64, name: &str, stock: i64) -> RawMaterial {
        RawMaterial::new(RawMaterialId(id), name, Decimal::from(stock))
    }

    fn start(mock: &MockInventoryService) -> RawMaterialStore {
        let (actor, store) = new(Arc::new(mock.clone()), 16);
        tokio::spawn(actor.run());
        store
    }

    #[tokio::test]
    async fn test_create_appends_server_entity() {
        let mock = MockInventoryService::new();
        mock.list_raw_materials
            .expect()
            .return_ok(vec![material(1, "Pine", 5)]);
        mock.create_raw_material
            .expect()
            .return_ok(material(7, "Oak", 2));
        let store = start(&mock);

        store.list().await.unwrap();
        store.create("Oak", Decimal::from(2)).await.unwrap();

        let state = store.snapshot().await.unwrap();
        let ids: Vec<u64> = state.items.iter().map(|m| m.id.0).collect();
        assert_eq!(ids, vec![1, 7]);
        assert!(!state.loading);
        mock.verify();
    }

    #[tokio::test]
    async fn test_failed_update_leaves_collection_untouched() {
        let mock = MockInventoryService::new();
        mock.list_raw_materials
            .expect()
            .return_ok(vec![material(1, "Pine", 5), material(2, "Oak", 3)]);
        mock.update_raw_material
            .expect()
            .return_err(ServiceError::validation("name must not be blank"));
        let store = start(&mock);

        store.list().await.unwrap();
        let before = store.state().items;

        let result = store.update(RawMaterialId(1), "", Decimal::from(5)).await;
        assert!(matches!(result, Err(StoreError::Remote(ServiceError::Validation(_)))));

        let state = store.snapshot().await.unwrap();
        assert_eq!(state.items, before);
        assert_eq!(state.error.as_deref(), Some("name must not be blank"));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_refresh_and_delete() {
        let mock = MockInventoryService::new();
        mock.list_raw_materials
            .expect()
            .return_ok(vec![material(1, "Pine", 5), material(2, "Oak", 3)]);
        mock.get_raw_material
            .expect()
            .return_ok(material(2, "Oak", 30));
        mock.delete_raw_material.expect().return_ok(());
        let store = start(&mock);

        store.list().await.unwrap();
        store.refresh(RawMaterialId(2)).await.unwrap();
        assert_eq!(
            store.state().get(RawMaterialId(2)).unwrap().stock_quantity,
            Decimal::from(30)
        );

        store.delete(RawMaterialId(1)).await.unwrap();
        let ids: Vec<u64> = store.state().items.iter().map(|m| m.id.0).collect();
        assert_eq!(ids, vec![2]);
        mock.verify();
    }
}
