use crate::model::{RawMaterial, RawMaterialId};
use store_framework::TrackedState;

/// Client copy of the raw material collection, in service order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMaterialState {
    pub items: Vec<RawMaterial>,
    pub loading: bool,
    pub error: Option<String>,
}

impl TrackedState for RawMaterialState {
    type Lane = ();

    fn loading_mut(&mut self, _lane: ()) -> &mut bool {
        &mut self.loading
    }

    fn error_mut(&mut self) -> &mut Option<String> {
        &mut self.error
    }

    fn size(&self) -> usize {
        self.items.len()
    }
}

impl RawMaterialState {
    pub fn get(&self, id: RawMaterialId) -> Option<&RawMaterial> {
        self.items.iter().find(|m| m.id == id)
    }

    // --- Reducers ---

    pub fn replace_all(&mut self, items: Vec<RawMaterial>) {
        self.items = items;
    }

    pub fn append(&mut self, material: RawMaterial) {
        self.items.push(material);
    }

    /// Replaces the entity with the same id, keeping its position.
    pub fn replace(&mut self, material: RawMaterial) {
        if let Some(slot) = self.items.iter_mut().find(|m| m.id == material.id) {
            *slot = material;
        }
    }

    pub fn remove(&mut self, id: RawMaterialId) {
        self.items.retain(|m| m.id != id);
    }
}
