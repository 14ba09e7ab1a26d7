//! Production feasibility report.
use serde::{Deserialize, Serialize};

use super::{Decimal, ProductId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub product_value: Decimal,
    pub producible_quantity: u64,
    pub total_value: Decimal,
}

/// A complete report. Always replaced as a whole, never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionSuggestion {
    pub suggestions: Vec<SuggestionItem>,
    pub grand_total_value: Decimal,
}

impl ProductionSuggestion {
    pub fn item(&self, product_id: ProductId) -> Option<&SuggestionItem> {
        self.suggestions.iter().find(|s| s.product_id == product_id)
    }
}
