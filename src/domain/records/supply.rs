//! Supply inventory items (fertilizers and crop-protection products).

use serde::{Deserialize, Serialize};

use crate::domain::foundation::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupplyType {
    Fertilizer,
    Fungicide,
    Insecticide,
    Acaricide,
}

/// A product held in the farm's inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyItem {
    pub id: RecordId,
    pub name: String,
    #[serde(rename = "type")]
    pub supply_type: SupplyType,
    #[serde(default)]
    pub composition: String,
    pub stock: f64,
    #[serde(default)]
    pub low_stock_threshold: f64,
}

impl SupplyItem {
    pub fn new(
        id: RecordId,
        name: impl Into<String>,
        supply_type: SupplyType,
        stock: f64,
        low_stock_threshold: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            supply_type,
            composition: String::new(),
            stock,
            low_stock_threshold,
        }
    }

    pub fn with_composition(mut self, composition: impl Into<String>) -> Self {
        self.composition = composition.into();
        self
    }

    /// True when stock is at or below the low-stock threshold.
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.low_stock_threshold
    }
}
