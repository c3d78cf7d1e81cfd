//! Financial transactions (income and expenses, including supply purchases).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Dated;
use crate::domain::foundation::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Income,
    Expense,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: RecordId,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub amount: f64,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub price_per_unit: Option<f64>,
}

impl Transaction {
    /// Creates an expense recording the purchase of a supply at a unit price.
    pub fn supply_purchase(
        id: RecordId,
        date: NaiveDate,
        description: impl Into<String>,
        quantity: f64,
        price_per_unit: f64,
    ) -> Self {
        Self {
            id,
            date,
            kind: TransactionKind::Expense,
            category: "Supplies".to_string(),
            description: description.into(),
            amount: quantity * price_per_unit,
            quantity: Some(quantity),
            price_per_unit: Some(price_per_unit),
        }
    }

    /// True for expenses that carry a unit price.
    pub fn is_supply_purchase(&self) -> bool {
        self.kind == TransactionKind::Expense && self.price_per_unit.is_some()
    }

    /// Case-insensitive check whether the description mentions `product`.
    pub fn mentions_product(&self, product: &str) -> bool {
        let needle = product.trim().to_lowercase();
        !needle.is_empty() && self.description.to_lowercase().contains(&needle)
    }
}

impl Dated for Transaction {
    fn date(&self) -> NaiveDate {
        self.date
    }
}
