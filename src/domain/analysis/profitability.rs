//! Batch profitability - cost aggregation per harvested batch.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::foundation::{BatchId, RecordId};
use crate::domain::records::{
    AgronomistLogEntry, CollectorPaymentLog, CulturalPracticeLog, HarvestRecord, Transaction,
};

/// A product application that no supply purchase could price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnpricedApplication {
    pub log_id: RecordId,
    pub product: String,
    pub quantity_used: f64,
}

/// Cost breakdown of one batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchCostSummary {
    pub batch_id: BatchId,
    pub total_kilos: f64,
    pub harvest_labor_cost: f64,
    pub cultural_practice_cost: f64,
    pub total_labor_cost: f64,
    pub input_cost: f64,
    pub total_cost: f64,
    pub cost_per_kg: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unpriced_applications: Vec<UnpricedApplication>,
}

#[derive(Default)]
struct BatchTotals {
    kilos: f64,
    harvest_labor: f64,
    cultural_practice: f64,
    input: f64,
    unpriced: Vec<UnpricedApplication>,
}

impl BatchTotals {
    fn into_summary(self, batch_id: BatchId) -> BatchCostSummary {
        let total_labor_cost = self.harvest_labor + self.cultural_practice;
        let total_cost = total_labor_cost + self.input;
        BatchCostSummary {
            batch_id,
            total_kilos: self.kilos,
            harvest_labor_cost: self.harvest_labor,
            cultural_practice_cost: self.cultural_practice,
            total_labor_cost,
            input_cost: self.input,
            total_cost,
            cost_per_kg: per_kilo(total_cost, self.kilos),
            unpriced_applications: self.unpriced,
        }
    }
}

fn per_kilo(cost: f64, kilos: f64) -> f64 {
    if kilos > 0.0 {
        cost / kilos
    } else {
        0.0
    }
}

/// Computes the cost summary of every batch that has at least one harvest.
///
/// Pure and deterministic: results are ordered by batch id and the same
/// inputs always produce the same output.
///
/// # Edge Cases
/// - Payments referencing unknown harvests or batches are ignored
/// - Applications with no matching supply purchase contribute zero and are
///   listed in `unpriced_applications`
/// - A batch whose harvests total zero kilos has `cost_per_kg == 0`
pub fn compute_batch_profitability(
    harvests: &[HarvestRecord],
    collector_payments: &[CollectorPaymentLog],
    cultural_practice_logs: &[CulturalPracticeLog],
    agronomist_logs: &[AgronomistLogEntry],
    transactions: &[Transaction],
) -> Vec<BatchCostSummary> {
    let mut totals: BTreeMap<BatchId, BatchTotals> = BTreeMap::new();
    let mut harvest_batches: HashMap<&RecordId, &BatchId> = HashMap::new();

    for harvest in harvests {
        totals.entry(harvest.batch_number.clone()).or_default().kilos += harvest.kilograms;
        harvest_batches.insert(&harvest.id, &harvest.batch_number);
    }

    for payment in collector_payments {
        let batch = harvest_batches.get(&payment.harvest_id);
        if let Some(entry) = batch.and_then(|b| totals.get_mut(*b)) {
            entry.harvest_labor += payment.payment;
        }
    }

    for log in cultural_practice_logs {
        if let Some(entry) = totals.get_mut(&log.batch_id) {
            entry.cultural_practice += log.payment;
        }
    }

    for log in agronomist_logs {
        let Some(batch_id) = log.batch_id.as_ref() else {
            continue;
        };
        let Some(entry) = totals.get_mut(batch_id) else {
            continue;
        };
        let Some((product, quantity)) = log.application() else {
            continue;
        };

        match latest_unit_price(transactions, product) {
            Some(price) => entry.input += quantity * price,
            None => {
                debug!(
                    batch_id = %batch_id,
                    log_id = %log.id,
                    product = product,
                    "No supply purchase found for applied product"
                );
                entry.unpriced.push(UnpricedApplication {
                    log_id: log.id.clone(),
                    product: product.to_string(),
                    quantity_used: quantity,
                });
            }
        }
    }

    totals
        .into_iter()
        .map(|(batch_id, t)| t.into_summary(batch_id))
        .collect()
}

/// Unit price of the most recent supply purchase mentioning `product`.
///
/// On equal dates the purchase appearing later in `transactions` wins.
pub fn latest_unit_price(transactions: &[Transaction], product: &str) -> Option<f64> {
    transactions
        .iter()
        .filter(|t| t.is_supply_purchase() && t.mentions_product(product))
        .fold(None::<&Transaction>, |best, t| match best {
            Some(b) if b.date > t.date => Some(b),
            _ => Some(t),
        })
        .and_then(|t| t.price_per_unit)
}

/// Farm-wide totals over a set of batch summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmCostOverview {
    pub batch_count: usize,
    pub total_kilos: f64,
    pub total_labor_cost: f64,
    pub total_input_cost: f64,
    pub total_cost: f64,
    pub cost_per_kg: f64,
    pub unpriced_applications: usize,
}

impl FarmCostOverview {
    pub fn from_summaries(summaries: &[BatchCostSummary]) -> Self {
        let total_kilos: f64 = summaries.iter().map(|s| s.total_kilos).sum();
        let total_labor_cost: f64 = summaries.iter().map(|s| s.total_labor_cost).sum();
        let total_input_cost: f64 = summaries.iter().map(|s| s.input_cost).sum();
        let total_cost = total_labor_cost + total_input_cost;

        Self {
            batch_count: summaries.len(),
            total_kilos,
            total_labor_cost,
            total_input_cost,
            total_cost,
            cost_per_kg: per_kilo(total_cost, total_kilos),
            unpriced_applications: summaries.iter().map(|s| s.unpriced_applications.len()).sum(),
        }
    }
}
