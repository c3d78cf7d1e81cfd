//! SummarizeReportHandler - Narrative summary of a report period.
//!
//! Runs the cost engine over the period before asking the model, so the
//! summary is grounded on computed figures only.

use std::sync::Arc;
use tracing::info;

use super::FlowRunner;
use crate::domain::advisor::{
    FlowContext, FlowError, FlowInputAssembler, FlowKind, FlowOutcome, ReportSummary,
    ReportSummaryRequest,
};
use crate::domain::analysis::{compute_batch_profitability, BatchCostSummary};
use crate::domain::records::{AgronomistLogEntry, CulturalPracticeLog, HarvestRecord, Transaction};
use crate::ports::Message;

/// Report summary with the cost figures it was based on.
#[derive(Debug, Clone)]
pub struct SummarizeReportResult {
    pub outcome: FlowOutcome<ReportSummary>,
    pub batch_costs: Vec<BatchCostSummary>,
}

pub struct SummarizeReportHandler {
    runner: Arc<FlowRunner>,
}

impl SummarizeReportHandler {
    pub fn new(runner: Arc<FlowRunner>) -> Self {
        Self { runner }
    }

    pub async fn handle(
        &self,
        context: &FlowContext,
        request: ReportSummaryRequest,
    ) -> Result<SummarizeReportResult, FlowError> {
        request.validate()?;

        let batch_costs = period_costs(&request);
        let assembler = FlowInputAssembler::new(self.runner.settings().window(context));
        let input = assembler.report_summary(&request, &batch_costs)?;

        let outcome: FlowOutcome<ReportSummary> = self
            .runner
            .run(FlowKind::ReportSummary, context, Message::user(input))
            .await?;

        info!(
            trace_id = %context.trace_id,
            batches = batch_costs.len(),
            highlights = outcome.output.highlights.len(),
            "Report summary produced"
        );
        Ok(SummarizeReportResult {
            outcome,
            batch_costs,
        })
    }
}

/// Costs of the harvests, practices and applications dated inside the
/// period. Supply prices known up to the end of the period apply.
fn period_costs(request: &ReportSummaryRequest) -> Vec<BatchCostSummary> {
    let harvests: Vec<HarvestRecord> = request
        .harvests
        .iter()
        .filter(|h| request.in_period(h.date))
        .cloned()
        .collect();
    let practices: Vec<CulturalPracticeLog> = request
        .cultural_practice_logs
        .iter()
        .filter(|p| request.in_period(p.date))
        .cloned()
        .collect();
    let applications: Vec<AgronomistLogEntry> = request
        .agronomist_logs
        .iter()
        .filter(|l| request.in_period(l.date))
        .cloned()
        .collect();
    let transactions: Vec<Transaction> = request
        .transactions
        .iter()
        .filter(|t| t.date <= request.period_end)
        .cloned()
        .collect();

    compute_batch_profitability(
        &harvests,
        &request.collector_payments,
        &practices,
        &applications,
        &transactions,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> ReportSummaryRequest {
        serde_json::from_value(json!({
            "title": "May",
            "periodStart": "2024-05-01",
            "periodEnd": "2024-05-31",
            "harvests": [
                {"id": "h-1", "date": "2024-05-10", "batchNumber": "L014", "kilograms": 100},
                {"id": "h-2", "date": "2024-04-28", "batchNumber": "L014", "kilograms": 50}
            ],
            "collectorPayments": [
                {"id": "p-1", "date": "2024-05-10", "harvestId": "h-1", "kilograms": 100, "payment": 45},
                {"id": "p-2", "date": "2024-04-28", "harvestId": "h-2", "kilograms": 50, "payment": 20}
            ],
            "culturalPracticeLogs": [
                {"id": "c-1", "date": "2024-06-02", "batchId": "L014", "activity": "Pruning", "payment": 30}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn costs_only_cover_the_period() {
        let costs = period_costs(&request());

        assert_eq!(costs.len(), 1);
        assert_eq!(costs[0].total_kilos, 100.0);
        assert_eq!(costs[0].harvest_labor_cost, 45.0);
        assert_eq!(costs[0].cultural_practice_cost, 0.0);
    }
}
