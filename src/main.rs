//! Profitability report over a farm records snapshot.

use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use berry_sherpa::config::{AppConfig, ValidationError};
use berry_sherpa::domain::analysis::{BatchCostSummary, FarmCostOverview};
use berry_sherpa::domain::records::FarmRecords;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfitabilityReport {
    batches: Vec<BatchCostSummary>,
    overview: FarmCostOverview,
}

fn init_tracing(json_logs: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "berry_sherpa=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    if json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(config.report.json_logs);

    let path = config
        .report
        .snapshot_path
        .clone()
        .ok_or(ValidationError::MissingRequired("REPORT_SNAPSHOT_PATH"))?;

    let records = FarmRecords::from_json_file(&path)?;
    let batches = records.batch_profitability();
    let overview = FarmCostOverview::from_summaries(&batches);

    info!(
        environment = ?config.report.environment,
        snapshot = %path.display(),
        batches = overview.batch_count,
        unpriced_applications = overview.unpriced_applications,
        "Profitability report computed"
    );

    let report = ProfitabilityReport { batches, overview };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
