//! Flow Input Assembler - Windowing and text serialization of record streams.
//!
//! Each stream is rendered as a compact pipe-delimited block:
//!
//! ```text
//! ## Recent harvests (2)
//! date | batch | kilograms | collector
//! 2024-05-10 | L014 | 100.0 | col-7
//! 2024-05-09 | L014 | 80.5 | col-2
//! ```
//!
//! Empty streams render as `(none recorded)` so the model can tell a missing
//! stream from an omitted one.

use chrono::{Days, NaiveDate};

use super::{
    ApplicationRecommendationRequest, FlowError, ReportSummaryRequest, YieldPredictionRequest,
};
use crate::domain::analysis::{BatchCostSummary, FarmCostOverview};
use crate::domain::foundation::{BatchId, Coordinates};
use crate::domain::records::{
    AgronomistLogEntry, BatchScope, BatchScoped, Dated, HarvestRecord, PhenologyLogEntry,
    SupplyItem,
};

pub const NONE_RECORDED: &str = "(none recorded)";

/// Time and count bound applied to every record stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblyWindow {
    pub as_of: NaiveDate,
    pub days: u32,
    pub max_entries: usize,
}

impl AssemblyWindow {
    pub const DEFAULT_DAYS: u32 = 30;
    pub const DEFAULT_MAX_ENTRIES: usize = 50;

    pub fn new(as_of: NaiveDate, days: u32, max_entries: usize) -> Self {
        Self {
            as_of,
            days,
            max_entries,
        }
    }

    /// Window ending on `as_of` with default bounds.
    pub fn ending(as_of: NaiveDate) -> Self {
        Self::new(as_of, Self::DEFAULT_DAYS, Self::DEFAULT_MAX_ENTRIES)
    }

    /// First day inside the window. `as_of` counts as the window's last day,
    /// so a 30-day window spans exactly 30 calendar days.
    pub fn start(&self) -> NaiveDate {
        self.as_of
            .checked_sub_days(Days::new(u64::from(self.days.saturating_sub(1))))
            .unwrap_or(NaiveDate::MIN)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start() && date <= self.as_of
    }
}

/// Records dated inside the window, newest first, at most `max_entries`.
///
/// Records sharing a date keep their input order.
pub fn select_recent<'a, T, I>(records: I, window: &AssemblyWindow) -> Vec<&'a T>
where
    T: Dated + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut selected: Vec<&T> = records
        .into_iter()
        .filter(|r| window.contains(r.date()))
        .collect();
    selected.sort_by(|a, b| b.date().cmp(&a.date()));
    selected.truncate(window.max_entries);
    selected
}

// Keeps free text from breaking the row format.
fn cell(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .map(|c| match c {
            '|' => '/',
            '\n' | '\r' | '\t' => ' ',
            other => other,
        })
        .collect();
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        "-".to_string()
    } else {
        trimmed.to_string()
    }
}

fn opt_num<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn render_block(title: &str, columns: &[&str], rows: Vec<String>) -> String {
    if rows.is_empty() {
        return format!("## {}\n{}", title, NONE_RECORDED);
    }
    format!(
        "## {} ({})\n{}\n{}",
        title,
        rows.len(),
        columns.join(" | "),
        rows.join("\n")
    )
}

pub fn render_harvests(harvests: &[&HarvestRecord]) -> String {
    let rows = harvests
        .iter()
        .map(|h| {
            format!(
                "{} | {} | {:.1} | {}",
                h.date,
                h.batch_number,
                h.kilograms,
                cell(&h.collector_ref)
            )
        })
        .collect();
    render_block("Recent harvests", &["date", "batch", "kilograms", "collector"], rows)
}

fn agronomist_rows(logs: &[&AgronomistLogEntry]) -> Vec<String> {
    logs.iter()
        .map(|l| {
            format!(
                "{} | {} | {} | {} | {} | {}",
                l.date,
                l.log_type.label(),
                l.batch_id.as_ref().map_or(BatchScope::GENERAL.to_string(), |b| b.to_string()),
                cell(l.product.as_deref().unwrap_or("")),
                opt_num(l.quantity_used),
                cell(&l.notes)
            )
        })
        .collect()
}

const AGRONOMIST_COLUMNS: &[&str] = &["date", "type", "batch", "product", "quantity", "notes"];

pub fn render_agronomist_logs(logs: &[&AgronomistLogEntry]) -> String {
    render_block("Agronomist logs", AGRONOMIST_COLUMNS, agronomist_rows(logs))
}

pub fn render_environmental_logs(logs: &[&AgronomistLogEntry]) -> String {
    render_block("Environmental logs", AGRONOMIST_COLUMNS, agronomist_rows(logs))
}

pub fn render_phenology_logs(logs: &[&PhenologyLogEntry]) -> String {
    let rows = logs
        .iter()
        .map(|p| {
            format!(
                "{} | {:?} | {} | {} | {} | {}",
                p.date,
                p.development_state,
                p.batch_id.as_ref().map_or(BatchScope::GENERAL.to_string(), |b| b.to_string()),
                opt_num(p.flower_count),
                opt_num(p.fruit_count),
                cell(&p.notes)
            )
        })
        .collect();
    render_block(
        "Phenology logs",
        &["date", "stage", "batch", "flowers", "fruits", "notes"],
        rows,
    )
}

pub fn render_supplies(supplies: &[&SupplyItem]) -> String {
    let rows = supplies
        .iter()
        .map(|s| {
            format!(
                "{} | {:?} | {} | {} | {}{}",
                cell(&s.name),
                s.supply_type,
                cell(&s.composition),
                s.stock,
                s.low_stock_threshold,
                if s.is_low_stock() { " | LOW STOCK" } else { "" }
            )
        })
        .collect();
    render_block(
        "Supplies",
        &["name", "type", "composition", "stock", "low-stock threshold"],
        rows,
    )
}

pub fn render_batch_costs(summaries: &[BatchCostSummary]) -> String {
    let rows = summaries
        .iter()
        .map(|s| {
            format!(
                "{} | {:.1} | {:.2} | {:.2} | {:.2} | {:.2} | {}",
                s.batch_id,
                s.total_kilos,
                s.total_labor_cost,
                s.input_cost,
                s.total_cost,
                s.cost_per_kg,
                s.unpriced_applications.len()
            )
        })
        .collect();
    render_block(
        "Batch costs",
        &["batch", "kilos", "labor", "inputs", "total", "cost/kg", "unpriced applications"],
        rows,
    )
}

fn render_overview(overview: &FarmCostOverview) -> String {
    format!(
        "## Farm totals\nbatches {} | kilos {:.1} | labor {:.2} | inputs {:.2} | total {:.2} | cost/kg {:.2} | unpriced applications {}",
        overview.batch_count,
        overview.total_kilos,
        overview.total_labor_cost,
        overview.total_input_cost,
        overview.total_cost,
        overview.cost_per_kg,
        overview.unpriced_applications
    )
}

fn render_location(coordinates: &Coordinates) -> String {
    format!(
        "Farm location: latitude {}, longitude {}",
        coordinates.latitude(),
        coordinates.longitude()
    )
}

/// Builds the context message of each flow from its request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowInputAssembler {
    window: AssemblyWindow,
}

impl FlowInputAssembler {
    pub fn new(window: AssemblyWindow) -> Self {
        Self { window }
    }

    pub fn window(&self) -> &AssemblyWindow {
        &self.window
    }

    /// Context for a yield prediction.
    ///
    /// # Errors
    ///
    /// `InsufficientData` when the batch has no harvest inside the window.
    pub fn yield_prediction(
        &self,
        batch_id: &BatchId,
        coordinates: &Coordinates,
        request: &YieldPredictionRequest,
    ) -> Result<String, FlowError> {
        let harvests = select_recent(
            request.recent_harvests.iter().filter(|h| h.applies_to(batch_id)),
            &self.window,
        );
        if harvests.is_empty() {
            return Err(FlowError::InsufficientData {
                input: "recent harvests",
            });
        }

        let agronomist = select_recent(
            request.agronomist_logs.iter().filter(|l| l.applies_to(batch_id)),
            &self.window,
        );
        let phenology = select_recent(
            request.phenology_logs.iter().filter(|l| l.applies_to(batch_id)),
            &self.window,
        );
        let environmental = select_recent(
            request.environmental_logs.iter().filter(|l| l.applies_to(batch_id)),
            &self.window,
        );

        Ok([
            format!("Batch: {}", batch_id),
            render_location(coordinates),
            format!("Today: {}", self.window.as_of),
            render_harvests(&harvests),
            render_agronomist_logs(&agronomist),
            render_phenology_logs(&phenology),
            render_environmental_logs(&environmental),
        ]
        .join("\n\n"))
    }

    /// Context for application recommendations. Every stream may be empty.
    pub fn application_recommendation(
        &self,
        coordinates: &Coordinates,
        request: &ApplicationRecommendationRequest,
    ) -> String {
        let supplies: Vec<&SupplyItem> =
            request.supplies.iter().take(self.window.max_entries).collect();
        let agronomist = select_recent(&request.agronomist_logs, &self.window);
        let phenology = select_recent(&request.phenology_logs, &self.window);

        [
            render_location(coordinates),
            format!("Today: {}", self.window.as_of),
            render_supplies(&supplies),
            render_agronomist_logs(&agronomist),
            render_phenology_logs(&phenology),
        ]
        .join("\n\n")
    }

    /// Context for a plant diagnosis (the image travels separately).
    pub fn plant_diagnosis(&self, description: &str, scope: &BatchScope) -> String {
        format!(
            "Batch: {}\nObserved symptoms: {}",
            scope,
            description.trim()
        )
    }

    /// Context for a report summary over the request period.
    ///
    /// # Errors
    ///
    /// `InsufficientData` when the period has neither cost summaries nor harvests.
    pub fn report_summary(
        &self,
        request: &ReportSummaryRequest,
        summaries: &[BatchCostSummary],
    ) -> Result<String, FlowError> {
        let mut harvests: Vec<&HarvestRecord> = request
            .harvests
            .iter()
            .filter(|h| request.in_period(h.date))
            .collect();
        if summaries.is_empty() && harvests.is_empty() {
            return Err(FlowError::InsufficientData { input: "harvests" });
        }
        harvests.sort_by(|a, b| b.date.cmp(&a.date));
        harvests.truncate(self.window.max_entries);

        let overview = FarmCostOverview::from_summaries(summaries);
        Ok([
            format!("Report: {}", request.title.trim()),
            format!("Period: {} to {}", request.period_start, request.period_end),
            render_batch_costs(summaries),
            render_overview(&overview),
            render_harvests(&harvests),
        ]
        .join("\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::RecordId;
    use crate::domain::records::{AgronomistLogType, DevelopmentState, SupplyType};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn harvest(id: &str, d: u32, batch: &str) -> HarvestRecord {
        HarvestRecord::new(
            RecordId::new(id).unwrap(),
            day(d),
            BatchId::new(batch).unwrap(),
            "col-1",
            10.0,
        )
    }

    fn coords() -> Coordinates {
        Coordinates::new(19.4, -99.1).unwrap()
    }

    fn yield_request(harvests: Vec<HarvestRecord>) -> YieldPredictionRequest {
        YieldPredictionRequest {
            batch_id: "L014".to_string(),
            latitude: 19.4,
            longitude: -99.1,
            recent_harvests: harvests,
            agronomist_logs: vec![],
            phenology_logs: vec![],
            environmental_logs: vec![],
        }
    }

    #[test]
    fn window_spans_exactly_its_days() {
        let window = AssemblyWindow::new(day(31), 30, 10);
        assert_eq!(window.start(), day(2));
        assert!(!window.contains(day(1)));
        assert!(window.contains(day(2)));
        assert!(window.contains(day(31)));
        assert!(!window.contains(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()));

        let covered = (1..=31).filter(|&d| window.contains(day(d))).count();
        assert_eq!(covered, 30);
    }

    #[test]
    fn one_day_window_is_just_today() {
        let window = AssemblyWindow::new(day(10), 1, 10);
        assert_eq!(window.start(), day(10));
        assert!(!window.contains(day(9)));
    }

    #[test]
    fn select_recent_orders_newest_first_and_truncates() {
        let records = vec![
            harvest("h-1", 3, "L014"),
            harvest("h-2", 9, "L014"),
            harvest("h-3", 5, "L014"),
            harvest("h-4", 9, "L014"),
        ];
        let window = AssemblyWindow::new(day(10), 30, 3);
        let ids: Vec<_> = select_recent(&records, &window)
            .iter()
            .map(|h| h.id.as_str())
            .collect();
        assert_eq!(ids, vec!["h-2", "h-4", "h-3"]);
    }

    #[test]
    fn select_recent_drops_records_outside_window() {
        let records = vec![harvest("h-1", 1, "L014"), harvest("h-2", 20, "L014")];
        let window = AssemblyWindow::new(day(20), 5, 50);
        let selected = select_recent(&records, &window);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id.as_str(), "h-2");
    }

    #[test]
    fn empty_streams_render_none_recorded() {
        let block = render_harvests(&[]);
        assert_eq!(block, "## Recent harvests\n(none recorded)");
    }

    #[test]
    fn harvest_block_has_header_and_rows() {
        let h = harvest("h-1", 10, "L014");
        let block = render_harvests(&[&h]);
        let lines: Vec<_> = block.lines().collect();
        assert_eq!(lines[0], "## Recent harvests (1)");
        assert_eq!(lines[1], "date | batch | kilograms | collector");
        assert_eq!(lines[2], "2024-05-10 | L014 | 10.0 | col-1");
    }

    #[test]
    fn free_text_cannot_break_rows() {
        let log = AgronomistLogEntry::new(RecordId::new("a-1").unwrap(), day(2), AgronomistLogType::Control)
            .with_notes("spots | yellow\nleaves");
        let block = render_agronomist_logs(&[&log]);
        assert!(block.ends_with("2024-05-02 | Control | general | - | - | spots / yellow leaves"));
    }

    #[test]
    fn yield_requires_recent_harvest_for_the_batch() {
        let assembler = FlowInputAssembler::new(AssemblyWindow::new(day(20), 30, 50));
        let batch = BatchId::new("L014").unwrap();

        let other_batch = yield_request(vec![harvest("h-1", 10, "L015")]);
        let err = assembler.yield_prediction(&batch, &coords(), &other_batch).unwrap_err();
        assert!(matches!(err, FlowError::InsufficientData { input: "recent harvests" }));

        let ok = yield_request(vec![harvest("h-2", 10, "L014")]);
        let context = assembler.yield_prediction(&batch, &coords(), &ok).unwrap();
        assert!(context.contains("Batch: L014"));
        assert!(context.contains("## Recent harvests (1)"));
        assert!(context.contains("## Phenology logs\n(none recorded)"));
        assert!(context.contains("latitude 19.4, longitude -99.1"));
    }

    #[test]
    fn yield_includes_general_logs_but_not_other_batches() {
        let assembler = FlowInputAssembler::new(AssemblyWindow::new(day(20), 30, 50));
        let batch = BatchId::new("L014").unwrap();
        let mut request = yield_request(vec![harvest("h-1", 10, "L014")]);
        request.phenology_logs = vec![
            PhenologyLogEntry::new(RecordId::new("p-1").unwrap(), day(8), DevelopmentState::Fruiting),
            PhenologyLogEntry::new(RecordId::new("p-2").unwrap(), day(9), DevelopmentState::Ripening)
                .with_batch(BatchId::new("L099").unwrap()),
        ];

        let context = assembler.yield_prediction(&batch, &coords(), &request).unwrap();
        assert!(context.contains("## Phenology logs (1)"));
        assert!(context.contains("Fruiting"));
        assert!(!context.contains("Ripening"));
    }

    #[test]
    fn recommendation_accepts_empty_streams() {
        let assembler = FlowInputAssembler::new(AssemblyWindow::ending(day(20)));
        let request = ApplicationRecommendationRequest {
            latitude: 19.4,
            longitude: -99.1,
            supplies: vec![],
            agronomist_logs: vec![],
            phenology_logs: vec![],
        };
        let context = assembler.application_recommendation(&coords(), &request);
        assert!(context.contains("## Supplies\n(none recorded)"));
        assert!(context.contains("## Agronomist logs\n(none recorded)"));
    }

    #[test]
    fn supplies_flag_low_stock() {
        let low = SupplyItem::new(RecordId::new("s-1").unwrap(), "Captan", SupplyType::Fungicide, 1.0, 2.0);
        let block = render_supplies(&[&low]);
        assert!(block.ends_with("| LOW STOCK"));
    }

    #[test]
    fn report_requires_harvests_or_summaries() {
        let assembler = FlowInputAssembler::new(AssemblyWindow::ending(day(31)));
        let request: ReportSummaryRequest = serde_json::from_value(serde_json::json!({
            "title": "May",
            "periodStart": "2024-05-01",
            "periodEnd": "2024-05-31",
            "harvests": [
                {"id": "h-1", "date": "2024-04-20", "batchNumber": "L014", "kilograms": 5}
            ]
        }))
        .unwrap();

        let err = assembler.report_summary(&request, &[]).unwrap_err();
        assert!(matches!(err, FlowError::InsufficientData { input: "harvests" }));
    }
}
