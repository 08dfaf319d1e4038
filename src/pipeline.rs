// One end-to-end run over an uploaded table:
// validate -> normalize -> filter -> aggregate -> classify -> assemble.
//
// Every stage takes the previous stage's output by reference and returns a
// fresh table. Nothing is cached between runs.
use crate::aggregate::aggregate;
use crate::classify::alert;
use crate::error::PipelineError;
use crate::filter::{dataset_bounds, DateRange};
use crate::normalize::normalize;
use crate::reports::{assemble, generate_summary, pivot, SummaryInput};
use crate::schema::Schema;
use crate::types::{AlertRecord, AlertRow, RawTable, RunSummary, SummaryPivot};
use chrono::NaiveDate;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutput {
    /// Earliest and latest date in the whole upload, before filtering.
    pub dataset_bounds: Option<(NaiveDate, NaiveDate)>,
    pub alerts: Vec<AlertRecord>,
    pub report: Vec<AlertRow>,
    pub pivot: SummaryPivot,
    pub summary: RunSummary,
}

impl PipelineOutput {
    pub fn is_empty(&self) -> bool {
        self.report.is_empty()
    }
}

#[instrument(skip_all, fields(rows = table.rows.len()))]
pub fn run(
    table: &RawTable,
    schema: &Schema,
    range: &DateRange,
) -> Result<PipelineOutput, PipelineError> {
    schema.validate(table)?;

    let normalized = normalize(table, schema)?;
    let bounds = dataset_bounds(&normalized);

    let filtered = range.apply(&normalized);
    debug!(kept = filtered.len(), of = normalized.len(), "applied date range");

    let aggregates = aggregate(&filtered);
    let pivot = pivot(&aggregates);
    let alerts: Vec<AlertRecord> = aggregates.into_iter().map(alert).collect();
    let report = assemble(&alerts);

    let summary = generate_summary(SummaryInput {
        total_rows: normalized.len(),
        productive_rows: filtered.iter().filter(|r| r.is_productive).count(),
        rows_in_range: filtered.len(),
        range: range.bounds().or(bounds),
        alerts: &alerts,
    });

    if report.is_empty() {
        warn!("no productive activity in the selected range");
    } else {
        info!(alerts = report.len(), people = summary.total_people, "pipeline finished");
    }

    Ok(PipelineOutput {
        dataset_bounds: bounds,
        alerts,
        report,
        pivot,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Status;
    use std::collections::HashMap;

    fn table(rows: &[(&str, &str, &str, &str)]) -> RawTable {
        let mut t = RawTable::new(
            ["QA Name", "Date", "Activity Type", "Cases"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        for (name, date, activity, cases) in rows {
            let row: HashMap<String, String> = [
                ("QA Name", *name),
                ("Date", *date),
                ("Activity Type", *activity),
                ("Cases", *cases),
            ]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
            t.rows.push(row);
        }
        t
    }

    fn bob_table() -> RawTable {
        table(&[
            ("Bob", "2024-03-01", "Sample Audit", "25"),
            ("Bob", "2024-03-01", "Meeting", "5"),
            ("Bob", "2024-03-02", "Sample Audit", "10"),
        ])
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn end_to_end_scenario() {
        let out = run(&bob_table(), &Schema::default(), &DateRange::default()).unwrap();

        assert_eq!(out.alerts.len(), 2);
        assert_eq!(out.alerts[0].key.date, day(1));
        assert_eq!(out.alerts[0].total_cases, 25);
        assert_eq!(out.alerts[0].status, Status::MeetsTarget);
        assert_eq!(out.alerts[1].key.date, day(2));
        assert_eq!(out.alerts[1].total_cases, 10);
        assert_eq!(out.alerts[1].status, Status::BelowTarget);

        assert_eq!(out.report[0].recommendation, "Good performance. Stay consistent.");
        assert_eq!(
            out.report[1].recommendation,
            "Underperforming. Review task distribution or support needs."
        );
        assert_eq!(out.dataset_bounds, Some((day(1), day(2))));
        assert_eq!(out.summary.total_rows, 3);
        assert_eq!(out.summary.productive_rows, 2);
    }

    #[test]
    fn schema_error_stops_before_row_parsing() {
        let mut t = table(&[("Bob", "garbage", "Sample", "x")]);
        t.headers.retain(|h| h != "Cases");
        assert_eq!(
            run(&t, &Schema::default(), &DateRange::default()),
            Err(PipelineError::Schema {
                missing: vec!["Cases".to_string()]
            })
        );
    }

    #[test]
    fn bad_date_fails_the_whole_run() {
        let t = table(&[
            ("Bob", "2024-03-01", "Sample", "25"),
            ("Bob", "03/32/2024", "Sample", "25"),
        ]);
        let err = run(&t, &Schema::default(), &DateRange::default()).unwrap_err();
        assert!(matches!(err, PipelineError::DateParse { row: 2, .. }));
    }

    #[test]
    fn range_filters_inclusively() {
        let range = DateRange::new(Some(day(2)), Some(day(2)));
        let out = run(&bob_table(), &Schema::default(), &range).unwrap();
        assert_eq!(out.report.len(), 1);
        assert_eq!(out.report[0].date, "2024-03-02");
        assert_eq!(out.summary.range_start, Some(day(2)));
    }

    #[test]
    fn single_endpoint_is_ignored() {
        let range = DateRange::new(Some(day(2)), None);
        let out = run(&bob_table(), &Schema::default(), &range).unwrap();
        assert_eq!(out.report.len(), 2);
    }

    #[test]
    fn empty_result_is_not_an_error() {
        let t = table(&[("Bob", "2024-03-01", "Meeting", "5")]);
        let out = run(&t, &Schema::default(), &DateRange::default()).unwrap();
        assert!(out.is_empty());
        assert_eq!(out.summary.total_alerts, 0);

        let header_only = table(&[]);
        let out = run(&header_only, &Schema::default(), &DateRange::default()).unwrap();
        assert!(out.is_empty());
        assert_eq!(out.dataset_bounds, None);
    }

    #[test]
    fn oversized_counts_still_meet_target() {
        let t = table(&[
            ("Bob", "2024-03-01", "Sample", "18446744073709551615"),
            ("Bob", "2024-03-01", "Sample", "1"),
        ]);
        let out = run(&t, &Schema::default(), &DateRange::default()).unwrap();
        assert_eq!(out.alerts[0].total_cases, u64::MAX);
        assert_eq!(out.alerts[0].status, Status::MeetsTarget);
    }

    #[test]
    fn runs_are_idempotent() {
        let range = DateRange::new(Some(day(1)), Some(day(2)));
        let a = run(&bob_table(), &Schema::default(), &range).unwrap();
        let b = run(&bob_table(), &Schema::default(), &range).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a.report).unwrap(),
            serde_json::to_string(&b.report).unwrap()
        );
    }
}
