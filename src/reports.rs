use crate::types::{AggregateRecord, AlertRecord, AlertRow, RunSummary, Status, SummaryPivot};
use std::collections::{BTreeMap, BTreeSet};

/// Project alerts onto the export table. Rows are sorted by (person, day)
/// so identical inputs always give identical tables.
pub fn assemble(alerts: &[AlertRecord]) -> Vec<AlertRow> {
    let mut sorted: Vec<&AlertRecord> = alerts.iter().collect();
    sorted.sort_by(|a, b| a.key.cmp(&b.key));
    sorted
        .into_iter()
        .map(|a| AlertRow {
            person_name: a.key.person_name.clone(),
            date: a.key.date.format("%Y-%m-%d").to_string(),
            total_cases: a.total_cases,
            status: a.status.label().to_string(),
            recommendation: a.recommendation.to_string(),
        })
        .collect()
}

/// Person x day view of the aggregates for the productivity summary.
pub fn pivot(aggregates: &[AggregateRecord]) -> SummaryPivot {
    let dates: Vec<_> = aggregates
        .iter()
        .map(|a| a.key.date)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut by_person: BTreeMap<&str, Vec<Option<u64>>> = BTreeMap::new();
    for a in aggregates {
        let cells = by_person
            .entry(a.key.person_name.as_str())
            .or_insert_with(|| vec![None; dates.len()]);
        if let Ok(idx) = dates.binary_search(&a.key.date) {
            cells[idx] = Some(a.total_cases);
        }
    }

    SummaryPivot {
        dates,
        rows: by_person
            .into_iter()
            .map(|(name, cells)| (name.to_string(), cells))
            .collect(),
    }
}

pub struct SummaryInput<'a> {
    pub total_rows: usize,
    pub productive_rows: usize,
    pub rows_in_range: usize,
    pub range: Option<(chrono::NaiveDate, chrono::NaiveDate)>,
    pub alerts: &'a [AlertRecord],
}

pub fn generate_summary(input: SummaryInput<'_>) -> RunSummary {
    let count = |s: Status| input.alerts.iter().filter(|a| a.status == s).count();
    let people: BTreeSet<&str> = input
        .alerts
        .iter()
        .map(|a| a.key.person_name.as_str())
        .collect();
    RunSummary {
        total_rows: input.total_rows,
        productive_rows: input.productive_rows,
        rows_in_range: input.rows_in_range,
        range_start: input.range.map(|r| r.0),
        range_end: input.range.map(|r| r.1),
        total_people: people.len(),
        total_alerts: input.alerts.len(),
        meets_target: count(Status::MeetsTarget),
        slightly_below: count(Status::SlightlyBelow),
        below_target: count(Status::BelowTarget),
    }
}
