use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use tabled::Tabled;

/// One uploaded sheet: the header row plus every non-blank data row keyed by
/// header name. Values are kept as trimmed text; typing happens in
/// `normalize`.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<HashMap<String, String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>) -> Self {
        RawTable { headers, rows: Vec::new() }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    pub person_name: String,
    pub date: NaiveDate,
    pub activity_type: Option<String>,
    pub case_count: u64,
    pub is_productive: bool,
}

/// (person, day). Ordering is by person first so grouped output reads
/// naturally in the preview tables.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AggregateKey {
    pub person_name: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateRecord {
    pub key: AggregateKey,
    pub total_cases: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    MeetsTarget,
    SlightlyBelow,
    BelowTarget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertRecord {
    pub key: AggregateKey,
    pub total_cases: u64,
    pub status: Status,
    pub recommendation: &'static str,
}

/// Flat row handed to the export sinks, in the fixed column order
/// QA Name, Date, Cases, Status, Recommendation.
#[derive(Debug, Serialize, Tabled, Clone, PartialEq, Eq)]
pub struct AlertRow {
    #[serde(rename = "QA Name")]
    #[tabled(rename = "QA Name")]
    pub person_name: String,
    #[serde(rename = "Date")]
    #[tabled(rename = "Date")]
    pub date: String,
    #[serde(rename = "Cases")]
    #[tabled(rename = "Cases")]
    pub total_cases: u64,
    #[serde(rename = "Status")]
    #[tabled(rename = "Status")]
    pub status: String,
    #[serde(rename = "Recommendation")]
    #[tabled(rename = "Recommendation")]
    pub recommendation: String,
}

/// Person x day grid of productive cases. Days a person has no productive
/// activity are `None` here; they only become 0 when rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryPivot {
    pub dates: Vec<NaiveDate>,
    pub rows: Vec<(String, Vec<Option<u64>>)>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct RunSummary {
    pub total_rows: usize,
    pub productive_rows: usize,
    pub rows_in_range: usize,
    pub range_start: Option<NaiveDate>,
    pub range_end: Option<NaiveDate>,
    pub total_people: usize,
    pub total_alerts: usize,
    pub meets_target: usize,
    pub slightly_below: usize,
    pub below_target: usize,
}
