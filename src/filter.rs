use crate::types::NormalizedRecord;
use chrono::NaiveDate;

/// Inclusive date window. The filter only applies when both endpoints are
/// present; a partial range leaves the records untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        DateRange { start, end }
    }

    /// Both endpoints, if the caller supplied both.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.start, self.end) {
            (Some(s), Some(e)) => Some((s, e)),
            _ => None,
        }
    }

    /// Keep records whose date falls inside the window, preserving order.
    pub fn apply(&self, records: &[NormalizedRecord]) -> Vec<NormalizedRecord> {
        match self.bounds() {
            Some((start, end)) => records
                .iter()
                .filter(|r| r.date >= start && r.date <= end)
                .cloned()
                .collect(),
            None => records.to_vec(),
        }
    }
}

/// Earliest and latest date in the dataset; the default window offered to
/// the user.
pub fn dataset_bounds(records: &[NormalizedRecord]) -> Option<(NaiveDate, NaiveDate)> {
    let min = records.iter().map(|r| r.date).min()?;
    let max = records.iter().map(|r| r.date).max()?;
    Some((min, max))
}
