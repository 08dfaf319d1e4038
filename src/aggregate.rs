use crate::types::{AggregateKey, AggregateRecord, NormalizedRecord};
use std::collections::BTreeMap;

/// Sum productive cases per (person, day). Non-productive rows are dropped
/// before grouping, so a day with only non-productive work yields no row at
/// all rather than a zero.
///
/// Totals saturate at `u64::MAX` instead of wrapping.
///
/// Output is ordered by key.
pub fn aggregate(records: &[NormalizedRecord]) -> Vec<AggregateRecord> {
    let mut totals: BTreeMap<AggregateKey, u64> = BTreeMap::new();
    for r in records.iter().filter(|r| r.is_productive) {
        let key = AggregateKey {
            person_name: r.person_name.clone(),
            date: r.date,
        };
        let total = totals.entry(key).or_insert(0);
        *total = total.saturating_add(r.case_count);
    }
    totals
        .into_iter()
        .map(|(key, total_cases)| AggregateRecord { key, total_cases })
        .collect()
}
