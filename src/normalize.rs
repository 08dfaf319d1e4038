use crate::error::PipelineError;
use crate::schema::Schema;
use crate::types::{NormalizedRecord, RawTable};
use crate::util::{parse_count_safe, parse_date_safe};
use tracing::debug;

const PRODUCTIVE_MARKER: &str = "sample";

/// Sampling work counts towards productivity. A missing label is simply not
/// productive.
pub fn is_productive(activity_type: Option<&str>) -> bool {
    activity_type
        .map(|a| a.to_lowercase().contains(PRODUCTIVE_MARKER))
        .unwrap_or(false)
}

/// Type every row of an already validated table. The first bad row aborts
/// the whole run; output order and length match the input.
pub fn normalize(
    table: &RawTable,
    schema: &Schema,
) -> Result<Vec<NormalizedRecord>, PipelineError> {
    let mut out = Vec::with_capacity(table.rows.len());
    for (idx, row) in table.rows.iter().enumerate() {
        let row_no = idx + 1;
        let cell = |col: &str| row.get(col).map(|v| v.trim());

        let person_name = match cell(schema.person.as_str()) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Err(PipelineError::EmptyName { row: row_no }),
        };

        let raw_date = cell(schema.date.as_str());
        let date = parse_date_safe(raw_date).ok_or_else(|| PipelineError::DateParse {
            row: row_no,
            value: raw_date.unwrap_or_default().to_string(),
        })?;

        let raw_cases = cell(schema.cases.as_str());
        let case_count = parse_count_safe(raw_cases).ok_or_else(|| PipelineError::CaseCount {
            row: row_no,
            value: raw_cases.unwrap_or_default().to_string(),
        })?;

        let activity_type = cell(schema.activity.as_str())
            .filter(|a| !a.is_empty())
            .map(str::to_string);
        let is_productive = is_productive(activity_type.as_deref());

        out.push(NormalizedRecord {
            person_name,
            date,
            activity_type,
            case_count,
            is_productive,
        });
    }
    debug!(
        rows = out.len(),
        productive = out.iter().filter(|r| r.is_productive).count(),
        "normalized activity rows"
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn table(rows: &[(&str, &str, &str, &str)]) -> RawTable {
        let schema = Schema::default();
        let mut t = RawTable::new(schema.required().iter().map(|s| s.to_string()).collect());
        for (name, date, activity, cases) in rows {
            let mut row = HashMap::new();
            row.insert(schema.person.clone(), name.to_string());
            row.insert(schema.date.clone(), date.to_string());
            row.insert(schema.activity.clone(), activity.to_string());
            row.insert(schema.cases.clone(), cases.to_string());
            t.rows.push(row);
        }
        t
    }

    #[test]
    fn productivity_flag_is_case_insensitive_substring() {
        assert!(is_productive(Some("Sample Review")));
        assert!(is_productive(Some("SAMPLE")));
        assert!(is_productive(Some("Resampled audit")));
        assert!(!is_productive(Some("Review")));
        assert!(!is_productive(Some("")));
        assert!(!is_productive(None));
    }

    #[test]
    fn normalizes_rows_in_order() {
        let t = table(&[
            ("Bob", "2024-03-01", "Sample Audit", "25"),
            ("Ann", "03/02/2024", "Meeting", "5"),
        ]);
        let records = normalize(&t, &Schema::default()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].person_name, "Bob");
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert!(records[0].is_productive);
        assert_eq!(records[0].case_count, 25);
        assert_eq!(records[1].person_name, "Ann");
        assert_eq!(records[1].date, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
        assert!(!records[1].is_productive);
    }

    #[test]
    fn blank_activity_is_not_productive() {
        let t = table(&[("Bob", "2024-03-01", "  ", "4")]);
        let records = normalize(&t, &Schema::default()).unwrap();
        assert_eq!(records[0].activity_type, None);
        assert!(!records[0].is_productive);
    }

    #[test]
    fn first_bad_date_aborts_the_run() {
        let t = table(&[
            ("Bob", "2024-03-01", "Sample", "1"),
            ("Bob", "not a date", "Sample", "1"),
            ("Bob", "also bad", "Sample", "1"),
        ]);
        assert_eq!(
            normalize(&t, &Schema::default()),
            Err(PipelineError::DateParse {
                row: 2,
                value: "not a date".to_string()
            })
        );
    }

    #[test]
    fn rejects_invalid_case_counts() {
        let t = table(&[("Bob", "2024-03-01", "Sample", "-2")]);
        assert_eq!(
            normalize(&t, &Schema::default()),
            Err(PipelineError::CaseCount {
                row: 1,
                value: "-2".to_string()
            })
        );
    }

    #[test]
    fn rejects_empty_names() {
        let t = table(&[("", "2024-03-01", "Sample", "2")]);
        assert_eq!(
            normalize(&t, &Schema::default()),
            Err(PipelineError::EmptyName { row: 1 })
        );
    }
}
