use crate::error::FileError;
use crate::types::{AlertRow, SummaryPivot};
use serde::Serialize;
use std::path::Path;
use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Modify, Style, Width};
use tabled::{Table, Tabled};

pub const REPORT_TITLE: &str = "QA Alerts Report";
pub const SHEET_TITLE: &str = "QA Alerts";

// Document column widths, in characters: QA Name, Date, Cases, Status,
// Recommendation.
const DOCUMENT_WIDTHS: [usize; 5] = [24, 12, 8, 22, 62];

fn io_error(path: &Path, source: std::io::Error) -> FileError {
    FileError::Io {
        path: path.display().to_string(),
        source,
    }
}

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), FileError> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush().map_err(|e| io_error(path, e))?;
    Ok(())
}

/// Alert table for spreadsheet tools. The header row is written even when
/// there are no alerts so an empty run still opens as a valid sheet.
pub fn write_alerts_csv(path: &Path, rows: &[AlertRow]) -> Result<(), FileError> {
    if rows.is_empty() {
        let mut wtr = csv::Writer::from_path(path)?;
        wtr.write_record(AlertRow::headers().iter().map(|h| h.as_bytes()))?;
        wtr.flush().map_err(|e| io_error(path, e))?;
        return Ok(());
    }
    write_csv(path, rows)
}

pub fn write_pivot_csv(path: &Path, pivot: &SummaryPivot) -> Result<(), FileError> {
    let mut wtr = csv::Writer::from_path(path)?;
    for record in pivot_records(pivot) {
        wtr.write_record(&record)?;
    }
    wtr.flush().map_err(|e| io_error(path, e))?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), FileError> {
    let s = serde_json::to_string_pretty(value).map_err(|e| io_error(path, e.into()))?;
    std::fs::write(path, s).map_err(|e| io_error(path, e))?;
    Ok(())
}

pub fn write_text(path: &Path, text: &str) -> Result<(), FileError> {
    std::fs::write(path, text).map_err(|e| io_error(path, e))
}

pub fn preview_table_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().cloned().take(max_rows).collect();
    if slice.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let table_str = Table::new(slice).with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}

// Header plus one line per person; days without productive work show 0.
fn pivot_records(pivot: &SummaryPivot) -> Vec<Vec<String>> {
    let mut records = Vec::with_capacity(pivot.rows.len() + 1);
    let mut header = vec!["QA Name".to_string()];
    header.extend(pivot.dates.iter().map(|d| d.format("%Y-%m-%d").to_string()));
    records.push(header);
    for (name, cells) in &pivot.rows {
        let mut record = vec![name.clone()];
        record.extend(cells.iter().map(|c| c.unwrap_or(0).to_string()));
        records.push(record);
    }
    records
}

pub fn render_pivot(pivot: &SummaryPivot) -> String {
    if pivot.rows.is_empty() {
        return "(no rows)".to_string();
    }
    Builder::from(pivot_records(pivot))
        .build()
        .with(Style::markdown())
        .to_string()
}

/// Printable report: centred title over a bordered table with fixed column
/// widths. Over-long cells are cut with an ellipsis.
pub fn render_document(rows: &[AlertRow]) -> String {
    let mut table = Table::new(rows);
    table.with(Style::ascii());
    for (idx, width) in DOCUMENT_WIDTHS.iter().enumerate() {
        table.with(
            Modify::new(Columns::single(idx))
                .with(Width::truncate(*width).suffix("..."))
                .with(Width::increase(*width)),
        );
    }
    let body = table.to_string();
    let total_width = table.total_width();
    format!("{:^total_width$}\n\n{}\n", REPORT_TITLE, body)
}
