use crate::error::FileError;
use crate::types::RawTable;
use calamine::{open_workbook_auto, Data, DataType, Reader};
use csv::ReaderBuilder;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub blank_rows: usize,
}

/// Read an activity export into a `RawTable`, picking the reader from the
/// file extension.
pub fn load_table(path: &Path) -> Result<(RawTable, LoadReport), FileError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    let loaded = match ext.as_str() {
        "csv" => load_csv(path)?,
        "xlsx" | "xlsm" | "xls" | "ods" => load_workbook(path)?,
        _ => return Err(FileError::UnsupportedFormat(ext)),
    };
    info!(
        path = %path.display(),
        rows = loaded.0.rows.len(),
        blank = loaded.1.blank_rows,
        "loaded activity file"
    );
    Ok(loaded)
}

pub fn load_csv(path: &Path) -> Result<(RawTable, LoadReport), FileError> {
    let file = std::fs::File::open(path).map_err(|source| FileError::Io {
        path: path.display().to_string(),
        source,
    })?;
    read_csv(file)
}

/// CSV from any reader. Headers and values are trimmed; short rows are
/// allowed and simply lack the trailing columns.
pub fn read_csv<R: std::io::Read>(reader: R) -> Result<(RawTable, LoadReport), FileError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();

    warn_duplicate_headers(&headers);
    let mut table = RawTable::new(headers);
    let mut report = LoadReport::default();
    for result in rdr.records() {
        let record = result?;
        report.total_rows += 1;
        let row: HashMap<String, String> = table
            .headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.clone(), v.trim().to_string()))
            .collect();
        push_row(&mut table, &mut report, row);
    }
    debug!(headers = ?table.headers, "parsed CSV");
    Ok((table, report))
}

/// First sheet of a workbook, first row as header.
pub fn load_workbook(path: &Path) -> Result<(RawTable, LoadReport), FileError> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(FileError::NoSheet)?;
    let range = workbook.worksheet_range(&sheet_name)?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(|c| cell_text(c).trim().to_string()).collect(),
        None => Vec::new(),
    };

    warn_duplicate_headers(&headers);
    let mut table = RawTable::new(headers);
    let mut report = LoadReport::default();
    for data_row in rows {
        report.total_rows += 1;
        let row: HashMap<String, String> = table
            .headers
            .iter()
            .zip(data_row.iter())
            .map(|(h, c)| (h.clone(), cell_text(c).trim().to_string()))
            .collect();
        push_row(&mut table, &mut report, row);
    }
    debug!(sheet = %sheet_name, headers = ?table.headers, "parsed workbook");
    Ok((table, report))
}

// Date cells come back as serial numbers; render them as ISO dates so the
// normalizer sees the same text a CSV export would carry.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::DateTime(_) | Data::DateTimeIso(_) => cell
            .as_date()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| cell.to_string()),
        _ => cell.to_string(),
    }
}

/// Header names that occur more than once, in sorted order.
fn duplicate_headers(headers: &[String]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut dupes = BTreeSet::new();
    for h in headers.iter().filter(|h| !h.is_empty()) {
        if !seen.insert(h.as_str()) {
            dupes.insert(h.clone());
        }
    }
    dupes.into_iter().collect()
}

// Rows are keyed by header name, so a repeated header keeps only its last
// column.
fn warn_duplicate_headers(headers: &[String]) {
    let dupes = duplicate_headers(headers);
    if !dupes.is_empty() {
        warn!(columns = ?dupes, "duplicate headers; only the last column of each is read");
    }
}

fn push_row(table: &mut RawTable, report: &mut LoadReport, row: HashMap<String, String>) {
    // Spreadsheets often end with a few formatted-but-empty rows.
    if row.values().all(|v| v.is_empty()) {
        report.blank_rows += 1;
        return;
    }
    table.rows.push(row);
}
