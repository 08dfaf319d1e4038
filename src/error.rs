use thiserror::Error;

/// Failures that abort a pipeline run. Rows are numbered from 1, not
/// counting the header.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PipelineError {
    #[error("missing required columns: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("row {row}: cannot parse date {value:?}")]
    DateParse { row: usize, value: String },

    #[error("row {row}: invalid case count {value:?} (expected a non-negative whole number)")]
    CaseCount { row: usize, value: String },

    #[error("row {row}: empty QA name")]
    EmptyName { row: usize },
}

#[derive(Error, Debug)]
pub enum FileError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel parse failed: {0}")]
    Excel(String),

    #[error("unsupported file format {0:?} (expected .csv, .xlsx, .xls or .ods)")]
    UnsupportedFormat(String),

    #[error("workbook has no sheets")]
    NoSheet,
}

impl From<calamine::Error> for FileError {
    fn from(err: calamine::Error) -> Self {
        FileError::Excel(err.to_string())
    }
}
