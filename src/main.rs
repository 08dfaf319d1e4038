// Entry point and high-level CLI flow.
//
// One invocation is one upload:
// - load the activity file (CSV or workbook),
// - run the alert pipeline over it,
// - print the productivity summary and alert previews,
// - export the alert table, the printable report and a JSON summary.
mod aggregate;
mod classify;
mod error;
mod filter;
mod loader;
mod logging;
mod normalize;
mod output;
mod pipeline;
mod reports;
mod schema;
mod types;
mod util;

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use filter::DateRange;
use pipeline::PipelineOutput;
use schema::Schema;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "qa-alerts")]
#[command(about = "Daily QA productivity summary and performance alerts", long_about = None)]
struct Cli {
    /// Activity export (.csv, .xlsx, .xls or .ods)
    input: PathBuf,

    /// First day of the reporting window (inclusive)
    #[arg(long, value_parser = parse_date_arg)]
    from: Option<NaiveDate>,

    /// Last day of the reporting window (inclusive); ignored unless --from is also given
    #[arg(long, value_parser = parse_date_arg)]
    to: Option<NaiveDate>,

    /// Directory the export files are written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Rows shown in each console preview
    #[arg(long, default_value_t = 10)]
    preview_rows: usize,

    /// Skip writing export files
    #[arg(long)]
    no_export: bool,

    #[arg(long, default_value = "QA Name")]
    name_column: String,

    #[arg(long, default_value = "Date")]
    date_column: String,

    #[arg(long, default_value = "Activity Type")]
    activity_column: String,

    #[arg(long, default_value = "Cases")]
    cases_column: String,
}

impl Cli {
    fn schema(&self) -> Schema {
        Schema {
            person: self.name_column.clone(),
            date: self.date_column.clone(),
            activity: self.activity_column.clone(),
            cases: self.cases_column.clone(),
        }
    }
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    util::parse_date_safe(Some(s)).ok_or_else(|| format!("not a date: {s:?}"))
}

/// Print the summary pivot and alert previews.
fn print_results(out: &PipelineOutput, preview_rows: usize) {
    if let Some((min, max)) = out.dataset_bounds {
        println!("Dataset covers {} to {}.", min, max);
    }
    let s = &out.summary;
    if let (Some(start), Some(end)) = (s.range_start, s.range_end) {
        println!(
            "Reporting window {} to {} ({} of {} rows).\n",
            start,
            end,
            util::format_int(s.rows_in_range),
            util::format_int(s.total_rows)
        );
    }

    println!("Productivity Summary\n");
    println!("{}\n", output::render_pivot(&out.pivot));

    println!("Daily Performance Alerts ({})\n", output::SHEET_TITLE);
    output::preview_table_rows(&out.report, preview_rows);
    if out.report.len() > preview_rows {
        println!(
            "({} more rows in the export)\n",
            util::format_int(out.report.len() - preview_rows)
        );
    }
    println!(
        "Meets target: {}  Slightly below: {}  Below target: {}\n",
        s.meets_target, s.slightly_below, s.below_target
    );
}

/// Write the three sinks: alert sheet, printable report, JSON summary.
fn export(out: &PipelineOutput, dir: &std::path::Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("cannot create output directory {}", dir.display()))?;

    let sheet = dir.join("qa_alerts_report.csv");
    output::write_alerts_csv(&sheet, &out.report)?;
    let summary_sheet = dir.join("qa_productivity_summary.csv");
    output::write_pivot_csv(&summary_sheet, &out.pivot)?;
    let document = dir.join("qa_alerts_report.txt");
    output::write_text(&document, &output::render_document(&out.report))?;
    let json = dir.join("summary.json");
    output::write_json(&json, &out.summary)?;

    info!(dir = %dir.display(), "exports written");
    println!("Alerts exported to {}", sheet.display());
    println!("Summary exported to {}", summary_sheet.display());
    println!("Report exported to {}", document.display());
    println!("Run summary exported to {}", json.display());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();

    let (table, load_report) = loader::load_table(&cli.input)
        .with_context(|| format!("failed to load {}", cli.input.display()))?;
    println!(
        "Processing dataset... ({} rows read, {} blank rows skipped)",
        util::format_int(load_report.total_rows),
        util::format_int(load_report.blank_rows)
    );

    let range = DateRange::new(cli.from, cli.to);
    let out = pipeline::run(&table, &cli.schema(), &range)
        .with_context(|| format!("cannot build alerts from {}", cli.input.display()))?;

    if out.is_empty() {
        println!("No productive activity found for this window.\n");
    }
    print_results(&out, cli.preview_rows);

    if !cli.no_export {
        export(&out, &cli.out_dir)?;
    }
    Ok(())
}
