//! CSV export of load tables and JSON export of analytics reports.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::reporting::AnalyticsReport;
use crate::sim::LoadTable;

/// Exports a load table to a CSV file at the given path.
///
/// Writes a `timestep,time_hr,<subsystems...>,Total` header followed by one
/// data row per step. Produces deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(table: &LoadTable, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(table, buf)
}

/// Writes a load table as CSV to any writer.
///
/// # Arguments
///
/// * `table` - Simulation output
/// * `writer` - Destination implementing `Write`
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(table: &LoadTable, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    let mut header = vec!["timestep", "time_hr"];
    header.extend(table.column_names());
    wtr.write_record(&header)?;

    for t in 0..table.len() {
        let mut record = vec![t.to_string(), format!("{:.2}", table.time_hours(t))];
        record.extend(table.row(t).into_iter().map(|(_, kw)| format!("{kw:.4}")));
        record.push(format!("{:.4}", table.total()[t]));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports an analytics report as pretty-printed JSON.
///
/// # Errors
///
/// Returns an `io::Error` if file creation, serialization, or writing fails.
pub fn export_report_json(report: &AnalyticsReport, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let mut buf = io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut buf, report)?;
    buf.flush()
}
