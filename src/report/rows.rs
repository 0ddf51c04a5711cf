use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use serde_derive::Serialize;

use crate::report::error::ReportError;
use crate::report::reader::{CaseRow, ParsedReport};

/// Flat per-case record, the shape telemetry uploaders ingest.
#[derive(Debug, Serialize)]
struct Row<'a> {
    suite: &'a str,
    case: &'a str,
    class_name: &'a str,
    outcome: &'static str,
    elapsed_seconds: String,
    message: &'a str,
}

impl<'a> From<&'a CaseRow> for Row<'a> {
    fn from(case: &'a CaseRow) -> Self {
        Self {
            suite: &case.suite,
            case: &case.name,
            class_name: &case.class_name,
            outcome: case.outcome.label(),
            elapsed_seconds: format!("{:.2}", case.elapsed_seconds),
            message: &case.message,
        }
    }
}

pub fn write_rows<W: io::Write>(report: &ParsedReport, writer: W) -> Result<(), ReportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for case in &report.cases {
        wtr.serialize(Row::from(case))?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn export_rows(report: &ParsedReport, path: &Path) -> Result<(), ReportError> {
    let file = File::create(path).map_err(|e| ReportError::io(path, e))?;
    write_rows(report, BufWriter::new(file))?;
    info!("Exported {} rows to {}", report.cases.len(), path.display());
    Ok(())
}
