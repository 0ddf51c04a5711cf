pub mod event;

use std::io::BufRead;
use std::path::Path;

use crate::app::event::Event;
use crate::report::{rows, ParsedReport, ReportError, ReportTree, Summary};

/// Feeds an event stream from an external driver into a [`ReportTree`].
#[derive(Debug)]
pub struct App {
    tree: ReportTree,
}

impl App {
    pub fn new(tree: ReportTree) -> Self {
        App { tree }
    }

    /// Applies events until the input ends and returns the session totals.
    ///
    /// Malformed lines are skipped, a read error ends the stream. Either way the report
    /// on disk stays a valid snapshot.
    pub fn run<R: BufRead>(&mut self, input: R) -> Summary {
        info!("Recording run '{}'", self.tree.document().run_name());
        for (number, line) in input.lines().enumerate() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    error!("Failed to read event stream: {}", e);
                    break;
                }
            };
            match Event::parse(&line) {
                Some(Ok(event)) => {
                    trace!("Event {:?}", event);
                    event.apply(&mut self.tree);
                }
                Some(Err(e)) => warn!("Skipping malformed event on line {}: {}", number + 1, e),
                None => {}
            }
        }
        self.tree.flush();
        let summary = *self.tree.summary();
        info!("Run '{}' finished. {}", self.tree.document().run_name(), summary);
        summary
    }

    pub fn tree(&self) -> &ReportTree {
        &self.tree
    }
}

/// Reads a persisted report and optionally exports its case rows as CSV.
pub fn summarize(report: &Path, rows_file: Option<&Path>) -> Result<ParsedReport, ReportError> {
    let parsed = crate::report::reader::read(report)?;
    if let Some(rows_file) = rows_file {
        rows::export_rows(&parsed, rows_file)?;
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::{summarize, App};
    use crate::report::{Outcome, ReportTree};
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    const EVENTS: &str = r#"
{"event":"start_suite","suite":"LISAv2"}
{"event":"start_case","suite":"LISAv2","case":"BVT"}
{"event":"complete_case","suite":"LISAv2","case":"BVT","outcome":"PASS"}
this line is garbage
{"event":"start_case","suite":"LISAv2","case":"NET","class_name":"LISAv2.network"}
{"event":"complete_bundle","suite":"LISAv2","case":"NET","results":[{"outcome":"PASS"},{"outcome":"FAIL","detail":"ping lost"}]}
{"event":"complete_case","suite":"Ghost","case":"X","outcome":"FAIL"}
{"event":"complete_suite","suite":"LISAv2"}
"#;

    #[test]
    fn test_run_records_events() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("report.xml");
        let mut app = App::new(ReportTree::to_file("nightly", &path));

        let summary = app.run(Cursor::new(EVENTS));

        assert_eq!(summary.total_cases, 2);
        assert_eq!(summary.total_fail, 1);
        assert!(!app.tree().is_suite_open("LISAv2"));

        let report = summarize(&path, None).unwrap();
        assert_eq!(report.run_name, "nightly");
        assert_eq!(report.cases.len(), 2);
        assert_eq!(report.cases[1].class_name, "LISAv2.network");
        assert_eq!(report.cases[1].outcome, Outcome::Fail);
        assert_eq!(report.cases[1].detail, "ping lost");
    }

    #[test]
    fn test_summarize_exports_rows() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("report.xml");
        let rows = temp.path().join("rows.csv");
        let mut app = App::new(ReportTree::to_file("nightly", &path));
        app.run(Cursor::new(EVENTS));

        let report = summarize(&path, Some(rows.as_path())).unwrap();

        let content = fs::read_to_string(&rows).unwrap();
        assert_eq!(content.lines().count(), report.cases.len() + 1);
        assert!(content.contains("LISAv2,NET,LISAv2.network,FAIL,"));
    }

    #[test]
    fn test_summarize_missing_report() {
        let temp = TempDir::new().unwrap();
        assert!(summarize(&temp.path().join("missing.xml"), None).is_err());
    }
}
