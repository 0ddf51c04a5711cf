use std::collections::HashMap;
use std::path::PathBuf;

use derivative::*;

use crate::configuration::settings::ReportSettings;
use crate::report::model::{Case, CaseResult, Document, Suite};
use crate::report::outcome::{Outcome, OutcomePolicy, SubResult};
use crate::report::sink::{FileSink, Sink};
use crate::report::summary::Summary;
use crate::time::TimeUnit;

/// Live report of a test run.
///
/// The driver owns one tree per run and reports lifecycle events to it; every event that
/// changes what a reader of the report would see is followed by a flush of the whole
/// document to the sink. Misuse (completing something that was never started, starting
/// something twice) is ignored, and sink failures are logged, so the tree never
/// interrupts the run it is observing.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct ReportTree {
    document: Document,
    /// Open suite name to its position in the document.
    open_suites: HashMap<String, usize>,
    /// Open (suite, case) pair to the case position inside that suite.
    open_cases: HashMap<(String, String), usize>,
    summary: Summary,
    policy: OutcomePolicy,
    #[derivative(Debug = "ignore")]
    sink: Box<dyn Sink>,
}

impl ReportTree {
    pub fn new<S>(run_name: impl Into<String>, sink: S) -> Self
    where
        S: Sink + 'static,
    {
        Self {
            document: Document::new(run_name),
            open_suites: HashMap::new(),
            open_cases: HashMap::new(),
            summary: Summary::default(),
            policy: OutcomePolicy::default(),
            sink: Box::new(sink),
        }
    }

    /// Tree flushing JUnit XML to `path`.
    pub fn to_file(run_name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::new(run_name, FileSink::new(path))
    }

    pub fn from_settings(settings: &ReportSettings) -> Self {
        Self::to_file(settings.run_name.clone(), settings.path.clone())
            .with_policy(settings.outcome_policy)
    }

    pub fn with_policy(mut self, policy: OutcomePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn start_suite(&mut self, name: &str) {
        if name.is_empty() {
            debug!("Ignoring suite without a name");
            return;
        }
        if self.open_suites.contains_key(name) {
            debug!("Suite '{}' is already running", name);
            return;
        }
        let index = self.document.push_suite(Suite::start(name));
        self.open_suites.insert(name.to_owned(), index);
        info!("Suite '{}' started", name);
        self.flush();
    }

    pub fn complete_suite(&mut self, name: &str) {
        let index = match self.open_suites.remove(name) {
            Some(index) => index,
            None => {
                debug!("Ignoring completion of suite '{}' that is not running", name);
                return;
            }
        };
        if let Some(suite) = self.document.suite_mut(index) {
            let seconds = suite.complete();
            let counters = suite.counters();
            info!(
                "Suite '{}' completed in {:.2}s: tests {}, failures {}, errors {}",
                name, seconds, counters.tests, counters.failures, counters.errors
            );
        }
        // Cases left open are abandoned; drop them from the index so the name can be reused.
        self.open_cases.retain(|(suite, case), _| {
            if suite == name {
                warn!("Case '{}' of suite '{}' never completed", case, suite);
                false
            } else {
                true
            }
        });
        self.flush();
    }

    /// Starts a case labelled with its suite name as class name.
    pub fn start_case(&mut self, suite_name: &str, case_name: &str) {
        self.start_case_with_class(suite_name, case_name, suite_name)
    }

    pub fn start_case_with_class(&mut self, suite_name: &str, case_name: &str, class_name: &str) {
        let suite_index = match self.open_suites.get(suite_name) {
            Some(index) => *index,
            None => {
                debug!(
                    "Ignoring case '{}' of suite '{}' that is not running",
                    case_name, suite_name
                );
                return;
            }
        };
        let key = (suite_name.to_owned(), case_name.to_owned());
        if self.open_cases.contains_key(&key) {
            debug!("Case '{}' of suite '{}' is already running", case_name, suite_name);
            return;
        }
        if let Some(suite) = self.document.suite_mut(suite_index) {
            let index = suite.push_case(Case::start(case_name, class_name));
            self.open_cases.insert(key, index);
            debug!("Case '{}' of suite '{}' started", case_name, suite_name);
        }
    }

    /// Completes a case with a free-text outcome such as `PASS`, `FAIL` or `ABORTED`.
    ///
    /// `detail` is kept only for failed and aborted cases.
    pub fn complete_case(
        &mut self,
        suite_name: &str,
        case_name: &str,
        outcome: &str,
        detail: &str,
    ) {
        let position = match self.take_open_case(suite_name, case_name) {
            Some(position) => position,
            None => return,
        };
        let outcome = self.policy.classify(outcome);
        self.record_case(position, outcome, detail);
    }

    /// Completes a case that reported several sub-results.
    ///
    /// The most severe sub-outcome becomes the case outcome. Details of the sub-results
    /// that did not pass are joined line by line.
    pub fn complete_case_bundle(
        &mut self,
        suite_name: &str,
        case_name: &str,
        results: &[SubResult],
    ) {
        let position = match self.take_open_case(suite_name, case_name) {
            Some(position) => position,
            None => return,
        };
        let classified: Vec<(Outcome, &str)> = results
            .iter()
            .map(|result| (self.policy.classify(&result.outcome), result.detail.as_str()))
            .collect();
        let outcome = Outcome::rollup(classified.iter().map(|(outcome, _)| *outcome));
        let detail = classified
            .iter()
            .filter(|(outcome, detail)| *outcome != Outcome::Pass && !detail.is_empty())
            .map(|(_, detail)| *detail)
            .collect::<Vec<_>>()
            .join("\n");
        self.record_case(position, outcome, &detail);
    }

    /// Running or final elapsed time of a suite, or of one of its cases.
    ///
    /// Returns an empty string when the target is unknown.
    pub fn get_elapsed(
        &self,
        suite_name: &str,
        case_name: Option<&str>,
        unit: TimeUnit,
    ) -> String {
        let suite = match self.document.find_suite(suite_name) {
            Some(suite) => suite,
            None => {
                warn!("Cannot measure unknown suite '{}'", suite_name);
                return String::new();
            }
        };
        match case_name {
            None => suite.node().timer().peek(unit),
            Some(case_name) => match suite.find_case(case_name) {
                Some(case) => case.node().timer().peek(unit),
                None => {
                    warn!(
                        "Cannot measure unknown case '{}' of suite '{}'",
                        case_name, suite_name
                    );
                    String::new()
                }
            },
        }
    }

    /// Writes the current document to the sink. Failures are logged, never returned.
    pub fn flush(&mut self) {
        if let Err(e) = self.sink.write(&self.document) {
            warn!("Failed to write report to {}: {}", self.sink.describe(), e);
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn policy(&self) -> OutcomePolicy {
        self.policy
    }

    pub fn is_suite_open(&self, name: &str) -> bool {
        self.open_suites.contains_key(name)
    }

    pub fn is_case_open(&self, suite_name: &str, case_name: &str) -> bool {
        self.open_cases
            .contains_key(&(suite_name.to_owned(), case_name.to_owned()))
    }

    /// Removes an open case from the index, returning (suite position, case position).
    fn take_open_case(&mut self, suite_name: &str, case_name: &str) -> Option<(usize, usize)> {
        let suite_index = self.open_suites.get(suite_name).copied();
        let key = (suite_name.to_owned(), case_name.to_owned());
        match (suite_index, self.open_cases.remove(&key)) {
            (Some(suite_index), Some(case_index)) => Some((suite_index, case_index)),
            _ => {
                debug!(
                    "Ignoring completion of case '{}' of suite '{}' that is not running",
                    case_name, suite_name
                );
                None
            }
        }
    }

    fn record_case(
        &mut self,
        (suite_index, case_index): (usize, usize),
        outcome: Outcome,
        detail: &str,
    ) {
        let suite = match self.document.suite_mut(suite_index) {
            Some(suite) => suite,
            None => return,
        };
        let suite_name = suite.name().to_owned();
        let case = match suite.case_mut(case_index) {
            Some(case) => case,
            None => return,
        };
        let case_name = case.name().to_owned();
        let seconds = case.complete(CaseResult::new(&case_name, outcome, detail));
        suite.record(outcome);
        self.summary.record(outcome);
        info!(
            "Case '{}' of suite '{}' completed as {} in {:.2}s",
            case_name, suite_name, outcome, seconds
        );
        self.flush();
    }
}
