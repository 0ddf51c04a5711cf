//! Typed report tree: a [`Document`] owns [`Suite`]s, a suite owns [`Case`]s.
//!
//! Entities are appended when they start and are never removed. Once completed, their
//! fields are not touched again.

use crate::report::outcome::Outcome;
use crate::time::{TimeUnit, Timer};
use chrono::{Local, NaiveDateTime};

pub const DEFAULT_RUN_NAME: &str = "suite-report";

/// Rounds seconds to the two decimals kept in the document.
pub(crate) fn round_seconds(seconds: f64) -> f64 {
    (seconds * 100.0).round() / 100.0
}

/// Named, timed unit of the report: the part suites and cases have in common.
#[derive(Debug, Clone)]
pub struct ReportNode {
    name: String,
    timer: Timer,
    elapsed_seconds: Option<f64>,
}

impl ReportNode {
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            timer: Timer::start(),
            elapsed_seconds: None,
        }
    }

    /// Stops the timer and records the rounded elapsed seconds.
    pub fn complete(&mut self) -> f64 {
        let seconds = round_seconds(self.timer.stop().as_secs_f64());
        self.elapsed_seconds = Some(seconds);
        seconds
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    /// Final elapsed seconds, `None` while the node is open.
    pub fn elapsed_seconds(&self) -> Option<f64> {
        self.elapsed_seconds
    }

    /// Final elapsed seconds, or the running time rounded the same way.
    pub fn current_seconds(&self) -> f64 {
        self.elapsed_seconds
            .unwrap_or_else(|| round_seconds(TimeUnit::Second.of(self.timer.elapsed())))
    }

    pub fn is_open(&self) -> bool {
        self.elapsed_seconds.is_none()
    }
}

/// Per-suite counters. `failures + errors <= tests` holds after every [`Counters::record`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub tests: u32,
    pub failures: u32,
    pub errors: u32,
}

impl Counters {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Fail => self.failures += 1,
            Outcome::Error => self.errors += 1,
            Outcome::Pass => {}
        }
        self.tests += 1;
    }

    pub fn merge(&mut self, other: &Counters) {
        self.tests += other.tests;
        self.failures += other.failures;
        self.errors += other.errors;
    }
}

/// What a completed case reported.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseResult {
    pub outcome: Outcome,
    pub message: Option<String>,
    pub detail: Option<String>,
}

impl CaseResult {
    pub fn new(case_name: &str, outcome: Outcome, detail: &str) -> Self {
        let message = match outcome {
            Outcome::Pass => None,
            Outcome::Fail => Some(format!("{} failed.", case_name)),
            Outcome::Error => Some(format!("{} aborted.", case_name)),
        };
        let detail = message.as_ref().map(|_| detail.to_owned());
        Self {
            outcome,
            message,
            detail,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Case {
    node: ReportNode,
    class_name: String,
    result: Option<CaseResult>,
}

impl Case {
    pub(crate) fn start(name: &str, class_name: &str) -> Self {
        Self {
            node: ReportNode::start(name),
            class_name: class_name.to_owned(),
            result: None,
        }
    }

    pub(crate) fn complete(&mut self, result: CaseResult) -> f64 {
        let seconds = self.node.complete();
        self.result = Some(result);
        seconds
    }

    pub fn name(&self) -> &str {
        self.node.name()
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn node(&self) -> &ReportNode {
        &self.node
    }

    /// `None` while the case is still open.
    pub fn result(&self) -> Option<&CaseResult> {
        self.result.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.result.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct Suite {
    node: ReportNode,
    started_at: NaiveDateTime,
    counters: Counters,
    cases: Vec<Case>,
}

impl Suite {
    pub(crate) fn start(name: &str) -> Self {
        Self {
            node: ReportNode::start(name),
            started_at: Local::now().naive_local(),
            counters: Counters::default(),
            cases: Vec::new(),
        }
    }

    /// Appends an open case and returns its position.
    pub(crate) fn push_case(&mut self, case: Case) -> usize {
        self.cases.push(case);
        self.cases.len() - 1
    }

    pub(crate) fn case_mut(&mut self, index: usize) -> Option<&mut Case> {
        self.cases.get_mut(index)
    }

    pub(crate) fn record(&mut self, outcome: Outcome) {
        self.counters.record(outcome);
    }

    pub(crate) fn complete(&mut self) -> f64 {
        self.node.complete()
    }

    pub fn name(&self) -> &str {
        self.node.name()
    }

    pub fn node(&self) -> &ReportNode {
        &self.node
    }

    /// Timestamp without timezone, the form JUnit consumers expect.
    pub fn timestamp(&self) -> String {
        self.started_at.format("%Y-%m-%dT%H:%M:%S").to_string()
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    /// Latest case with this name, open or completed.
    pub fn find_case(&self, name: &str) -> Option<&Case> {
        self.cases.iter().rev().find(|case| case.name() == name)
    }

    pub fn is_open(&self) -> bool {
        self.node.is_open()
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    run_name: String,
    suites: Vec<Suite>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(DEFAULT_RUN_NAME)
    }
}

impl Document {
    pub fn new(run_name: impl Into<String>) -> Self {
        Self {
            run_name: run_name.into(),
            suites: Vec::new(),
        }
    }

    pub(crate) fn push_suite(&mut self, suite: Suite) -> usize {
        self.suites.push(suite);
        self.suites.len() - 1
    }

    pub(crate) fn suite_mut(&mut self, index: usize) -> Option<&mut Suite> {
        self.suites.get_mut(index)
    }

    pub fn run_name(&self) -> &str {
        &self.run_name
    }

    pub fn suites(&self) -> &[Suite] {
        &self.suites
    }

    /// Latest suite with this name; an earlier instance is shadowed once the name is reused.
    pub fn find_suite(&self, name: &str) -> Option<&Suite> {
        self.suites.iter().rev().find(|suite| suite.name() == name)
    }

    /// Counters summed over every suite.
    pub fn totals(&self) -> Counters {
        let mut totals = Counters::default();
        for suite in &self.suites {
            totals.merge(suite.counters());
        }
        totals
    }

    /// Elapsed seconds over every suite, running ones included.
    pub fn total_seconds(&self) -> f64 {
        round_seconds(self.suites.iter().map(|s| s.node().current_seconds()).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_result_messages() {
        {
            let result = CaseResult::new("BVT", Outcome::Pass, "ignored");
            assert_eq!(result.message, None);
            assert_eq!(result.detail, None);
        }
        {
            let result = CaseResult::new("NET", Outcome::Fail, "timeout");
            assert_eq!(result.message.as_deref(), Some("NET failed."));
            assert_eq!(result.detail.as_deref(), Some("timeout"));
        }
        {
            let result = CaseResult::new("NET", Outcome::Error, "");
            assert_eq!(result.message.as_deref(), Some("NET aborted."));
            assert_eq!(result.detail.as_deref(), Some(""));
        }
    }

    #[test]
    fn test_counters_keep_invariant() {
        let mut counters = Counters::default();
        for outcome in &[Outcome::Pass, Outcome::Fail, Outcome::Error, Outcome::Fail] {
            counters.record(*outcome);
            assert!(counters.failures + counters.errors <= counters.tests);
        }
        assert_eq!(
            counters,
            Counters {
                tests: 4,
                failures: 2,
                errors: 1
            }
        );
    }

    #[test]
    fn test_round_seconds() {
        assert_eq!(round_seconds(1.234), 1.23);
        assert_eq!(round_seconds(1.235_1), 1.24);
        assert_eq!(round_seconds(0.0), 0.0);
    }

    #[test]
    fn test_node_completion_records_elapsed() {
        let mut node = ReportNode::start("LISAv2");
        assert!(node.is_open());
        assert_eq!(node.elapsed_seconds(), None);

        let seconds = node.complete();
        assert!(!node.is_open());
        assert_eq!(node.elapsed_seconds(), Some(seconds));
        assert_eq!(node.current_seconds(), seconds);
    }

    #[test]
    fn test_timestamp_has_no_timezone() {
        let suite = Suite::start("LISAv2");
        let timestamp = suite.timestamp();

        assert_eq!(timestamp.len(), "2020-01-01T00:00:00".len());
        assert!(!timestamp.contains('+'));
        assert!(!timestamp.ends_with('Z'));
    }
}
