use std::sync::{Arc, Mutex, MutexGuard};

use crate::report::model::Document;
use crate::report::outcome::SubResult;
use crate::report::summary::Summary;
use crate::report::tree::ReportTree;
use crate::time::TimeUnit;

// Poisoned locks are recovered.
macro_rules! lock {
    ($name: expr) => {
        match $name.lock() {
            Ok(locked) => locked,
            Err(poisoned) => poisoned.into_inner(),
        }
    };
}

/// Cloneable handle to one [`ReportTree`] for drivers running suites on several threads.
///
/// Each call holds the lock for the mutation and the flush it triggers, so every
/// snapshot on disk is consistent.
#[derive(Debug, Clone)]
pub struct SharedReportTree {
    inner: Arc<Mutex<ReportTree>>,
}

impl SharedReportTree {
    pub fn new(tree: ReportTree) -> Self {
        Self {
            inner: Arc::new(Mutex::new(tree)),
        }
    }

    pub fn start_suite(&self, name: &str) {
        lock!(self.inner).start_suite(name)
    }

    pub fn complete_suite(&self, name: &str) {
        lock!(self.inner).complete_suite(name)
    }

    pub fn start_case(&self, suite_name: &str, case_name: &str) {
        lock!(self.inner).start_case(suite_name, case_name)
    }

    pub fn complete_case(&self, suite_name: &str, case_name: &str, outcome: &str, detail: &str) {
        lock!(self.inner).complete_case(suite_name, case_name, outcome, detail)
    }

    pub fn complete_case_bundle(&self, suite_name: &str, case_name: &str, results: &[SubResult]) {
        lock!(self.inner).complete_case_bundle(suite_name, case_name, results)
    }

    pub fn get_elapsed(&self, suite_name: &str, case_name: Option<&str>, unit: TimeUnit) -> String {
        lock!(self.inner).get_elapsed(suite_name, case_name, unit)
    }

    pub fn summary(&self) -> Summary {
        *lock!(self.inner).summary()
    }

    /// Copy of the document as of now.
    pub fn snapshot(&self) -> Document {
        lock!(self.inner).document().clone()
    }

    /// Exclusive access for several operations in one critical section.
    pub fn lock(&self) -> MutexGuard<'_, ReportTree> {
        lock!(self.inner)
    }
}

impl From<ReportTree> for SharedReportTree {
    fn from(tree: ReportTree) -> Self {
        Self::new(tree)
    }
}
