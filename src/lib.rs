//! Live JUnit reporting for long-running guest validation campaigns.
//!
//! A test driver owns a [`ReportTree`], tells it when suites and cases start and finish,
//! and the tree keeps an up-to-date JUnit document on disk after every change.

#[macro_use]
extern crate log;

pub mod app;
pub mod configuration;
pub mod report;
pub mod time;

pub use self::report::{Outcome, OutcomePolicy, ReportTree, SharedReportTree, Summary};
pub use self::time::{TimeUnit, Timer};
