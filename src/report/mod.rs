mod error;
pub mod junit;
pub mod model;
pub mod outcome;
pub mod reader;
pub mod rows;
mod shared;
pub mod sink;
mod summary;
mod tree;

pub use self::error::ReportError;
pub use self::model::{Case, CaseResult, Counters, Document, ReportNode, Suite};
pub use self::outcome::{Outcome, OutcomePolicy, SubResult};
pub use self::reader::ParsedReport;
pub use self::shared::SharedReportTree;
pub use self::sink::{FileSink, Sink};
pub use self::summary::Summary;
pub use self::tree::ReportTree;
