use lazy_static::*;
use regex::Regex;
use serde_derive::Deserialize;
use std::fmt;
use std::str::FromStr;

lazy_static! {
    static ref FAIL_TOKEN: Regex = Regex::new(r"(?i)fail").expect("Regex compilation error");
    static ref ABORT_TOKEN: Regex =
        Regex::new(r"(?i)abort|error").expect("Regex compilation error");
    static ref PASS_TOKEN: Regex =
        Regex::new(r"(?i)pass|success").expect("Regex compilation error");
}

/// Classified result of a single case.
///
/// Variants are ordered by severity, so `max` picks the outcome that wins a roll-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    Pass,
    Fail,
    /// Reported as `ABORTED` in summaries and as an `<error>` node in the document.
    Error,
}

impl Outcome {
    /// Most severe outcome of a bundle. An empty bundle passes.
    pub fn rollup<I>(outcomes: I) -> Outcome
    where
        I: IntoIterator<Item = Outcome>,
    {
        outcomes.into_iter().max().unwrap_or(Outcome::Pass)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Pass => "PASS",
            Outcome::Fail => "FAIL",
            Outcome::Error => "ABORTED",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How outcome tokens that match no known keyword are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomePolicy {
    /// Anything that is not a failure or an abort passes.
    Lenient,
    /// Only tokens mentioning "pass" or "success" pass; unknown tokens count as aborted.
    Strict,
}

impl Default for OutcomePolicy {
    fn default() -> Self {
        OutcomePolicy::Lenient
    }
}

impl OutcomePolicy {
    /// Classifies a free-text outcome reported by the driver.
    ///
    /// Matching is a case-insensitive substring search: "fail" first, then "abort" or
    /// "error".
    pub fn classify(&self, raw: &str) -> Outcome {
        if FAIL_TOKEN.is_match(raw) {
            Outcome::Fail
        } else if ABORT_TOKEN.is_match(raw) {
            Outcome::Error
        } else {
            match self {
                OutcomePolicy::Lenient => Outcome::Pass,
                OutcomePolicy::Strict if PASS_TOKEN.is_match(raw) => Outcome::Pass,
                OutcomePolicy::Strict => {
                    warn!("Unrecognized outcome '{}', counting it as aborted", raw);
                    Outcome::Error
                }
            }
        }
    }
}

impl FromStr for OutcomePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(OutcomePolicy::Lenient),
            "strict" => Ok(OutcomePolicy::Strict),
            _ => Err(format!("Outcome policy '{}' not supported", s)),
        }
    }
}

/// One line of a bundled result, as reported by a case that runs several sub-tests.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SubResult {
    pub outcome: String,
    #[serde(default)]
    pub detail: String,
}

impl SubResult {
    pub fn new(outcome: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            outcome: outcome.into(),
            detail: detail.into(),
        }
    }
}
