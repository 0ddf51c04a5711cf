use crate::report::outcome::Outcome;
use std::fmt;

/// Session-wide totals across every suite, fed by case completions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total_cases: u32,
    pub total_pass: u32,
    pub total_fail: u32,
    pub total_aborted: u32,
}

impl Summary {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Pass => self.total_pass += 1,
            Outcome::Fail => self.total_fail += 1,
            Outcome::Error => self.total_aborted += 1,
        }
        self.total_cases += 1;
    }

    /// Overall outcome of the session: the most severe case outcome seen.
    pub fn overall(&self) -> Outcome {
        if self.total_aborted > 0 {
            Outcome::Error
        } else if self.total_fail > 0 {
            Outcome::Fail
        } else {
            Outcome::Pass
        }
    }
}

impl Extend<Outcome> for Summary {
    fn extend<T: IntoIterator<Item = Outcome>>(&mut self, iter: T) {
        for outcome in iter {
            self.record(outcome);
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Total: {}, Pass: {}, Fail: {}, Aborted: {}",
            self.total_cases, self.total_pass, self.total_fail, self.total_aborted
        )
    }
}
