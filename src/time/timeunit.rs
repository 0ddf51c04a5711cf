use crate::time::error::Error;
use core::str::FromStr;
use std::time::Duration;

const SECONDS_IN_MINUTE: f64 = 60.0;
const SECONDS_IN_HOUR: f64 = 60.0 * 60.0;
const SECONDS_IN_DAY: f64 = 60.0 * 60.0 * 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Nanosecond,
    Microsecond,
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
}

impl Default for TimeUnit {
    fn default() -> Self {
        TimeUnit::Second
    }
}

impl TimeUnit {
    /// Expresses `duration` as a fractional amount of this unit.
    pub fn of(&self, duration: Duration) -> f64 {
        let secs = duration.as_secs_f64();
        match self {
            TimeUnit::Nanosecond => duration.as_nanos() as f64,
            TimeUnit::Microsecond => duration.as_micros() as f64,
            TimeUnit::Millisecond => secs * 1_000.0,
            TimeUnit::Second => secs,
            TimeUnit::Minute => secs / SECONDS_IN_MINUTE,
            TimeUnit::Hour => secs / SECONDS_IN_HOUR,
            TimeUnit::Day => secs / SECONDS_IN_DAY,
        }
    }

    /// Formats `duration` in this unit with two decimal places.
    pub fn format(&self, duration: Duration) -> String {
        format!("{:.2}", self.of(duration))
    }
}

impl FromStr for TimeUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ns" | "nanosecond" | "nanos" | "nanoseconds" => Ok(TimeUnit::Nanosecond),
            "us" | "microsecond" | "micros" | "microseconds" => Ok(TimeUnit::Microsecond),
            "ms" | "millisecond" | "millis" | "milliseconds" => Ok(TimeUnit::Millisecond),
            "s" | "second" | "secs" | "seconds" => Ok(TimeUnit::Second),
            "m" | "minute" | "mins" | "minutes" => Ok(TimeUnit::Minute),
            "h" | "hour" | "hours" => Ok(TimeUnit::Hour),
            "d" | "day" | "days" => Ok(TimeUnit::Day),
            _ => Err(Error::UnitNotSupported(s.to_owned())),
        }
    }
}
