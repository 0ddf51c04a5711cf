use crate::time::timeunit::TimeUnit;
use std::time::{Duration, Instant};

/// Wall-clock stopwatch. Starts when created, freezes on the first [`Timer::stop`].
#[derive(Debug, Clone)]
pub struct Timer {
    started: Instant,
    stopped: Option<Duration>,
}

impl Timer {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
            stopped: None,
        }
    }

    /// Stops the timer and returns the measured time.
    ///
    /// Later calls return the reading taken by the first one.
    pub fn stop(&mut self) -> Duration {
        let started = self.started;
        *self.stopped.get_or_insert_with(|| started.elapsed())
    }

    /// Running time if the timer is live, final time otherwise.
    pub fn elapsed(&self) -> Duration {
        self.stopped.unwrap_or_else(|| self.started.elapsed())
    }

    /// Elapsed time in `unit` with two decimal places. Does not stop the timer.
    pub fn peek(&self, unit: TimeUnit) -> String {
        unit.format(self.elapsed())
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.stopped.is_none()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::start()
    }
}

#[cfg(test)]
mod tests {
    use super::Timer;
    use crate::time::TimeUnit;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn test_stop_freezes_reading() {
        let mut timer = Timer::start();
        sleep(Duration::from_millis(5));
        let first = timer.stop();
        sleep(Duration::from_millis(5));
        let second = timer.stop();

        assert!(first >= Duration::from_millis(5));
        assert_eq!(first, second);
        assert_eq!(timer.elapsed(), first);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_peek_does_not_stop() {
        let timer = Timer::start();
        sleep(Duration::from_millis(10));
        let peeked = timer.peek(TimeUnit::Millisecond);

        assert!(timer.is_running());
        assert!(peeked.parse::<f64>().unwrap() >= 10.0);
        assert_eq!(peeked.split('.').nth(1).map(str::len), Some(2));
    }

    #[test]
    fn test_peek_after_stop_reports_final_time() {
        let mut timer = Timer::start();
        let stopped = timer.stop();
        sleep(Duration::from_millis(5));

        assert_eq!(timer.peek(TimeUnit::Second), TimeUnit::Second.format(stopped));
    }
}
