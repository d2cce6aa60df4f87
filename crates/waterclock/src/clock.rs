//! Time sources feeding the engine.

use std::time::{Duration, Instant};

use chrono::{Local, NaiveDateTime, NaiveTime, TimeDelta};

/// Supplies the time of day for each frame.
pub trait ClockSource {
    fn now(&mut self) -> NaiveTime;
}

/// The local wall clock.
#[derive(Debug, Default)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn now(&mut self) -> NaiveTime {
        Local::now().time()
    }
}

/// Runs time forward `factor` times faster than real time from a start point.
#[derive(Debug)]
pub struct AcceleratedClock {
    start: NaiveDateTime,
    started: Instant,
    factor: u32,
}

impl AcceleratedClock {
    pub fn new(start: NaiveDateTime, factor: u32) -> Self {
        Self {
            start,
            started: Instant::now(),
            factor,
        }
    }

    /// Simulated time after `elapsed` real time.
    pub fn at(&self, elapsed: Duration) -> NaiveTime {
        let simulated = TimeDelta::from_std(elapsed.saturating_mul(self.factor))
            .unwrap_or(TimeDelta::zero());
        self.start
            .checked_add_signed(simulated)
            .unwrap_or(self.start)
            .time()
    }
}

impl ClockSource for AcceleratedClock {
    fn now(&mut self) -> NaiveTime {
        self.at(self.started.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(23, 59, 0)
            .unwrap()
    }

    #[test]
    fn test_accelerated_clock_scales_elapsed_time() {
        let clock = AcceleratedClock::new(start(), 30);
        assert_eq!(clock.at(Duration::ZERO), start().time());
        assert_eq!(
            clock.at(Duration::from_secs(1)),
            NaiveTime::from_hms_opt(23, 59, 30).unwrap()
        );
    }

    #[test]
    fn test_accelerated_clock_wraps_past_midnight() {
        let clock = AcceleratedClock::new(start(), 60);
        assert_eq!(
            clock.at(Duration::from_secs(2)),
            NaiveTime::from_hms_opt(0, 1, 0).unwrap()
        );
    }

    #[test]
    fn test_unit_factor_is_real_time() {
        let clock = AcceleratedClock::new(start(), 1);
        assert_eq!(
            clock.at(Duration::from_millis(2_500)),
            NaiveTime::from_hms_milli_opt(23, 59, 2, 500).unwrap()
        );
    }
}
