use std::sync::Mutex;

use chrono::{Local, NaiveDateTime, Timelike};

/// Clock abstracts access to the current wall-clock time so services remain deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current local timestamp.
    fn now(&self) -> NaiveDateTime;

    /// Returns the current timestamp truncated to minute resolution.
    fn now_minute(&self) -> NaiveDateTime {
        truncate_to_minute(self.now())
    }
}

/// Real-time clock backed by the local system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Manually driven clock for tests and replays.
#[derive(Debug)]
pub struct FixedClock {
    current: Mutex<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(at: NaiveDateTime) -> Self {
        Self {
            current: Mutex::new(at),
        }
    }

    pub fn set(&self, at: NaiveDateTime) {
        if let Ok(mut guard) = self.current.lock() {
            *guard = at;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        match self.current.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

/// Drops seconds and sub-second precision.
pub fn truncate_to_minute(timestamp: NaiveDateTime) -> NaiveDateTime {
    timestamp
        .with_second(0)
        .and_then(|ts| ts.with_nanosecond(0))
        .unwrap_or(timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn fixed_clock_truncates_to_minute() {
        let at = NaiveDate::from_ymd_opt(2025, 10, 5)
            .unwrap()
            .and_hms_milli_opt(16, 30, 42, 250)
            .unwrap();
        let clock = FixedClock::new(at);
        assert_eq!(
            clock.now_minute(),
            NaiveDate::from_ymd_opt(2025, 10, 5)
                .unwrap()
                .and_hms_opt(16, 30, 0)
                .unwrap()
        );
    }
}
