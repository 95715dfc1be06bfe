// src/services/clock.rs
// Wall-clock time sources for the frame composer

use chrono::{Local, Timelike};
use std::cell::Cell;

use crate::models::TimeOfDay;

pub trait Clock {
    fn now(&self) -> TimeOfDay;
}

/// Local time from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> TimeOfDay {
        let now = Local::now();
        // chrono keeps leap seconds in the nanosecond field, so second() is 0..=59
        TimeOfDay {
            hour: now.hour() as u8,
            minute: now.minute() as u8,
            second: now.second() as u8,
        }
    }
}

/// A clock that shows whatever it was last set to.
#[derive(Debug, Clone, Default)]
pub struct FixedClock {
    time: Cell<TimeOfDay>,
}

impl FixedClock {
    pub fn new(time: TimeOfDay) -> Self {
        Self {
            time: Cell::new(time),
        }
    }

    pub fn set(&self, time: TimeOfDay) {
        self.time.set(time);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> TimeOfDay {
        self.time.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_in_range() {
        let now = SystemClock.now();
        assert!(TimeOfDay::new(now.hour, now.minute, now.second).is_some());
    }

    #[test]
    fn test_fixed_clock_set() {
        let clock = FixedClock::new(TimeOfDay::new(1, 2, 3).unwrap());
        assert_eq!(clock.now().to_string(), "01:02:03");
        clock.set(TimeOfDay::new(4, 5, 6).unwrap());
        assert_eq!(clock.now().to_string(), "04:05:06");
    }
}
