//! Time sources for the session.
//!
//! The session measures delays on a monotonic millisecond clock and stamps messages with wall-clock
//! time. Both come from one [`Clock`] so tests and the headless replay can drive time by hand.

use std::cell::Cell;
use std::fmt::Display;
use std::rc::Rc;
use std::time::Instant;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeDelta, TimeZone};

use crate::config::constants::TIMESTAMP_FORMAT;

pub trait Clock {
    /// Monotonic milliseconds since the clock started.
    fn now_ms(&self) -> u64;
    /// Wall-clock display stamp for a message revealed right now.
    fn timestamp(&self) -> String;
}

/// Format a wall-clock instant as `03:41 PM`.
pub fn format_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    at.format(TIMESTAMP_FORMAT).to_string()
}

pub struct SystemClock {
    started: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { started: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    fn timestamp(&self) -> String {
        format_timestamp(&Local::now())
    }
}

/// Hand-driven clock. Clones share the same time.
#[derive(Clone)]
pub struct ManualClock {
    ms: Rc<Cell<u64>>,
    origin: NaiveDateTime,
}

impl ManualClock {
    /// Starts at midnight, so stamps read `12:00 AM` until an hour passes.
    pub fn new() -> Self {
        let origin = NaiveDate::from_ymd_opt(2024, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0)).unwrap_or_default();
        Self::starting_at(origin)
    }

    pub fn starting_at(origin: NaiveDateTime) -> Self {
        Self { ms: Rc::new(Cell::new(0)), origin }
    }

    pub fn advance(&self, ms: u64) {
        self.ms.set(self.ms.get().saturating_add(ms));
    }

    pub fn set(&self, ms: u64) {
        self.ms.set(ms);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.ms.get()
    }

    fn timestamp(&self) -> String {
        let at = i64::try_from(self.ms.get())
            .ok()
            .and_then(TimeDelta::try_milliseconds)
            .and_then(|elapsed| self.origin.checked_add_signed(elapsed))
            .unwrap_or(NaiveDateTime::MAX);
        at.format(TIMESTAMP_FORMAT).to_string()
    }
}
