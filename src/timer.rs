use chrono::{DateTime, Duration, Utc};
use std::cell::Cell;

/// Default limit for a game, in seconds.
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 150;

/// Source of wall-clock time for the timer.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(DateTime::<Utc>::UNIX_EPOCH)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// Countdown started at a fixed instant. Never mutated while a game runs;
/// callers poll it with the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    start: DateTime<Utc>,
    limit_seconds: u32,
}

impl Timer {
    pub fn start(start: DateTime<Utc>, limit_seconds: u32) -> Self {
        Self {
            start,
            limit_seconds,
        }
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn limit_seconds(&self) -> u32 {
        self.limit_seconds
    }

    /// Whole seconds elapsed since the start. A clock behind the start
    /// counts as no time elapsed.
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> i64 {
        (now - self.start).num_seconds().max(0)
    }

    /// `limit - elapsed`; zero or negative once the time is up.
    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> i64 {
        i64::from(self.limit_seconds) - self.elapsed_seconds(now)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.remaining_seconds(now) <= 0
    }
}

/// Render a second count as `m:ss` for display, clamping at zero.
pub fn format_remaining(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
