//! Sliding query windows over a recent time span.

use chrono::{DateTime, TimeDelta, Utc};
use std::fmt;

/// One `[from, to)` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from.to_rfc3339(), self.to.to_rfc3339())
    }
}

/// Windows of `increment` starting `back` before `now`, for as long as the
/// window start is before `now`. The last window may end after `now`.
///
/// # Example
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use rummage::tools::TimeWindows;
///
/// let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
/// let windows: Vec<_> = TimeWindows::new(1, 20, now).collect();
/// assert_eq!(windows.len(), 3);
/// assert_eq!(windows[2].to, now);
/// ```
#[derive(Debug, Clone)]
pub struct TimeWindows {
    next_from: DateTime<Utc>,
    end: DateTime<Utc>,
    increment: Option<TimeDelta>,
}

impl TimeWindows {
    pub fn new(back_hours: i64, increment_minutes: i64, now: DateTime<Utc>) -> Self {
        let start = TimeDelta::try_hours(back_hours)
            .and_then(|back| now.checked_sub_signed(back))
            .unwrap_or(now);
        let increment = TimeDelta::try_minutes(increment_minutes).filter(|step| *step > TimeDelta::zero());

        Self {
            next_from: start,
            end: now,
            increment,
        }
    }

    /// Windows ending at the current time.
    pub fn until_now(back_hours: i64, increment_minutes: i64) -> Self {
        Self::new(back_hours, increment_minutes, Utc::now())
    }
}

impl Iterator for TimeWindows {
    type Item = TimeWindow;

    fn next(&mut self) -> Option<TimeWindow> {
        let increment = self.increment?;
        if self.next_from >= self.end {
            return None;
        }

        let from = self.next_from;
        let to = from.checked_add_signed(increment)?;
        self.next_from = to;
        Some(TimeWindow { from, to })
    }
}
