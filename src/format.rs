//! Date and time formatting used by search and the trip rows.

use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Formats trip timestamps for display and search.
pub trait TimeFormatter {
    /// Relative description of `timestamp`, e.g. "2 hours ago"
    fn relative(&self, timestamp: DateTime<Utc>) -> String;

    /// Calendar date, e.g. "26 Jan 2026"
    fn date_string(&self, timestamp: DateTime<Utc>) -> String;

    /// Wall-clock range, e.g. "8:00 AM - 8:45 AM"
    fn time_range_string(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> String;
}

/// chrono-backed formatter.
///
/// With no pinned clock the current system time is read on every call.
#[derive(Debug, Clone)]
pub struct ClockFormatter {
    now: Option<DateTime<Utc>>,
    offset: FixedOffset,
}

impl Default for ClockFormatter {
    fn default() -> Self {
        Self::system()
    }
}

impl ClockFormatter {
    pub fn system() -> Self {
        Self {
            now: None,
            offset: utc_offset(),
        }
    }

    /// Formatter whose notion of "now" is fixed
    pub fn pinned(now: DateTime<Utc>) -> Self {
        Self {
            now: Some(now),
            offset: utc_offset(),
        }
    }

    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// The fixed clock, if any
    pub fn pinned_now(&self) -> Option<DateTime<Utc>> {
        self.now
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }
}

fn utc_offset() -> FixedOffset {
    Utc.fix()
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}

impl TimeFormatter for ClockFormatter {
    fn relative(&self, timestamp: DateTime<Utc>) -> String {
        let elapsed = self.now().signed_duration_since(timestamp);

        let minutes = elapsed.num_minutes();
        if minutes < 1 {
            return "just now".to_string();
        }
        if minutes < 60 {
            return plural(minutes, "min");
        }

        let hours = elapsed.num_hours();
        if hours < 24 {
            return plural(hours, "hour");
        }

        let days = elapsed.num_days();
        if days < 7 {
            return plural(days, "day");
        }
        if days < 30 {
            return plural(days / 7, "week");
        }

        self.date_string(timestamp)
    }

    fn date_string(&self, timestamp: DateTime<Utc>) -> String {
        timestamp
            .with_timezone(&self.offset)
            .format("%-d %b %Y")
            .to_string()
    }

    fn time_range_string(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> String {
        format!(
            "{} - {}",
            start.with_timezone(&self.offset).format("%-I:%M %p"),
            end.with_timezone(&self.offset).format("%-I:%M %p")
        )
    }
}
