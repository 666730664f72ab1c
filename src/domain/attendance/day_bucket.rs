//! Calendar-day bucketing for attendance.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime};

/// The half-open interval `[midnight, next midnight)` containing an instant,
/// measured in that instant's own offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBucket {
    day: NaiveDate,
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
}

impl DayBucket {
    /// Bucket of the local calendar day `at` falls on.
    ///
    /// `None` when either midnight lies outside the representable range.
    pub fn containing(at: DateTime<FixedOffset>) -> Option<Self> {
        let since_midnight = at.time().signed_duration_since(NaiveTime::MIN);
        let start = at.checked_sub_signed(since_midnight)?;
        let end = start.checked_add_signed(Duration::days(1))?;
        Some(Self {
            day: at.date_naive(),
            start,
            end,
        })
    }

    /// Local calendar day.
    pub fn day(&self) -> NaiveDate {
        self.day
    }

    /// Local midnight opening the bucket.
    pub fn start(&self) -> DateTime<FixedOffset> {
        self.start
    }

    /// Local midnight closing the bucket (exclusive).
    pub fn end(&self) -> DateTime<FixedOffset> {
        self.end
    }

    pub fn contains<Tz: chrono::TimeZone>(&self, at: &DateTime<Tz>) -> bool {
        *at >= self.start && *at < self.end
    }
}
