use chrono::{DateTime, TimeZone, Utc};

use super::MILLIS_PER_DAY;

const DAYS_PER_JULIAN_CENTURY: f64 = 36525.0;

/// Fixed astronomical reference instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Epoch {
    /// 2000-01-01 12:00 UTC.
    J2000,
    /// 2010-01-00 00:00 UTC, i.e. 2009-12-31 00:00 UTC.
    J2010,
}

impl Epoch {
    /// Milliseconds since the Unix epoch.
    const fn unix_millis(self) -> i64 {
        match self {
            Epoch::J2000 => 946_728_000_000,
            Epoch::J2010 => 1_262_217_600_000,
        }
    }

    pub fn instant(self) -> DateTime<Utc> {
        // Both constants are far inside chrono's representable range.
        DateTime::<Utc>::from_timestamp_millis(self.unix_millis()).unwrap_or_default()
    }

    pub(crate) fn millis_until_unix(self, unix_millis: i64) -> i64 {
        unix_millis - self.unix_millis()
    }

    /// Days elapsed from the epoch to `when`; negative before the epoch.
    pub fn days_until<Tz: TimeZone>(self, when: &DateTime<Tz>) -> f64 {
        self.days_until_unix(when.timestamp_millis())
    }

    pub(crate) fn days_until_unix(self, unix_millis: i64) -> f64 {
        self.millis_until_unix(unix_millis) as f64 / MILLIS_PER_DAY as f64
    }

    /// Julian centuries (36525 days) elapsed from the epoch to `when`.
    pub fn julian_centuries_until<Tz: TimeZone>(self, when: &DateTime<Tz>) -> f64 {
        self.julian_centuries_until_unix(when.timestamp_millis())
    }

    pub(crate) fn julian_centuries_until_unix(self, unix_millis: i64) -> f64 {
        self.millis_until_unix(unix_millis) as f64
            / (MILLIS_PER_DAY as f64 * DAYS_PER_JULIAN_CENTURY)
    }
}
