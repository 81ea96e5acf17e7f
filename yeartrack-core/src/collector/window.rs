//! Calendar-year window used for queries and in-memory filtering.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::{Error, Result};

/// Earliest year accepted for collection.
pub const MIN_YEAR: i32 = 1970;
/// Latest year accepted for collection.
pub const MAX_YEAR: i32 = 9999;

/// A calendar year in UTC.
///
/// Date bounds feed the tracker queries; instant bounds form the closed
/// interval used to filter comments and articles locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearWindow {
    year: i32,
    start_date: NaiveDate,
    end_date: NaiveDate,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl YearWindow {
    pub fn new(year: i32) -> Result<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(Error::Validation(format!(
                "year must be between {} and {}, got {}",
                MIN_YEAR, MAX_YEAR, year
            )));
        }

        let invalid = || Error::Validation(format!("invalid year: {}", year));
        let start_date = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(invalid)?;
        let end_date = NaiveDate::from_ymd_opt(year, 12, 31).ok_or_else(invalid)?;
        let last_second = NaiveTime::from_hms_opt(23, 59, 59).ok_or_else(invalid)?;

        Ok(Self {
            year,
            start_date,
            end_date,
            start: start_date.and_time(NaiveTime::MIN).and_utc(),
            end: end_date.and_time(last_second).and_utc(),
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// `{year}-01-01`
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// `{year}-12-31`
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// `{year}-01-01T00:00:00Z`
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// `{year}-12-31T23:59:59Z`
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Closed-interval membership test.
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start <= ts && ts <= self.end
    }
}
