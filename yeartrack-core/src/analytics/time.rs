//! Time distribution and streaks.
//!
//! Every activity event (created issue, comment, article) counts once at its
//! creation instant, converted to the report's timezone.

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike, Utc};
use serde::Serialize;

/// Activity histograms and the longest streak.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeStats {
    /// Events per month; index 0 is January
    pub by_month: [u64; 12],
    /// Events per weekday; index 0 is Sunday
    pub by_weekday: [u64; 7],
    /// Events per hour of day (0-23)
    pub by_hour: [u64; 24],
    /// Busiest month (1-12)
    pub busiest_month: u32,
    /// Busiest weekday (0=Sunday)
    pub busiest_weekday: u32,
    /// Busiest hour (0-23)
    pub busiest_hour: u32,
    pub total_events: u64,
    /// Distinct calendar days with at least one event
    pub active_days: usize,
    pub longest_streak: Streak,
}

impl Default for TimeStats {
    fn default() -> Self {
        Self {
            by_month: [0; 12],
            by_weekday: [0; 7],
            by_hour: [0; 24],
            busiest_month: 1,
            busiest_weekday: 0,
            busiest_hour: 0,
            total_events: 0,
            active_days: 0,
            longest_streak: Streak::default(),
        }
    }
}

impl TimeStats {
    /// Build histograms and streak from event instants.
    pub fn from_events<Tz: TimeZone>(events: &[DateTime<Utc>], tz: &Tz) -> Self {
        let mut stats = Self::default();
        let mut dates = BTreeSet::new();

        for event in events {
            let local = event.with_timezone(tz);
            stats.by_month[local.month0() as usize] += 1;
            stats.by_weekday[local.weekday().num_days_from_sunday() as usize] += 1;
            stats.by_hour[local.hour() as usize] += 1;
            dates.insert(local.date_naive());
        }

        stats.total_events = events.len() as u64;
        stats.busiest_month = busiest(&stats.by_month) as u32 + 1;
        stats.busiest_weekday = busiest(&stats.by_weekday) as u32;
        stats.busiest_hour = busiest(&stats.by_hour) as u32;
        stats.active_days = dates.len();
        stats.longest_streak = Streak::longest(&dates);
        stats
    }

    /// Saturday plus Sunday events.
    pub fn weekend_events(&self) -> u64 {
        self.by_weekday[0] + self.by_weekday[6]
    }

    /// Events between 10pm and 5am.
    pub fn night_events(&self) -> u64 {
        self.by_hour[22..24].iter().sum::<u64>() + self.by_hour[0..5].iter().sum::<u64>()
    }

    /// Events between 5am and 9am.
    pub fn early_morning_events(&self) -> u64 {
        self.by_hour[5..9].iter().sum()
    }

    /// Get day name from index.
    pub fn day_name(day: u32) -> &'static str {
        match day {
            0 => "Sunday",
            1 => "Monday",
            2 => "Tuesday",
            3 => "Wednesday",
            4 => "Thursday",
            5 => "Friday",
            6 => "Saturday",
            _ => "Unknown",
        }
    }

    /// Get month name from a 1-based month number.
    pub fn month_name(month: u32) -> &'static str {
        match month {
            1 => "January",
            2 => "February",
            3 => "March",
            4 => "April",
            5 => "May",
            6 => "June",
            7 => "July",
            8 => "August",
            9 => "September",
            10 => "October",
            11 => "November",
            12 => "December",
            _ => "Unknown",
        }
    }

    /// Get hour display (e.g., "10am-11am").
    pub fn hour_display(hour: u32) -> String {
        let h = hour % 12;
        let h = if h == 0 { 12 } else { h };
        let period = if hour < 12 { "am" } else { "pm" };
        let next_h = (hour + 1) % 12;
        let next_h = if next_h == 0 { 12 } else { next_h };
        let next_period = if (hour + 1) % 24 < 12 { "am" } else { "pm" };
        format!("{}{}-{}{}", h, period, next_h, next_period)
    }
}

/// Index of the largest bucket; the lowest index wins ties.
fn busiest(buckets: &[u64]) -> usize {
    let mut best = 0;
    for (index, &count) in buckets.iter().enumerate() {
        if count > buckets[best] {
            best = index;
        }
    }
    best
}

/// A run of consecutive active calendar days.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Streak {
    pub days: u32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Streak {
    /// Longest run in an ordered set of dates; the earliest run wins ties.
    pub fn longest(dates: &BTreeSet<NaiveDate>) -> Self {
        let mut best = Streak::default();
        let mut run_start: Option<NaiveDate> = None;
        let mut prev: Option<NaiveDate> = None;
        let mut run_len = 0u32;

        for &date in dates {
            let continues = prev.is_some_and(|p| date.signed_duration_since(p).num_days() == 1);
            if continues {
                run_len += 1;
            } else {
                run_start = Some(date);
                run_len = 1;
            }

            if run_len > best.days {
                best = Streak {
                    days: run_len,
                    start_date: run_start,
                    end_date: Some(date),
                };
            }
            prev = Some(date);
        }

        best
    }
}
