//! Temporal values: dates, datetimes and the three delta types
//!
//! `DateTimeDelta` keeps its second part normalized into `[0, 86400)` with a
//! day borrow, so `-(1 day, 45296s)` is stored as `(-2 days, 41104s)`. Month
//! arithmetic preserves the day of month, clamped to the last valid day of
//! the target month.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// Seconds in one day
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Date(NaiveDate);

impl Date {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build from calendar parts, None when the date does not exist
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i64 {
        i64::from(self.0.year())
    }

    pub fn month(&self) -> i64 {
        i64::from(self.0.month())
    }

    pub fn day(&self) -> i64 {
        i64::from(self.0.day())
    }

    /// Day of week, Monday is 0
    pub fn weekday(&self) -> i64 {
        i64::from(self.0.weekday().num_days_from_monday())
    }

    /// Day of year, January 1st is 1
    pub fn yearday(&self) -> i64 {
        i64::from(self.0.ordinal())
    }

    /// ISO week number
    pub fn week(&self) -> i64 {
        i64::from(self.0.iso_week().week())
    }

    /// Midnight at this date
    pub fn midnight(&self) -> DateTime {
        DateTime::new(self.0.and_time(NaiveTime::MIN))
    }

    pub fn checked_add_days(&self, days: i64) -> Option<Date> {
        TimeDelta::try_days(days)
            .and_then(|delta| self.0.checked_add_signed(delta))
            .map(Self)
    }

    pub fn checked_add_months(&self, months: i64) -> Option<Date> {
        add_months(self.0, months).map(Self)
    }

    /// Difference in whole days
    pub fn days_since(&self, other: &Date) -> DateDelta {
        DateDelta::new(self.0.signed_duration_since(other.0).num_days())
    }
}

/// Calendar date with time of day (no timezone)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DateTime(NaiveDateTime);

impl DateTime {
    pub fn new(datetime: NaiveDateTime) -> Self {
        Self(datetime)
    }

    /// Build from calendar and clock parts, None when they do not exist
    pub fn from_parts(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let time = NaiveTime::from_hms_opt(hour, minute, second)?;
        Some(Self(date.and_time(time)))
    }

    pub fn naive(&self) -> NaiveDateTime {
        self.0
    }

    pub fn date(&self) -> Date {
        Date(self.0.date())
    }

    pub fn year(&self) -> i64 {
        i64::from(self.0.year())
    }

    pub fn month(&self) -> i64 {
        i64::from(self.0.month())
    }

    pub fn day(&self) -> i64 {
        i64::from(self.0.day())
    }

    pub fn hour(&self) -> i64 {
        i64::from(chrono::Timelike::hour(&self.0))
    }

    pub fn minute(&self) -> i64 {
        i64::from(chrono::Timelike::minute(&self.0))
    }

    pub fn second(&self) -> i64 {
        i64::from(chrono::Timelike::second(&self.0))
    }

    /// Day of week, Monday is 0
    pub fn weekday(&self) -> i64 {
        self.date().weekday()
    }

    /// Day of year, January 1st is 1
    pub fn yearday(&self) -> i64 {
        self.date().yearday()
    }

    /// ISO week number
    pub fn week(&self) -> i64 {
        self.date().week()
    }

    pub fn checked_add_seconds(&self, seconds: i64) -> Option<DateTime> {
        TimeDelta::try_seconds(seconds)
            .and_then(|delta| self.0.checked_add_signed(delta))
            .map(Self)
    }

    pub fn checked_add_months(&self, months: i64) -> Option<DateTime> {
        add_months(self.0.date(), months).map(|date| Self(date.and_time(self.0.time())))
    }

    /// Difference in whole seconds
    pub fn seconds_since(&self, other: &DateTime) -> DateTimeDelta {
        DateTimeDelta::from_total_seconds(self.0.signed_duration_since(other.0).num_seconds())
    }
}

/// Whole-day duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DateDelta {
    days: i64,
}

impl DateDelta {
    pub fn new(days: i64) -> Self {
        Self { days }
    }

    pub fn days(&self) -> i64 {
        self.days
    }

    pub fn is_zero(&self) -> bool {
        self.days == 0
    }
}

/// Day and second duration
///
/// The second part is always in `[0, 86400)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DateTimeDelta {
    days: i64,
    seconds: i64,
}

impl DateTimeDelta {
    /// Build from day and second parts, normalizing the second part with a
    /// day borrow. None when the total second count overflows.
    pub fn new(days: i64, seconds: i64) -> Option<Self> {
        let total = days.checked_mul(SECONDS_PER_DAY)?.checked_add(seconds)?;
        Some(Self::from_total_seconds(total))
    }

    pub fn from_total_seconds(total: i64) -> Self {
        Self {
            days: total.div_euclid(SECONDS_PER_DAY),
            seconds: total.rem_euclid(SECONDS_PER_DAY),
        }
    }

    pub fn days(&self) -> i64 {
        self.days
    }

    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    pub fn total_seconds(&self) -> i64 {
        self.days * SECONDS_PER_DAY + self.seconds
    }

    pub fn is_zero(&self) -> bool {
        self.days == 0 && self.seconds == 0
    }
}

/// Month-granular duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthDelta {
    months: i64,
}

impl MonthDelta {
    pub fn new(months: i64) -> Self {
        Self { months }
    }

    pub fn months(&self) -> i64 {
        self.months
    }

    pub fn is_zero(&self) -> bool {
        self.months == 0
    }
}

/// Shift a date by whole months, clamping the day to the target month
pub(crate) fn add_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let index = i64::from(date.year()) * 12 + i64::from(date.month0());
    let index = index.checked_add(months)?;
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    let month = index.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}
