use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, TimeZone, Timelike, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::ShopError;

/// Fixed UTC+9 civil offset used for every window boundary and bucket key.
pub static REPORTING_OFFSET: Lazy<FixedOffset> =
    Lazy::new(|| FixedOffset::east_opt(9 * 3600).unwrap());

/// Calendar months covered by the monthly report, current month included.
const MONTHLY_SPAN: u32 = 3;
/// Calendar days covered by the daily report, current day included.
const DAILY_SPAN: u32 = 3;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Granularity {
    Monthly,
    Daily,
}

/// Inclusive `[start, end]` instant range a report filters sales against.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportingWindow {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub granularity: Granularity,
}

impl ReportingWindow {
    pub fn new(
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
        granularity: Granularity,
    ) -> Result<Self, ShopError> {
        if start > end {
            return Err(ShopError::InvalidInput(
                "window start must not be after end".into(),
            ));
        }
        Ok(Self {
            start,
            end,
            granularity,
        })
    }

    /// Both bounds are inclusive.
    pub fn contains(&self, instant: DateTime<FixedOffset>) -> bool {
        instant >= self.start && instant <= self.end
    }
}

/// The three report boundaries derived from one reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindows {
    pub end_of_day: DateTime<FixedOffset>,
    pub monthly_start: DateTime<FixedOffset>,
    pub daily_start: DateTime<FixedOffset>,
}

impl ReportWindows {
    /// Derives the boundaries for the civil day the reference instant falls on
    /// in the reporting offset. `end_of_day` is 23:59:59 of that same day, not
    /// of the following one.
    pub fn from_reference(reference: DateTime<Utc>) -> Self {
        let local = reference.with_timezone(&*REPORTING_OFFSET);
        let end_of_day = local
            .with_hour(23)
            .and_then(|t| t.with_minute(59))
            .and_then(|t| t.with_second(59))
            .and_then(|t| t.with_nanosecond(0))
            .unwrap();
        let monthly_start = monthly_window_start(local.year(), local.month());
        let daily_start = daily_window_start(local.date_naive());
        Self {
            end_of_day,
            monthly_start,
            daily_start,
        }
    }

    pub fn monthly(&self) -> Result<ReportingWindow, ShopError> {
        ReportingWindow::new(self.monthly_start, self.end_of_day, Granularity::Monthly)
    }

    pub fn daily(&self) -> Result<ReportingWindow, ShopError> {
        ReportingWindow::new(self.daily_start, self.end_of_day, Granularity::Daily)
    }
}

/// First day, 00:00:00, of the month two calendar months before the reference
/// month. A non-positive month rolls the year back and wraps by twelve, so
/// January resolves to November of the previous year and February to December
/// of the previous year.
fn monthly_window_start(year: i32, month: u32) -> DateTime<FixedOffset> {
    let mut year = year;
    let mut month = month as i32 - (MONTHLY_SPAN as i32 - 1);
    if month <= 0 {
        month += 12;
        year -= 1;
    }
    start_of_day(NaiveDate::from_ymd_opt(year, month as u32, 1).unwrap())
}

/// The calendar day two days before the reference day, 00:00:00. When the
/// subtraction underflows below day 1, borrow from the previous month by
/// adding its length, stepping the year back across December.
fn daily_window_start(reference: NaiveDate) -> DateTime<FixedOffset> {
    let mut year = reference.year();
    let mut month = reference.month();
    let mut day = reference.day() as i32 - (DAILY_SPAN as i32 - 1);
    while day < 1 {
        if month == 1 {
            month = 12;
            year -= 1;
        } else {
            month -= 1;
        }
        day += days_in_month(year, month) as i32;
    }
    start_of_day(NaiveDate::from_ymd_opt(year, month, day as u32).unwrap())
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1).unwrap();
    let last_current = first_next - Duration::days(1);
    last_current.day()
}

fn start_of_day(date: NaiveDate) -> DateTime<FixedOffset> {
    REPORTING_OFFSET
        .from_local_datetime(&date.and_hms_opt(0, 0, 0).unwrap())
        .unwrap()
}
