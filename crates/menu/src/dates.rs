//! Calendar helpers: week boundaries, business-day arithmetic, and the
//! `YYYY-MM-DD` keys used throughout the crate.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime, Weekday};
use time_tz::{timezones, ToTimezone};

use crate::error::MenuError;

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Monday of the week containing `d`. A Monday maps to itself.
pub fn week_start(d: Date) -> Date {
    d - Duration::days(i64::from(d.weekday().number_days_from_monday()))
}

/// Friday of the week containing `d`. For a weekend date this is the Friday
/// that already passed, so ranges anchored on a weekend come out empty.
pub fn week_end(d: Date) -> Date {
    week_start(d) + Duration::days(4)
}

/// Saturdays and Sundays are never school days.
pub fn is_business_day(d: Date) -> bool {
    !matches!(d.weekday(), Weekday::Saturday | Weekday::Sunday)
}

/// Walks forward from `start` until `n` business days have been crossed.
/// Zero or negative `n` returns `start` unchanged, even on a weekend.
pub fn add_business_days(start: Date, n: i32) -> Date {
    let mut d = start;
    let mut added = 0;
    while added < n {
        d += Duration::days(1);
        if is_business_day(d) {
            added += 1;
        }
    }
    d
}

/// Inclusive range of calendar dates. Empty when `start > end`.
pub fn date_range(start: Date, end: Date) -> DateRange {
    DateRange { cursor: Some(start), end }
}

#[derive(Debug, Clone)]
pub struct DateRange {
    cursor: Option<Date>,
    end: Date,
}

impl Iterator for DateRange {
    type Item = Date;

    fn next(&mut self) -> Option<Date> {
        let current = self.cursor?;
        if current > self.end {
            self.cursor = None;
            return None;
        }
        self.cursor = current.next_day();
        Some(current)
    }
}

/// Formats a date as `YYYY-MM-DD`, the key shape used in [`WeekMenu`]
/// maps and cache keys.
///
/// [`WeekMenu`]: crate::model::WeekMenu
pub fn format_date(d: Date) -> String {
    d.format(ISO_DATE).expect("year-month-day items format from a Date")
}

/// Parses a strict `YYYY-MM-DD` string. Anything else, including unpadded
/// months or trailing text, is a [`MenuError::Format`].
pub fn parse_date(s: &str) -> Result<Date, MenuError> {
    Ok(Date::parse(s, ISO_DATE)?)
}

/// Today's civil date in the named IANA timezone, falling back to UTC when
/// the name is unknown. Configuration validation rejects unknown names, so
/// the fallback only matters for callers bypassing it.
pub fn today_in(tz_name: &str) -> Date {
    let now = OffsetDateTime::now_utc();
    match timezones::get_by_name(tz_name) {
        Some(tz) => now.to_timezone(tz).date(),
        None => now.date(),
    }
}
