//! Calendar arithmetic shared by the statement date types.

use chrono::{DateTime, Months, NaiveDate, TimeDelta, TimeZone, Utc};

/// Builds a UTC timestamp from loose calendar fields, carrying overflow into
/// the next unit instead of rejecting it: `2025-02-29` is March 1st, month
/// `13` is January of the following year, hour `25` is 01:00 the next day.
/// Month and day `00` step back into the previous month and day. Years
/// `0..=99` are read as `19xx`.
///
/// `None` only when the result leaves chrono's representable range.
pub fn rolled_over_utc(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> Option<DateTime<Utc>> {
    let year = if (0..=99).contains(&year) { 1900 + year } else { year };

    let jan_first = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let month_start = match month {
        0 => jan_first.checked_sub_months(Months::new(1))?,
        m => jan_first.checked_add_months(Months::new(m - 1))?,
    };

    let offset = TimeDelta::try_days(i64::from(day) - 1)?
        .checked_add(&TimeDelta::try_hours(i64::from(hour))?)?
        .checked_add(&TimeDelta::try_minutes(i64::from(minute))?)?
        .checked_add(&TimeDelta::try_seconds(i64::from(second))?)?;

    month_start
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(offset)
        .map(|dt| Utc.from_utc_datetime(&dt))
}
