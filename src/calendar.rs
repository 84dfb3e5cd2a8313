//! ISO-8601 week arithmetic over calendar months.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};

use crate::error::AttendanceError;
use crate::models::{IsoWeekId, YearMonth};

/// ISO week containing `date`. Weeks start on Monday and week 1 holds the
/// year's first Thursday, so the ISO year can differ from `date.year()`.
pub fn iso_week_of(date: NaiveDate) -> IsoWeekId {
    IsoWeekId::of(date)
}

/// Sorts week ids by their `"YYYY-WW"` text.
///
/// This matches chronological order only while every ISO year has the same
/// number of digits.
pub fn sort_weeks(weeks: &mut [IsoWeekId]) {
    weeks.sort_by_cached_key(|week| week.to_string());
}

/// Every ISO week overlapping any day of the given month, sorted by text.
///
/// # Errors
///
/// Returns [`AttendanceError::InvalidMonth`] when `month` is not 1..=12 or
/// the month lies outside the supported date range.
pub fn weeks_in_month(year: i32, month: u32) -> Result<Vec<IsoWeekId>, AttendanceError> {
    let invalid = || AttendanceError::InvalidMonth { year, month };
    let year_month = YearMonth::new(year, month).ok_or_else(invalid)?;
    weeks_in_year_month(year_month)
}

pub(crate) fn weeks_in_year_month(
    year_month: YearMonth,
) -> Result<Vec<IsoWeekId>, AttendanceError> {
    let invalid = || AttendanceError::InvalidMonth {
        year: year_month.year(),
        month: year_month.month(),
    };
    let first = year_month.first_day().ok_or_else(invalid)?;
    let last = year_month.last_day().ok_or_else(invalid)?;

    let unique: BTreeSet<IsoWeekId> = first
        .iter_days()
        .take_while(|day| *day <= last)
        .map(iso_week_of)
        .collect();

    let mut weeks: Vec<IsoWeekId> = unique.into_iter().collect();
    sort_weeks(&mut weeks);
    Ok(weeks)
}

/// All weeks of an ISO year: 52 or 53 of them.
pub fn weeks_in_year(iso_year: i32) -> Vec<IsoWeekId> {
    // Dec 28 always falls in the last ISO week of its year.
    let last_week = NaiveDate::from_ymd_opt(iso_year, 12, 28)
        .map(|d| d.iso_week().week())
        .unwrap_or(52);
    (1..=last_week)
        .filter_map(|week| IsoWeekId::new(iso_year, week))
        .collect()
}
