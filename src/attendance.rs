//! Full-attendance classification of borrowing months.
//!
//! A month is full when every ISO week overlapping it shows borrowing
//! activity. Weeks straddling two months are credited to both: a week
//! recorded anywhere in the reader's history counts for every month whose
//! week set contains it.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use tracing::debug;

use crate::calendar::{iso_week_of, sort_weeks, weeks_in_year_month};
use crate::dates::parse_borrow_date;
use crate::error::AttendanceError;
use crate::models::{AttendanceRecord, AttendanceResult, BorrowEvent, IsoWeekId, YearMonth};

/// Classifies every month that has at least one borrow event.
///
/// # Errors
///
/// [`AttendanceError::EmptyInput`] when `events` is empty, and
/// [`AttendanceError::Validation`] for the first event whose date does not
/// parse. No partial result is produced in either case.
#[tracing::instrument(skip_all, fields(events = events.len()))]
pub fn analyze(events: &[BorrowEvent]) -> Result<AttendanceResult, AttendanceError> {
    if events.is_empty() {
        return Err(AttendanceError::EmptyInput);
    }

    let dates = parse_events(events)?;
    let months = partition_by_month(&dates);
    let global = global_recorded_weeks(&dates);
    debug!(
        months = months.len(),
        recorded_weeks = global.len(),
        "partitioned borrow events"
    );

    let records = months
        .iter()
        .map(|(year_month, dates)| classify_month(*year_month, dates, &global))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(aggregate(records))
}

fn parse_events(events: &[BorrowEvent]) -> Result<Vec<NaiveDate>, AttendanceError> {
    events
        .iter()
        .map(|event| {
            parse_borrow_date(&event.borrow_date).map_err(|source| AttendanceError::Validation {
                row: event.row,
                value: event.borrow_date.clone(),
                source,
            })
        })
        .collect()
}

/// Groups dates by calendar month. Months without dates never appear.
pub fn partition_by_month(dates: &[NaiveDate]) -> BTreeMap<YearMonth, Vec<NaiveDate>> {
    let mut months: BTreeMap<YearMonth, Vec<NaiveDate>> = BTreeMap::new();
    for date in dates {
        months.entry(YearMonth::of(*date)).or_default().push(*date);
    }
    months
}

/// Union of the ISO weeks of all dates, regardless of month.
pub fn global_recorded_weeks(dates: &[NaiveDate]) -> HashSet<IsoWeekId> {
    dates.iter().copied().map(iso_week_of).collect()
}

/// Classifies one month against the complete set of recorded weeks.
///
/// `dates` are the borrow dates that fall in `year_month`; `global` must be
/// computed over every event of the analysis.
pub fn classify_month(
    year_month: YearMonth,
    dates: &[NaiveDate],
    global: &HashSet<IsoWeekId>,
) -> Result<AttendanceRecord, AttendanceError> {
    let total_weeks = weeks_in_year_month(year_month)?;
    let recorded: HashSet<IsoWeekId> = dates.iter().copied().map(iso_week_of).collect();

    let mut corrected: HashSet<IsoWeekId> = recorded.clone();
    corrected.extend(total_weeks.iter().filter(|week| global.contains(*week)));

    let mut missing_weeks: Vec<IsoWeekId> = total_weeks
        .iter()
        .filter(|week| !corrected.contains(*week))
        .copied()
        .collect();
    sort_weeks(&mut missing_weeks);

    let is_full = missing_weeks.is_empty();
    if !is_full {
        debug!(
            month = %year_month,
            missing = missing_weeks.len(),
            "month has uncovered weeks"
        );
    }

    Ok(AttendanceRecord {
        year_month,
        recorded_weeks: sorted(recorded),
        corrected_recorded_weeks: sorted(corrected),
        total_weeks,
        missing_weeks,
        is_full,
    })
}

fn sorted(weeks: HashSet<IsoWeekId>) -> Vec<IsoWeekId> {
    let mut weeks: Vec<IsoWeekId> = weeks.into_iter().collect();
    sort_weeks(&mut weeks);
    weeks
}

fn aggregate(mut records: Vec<AttendanceRecord>) -> AttendanceResult {
    records.sort_by_cached_key(|record| record.year_month.to_string());

    let full_attendance_months: Vec<YearMonth> = records
        .iter()
        .filter(|record| record.is_full)
        .map(|record| record.year_month)
        .collect();
    let partial_attendance_months: Vec<AttendanceRecord> = records
        .iter()
        .filter(|record| !record.is_full)
        .cloned()
        .collect();

    AttendanceResult {
        total_full_attendance_count: full_attendance_months.len(),
        records,
        full_attendance_months,
        partial_attendance_months,
    }
}
