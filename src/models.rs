use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

use crate::error::{WeekIdParseError, YearMonthParseError};

/// A borrow event as handed over by the ingester.
///
/// The date is kept as the raw cell text; it is parsed when the event is
/// analyzed so that a bad cell can be reported against its row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorrowEvent {
    pub row: usize,
    pub borrow_date: String,
}

impl BorrowEvent {
    pub fn new(row: usize, borrow_date: impl Into<String>) -> Self {
        Self {
            row,
            borrow_date: borrow_date.into(),
        }
    }

    pub fn from_date(row: usize, date: NaiveDate) -> Self {
        Self::new(row, date.format("%Y-%m-%d").to_string())
    }
}

/// An ISO-8601 week, formatted as `"YYYY-WW"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IsoWeekId {
    iso_year: i32,
    iso_week: u32,
}

impl IsoWeekId {
    /// Builds a week id, rejecting week numbers outside 1..=53.
    pub fn new(iso_year: i32, iso_week: u32) -> Option<Self> {
        (1..=53)
            .contains(&iso_week)
            .then_some(Self { iso_year, iso_week })
    }

    pub fn of(date: NaiveDate) -> Self {
        let week = date.iso_week();
        Self {
            iso_year: week.year(),
            iso_week: week.week(),
        }
    }

    pub fn iso_year(self) -> i32 {
        self.iso_year
    }

    pub fn iso_week(self) -> u32 {
        self.iso_week
    }
}

impl fmt::Display for IsoWeekId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.iso_year, self.iso_week)
    }
}

impl FromStr for IsoWeekId {
    type Err = WeekIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || WeekIdParseError {
            value: s.to_string(),
        };
        let (year, week) = s.rsplit_once('-').ok_or_else(err)?;
        if week.len() != 2 || !week.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        let iso_year: i32 = year.parse().map_err(|_| err())?;
        let iso_week: u32 = week.parse().map_err(|_| err())?;
        Self::new(iso_year, iso_week).ok_or_else(err)
    }
}

impl Serialize for IsoWeekId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A calendar month, formatted as `"YYYY-MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Last day of the month, found as the first day of the next month minus one.
    pub fn last_day(self) -> Option<NaiveDate> {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1)?.pred_opt()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = YearMonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || YearMonthParseError {
            value: s.to_string(),
        };
        let (year, month) = s.trim().rsplit_once('-').ok_or_else(err)?;
        let year: i32 = year.parse().map_err(|_| err())?;
        let month: u32 = month.parse().map_err(|_| err())?;
        Self::new(year, month).ok_or_else(err)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Attendance classification of one month that had at least one event.
///
/// Week lists are sorted by their formatted `"YYYY-WW"` text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceRecord {
    pub year_month: YearMonth,
    pub total_weeks: Vec<IsoWeekId>,
    pub recorded_weeks: Vec<IsoWeekId>,
    pub corrected_recorded_weeks: Vec<IsoWeekId>,
    pub missing_weeks: Vec<IsoWeekId>,
    pub is_full: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceResult {
    /// Every classified month, ascending by `"YYYY-MM"`.
    pub records: Vec<AttendanceRecord>,
    pub full_attendance_months: Vec<YearMonth>,
    pub partial_attendance_months: Vec<AttendanceRecord>,
    pub total_full_attendance_count: usize,
}
