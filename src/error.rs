/// Reasons a raw borrow-date cell could not be turned into a calendar date.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DateParseError {
    #[error("date cell is empty")]
    Empty,

    #[error("unrecognized date format")]
    Unrecognized,

    #[error("spreadsheet serial {serial} is out of range")]
    SerialOutOfRange { serial: f64 },
}

/// Returned when a `"YYYY-WW"` string does not name a valid ISO week.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid ISO week id: {value:?}")]
pub struct WeekIdParseError {
    pub value: String,
}

/// Returned when a `"YYYY-MM"` string does not name a calendar month.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid year-month: {value:?}")]
pub struct YearMonthParseError {
    pub value: String,
}

/// Errors that abort an attendance analysis.
///
/// All variants describe caller-supplied input; none of them are transient.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AttendanceError {
    /// A borrow event carried a date that could not be parsed.
    #[error("row {row}: invalid borrow date {value:?}: {source}")]
    Validation {
        /// 1-based row of the offending event.
        row: usize,
        /// The raw cell text.
        value: String,
        source: DateParseError,
    },

    /// No events were supplied, so there is no month to classify.
    #[error("no borrow events to analyze")]
    EmptyInput,

    #[error("invalid month {month} for year {year}")]
    InvalidMonth { year: i32, month: u32 },
}
