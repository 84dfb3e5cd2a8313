//! Full-attendance analysis of library borrowing logs.
//!
//! A reader has full attendance in a month when every ISO-8601 week
//! overlapping that month shows at least one borrow. Weeks that straddle a
//! month boundary are credited to both months.
//!
//! ```ignore
//! use reader_attendance::{analyze, BorrowEvent};
//!
//! let events = vec![BorrowEvent::new(1, "2024-01-02")];
//! let result = analyze(&events)?;
//! for record in &result.partial_attendance_months {
//!     println!("{} misses {:?}", record.year_month, record.missing_weeks);
//! }
//! ```

pub mod attendance;
pub mod calendar;
pub mod dates;
pub mod error;
pub mod ingest;
pub mod models;
pub mod report;

pub use attendance::analyze;
pub use calendar::{iso_week_of, weeks_in_month};
pub use error::{AttendanceError, DateParseError, WeekIdParseError, YearMonthParseError};
pub use models::{AttendanceRecord, AttendanceResult, BorrowEvent, IsoWeekId, YearMonth};
