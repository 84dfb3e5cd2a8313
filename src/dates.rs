use chrono::{Days, NaiveDate};

use crate::error::DateParseError;

/// Text layouts seen in borrowing spreadsheets, tried in order.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y年%m月%d日",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
];

/// Day zero of spreadsheet date serials.
fn serial_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or(NaiveDate::MIN)
}

/// Parses a raw borrow-date cell into a calendar date.
///
/// Accepts the layouts in [`DATE_FORMATS`] and, failing those, a positive
/// spreadsheet serial number whose fractional part (time of day) is dropped.
pub fn parse_borrow_date(raw: &str) -> Result<NaiveDate, DateParseError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(DateParseError::Empty);
    }

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
    {
        return Ok(date);
    }

    match text.parse::<f64>() {
        Ok(serial) => from_serial(serial),
        Err(_) => Err(DateParseError::Unrecognized),
    }
}

fn from_serial(serial: f64) -> Result<NaiveDate, DateParseError> {
    if !serial.is_finite() || serial < 1.0 || serial > u32::MAX as f64 {
        return Err(DateParseError::SerialOutOfRange { serial });
    }
    serial_epoch()
        .checked_add_days(Days::new(serial.trunc() as u64))
        .ok_or(DateParseError::SerialOutOfRange { serial })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_common_layouts() {
        assert_eq!(parse_borrow_date("2024-01-02").unwrap(), ymd(2024, 1, 2));
        assert_eq!(parse_borrow_date("2024/01/02").unwrap(), ymd(2024, 1, 2));
        assert_eq!(parse_borrow_date("2024年1月2日").unwrap(), ymd(2024, 1, 2));
        assert_eq!(parse_borrow_date(" 2024-01-02 ").unwrap(), ymd(2024, 1, 2));
        assert_eq!(
            parse_borrow_date("2024-01-02 13:45:00").unwrap(),
            ymd(2024, 1, 2)
        );
    }

    #[test]
    fn month_first_wins_for_ambiguous_slashes() {
        assert_eq!(parse_borrow_date("03/04/2024").unwrap(), ymd(2024, 3, 4));
        assert_eq!(parse_borrow_date("25/04/2024").unwrap(), ymd(2024, 4, 25));
    }

    #[test]
    fn parses_spreadsheet_serials() {
        assert_eq!(parse_borrow_date("45293").unwrap(), ymd(2024, 1, 2));
        assert_eq!(parse_borrow_date("45293.75").unwrap(), ymd(2024, 1, 2));
    }

    #[test]
    fn rejects_empty_and_garbage() {
        assert_eq!(parse_borrow_date(""), Err(DateParseError::Empty));
        assert_eq!(parse_borrow_date("   "), Err(DateParseError::Empty));
        assert_eq!(
            parse_borrow_date("next tuesday"),
            Err(DateParseError::Unrecognized)
        );
        assert_eq!(parse_borrow_date("2024-02-30"), Err(DateParseError::Unrecognized));
        assert!(matches!(
            parse_borrow_date("-3"),
            Err(DateParseError::SerialOutOfRange { .. })
        ));
        assert!(matches!(
            parse_borrow_date("NaN"),
            Err(DateParseError::SerialOutOfRange { .. })
        ));
    }
}
