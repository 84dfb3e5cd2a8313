use std::fmt::Write;

use crate::models::{AttendanceResult, IsoWeekId};

fn join_weeks(weeks: &[IsoWeekId]) -> String {
    weeks
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn build_report(reader: Option<&str>, result: &AttendanceResult) -> String {
    let mut output = String::new();
    let reader_label = reader.unwrap_or("unknown reader");

    let _ = writeln!(output, "# Reader Attendance Report");
    let _ = writeln!(
        output,
        "Generated for {} ({} months with borrowing)",
        reader_label,
        result.records.len()
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Full Attendance Months");

    if result.full_attendance_months.is_empty() {
        let _ = writeln!(output, "No full attendance months.");
    } else {
        for month in result.full_attendance_months.iter() {
            let _ = writeln!(output, "- {}", month);
        }
    }
    let _ = writeln!(
        output,
        "Total full attendance months: {}",
        result.total_full_attendance_count
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Partial Attendance Months");

    if result.partial_attendance_months.is_empty() {
        let _ = writeln!(output, "No partial attendance months.");
    } else {
        for record in result.partial_attendance_months.iter() {
            let _ = writeln!(
                output,
                "- {}: spans {} weeks, {} with borrowing, {} missing",
                record.year_month,
                record.total_weeks.len(),
                record.corrected_recorded_weeks.len(),
                record.missing_weeks.len()
            );
            let _ = writeln!(
                output,
                "  - weeks with borrowing: {}",
                join_weeks(&record.corrected_recorded_weeks)
            );
            let _ = writeln!(
                output,
                "  - missing weeks: {}",
                join_weeks(&record.missing_weeks)
            );
            let _ = writeln!(output, "  - all weeks: {}", join_weeks(&record.total_weeks));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attendance::analyze;
    use crate::models::BorrowEvent;

    fn result_for(dates: &[&str]) -> AttendanceResult {
        let events: Vec<BorrowEvent> = dates
            .iter()
            .enumerate()
            .map(|(i, d)| BorrowEvent::new(i + 1, *d))
            .collect();
        analyze(&events).unwrap()
    }

    #[test]
    fn lists_partial_month_diagnostics() {
        let result = result_for(&["2024-01-02", "2024-01-09", "2024-01-16", "2024-01-23"]);
        let report = build_report(Some("Avery Lee"), &result);

        assert!(report.contains("Generated for Avery Lee (1 months with borrowing)"));
        assert!(report.contains("No full attendance months."));
        assert!(report.contains("Total full attendance months: 0"));
        assert!(report.contains("- 2024-01: spans 5 weeks, 4 with borrowing, 1 missing"));
        assert!(report.contains("  - weeks with borrowing: 2024-01, 2024-02, 2024-03, 2024-04"));
        assert!(report.contains("  - missing weeks: 2024-05"));
        assert!(report.contains("  - all weeks: 2024-01, 2024-02, 2024-03, 2024-04, 2024-05"));
    }

    #[test]
    fn lists_full_months() {
        let result = result_for(&[
            "2024-01-02",
            "2024-01-09",
            "2024-01-16",
            "2024-01-23",
            "2024-01-30",
        ]);
        let report = build_report(None, &result);

        assert!(report.contains("Generated for unknown reader"));
        assert!(report.contains("- 2024-01\n"));
        assert!(report.contains("Total full attendance months: 1"));
        assert!(report.contains("No partial attendance months."));
    }
}
