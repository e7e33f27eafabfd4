//! Attendance reports and their CSV export.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeId, TimeEntry};

const SUMMARY_HEADER: [&str; 8] = [
    "employeeId",
    "employeeName",
    "startDate",
    "endDate",
    "totalHours",
    "totalOvertime",
    "totalLateMinutes",
    "totalBreakMinutes",
];
const ENTRY_HEADER: [&str; 10] = [
    "id",
    "date",
    "checkIn",
    "checkOut",
    "hoursWorked",
    "overtime",
    "lateMinutes",
    "breakMinutes",
    "type",
    "note",
];
const EXPORT_NAME: &str = "attendance report";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Attendance totals over a date range with the entries behind them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceReport {
    /// The employee reported on, `None` for everyone.
    pub employee_id: Option<EmployeeId>,
    /// The employee's name when a single employee is reported on.
    pub employee_name: Option<String>,
    /// First day of the range.
    pub start_date: NaiveDate,
    /// Last day of the range (inclusive).
    pub end_date: NaiveDate,
    /// Sum of hours worked.
    pub total_hours: Decimal,
    /// Sum of overtime hours.
    pub total_overtime: Decimal,
    /// Sum of late minutes.
    pub total_late_minutes: u64,
    /// Sum of break minutes.
    pub total_break_minutes: u64,
    /// Entries in date order.
    pub entries: Vec<TimeEntry>,
}

impl AttendanceReport {
    /// Builds a report from the entries of a range, totalling them.
    pub fn from_entries(
        employee_id: Option<EmployeeId>,
        employee_name: Option<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        entries: Vec<TimeEntry>,
    ) -> Self {
        let total_hours = entries.iter().filter_map(|e| e.hours_worked).sum();
        let total_overtime = entries.iter().filter_map(|e| e.overtime_hours).sum();
        let total_late_minutes = entries.iter().map(|e| u64::from(e.late_minutes)).sum();
        let total_break_minutes = entries.iter().map(|e| u64::from(e.break_minutes)).sum();

        Self {
            employee_id,
            employee_name,
            start_date,
            end_date,
            total_hours,
            total_overtime,
            total_late_minutes,
            total_break_minutes,
            entries,
        }
    }

    /// Renders the report as CSV: a summary block followed by one row per entry.
    ///
    /// Commas inside free text are replaced with `;`. Fields holding quotes
    /// are quoted.
    ///
    /// # Errors
    ///
    /// Returns `Rendering` if the CSV writer fails.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::service::AttendanceReport;
    /// use chrono::NaiveDate;
    ///
    /// let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
    /// let report = AttendanceReport::from_entries(None, None, day, day, vec![]);
    /// let csv = report.to_csv().unwrap();
    ///
    /// assert_eq!(csv.lines().nth(1), Some(",,2025-03-03,2025-03-03,0,0,0,0"));
    /// ```
    pub fn to_csv(&self) -> EngineResult<String> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(SUMMARY_HEADER).map_err(export_error)?;
        writer
            .write_record([
                self.employee_id.map(|id| id.to_string()).unwrap_or_default(),
                sanitize(self.employee_name.as_deref().unwrap_or_default()),
                self.start_date.to_string(),
                self.end_date.to_string(),
                self.total_hours.normalize().to_string(),
                self.total_overtime.normalize().to_string(),
                self.total_late_minutes.to_string(),
                self.total_break_minutes.to_string(),
            ])
            .map_err(export_error)?;

        writer.write_record(ENTRY_HEADER).map_err(export_error)?;
        for entry in &self.entries {
            writer
                .write_record([
                    entry.id.to_string(),
                    entry.date.to_string(),
                    timestamp(entry.check_in),
                    timestamp(entry.check_out),
                    decimal(entry.hours_worked),
                    decimal(entry.overtime_hours),
                    entry.late_minutes.to_string(),
                    entry.break_minutes.to_string(),
                    entry.entry_type.to_string(),
                    sanitize(entry.note.as_deref().unwrap_or_default()),
                ])
                .map_err(export_error)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|err| export_error(err.error()))?;
        String::from_utf8(bytes).map_err(export_error)
    }
}

fn export_error(err: impl ToString) -> EngineError {
    EngineError::Rendering {
        path: EXPORT_NAME.to_string(),
        message: err.to_string(),
    }
}

fn sanitize(text: &str) -> String {
    text.replace(',', ";").replace(['\n', '\r'], " ")
}

fn timestamp(value: Option<NaiveDateTime>) -> String {
    value
        .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default()
}

fn decimal(value: Option<Decimal>) -> String {
    value.map(|d| d.normalize().to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryType;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn closed_entry(id: u64, d: u32, hours: &str, overtime: &str, note: Option<&str>) -> TimeEntry {
        TimeEntry {
            id,
            employee_id: 3,
            date: day(d),
            check_in: day(d).and_hms_opt(8, 0, 0),
            check_out: day(d).and_hms_opt(19, 0, 0),
            late_minutes: 5,
            break_minutes: 60,
            hours_worked: Some(dec(hours)),
            overtime_hours: Some(dec(overtime)),
            entry_type: EntryType::Badge,
            note: note.map(str::to_string),
        }
    }

    #[test]
    fn test_totals() {
        let report = AttendanceReport::from_entries(
            Some(3),
            Some("Hery Rabe".to_string()),
            day(1),
            day(31),
            vec![
                closed_entry(1, 3, "10", "2", None),
                closed_entry(2, 4, "8.5", "0.5", None),
            ],
        );

        assert_eq!(report.total_hours, dec("18.5"));
        assert_eq!(report.total_overtime, dec("2.5"));
        assert_eq!(report.total_late_minutes, 10);
        assert_eq!(report.total_break_minutes, 120);
    }

    #[test]
    fn test_csv_layout() {
        let report = AttendanceReport::from_entries(
            Some(3),
            Some("Hery Rabe".to_string()),
            day(1),
            day(31),
            vec![closed_entry(1, 3, "10.00", "2.00", Some("late bus, rain"))],
        );

        let csv = report.to_csv().unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], SUMMARY_HEADER.join(","));
        assert_eq!(lines[1], "3,Hery Rabe,2025-03-01,2025-03-31,10,2,5,60");
        assert_eq!(lines[2], ENTRY_HEADER.join(","));
        assert_eq!(
            lines[3],
            "1,2025-03-03,2025-03-03T08:00:00,2025-03-03T19:00:00,10,2,5,60,BADGE,late bus; rain"
        );
    }

    #[test]
    fn test_csv_open_entry_has_empty_cells() {
        let mut entry = closed_entry(4, 5, "0", "0", None);
        entry.check_out = None;
        entry.hours_worked = None;
        entry.overtime_hours = None;

        let report = AttendanceReport::from_entries(None, None, day(5), day(5), vec![entry]);
        let csv = report.to_csv().unwrap();
        let row = csv.lines().nth(3).unwrap();

        assert_eq!(row, "4,2025-03-05,2025-03-05T08:00:00,,,,5,60,BADGE,");
    }

    #[test]
    fn test_csv_quotes_notes_with_quotes() {
        let report = AttendanceReport::from_entries(
            None,
            None,
            day(3),
            day(3),
            vec![closed_entry(1, 3, "8", "0", Some(r#"said "hi", left"#))],
        );

        let csv = report.to_csv().unwrap();
        let row = csv.lines().nth(3).unwrap();
        assert!(row.ends_with(r#",BADGE,"said ""hi""; left""#));

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(csv.as_bytes());
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

        assert_eq!(records.len(), 4);
        assert_eq!(records[3].len(), 10);
        assert_eq!(&records[3][9], r#"said "hi"; left"#);
    }
}
