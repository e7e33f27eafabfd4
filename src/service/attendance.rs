//! The attendance clock.
//!
//! Each employee-day moves through `NoSession -> Open -> Closed`. Check-in
//! opens a session and records lateness; check-out closes it and records the
//! break, hours worked and overtime. The attendance rules are passed in on
//! every call.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{info, warn};

use crate::calculation::{close_session, late_minutes};
use crate::config::AttendanceConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeId, EntryType, TimeEntry};
use crate::store::{EmployeeDirectory, TimeEntryStore};

use super::report::AttendanceReport;

/// Records check-ins and check-outs and answers attendance queries.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use payroll_engine::config::AttendanceConfig;
/// use payroll_engine::models::{Employee, EntryType, SessionState};
/// use payroll_engine::service::AttendanceClock;
/// use payroll_engine::store::{InMemoryEmployeeDirectory, InMemoryTimeEntryStore};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: 1,
///     first_name: "Hery".into(),
///     last_name: "Rabe".into(),
///     employee_number: "EMP-001".into(),
///     job_title: "Driver".into(),
///     statutory_id: None,
///     hire_date: NaiveDate::from_ymd_opt(2022, 5, 2).unwrap(),
///     base_salary: Decimal::new(1_200_000, 0),
/// };
/// let clock = AttendanceClock::new(
///     Arc::new(InMemoryEmployeeDirectory::with_employees([employee])),
///     Arc::new(InMemoryTimeEntryStore::new()),
/// );
/// let config = AttendanceConfig::default();
/// let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
///
/// let open = clock
///     .check_in(1, EntryType::Badge, day.and_hms_opt(9, 45, 0).unwrap(), None, &config)
///     .unwrap();
/// assert_eq!(open.late_minutes, 45);
///
/// let closed = clock.check_out(1, day.and_hms_opt(18, 0, 0).unwrap(), &config).unwrap();
/// assert_eq!(closed.state(), SessionState::Closed);
/// ```
#[derive(Clone)]
pub struct AttendanceClock {
    employees: Arc<dyn EmployeeDirectory>,
    entries: Arc<dyn TimeEntryStore>,
}

impl AttendanceClock {
    /// Creates a clock over the given stores.
    pub fn new(employees: Arc<dyn EmployeeDirectory>, entries: Arc<dyn TimeEntryStore>) -> Self {
        Self { employees, entries }
    }

    /// Opens a session for the employee at `at`.
    ///
    /// # Errors
    ///
    /// - `NotFound` when the employee does not exist
    /// - `Conflict` when the employee already has an open session
    pub fn check_in(
        &self,
        employee_id: EmployeeId,
        entry_type: EntryType,
        at: NaiveDateTime,
        note: Option<String>,
        config: &AttendanceConfig,
    ) -> EngineResult<TimeEntry> {
        if self.employees.find_employee(employee_id)?.is_none() {
            return Err(EngineError::not_found("employee", employee_id));
        }

        let entry = TimeEntry {
            id: 0,
            employee_id,
            date: at.date(),
            check_in: Some(at),
            check_out: None,
            late_minutes: late_minutes(at, config.workday_start),
            break_minutes: 0,
            hours_worked: None,
            overtime_hours: None,
            entry_type,
            note,
        };

        let entry = self.entries.open_session(entry).inspect_err(|err| {
            warn!(employee_id, error = %err, "Check-in rejected");
        })?;

        info!(
            employee_id,
            entry_id = entry.id,
            entry_type = %entry.entry_type,
            late_minutes = entry.late_minutes,
            "Checked in"
        );
        Ok(entry)
    }

    /// Closes the employee's open session at `at`.
    ///
    /// The session keeps the date it was opened on, so a session may close
    /// on a later day.
    ///
    /// # Errors
    ///
    /// - `NotFound` when the employee has no open session
    /// - `Validation` when `at` precedes the check-in
    /// - `Conflict` when the session was closed concurrently
    pub fn check_out(
        &self,
        employee_id: EmployeeId,
        at: NaiveDateTime,
        config: &AttendanceConfig,
    ) -> EngineResult<TimeEntry> {
        let open = self
            .entries
            .find_open_session(employee_id)?
            .ok_or_else(|| EngineError::not_found("open session", employee_id))?;

        let check_in = open.check_in.ok_or_else(|| EngineError::InvalidState {
            message: format!("open entry {} has no check-in", open.id),
        })?;
        let closed = close_session(check_in, at, config)?;

        let entry = TimeEntry {
            check_out: Some(at),
            break_minutes: closed.break_minutes,
            hours_worked: Some(closed.hours_worked),
            overtime_hours: Some(closed.overtime_hours),
            ..open
        };
        let entry = self.entries.complete_session(entry)?;

        info!(
            employee_id,
            entry_id = entry.id,
            hours_worked = %closed.hours_worked,
            overtime_hours = %closed.overtime_hours,
            break_minutes = closed.break_minutes,
            "Checked out"
        );
        Ok(entry)
    }

    /// Entries dated `date`, for one employee or everyone.
    pub fn daily_entries(
        &self,
        employee_id: Option<EmployeeId>,
        date: NaiveDate,
    ) -> EngineResult<Vec<TimeEntry>> {
        self.entries.entries_for_day(employee_id, date)
    }

    /// Entries dated within `start..=end`.
    ///
    /// # Errors
    ///
    /// Returns `Validation` when `start` is after `end`.
    pub fn entries_in_range(
        &self,
        employee_id: Option<EmployeeId>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<TimeEntry>> {
        if start > end {
            return Err(EngineError::validation(
                "start_date",
                format!("start date {} is after end date {}", start, end),
            ));
        }
        self.entries.entries_in_range(employee_id, start, end)
    }

    /// Totals and entries over `start..=end`.
    ///
    /// # Errors
    ///
    /// - `Validation` when `start` is after `end`
    /// - `NotFound` when `employee_id` names an unknown employee
    pub fn report(
        &self,
        employee_id: Option<EmployeeId>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<AttendanceReport> {
        let employee_name = match employee_id {
            Some(id) => Some(
                self.employees
                    .find_employee(id)?
                    .ok_or_else(|| EngineError::not_found("employee", id))?
                    .full_name(),
            ),
            None => None,
        };

        let entries = self.entries_in_range(employee_id, start, end)?;
        Ok(AttendanceReport::from_entries(
            employee_id,
            employee_name,
            start,
            end,
            entries,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Employee, SessionState};
    use crate::store::{InMemoryEmployeeDirectory, InMemoryTimeEntryStore};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        day(d).and_hms_opt(h, m, 0).unwrap()
    }

    fn create_test_employee(id: EmployeeId) -> Employee {
        Employee {
            id,
            first_name: "Hery".to_string(),
            last_name: "Rabe".to_string(),
            employee_number: format!("EMP-{:03}", id),
            job_title: "Driver".to_string(),
            statutory_id: None,
            hire_date: NaiveDate::from_ymd_opt(2022, 5, 2).unwrap(),
            base_salary: dec("1200000"),
        }
    }

    fn create_test_clock() -> AttendanceClock {
        AttendanceClock::new(
            Arc::new(InMemoryEmployeeDirectory::with_employees([
                create_test_employee(1),
                create_test_employee(2),
            ])),
            Arc::new(InMemoryTimeEntryStore::new()),
        )
    }

    fn config() -> AttendanceConfig {
        AttendanceConfig::default()
    }

    #[test]
    fn test_check_in_records_lateness() {
        let clock = create_test_clock();
        let entry = clock
            .check_in(1, EntryType::Mobile, at(3, 9, 45), None, &config())
            .unwrap();

        assert_eq!(entry.late_minutes, 45);
        assert_eq!(entry.state(), SessionState::Open);
        assert_eq!(entry.date, day(3));
        assert_eq!(entry.entry_type, EntryType::Mobile);
    }

    #[test]
    fn test_check_in_while_open_conflicts() {
        let clock = create_test_clock();
        clock
            .check_in(1, EntryType::Badge, at(3, 8, 0), None, &config())
            .unwrap();

        let result = clock.check_in(1, EntryType::Badge, at(3, 8, 5), None, &config());
        assert!(matches!(result, Err(EngineError::Conflict { .. })));
    }

    #[test]
    fn test_check_in_unknown_employee() {
        let clock = create_test_clock();
        let result = clock.check_in(99, EntryType::Badge, at(3, 8, 0), None, &config());

        assert!(matches!(result, Err(EngineError::NotFound { .. })));
    }

    #[test]
    fn test_check_out_without_session_not_found() {
        let clock = create_test_clock();
        let result = clock.check_out(1, at(3, 17, 0), &config());

        assert!(matches!(result, Err(EngineError::NotFound { .. })));
    }

    #[test]
    fn test_overnight_session_closes_next_day() {
        let clock = create_test_clock();
        clock
            .check_in(1, EntryType::Badge, at(3, 22, 0), None, &config())
            .unwrap();

        let entry = clock.check_out(1, at(4, 6, 0), &config()).unwrap();

        assert_eq!(entry.date, day(3));
        assert_eq!(entry.break_minutes, 60);
        assert_eq!(entry.hours_worked, Some(dec("7")));
        assert_eq!(entry.overtime_hours, Some(Decimal::ZERO));

        // the employee can clock in again the next morning
        let next = clock
            .check_in(1, EntryType::Badge, at(4, 9, 0), None, &config())
            .unwrap();
        assert_eq!(next.state(), SessionState::Open);
    }

    #[test]
    fn test_check_out_computes_overtime() {
        let clock = create_test_clock();
        clock
            .check_in(1, EntryType::Badge, at(3, 8, 0), None, &config())
            .unwrap();

        let entry = clock.check_out(1, at(3, 19, 0), &config()).unwrap();

        assert_eq!(entry.state(), SessionState::Closed);
        assert_eq!(entry.break_minutes, 60);
        assert_eq!(entry.hours_worked, Some(dec("10")));
        assert_eq!(entry.overtime_hours, Some(dec("2")));
    }

    #[test]
    fn test_check_out_before_check_in_rejected() {
        let clock = create_test_clock();
        clock
            .check_in(1, EntryType::Badge, at(3, 10, 0), None, &config())
            .unwrap();

        let result = clock.check_out(1, at(3, 9, 0), &config());
        assert!(matches!(result, Err(EngineError::Validation { .. })));
        // the session stays open
        assert!(clock.check_out(1, at(3, 17, 0), &config()).is_ok());
    }

    #[test]
    fn test_sessions_are_per_employee() {
        let clock = create_test_clock();
        clock
            .check_in(1, EntryType::Badge, at(3, 8, 0), None, &config())
            .unwrap();
        clock
            .check_in(2, EntryType::Badge, at(3, 8, 0), None, &config())
            .unwrap();

        assert_eq!(clock.daily_entries(None, day(3)).unwrap().len(), 2);
        assert_eq!(clock.daily_entries(Some(2), day(3)).unwrap().len(), 1);
    }

    #[test]
    fn test_report_totals_and_range_validation() {
        let clock = create_test_clock();
        for d in [3, 4] {
            clock
                .check_in(1, EntryType::Badge, at(d, 9, 30), None, &config())
                .unwrap();
            clock.check_out(1, at(d, 19, 30), &config()).unwrap();
        }

        let report = clock.report(Some(1), day(1), day(31)).unwrap();
        assert_eq!(report.employee_name.as_deref(), Some("Hery Rabe"));
        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.total_hours, dec("18"));
        assert_eq!(report.total_overtime, dec("2"));
        assert_eq!(report.total_late_minutes, 60);

        let invalid = clock.report(Some(1), day(31), day(1));
        assert!(matches!(invalid, Err(EngineError::Validation { .. })));
    }
}
